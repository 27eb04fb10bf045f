// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::rating::Rating;
use crate::types::lenient;

/// A question/answer pair with its review counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "lenient::text")]
    question: String,
    #[serde(default, deserialize_with = "lenient::text")]
    answer: String,
    /// How many times the card was rated "know".
    #[serde(default, deserialize_with = "lenient::counter")]
    correct: u32,
    /// How many times the card was rated "dontknow".
    #[serde(default, deserialize_with = "lenient::counter")]
    wrong: u32,
}

/// Which side of the weak/strong split a card falls on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Standing {
    Strong,
    Weak,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            correct: 0,
            wrong: 0,
        }
    }

    #[cfg(test)]
    pub fn with_counts(correct: u32, wrong: u32) -> Self {
        Self {
            question: format!("Q {correct}/{wrong}"),
            answer: "A".to_string(),
            correct,
            wrong,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    /// A card is strong once it has been known at least once and not
    /// missed more often than known. Every other card is weak.
    pub fn standing(&self) -> Standing {
        if self.correct > 0 && self.correct >= self.wrong {
            Standing::Strong
        } else {
            Standing::Weak
        }
    }

    pub fn is_strong(&self) -> bool {
        self.standing() == Standing::Strong
    }

    pub fn is_weak(&self) -> bool {
        self.standing() == Standing::Weak
    }

    /// Apply a single review.
    pub fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Know => self.correct = self.correct.saturating_add(1),
            Rating::DontKnow => self.wrong = self.wrong.saturating_add(1),
        }
    }
}
