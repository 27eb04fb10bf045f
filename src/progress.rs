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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

use crate::types::course::Course;

/// Topic count at which the topics sub-score saturates.
const TOPICS_FULL: f64 = 8.0;

/// Question count at which the questions sub-score saturates.
const QUESTIONS_FULL: f64 = 30.0;

/// Block count at which the plan sub-score saturates.
const BLOCKS_FULL: f64 = 10.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub enum ProgressLabel {
    #[default]
    #[serde(rename = "starting")]
    Starting,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "well underway")]
    WellUnderway,
    #[serde(rename = "exam-ready")]
    ExamReady,
}

impl ProgressLabel {
    pub fn from_pct(pct: u8) -> Self {
        if pct < 25 {
            ProgressLabel::Starting
        } else if pct < 60 {
            ProgressLabel::InProgress
        } else if pct < 85 {
            ProgressLabel::WellUnderway
        } else {
            ProgressLabel::ExamReady
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressLabel::Starting => "starting",
            ProgressLabel::InProgress => "in progress",
            ProgressLabel::WellUnderway => "well underway",
            ProgressLabel::ExamReady => "exam-ready",
        }
    }
}

impl Display for ProgressLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five sub-scores, each in `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SubScores {
    pub topics: f64,
    pub questions: f64,
    pub blocks: f64,
    pub summaries: f64,
    pub mastery: f64,
}

impl SubScores {
    pub fn mean(&self) -> f64 {
        (self.topics + self.questions + self.blocks + self.summaries + self.mastery) / 5.0
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Progress {
    pub scores: SubScores,
    pub pct: u8,
    pub label: ProgressLabel,
    pub mastered: usize,
    pub total: usize,
}

/// Score how far along a course is.
pub fn score(course: &Course) -> Progress {
    let topics = course.topics.len();
    let total = course.qa.len();
    let mastered = course.qa.iter().filter(|card| card.is_strong()).count();

    let summaries = if topics > 0 {
        ratio(course.summaries.len() as f64, topics as f64)
    } else {
        0.0
    };
    let mastery = if total > 0 {
        ratio(mastered as f64, total as f64)
    } else {
        0.0
    };
    let scores = SubScores {
        topics: ratio(topics as f64, TOPICS_FULL),
        questions: ratio(total as f64, QUESTIONS_FULL),
        blocks: ratio(course.blocks.len() as f64, BLOCKS_FULL),
        summaries,
        mastery,
    };
    let pct = to_pct(scores.mean());
    Progress {
        scores,
        pct,
        label: ProgressLabel::from_pct(pct),
        mastered,
        total,
    }
}

/// Write the progress fields onto the course.
pub fn apply(course: &mut Course, progress: &Progress) {
    course.progress_pct = progress.pct;
    course.progress_label = progress.label;
    course.mastered_questions = progress.mastered;
    course.total_questions = progress.total;
}

fn ratio(count: f64, full: f64) -> f64 {
    (count / full).clamp(0.0, 1.0)
}

/// Round a fraction to a whole percentage, ties to even.
pub fn to_pct(fraction: f64) -> u8 {
    (fraction * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}
