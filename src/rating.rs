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

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::flashcards::FilterMode;
use crate::flashcards::Partition;
use crate::types::card::Card;

/// The outcome of reviewing a single card.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Knew it.
    Know,
    /// Didn't know it.
    #[value(name = "dontknow")]
    DontKnow,
}

/// Where to go after a rating.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NextCard {
    pub mode: FilterMode,
    pub pos: usize,
    pub empty_filter: bool,
}

/// Record a rating on the card at `index`, clamped into range. Returns the
/// index actually rated.
pub fn rate_card(qa: &mut [Card], index: i64, rating: Rating) -> Fallible<usize> {
    if qa.is_empty() {
        return fail("invalid state: course has no questions.");
    }
    let last = (qa.len() - 1) as i64;
    let index = index.clamp(0, last) as usize;
    qa[index].record(rating);
    log::debug!(
        "Rated card {index} {:?}: correct={} wrong={}",
        rating,
        qa[index].correct(),
        qa[index].wrong()
    );
    Ok(index)
}

/// The position to show after rating the card at `index`, recomputed
/// against the cards as they are now. Advances past the rated card if
/// anything follows it. A card that no longer matches the mode counts as
/// being at the first position.
pub fn next_position(qa: &[Card], mode: FilterMode, index: usize) -> Fallible<NextCard> {
    let partition = Partition::new(qa, mode);
    if partition.is_empty() {
        return fail("invalid state: course has no questions.");
    }
    let last = partition.len() - 1;
    let pos = match partition.position_of(index) {
        Some(pos) => (pos + 1).min(last),
        // The card left the partition: continue as if from the first slot.
        None => 1.min(last),
    };
    Ok(NextCard {
        mode: partition.mode,
        pos,
        empty_filter: partition.empty_filter,
    })
}

/// Rate a card and work out where the review continues.
pub fn rate_and_advance(
    qa: &mut [Card],
    index: i64,
    rating: Rating,
    mode: FilterMode,
) -> Fallible<(usize, NextCard)> {
    let index = rate_card(qa, index, rating)?;
    let next = next_position(qa, mode, index)?;
    Ok((index, next))
}
