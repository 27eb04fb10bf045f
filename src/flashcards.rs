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

use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;

/// Which cards a review session draws from.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every card.
    #[default]
    All,
    /// Cards never known, or missed more often than known.
    Weak,
    /// Cards known at least once and not missed more often than known.
    Strong,
}

impl FilterMode {
    /// Parse a mode name. Unknown names select every card.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "weak" => FilterMode::Weak,
            "strong" => FilterMode::Strong,
            _ => FilterMode::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Weak => "weak",
            FilterMode::Strong => "strong",
        }
    }

    fn accepts(&self, card: &Card) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Weak => card.is_weak(),
            FilterMode::Strong => card.is_strong(),
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The cards matching a mode, as indices into the full card list.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Partition {
    /// The mode actually applied, after falling back.
    pub mode: FilterMode,
    /// True when the requested mode matched nothing and every card was
    /// used instead.
    pub empty_filter: bool,
    indices: Vec<usize>,
}

impl Partition {
    /// Split the cards by `mode`. When nothing matches, fall back to every
    /// card.
    pub fn new(qa: &[Card], mode: FilterMode) -> Self {
        let indices: Vec<usize> = qa
            .iter()
            .enumerate()
            .filter(|(_, card)| mode.accepts(card))
            .map(|(index, _)| index)
            .collect();
        if indices.is_empty() && mode != FilterMode::All {
            Self {
                mode: FilterMode::All,
                empty_filter: true,
                indices: (0..qa.len()).collect(),
            }
        } else {
            Self {
                mode,
                empty_filter: false,
                indices,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The original index of the card at `pos`.
    pub fn index_at(&self, pos: usize) -> Option<usize> {
        self.indices.get(pos).copied()
    }

    /// Where the card with original index `index` sits in this partition.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == index)
    }

    /// Clamp a requested position into range. Must not be called on an
    /// empty partition.
    fn clamp(&self, requested: i64) -> usize {
        let last = (self.len() - 1) as i64;
        requested.clamp(0, last) as usize
    }
}

/// Where to land in a partition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Position {
    /// A requested position, clamped into range.
    At(i64),
    /// A uniformly random position.
    Random,
}

/// A card resolved within a partition, with what's needed to navigate
/// from it.
#[derive(Debug, PartialEq, Eq)]
pub struct Placement<'a> {
    pub card: &'a Card,
    /// Index into the full card list. Ratings address cards by this.
    pub index: usize,
    /// Position within the partition.
    pub pos: usize,
    pub partition_size: usize,
    pub total_size: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub mode: FilterMode,
    pub empty_filter: bool,
}

/// Resolve a position within the cards matching `mode`.
pub fn locate(qa: &[Card], mode: FilterMode, position: Position) -> Fallible<Placement<'_>> {
    locate_with(qa, mode, position, &mut rand::rng())
}

pub fn locate_with<'a, R: Rng>(
    qa: &'a [Card],
    mode: FilterMode,
    position: Position,
    rng: &mut R,
) -> Fallible<Placement<'a>> {
    if qa.is_empty() {
        return fail("invalid state: course has no questions.");
    }
    let partition = Partition::new(qa, mode);
    let size = partition.len();
    let pos = match position {
        Position::At(requested) => partition.clamp(requested),
        Position::Random => rng.random_range(0..size),
    };
    let index = match partition.index_at(pos) {
        Some(index) => index,
        None => return fail(format!("invalid state: no card at position {pos}.")),
    };
    Ok(Placement {
        card: &qa[index],
        index,
        pos,
        partition_size: size,
        total_size: qa.len(),
        has_prev: pos > 0,
        has_next: pos + 1 < size,
        mode: partition.mode,
        empty_filter: partition.empty_filter,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    /// Cards at indices 0 and 2 are strong; 1, 3 and 4 are weak.
    fn deck() -> Vec<Card> {
        vec![
            Card::with_counts(1, 0),
            Card::with_counts(0, 0),
            Card::with_counts(3, 2),
            Card::with_counts(1, 2),
            Card::with_counts(0, 4),
        ]
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(FilterMode::parse("weak"), FilterMode::Weak);
        assert_eq!(FilterMode::parse(" STRONG "), FilterMode::Strong);
        assert_eq!(FilterMode::parse("all"), FilterMode::All);
        assert_eq!(FilterMode::parse("bogus"), FilterMode::All);
    }

    #[test]
    fn test_partitions() {
        let qa = deck();
        let weak = Partition::new(&qa, FilterMode::Weak);
        assert_eq!(weak.len(), 3);
        assert_eq!(weak.index_at(0), Some(1));
        assert_eq!(weak.position_of(4), Some(2));
        assert_eq!(weak.position_of(0), None);
        let strong = Partition::new(&qa, FilterMode::Strong);
        assert_eq!(strong.len(), 2);
        assert_eq!(strong.index_at(1), Some(2));
        assert_eq!(weak.len() + strong.len(), qa.len());
    }

    #[test]
    fn test_locate_in_weak() {
        let qa = deck();
        let placement = locate(&qa, FilterMode::Weak, Position::At(1)).unwrap();
        assert_eq!(placement.index, 3);
        assert_eq!(placement.pos, 1);
        assert_eq!(placement.partition_size, 3);
        assert_eq!(placement.total_size, 5);
        assert!(placement.has_prev);
        assert!(placement.has_next);
        assert_eq!(placement.mode, FilterMode::Weak);
        assert!(!placement.empty_filter);
        assert_eq!(placement.card, &qa[3]);
    }

    #[test]
    fn test_locate_clamps() {
        let qa = deck();
        let placement = locate(&qa, FilterMode::Strong, Position::At(99)).unwrap();
        assert_eq!(placement.pos, 1);
        assert_eq!(placement.index, 2);
        assert!(placement.has_prev);
        assert!(!placement.has_next);

        let placement = locate(&qa, FilterMode::All, Position::At(-3)).unwrap();
        assert_eq!(placement.pos, 0);
        assert_eq!(placement.index, 0);
        assert!(!placement.has_prev);
        assert!(placement.has_next);
    }

    #[test]
    fn test_empty_filter_falls_back_to_all() {
        let qa = vec![Card::with_counts(1, 0), Card::with_counts(2, 1)];
        let placement = locate(&qa, FilterMode::Weak, Position::At(1)).unwrap();
        assert!(placement.empty_filter);
        assert_eq!(placement.mode, FilterMode::All);
        assert_eq!(placement.partition_size, 2);
        assert_eq!(placement.index, 1);
    }

    #[test]
    fn test_empty_deck_is_invalid() {
        let result = locate(&[], FilterMode::All, Position::At(0));
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "error: invalid state: course has no questions."
        );
    }

    #[test]
    fn test_random_stays_in_partition() {
        let qa = deck();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let placement =
                locate_with(&qa, FilterMode::Weak, Position::Random, &mut rng).unwrap();
            assert!(placement.pos < 3);
            assert!(qa[placement.index].is_weak());
        }
    }

    #[test]
    fn test_locate_is_repeatable() {
        let qa = deck();
        let a = locate(&qa, FilterMode::Weak, Position::At(2)).unwrap();
        let b = locate(&qa, FilterMode::Weak, Position::At(2)).unwrap();
        assert_eq!(a, b);
    }
}
