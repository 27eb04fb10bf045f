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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::flashcards::FilterMode;
use crate::flashcards::Placement;
use crate::flashcards::Position;
use crate::flashcards::locate;
use crate::rating::Rating;
use crate::rating::rate_and_advance;
use crate::types::date::Date;

pub fn show_flashcard(
    directory: Option<String>,
    id: usize,
    mode: FilterMode,
    position: Position,
) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let course = coll.course(id)?;
    let placement = locate(&course.qa, mode, position)?;
    print!("{}", render_flashcard(&placement, false));
    Ok(())
}

pub fn rate(
    directory: Option<String>,
    id: usize,
    index: i64,
    rating: Rating,
    mode: FilterMode,
    today: Date,
) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let course = coll.course_mut(id)?;
    let (index, next) = rate_and_advance(&mut course.qa, index, rating, mode)?;
    let card = &course.qa[index];
    println!(
        "Card {index}: {} known, {} missed ({}).",
        card.correct(),
        card.wrong(),
        if card.is_strong() { "strong" } else { "weak" }
    );
    coll.refresh(today);
    coll.save_courses()?;
    if next.empty_filter {
        println!("No cards match the filter, showing all cards.");
    }
    println!("Next: --mode {} --pos {}", next.mode, next.pos);
    Ok(())
}

/// Walk through every card with its answer, like a practice exam.
pub fn practice(directory: Option<String>, id: usize, question: i64) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let course = coll.course(id)?;
    let placement = locate(&course.qa, FilterMode::All, Position::At(question))?;
    print!("{}", render_flashcard(&placement, true));
    Ok(())
}

/// Render a card. The answer is only shown when `reveal` is set.
pub fn render_flashcard(placement: &Placement, reveal: bool) -> String {
    let mut out = String::new();
    if placement.empty_filter {
        out.push_str("No cards match the filter, showing all cards.\n");
    }
    out.push_str(&format!(
        "Card {}/{} ({}, {} total, index {})\n",
        placement.pos + 1,
        placement.partition_size,
        placement.mode,
        placement.total_size,
        placement.index
    ));
    out.push_str(&format!("Q: {}\n", placement.card.question()));
    if reveal {
        out.push_str(&format!("A: {}\n", placement.card.answer()));
    }
    let mut nav: Vec<String> = Vec::new();
    if placement.has_prev {
        nav.push(format!("previous: --pos {}", placement.pos - 1));
    }
    if placement.has_next {
        nav.push(format!("next: --pos {}", placement.pos + 1));
    }
    if !nav.is_empty() {
        out.push_str(&format!("({})\n", nav.join(", ")));
    }
    out
}
