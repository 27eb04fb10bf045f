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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use crate::cmd::flashcards::render_flashcard;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::flashcards::FilterMode;
use crate::flashcards::Position;
use crate::flashcards::locate;
use crate::rating::Rating;
use crate::rating::rate_and_advance;
use crate::types::date::Date;

const ACTIONS: &str =
    "[k] knew it, [d] didn't know, [n] next, [p] previous, [r] random, [m MODE] mode, [q] quit";

pub fn drill(directory: Option<String>, id: usize, mode: FilterMode, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let stdin = stdin();
    let stdout = stdout();
    let session = run_drill(&mut coll, id, mode, today, stdin.lock(), stdout.lock())?;
    log::debug!(
        "Drill finished: {} known, {} missed.",
        session.known,
        session.missed
    );
    Ok(())
}

/// Ratings recorded during one drill.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub known: usize,
    pub missed: usize,
}

/// Run the review loop until the input ends or the user quits. Every rating
/// is saved before the next card is shown.
pub fn run_drill<R: BufRead, W: Write>(
    coll: &mut Collection,
    id: usize,
    mode: FilterMode,
    today: Date,
    mut input: R,
    mut output: W,
) -> Fallible<Session> {
    let mut session = Session::default();
    let mut mode = mode;
    let mut position = Position::At(0);
    loop {
        let (index, pos) = {
            let placement = locate(&coll.course(id)?.qa, mode, position)?;
            write!(output, "{}", render_flashcard(&placement, false))?;
            (placement.index, placement.pos)
        };
        // Pin the position so that an unknown command shows the same card.
        position = Position::At(pos as i64);
        writeln!(output, "Press enter to reveal the answer, q to quit.")?;
        output.flush()?;
        let Some(line) = read_command(&mut input)? else {
            break;
        };
        if line == "q" {
            break;
        }

        writeln!(output, "A: {}", coll.course(id)?.qa[index].answer())?;
        writeln!(output, "{ACTIONS}")?;
        output.flush()?;
        let Some(line) = read_command(&mut input)? else {
            break;
        };
        let rating = match line.as_str() {
            "k" => Some(Rating::Know),
            "d" => Some(Rating::DontKnow),
            _ => None,
        };
        if let Some(rating) = rating {
            let course = coll.course_mut(id)?;
            let (_, next) = rate_and_advance(&mut course.qa, index as i64, rating, mode)?;
            coll.refresh(today);
            coll.save_courses()?;
            match rating {
                Rating::Know => session.known += 1,
                Rating::DontKnow => session.missed += 1,
            }
            mode = next.mode;
            position = Position::At(next.pos as i64);
            continue;
        }
        match line.as_str() {
            "n" => position = Position::At(pos as i64 + 1),
            "p" => position = Position::At(pos as i64 - 1),
            "r" => position = Position::Random,
            "q" => break,
            other => match other.strip_prefix("m ") {
                Some(name) => {
                    mode = FilterMode::parse(name);
                    position = Position::At(0);
                }
                None => writeln!(output, "Unknown command {other:?}.")?,
            },
        }
    }
    writeln!(
        output,
        "Session over: {} known, {} missed.",
        session.known, session.missed
    )?;
    Ok(session)
}

/// Read one trimmed, lowercased line. `None` at the end of the input.
fn read_command<R: BufRead>(input: &mut R) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::NaiveDate;
    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::*;
    use crate::types::course::Course;

    fn day() -> Date {
        Date::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    fn setup() -> Fallible<(TempDir, Collection)> {
        let dir = tempdir()?;
        let mut coll = Collection::new(Some(dir.path().display().to_string()))?;
        let mut course = Course::new("Biology", "Bachelor", "");
        course.add_question("Q0", "A0")?;
        course.add_question("Q1", "A1")?;
        course.add_question("Q2", "A2")?;
        coll.add_course(course);
        Ok((dir, coll))
    }

    fn run(coll: &mut Collection, mode: FilterMode, script: &str) -> Fallible<(Session, String)> {
        let mut output: Vec<u8> = Vec::new();
        let session = run_drill(coll, 0, mode, day(), Cursor::new(script), &mut output)?;
        Ok((session, String::from_utf8_lossy(&output).into_owned()))
    }

    #[test]
    fn test_rate_through_the_deck() -> Fallible<()> {
        let (dir, mut coll) = setup()?;
        let (session, output) = run(&mut coll, FilterMode::All, "\nk\n\nd\n\nk\nq\n")?;
        assert_eq!(session, Session { known: 2, missed: 1 });
        assert!(output.contains("A: A0"));
        assert!(output.contains("A: A2"));
        assert!(output.ends_with("Session over: 2 known, 1 missed.\n"));

        let saved = Collection::new(Some(dir.path().display().to_string()))?;
        let qa = &saved.course(0)?.qa;
        assert_eq!((qa[0].correct(), qa[0].wrong()), (1, 0));
        assert_eq!((qa[1].correct(), qa[1].wrong()), (0, 1));
        assert_eq!((qa[2].correct(), qa[2].wrong()), (1, 0));
        Ok(())
    }

    #[test]
    fn test_weak_drill_after_card_turns_strong() -> Fallible<()> {
        let (_dir, mut coll) = setup()?;
        // Knowing Q0 takes it out of the weak cards; the drill moves on to
        // the second weak position.
        let (_, output) = run(&mut coll, FilterMode::Weak, "\nk\n\nq\n")?;
        assert!(output.contains("Card 2/2 (weak, 3 total, index 2)\nQ: Q2"));
        Ok(())
    }

    #[test]
    fn test_navigation() -> Fallible<()> {
        let (_dir, mut coll) = setup()?;
        let (session, output) = run(&mut coll, FilterMode::All, "\nn\n\np\n\np\n\nx\nq\n")?;
        assert_eq!(session, Session::default());
        assert!(output.contains("Q: Q1"));
        assert!(output.contains("Unknown command \"x\"."));
        assert!(!output.contains("Q: Q2"));
        Ok(())
    }

    #[test]
    fn test_switch_mode() -> Fallible<()> {
        let (_dir, mut coll) = setup()?;
        let (_, output) = run(&mut coll, FilterMode::All, "\nm strong\n")?;
        assert!(output.contains("No cards match the filter, showing all cards."));
        Ok(())
    }

    #[test]
    fn test_ends_with_input() -> Fallible<()> {
        let (_dir, mut coll) = setup()?;
        let (session, output) = run(&mut coll, FilterMode::All, "")?;
        assert_eq!(session, Session::default());
        assert!(output.contains("Q: Q0"));
        Ok(())
    }
}
