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
use crate::generate::DEMO_COURSE;
use crate::generate::demo_course;
use crate::generate::generate_plan;
use crate::generate::generate_questions;
use crate::types::date::Date;

/// Add template questions. Without `max`, the configured limit applies.
pub fn questions(
    directory: Option<String>,
    id: usize,
    max: Option<usize>,
    today: Date,
) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let max = max.unwrap_or(coll.config.generate.max_questions);
    let created = generate_questions(coll.course_mut(id)?, max, &mut rand::rng());
    coll.refresh(today);
    coll.save_courses()?;
    println!("Generated {created} questions.");
    Ok(())
}

/// Add template study blocks. Without `max`, the configured limit applies.
pub fn plan(directory: Option<String>, id: usize, max: Option<usize>, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let max = max.unwrap_or(coll.config.generate.max_blocks);
    let created = generate_plan(coll.course_mut(id)?, max, &mut rand::rng());
    coll.refresh(today);
    coll.save_courses()?;
    println!("Generated {created} study blocks.");
    Ok(())
}

/// Add the demo course, unless it's already there.
pub fn demo(directory: Option<String>, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    if coll.courses.iter().any(|c| c.name == DEMO_COURSE) {
        println!("The demo course already exists.");
        return Ok(());
    }
    let id = coll.add_course(demo_course());
    coll.refresh(today);
    coll.save_courses()?;
    println!("Added the demo course as course {id}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::config::CONFIG_FILE;
    use crate::types::course::Course;

    fn day() -> Date {
        Date::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    #[test]
    fn test_demo_is_added_once() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().display().to_string();
        demo(Some(path.clone()), day())?;
        demo(Some(path.clone()), day())?;
        let coll = Collection::new(Some(path))?;
        assert_eq!(coll.courses.len(), 1);
        assert_eq!(coll.courses[0].name, DEMO_COURSE);
        Ok(())
    }

    #[test]
    fn test_configured_limits() -> Fallible<()> {
        let dir = tempdir()?;
        write(
            dir.path().join(CONFIG_FILE),
            "[generate]\nmax_questions = 2\nmax_blocks = 3\n",
        )?;
        let path = dir.path().display().to_string();
        let mut coll = Collection::new(Some(path.clone()))?;
        let mut course = Course::new("Biology", "Bachelor", "");
        course.topics = vec!["Cells".to_string(), "Genes".to_string()];
        coll.add_course(course);
        coll.save_courses()?;

        questions(Some(path.clone()), 0, None, day())?;
        plan(Some(path.clone()), 0, None, day())?;
        questions(Some(path.clone()), 0, Some(1), day())?;
        let coll = Collection::new(Some(path.clone()))?;
        assert_eq!(coll.course(0)?.qa.len(), 3);
        assert_eq!(coll.course(0)?.blocks.len(), 3);
        assert!(questions(Some(path), 1, None, day()).is_err());
        Ok(())
    }
}
