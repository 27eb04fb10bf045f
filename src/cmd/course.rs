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

use crate::cmd::status::describe_days;
use crate::cmd::status::status_line;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::progress::SubScores;
use crate::progress::score;
use crate::progress::to_pct;
use crate::types::course::Course;
use crate::types::course::CourseEdit;
use crate::types::date::Date;

pub fn new_course(
    directory: Option<String>,
    name: &str,
    tag: &str,
    exam_date: &str,
    chapters: &str,
    questions: &str,
    today: Date,
) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let course = Course::create(name, tag, exam_date, chapters, questions)?;
    if !exam_date.trim().is_empty() && Date::parse(exam_date).is_none() {
        log::warn!("Exam date {exam_date:?} is not YYYY-MM-DD; the course has no exam date.");
    }
    let id = coll.add_course(course);
    coll.refresh(today);
    coll.save_courses()?;
    println!("Added course {id}.");
    Ok(())
}

pub fn edit_course(
    directory: Option<String>,
    id: usize,
    edit: CourseEdit,
    today: Date,
) -> Fallible<()> {
    update_course(directory, id, today, |course| {
        course.edit(edit);
        Ok(())
    })?;
    println!("Updated course {id}.");
    Ok(())
}

pub fn delete_course(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let course = coll.delete_course(id)?;
    coll.refresh(today);
    coll.save_courses()?;
    println!("Deleted course {:?}.", course.name);
    Ok(())
}

pub fn show_course(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    let course = coll.course(id)?;
    print!("{}", render_course(id, course));
    println!("{}", render_scores(&score(course).scores));
    Ok(())
}

pub fn add_topic(directory: Option<String>, id: usize, title: &str, today: Date) -> Fallible<()> {
    update_course(directory, id, today, |course| course.add_topic(title))?;
    println!("Added topic.");
    Ok(())
}

pub fn clear_topics(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    update_course(directory, id, today, |course| {
        course.clear_topics();
        Ok(())
    })?;
    println!("Cleared topics.");
    Ok(())
}

pub fn add_question(
    directory: Option<String>,
    id: usize,
    question: &str,
    answer: &str,
    today: Date,
) -> Fallible<()> {
    let index = update_course(directory, id, today, |course| {
        course.add_question(question, answer)
    })?;
    println!("Added question {index}.");
    Ok(())
}

pub fn clear_questions(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    update_course(directory, id, today, |course| {
        course.clear_questions();
        Ok(())
    })?;
    println!("Cleared questions.");
    Ok(())
}

pub fn add_block(
    directory: Option<String>,
    id: usize,
    title: &str,
    duration: &str,
    when: &str,
    today: Date,
) -> Fallible<()> {
    update_course(directory, id, today, |course| {
        course.add_block(title, duration, when)
    })?;
    println!("Added study block.");
    Ok(())
}

pub fn clear_plan(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    update_course(directory, id, today, |course| {
        course.clear_plan();
        Ok(())
    })?;
    println!("Cleared study plan.");
    Ok(())
}

pub fn set_summary(
    directory: Option<String>,
    id: usize,
    topic: &str,
    text: &str,
    today: Date,
) -> Fallible<()> {
    update_course(directory, id, today, |course| course.set_summary(topic, text))?;
    println!("Saved summary.");
    Ok(())
}

/// Load the collection, change one course, refresh, and save.
pub fn update_course<T>(
    directory: Option<String>,
    id: usize,
    today: Date,
    change: impl FnOnce(&mut Course) -> Fallible<T>,
) -> Fallible<T> {
    let mut coll: Collection = Collection::new(directory)?;
    let result = change(coll.course_mut(id)?)?;
    coll.refresh(today);
    coll.save_courses()?;
    Ok(result)
}

fn render_course(id: usize, course: &Course) -> String {
    let mut out = String::new();
    out.push_str(&status_line(id, course));
    out.push('\n');
    let exam_date = match course.exam_date.as_str() {
        "" => "none",
        date => date,
    };
    out.push_str(&format!(
        "Exam date: {exam_date} ({})\n",
        describe_days(course.days_to_exam, "exam")
    ));
    out.push_str(&format!("Chapters: {}\n", course.chapters));
    out.push_str(&format!("Questions: {}\n", course.questions));
    if !course.files.is_empty() {
        out.push_str("Files:\n");
        for file in course.files.iter() {
            out.push_str(&format!("  - {file}\n"));
        }
    }
    out.push_str(&format!("Topics ({}):\n", course.topics.len()));
    for topic in course.topics.iter() {
        out.push_str(&format!("  - {topic}\n"));
        if let Some(summary) = course.summaries.get(topic) {
            out.push_str(&format!("    {summary}\n"));
        }
    }
    out.push_str(&format!("Cards ({}):\n", course.qa.len()));
    for (index, card) in course.qa.iter().enumerate() {
        out.push_str(&format!(
            "  {index}. {} [{}/{}]\n",
            card.question(),
            card.correct(),
            card.wrong()
        ));
    }
    out.push_str(&format!("Study plan ({}):\n", course.blocks.len()));
    for block in course.blocks.iter() {
        out.push_str(&format!(
            "  - {} ({}, {})\n",
            block.title, block.duration, block.when
        ));
    }
    out
}

fn render_scores(scores: &SubScores) -> String {
    format!(
        "Progress: topics {}%, questions {}%, plan {}%, summaries {}%, mastery {}%",
        to_pct(scores.topics),
        to_pct(scores.questions),
        to_pct(scores.blocks),
        to_pct(scores.summaries),
        to_pct(scores.mastery)
    )
}
