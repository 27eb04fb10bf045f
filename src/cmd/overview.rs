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

use crate::cmd::status::OutputFormat;
use crate::cmd::status::describe_days;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::overview::Agenda;
use crate::overview::Stats;
use crate::overview::agenda;
use crate::overview::exam_overview;
use crate::overview::stats;
use crate::types::course::Course;
use crate::types::date::Date;

pub fn print_exams(directory: Option<String>, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    print!("{}", render_exams(&coll.courses));
    Ok(())
}

pub fn print_agenda(directory: Option<String>, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    print!("{}", render_agenda(&agenda(&coll.courses)));
    Ok(())
}

pub fn print_stats(directory: Option<String>, format: OutputFormat, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    let stats = stats(&coll.courses);
    match format {
        OutputFormat::Text => print!("{}", render_stats(&stats)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

fn render_exams(courses: &[Course]) -> String {
    let overview = exam_overview(courses);
    let mut out = String::new();
    let sections = [
        ("Upcoming exams", &overview.upcoming),
        ("Past exams", &overview.past),
        ("No exam date", &overview.no_date),
    ];
    for (title, ids) in sections {
        out.push_str(&format!("{title}:\n"));
        if ids.is_empty() {
            out.push_str("  none\n");
        }
        for &id in ids.iter() {
            let course = &courses[id];
            let line = match course.days_to_exam {
                Some(_) => format!(
                    "  [{id}] {} ({}): {}, {}\n",
                    course.name,
                    course.exam_date,
                    describe_days(course.days_to_exam, "exam"),
                    course.risk_status
                ),
                None => format!("  [{id}] {}\n", course.name),
            };
            out.push_str(&line);
        }
    }
    out
}

fn render_agenda(agenda: &Agenda) -> String {
    let mut out = String::from("Today's study blocks:\n");
    if agenda.blocks.is_empty() {
        out.push_str("  none\n");
    }
    for item in agenda.blocks.iter() {
        out.push_str(&format!(
            "  [{}] {}: {} ({})\n",
            item.course_id, item.course_name, item.title, item.duration
        ));
    }
    out.push_str("Focus courses:\n");
    if agenda.focus.is_empty() {
        out.push_str("  none\n");
    }
    for focus in agenda.focus.iter() {
        out.push_str(&format!(
            "  [{}] {} ({}): {}, {}% {}, {}\n",
            focus.course_id,
            focus.name,
            focus.tag,
            describe_days(Some(focus.days_to_exam), "exam"),
            focus.progress_pct,
            focus.progress_label,
            focus.risk_status
        ));
    }
    out
}

fn render_stats(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Courses: {}\n", stats.course_count));
    out.push_str(&format!(
        "Questions: {} ({} mastered, {}%)\n",
        stats.total_questions, stats.mastered_questions, stats.mastery_pct
    ));
    out.push_str(&format!(
        "Exams: {} upcoming, {} past, {} without a date\n",
        stats.upcoming_exams, stats.past_exams, stats.exams_without_date
    ));
    out.push_str(&format!(
        "Alarms: {}, needing focus: {}\n",
        stats.alarm_courses, stats.focus_courses
    ));
    if !stats.top_courses.is_empty() {
        out.push_str("Most questions:\n");
        for course in stats.top_courses.iter() {
            out.push_str(&format!(
                "  {} ({}): {}/{} mastered, {}%, {}\n",
                course.name,
                course.tag,
                course.mastered_questions,
                course.total_questions,
                course.progress_pct,
                course.risk_status
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::refresh::refresh_all;
    use crate::types::card::Card;
    use crate::types::course::StudyBlock;

    fn courses() -> Vec<Course> {
        let today = Date::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let mut soon = Course::new("Anatomy", "Medicine", "2025-03-04");
        soon.blocks = vec![StudyBlock::new("Bones", "30 min", "Today")];
        let past = Course::new("Law", "Minor", "2025-02-20");
        let mut undated = Course::new("Art", "Elective", "");
        undated.qa = vec![Card::new("Q", "A")];
        let mut courses = vec![soon, past, undated];
        refresh_all(&mut courses, today);
        courses
    }

    #[test]
    fn test_render_exams() {
        assert_eq!(
            render_exams(&courses()),
            "Upcoming exams:\n  [0] Anatomy (2025-03-04): exam in 3 days, exam alarm\n\
             Past exams:\n  [1] Law (2025-02-20): exam was 9 days ago, exam passed\n\
             No exam date:\n  [2] Art\n"
        );
        assert_eq!(
            render_exams(&[]),
            "Upcoming exams:\n  none\nPast exams:\n  none\nNo exam date:\n  none\n"
        );
    }

    #[test]
    fn test_render_agenda() {
        let text = render_agenda(&agenda(&courses()));
        assert!(text.starts_with("Today's study blocks:\n  [0] Anatomy: Bones (30 min)\n"));
        assert!(text.contains("Focus courses:\n  [0] Anatomy (Medicine): exam in 3 days"));
    }

    #[test]
    fn test_render_stats() {
        let text = render_stats(&stats(&courses()));
        assert!(text.starts_with("Courses: 3\nQuestions: 1 (0 mastered, 0%)\n"));
        assert!(text.contains("Exams: 1 upcoming, 1 past, 1 without a date\n"));
        assert!(text.contains("Alarms: 1, needing focus: 1\n"));
        assert!(text.contains("Most questions:\n  Art (Elective): 0/1 mastered"));
    }
}
