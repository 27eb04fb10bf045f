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

//! Views across the whole collection. All of these expect the courses to
//! have been refreshed first.

use serde::Serialize;

use crate::progress::ProgressLabel;
use crate::progress::to_pct;
use crate::risk::RiskStatus;
use crate::types::course::Course;

/// The most focus courses shown on the agenda.
const MAX_FOCUS_COURSES: usize = 3;

/// The most courses in the statistics' top list.
const MAX_TOP_COURSES: usize = 5;

/// Course ids grouped by where their exam stands.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExamOverview {
    /// Exams today or later, soonest first.
    pub upcoming: Vec<usize>,
    /// Exams in the past, most recent first.
    pub past: Vec<usize>,
    /// Courses without an exam date, by name.
    pub no_date: Vec<usize>,
}

pub fn exam_overview(courses: &[Course]) -> ExamOverview {
    let mut overview = ExamOverview::default();
    for (id, course) in courses.iter().enumerate() {
        match course.days_to_exam {
            None => overview.no_date.push(id),
            Some(days) if days < 0 => overview.past.push(id),
            Some(_) => overview.upcoming.push(id),
        }
    }
    overview
        .upcoming
        .sort_by_key(|&id| courses[id].days_to_exam.unwrap_or(i64::MAX));
    overview
        .past
        .sort_by_key(|&id| std::cmp::Reverse(courses[id].days_to_exam.unwrap_or(0)));
    overview
        .no_date
        .sort_by_key(|&id| courses[id].name.to_lowercase());
    overview
}

/// A study block planned for today.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct AgendaItem {
    pub course_id: usize,
    pub course_name: String,
    pub title: String,
    pub duration: String,
    pub when: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FocusCourse {
    pub course_id: usize,
    pub name: String,
    pub tag: String,
    pub days_to_exam: i64,
    pub risk_status: RiskStatus,
    pub progress_pct: u8,
    pub progress_label: ProgressLabel,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Agenda {
    pub blocks: Vec<AgendaItem>,
    pub focus: Vec<FocusCourse>,
}

/// Today's blocks across all courses, and the few courses most in need of
/// attention.
pub fn agenda(courses: &[Course]) -> Agenda {
    let mut blocks = Vec::new();
    for (course_id, course) in courses.iter().enumerate() {
        for block in course.blocks.iter().filter(|b| b.is_today()) {
            blocks.push(AgendaItem {
                course_id,
                course_name: course.name.clone(),
                title: block.title.clone(),
                duration: block.duration.clone(),
                when: block.when.clone(),
            });
        }
    }

    let mut focus: Vec<FocusCourse> = courses
        .iter()
        .enumerate()
        .filter_map(|(course_id, course)| {
            let days = course.days_to_exam?;
            if days < 0 || !course.risk_status.needs_focus() {
                return None;
            }
            Some(FocusCourse {
                course_id,
                name: course.name.clone(),
                tag: course.tag.clone(),
                days_to_exam: days,
                risk_status: course.risk_status,
                progress_pct: course.progress_pct,
                progress_label: course.progress_label,
            })
        })
        .collect();
    focus.sort_by_key(|f| f.days_to_exam);
    focus.truncate(MAX_FOCUS_COURSES);

    Agenda { blocks, focus }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub course_count: usize,
    pub total_questions: usize,
    pub mastered_questions: usize,
    pub mastery_pct: u8,
    pub upcoming_exams: usize,
    pub past_exams: usize,
    pub exams_without_date: usize,
    pub alarm_courses: usize,
    pub focus_courses: usize,
    pub top_courses: Vec<CourseCounts>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCounts {
    pub name: String,
    pub tag: String,
    pub total_questions: usize,
    pub mastered_questions: usize,
    pub progress_pct: u8,
    pub risk_status: RiskStatus,
}

pub fn stats(courses: &[Course]) -> Stats {
    let total_questions: usize = courses.iter().map(|c| c.total_questions).sum();
    let mastered_questions: usize = courses.iter().map(|c| c.mastered_questions).sum();
    let mastery_pct = if total_questions > 0 {
        to_pct(mastered_questions as f64 / total_questions as f64)
    } else {
        0
    };
    let exams = exam_overview(courses);

    let mut top_courses: Vec<CourseCounts> = courses
        .iter()
        .map(|c| CourseCounts {
            name: c.name.clone(),
            tag: c.tag.clone(),
            total_questions: c.total_questions,
            mastered_questions: c.mastered_questions,
            progress_pct: c.progress_pct,
            risk_status: c.risk_status,
        })
        .collect();
    // Stable, so ties keep collection order.
    top_courses.sort_by_key(|c| std::cmp::Reverse(c.total_questions));
    top_courses.truncate(MAX_TOP_COURSES);

    Stats {
        course_count: courses.len(),
        total_questions,
        mastered_questions,
        mastery_pct,
        upcoming_exams: exams.upcoming.len(),
        past_exams: exams.past.len(),
        exams_without_date: exams.no_date.len(),
        alarm_courses: courses.iter().filter(|c| c.risk_status.is_alarm()).count(),
        focus_courses: courses
            .iter()
            .filter(|c| c.risk_status.needs_focus())
            .count(),
        top_courses,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::NaiveDate;

    use super::*;
    use crate::refresh::refresh_all;
    use crate::types::card::Card;
    use crate::types::course::StudyBlock;
    use crate::types::date::Date;

    fn today() -> Date {
        Date::new(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap())
    }

    fn course(name: &str, days: Option<i64>, cards: Vec<Card>) -> Course {
        let exam_date = match days {
            Some(days) => Date::new(today().into_inner() + Duration::days(days)).to_string(),
            None => String::new(),
        };
        let mut course = Course::new(name, "tag", exam_date);
        course.qa = cards;
        course
    }

    fn sample() -> Vec<Course> {
        let mut courses = vec![
            course("zoology", None, vec![]),
            course("Anatomy", Some(5), vec![Card::with_counts(1, 0), Card::new("Q", "A")]),
            course("Biophysics", Some(-3), vec![]),
            course("chemistry", Some(14), vec![Card::with_counts(0, 2)]),
            course("Ethics", None, vec![]),
            course("Genetics", Some(-10), vec![]),
            course("Histology", Some(40), vec![]),
        ];
        courses[1]
            .blocks
            .push(StudyBlock::new("Read chapter 3", "30 min", "Today"));
        courses[1]
            .blocks
            .push(StudyBlock::new("Flashcards", "20 min", "Tomorrow"));
        courses[3]
            .blocks
            .push(StudyBlock::new("Practice exam", "40 min", "today"));
        refresh_all(&mut courses, today());
        courses
    }

    #[test]
    fn test_exam_overview() {
        let overview = exam_overview(&sample());
        assert_eq!(overview.upcoming, vec![1, 3, 6]);
        assert_eq!(overview.past, vec![2, 5]);
        assert_eq!(overview.no_date, vec![4, 0]);
    }

    #[test]
    fn test_agenda() {
        let courses = sample();
        let agenda = agenda(&courses);
        let titles: Vec<&str> = agenda.blocks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Read chapter 3", "Practice exam"]);
        assert_eq!(agenda.blocks[0].course_name, "Anatomy");

        // Anatomy (5 days) is in alarm, chemistry (14 days) needs extra
        // focus, Histology (40 days) is a calm start.
        let focus: Vec<usize> = agenda.focus.iter().map(|f| f.course_id).collect();
        assert_eq!(focus, vec![1, 3]);
        assert_eq!(agenda.focus[0].risk_status, RiskStatus::ExamAlarm);
        assert_eq!(agenda.focus[1].risk_status, RiskStatus::NeedsExtraFocus);
    }

    #[test]
    fn test_agenda_caps_focus() {
        let mut courses: Vec<Course> = (0..5)
            .map(|i| course(&format!("C{i}"), Some(5 - i), vec![]))
            .collect();
        refresh_all(&mut courses, today());
        let agenda = agenda(&courses);
        let focus: Vec<i64> = agenda.focus.iter().map(|f| f.days_to_exam).collect();
        assert_eq!(focus, vec![1, 2, 3]);
    }

    #[test]
    fn test_stats() {
        let stats = stats(&sample());
        assert_eq!(stats.course_count, 7);
        assert_eq!(stats.total_questions, 3);
        assert_eq!(stats.mastered_questions, 1);
        assert_eq!(stats.mastery_pct, 33);
        assert_eq!(stats.upcoming_exams, 3);
        assert_eq!(stats.past_exams, 2);
        assert_eq!(stats.exams_without_date, 2);
        assert_eq!(stats.alarm_courses, 1);
        assert_eq!(stats.focus_courses, 2);
        assert_eq!(stats.top_courses.len(), 5);
        assert_eq!(stats.top_courses[0].name, "Anatomy");
        assert_eq!(stats.top_courses[1].name, "chemistry");
        assert_eq!(stats.top_courses[2].name, "zoology");
    }

    #[test]
    fn test_stats_empty() {
        let stats = stats(&[]);
        assert_eq!(stats.course_count, 0);
        assert_eq!(stats.mastery_pct, 0);
        assert!(stats.top_courses.is_empty());
    }
}
