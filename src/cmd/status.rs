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
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::progress::ProgressLabel;
use crate::risk::RiskStatus;
use crate::types::course::Course;
use crate::types::date::Date;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_status(directory: Option<String>, format: OutputFormat, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    match format {
        OutputFormat::Text => {
            if coll.courses.is_empty() {
                println!("No courses yet.");
            }
            for (id, course) in coll.courses.iter().enumerate() {
                println!("{}", status_line(id, course));
            }
        }
        OutputFormat::Json => {
            let statuses: Vec<CourseStatus> = coll
                .courses
                .iter()
                .enumerate()
                .map(|(id, course)| CourseStatus::new(id, course))
                .collect();
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseStatus<'a> {
    id: usize,
    name: &'a str,
    tag: &'a str,
    exam_date: &'a str,
    days_to_exam: Option<i64>,
    progress_pct: u8,
    progress_label: ProgressLabel,
    mastered_questions: usize,
    total_questions: usize,
    risk_status: RiskStatus,
}

impl<'a> CourseStatus<'a> {
    fn new(id: usize, course: &'a Course) -> Self {
        Self {
            id,
            name: &course.name,
            tag: &course.tag,
            exam_date: &course.exam_date,
            days_to_exam: course.days_to_exam,
            progress_pct: course.progress_pct,
            progress_label: course.progress_label,
            mastered_questions: course.mastered_questions,
            total_questions: course.total_questions,
            risk_status: course.risk_status,
        }
    }
}

/// One line summarizing a refreshed course.
pub fn status_line(id: usize, course: &Course) -> String {
    format!(
        "[{id}] {} ({}): {}% {}, {}/{} mastered, {}, {}",
        course.name,
        course.tag,
        course.progress_pct,
        course.progress_label,
        course.mastered_questions,
        course.total_questions,
        describe_days(course.days_to_exam, "exam"),
        course.risk_status
    )
}

/// Describe a countdown, e.g. "exam in 3 days".
pub fn describe_days(days: Option<i64>, what: &str) -> String {
    match days {
        None => format!("no {what} date"),
        Some(0) => format!("{what} today"),
        Some(1) => format!("{what} tomorrow"),
        Some(-1) => format!("{what} was yesterday"),
        Some(days) if days < 0 => format!("{what} was {} days ago", -days),
        Some(days) => format!("{what} in {days} days"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::refresh::refresh;
    use crate::types::card::Card;

    #[test]
    fn test_describe_days() {
        assert_eq!(describe_days(None, "exam"), "no exam date");
        assert_eq!(describe_days(Some(0), "exam"), "exam today");
        assert_eq!(describe_days(Some(1), "deadline"), "deadline tomorrow");
        assert_eq!(describe_days(Some(12), "exam"), "exam in 12 days");
        assert_eq!(describe_days(Some(-1), "exam"), "exam was yesterday");
        assert_eq!(describe_days(Some(-4), "exam"), "exam was 4 days ago");
    }

    #[test]
    fn test_status_line() {
        let today = Date::new(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        let mut course = Course::new("Biology", "Bachelor", "2025-01-13");
        course.qa = vec![Card::new("Q", "A")];
        refresh(&mut course, today);
        assert_eq!(
            status_line(2, &course),
            "[2] Biology (Bachelor): 1% starting, 0/1 mastered, exam in 3 days, exam alarm"
        );
    }

    #[test]
    fn test_status_json_keys() -> Fallible<()> {
        let course = Course::new("Biology", "Bachelor", "");
        let json = serde_json::to_value(CourseStatus::new(0, &course))?;
        assert_eq!(json["name"], "Biology");
        assert_eq!(json["examDate"], "");
        assert!(json["daysToExam"].is_null());
        assert_eq!(json["riskStatus"], "no exam date");
        assert_eq!(json["progressLabel"], "starting");
        Ok(())
    }
}
