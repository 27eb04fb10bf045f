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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Fallible;
use crate::error::fail;
use crate::progress::ProgressLabel;
use crate::risk::RiskStatus;
use crate::types::card::Card;
use crate::types::lenient;
use crate::types::notebook::Notebook;

/// A block of planned study time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyBlock {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: String,
    /// Free-text scheduling label, e.g. "Today" or "This week".
    #[serde(default, deserialize_with = "lenient::text")]
    pub when: String,
}

impl StudyBlock {
    pub fn new(
        title: impl Into<String>,
        duration: impl Into<String>,
        when: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            duration: duration.into(),
            when: when.into(),
        }
    }

    /// Whether the block is planned for today. Older files are in Dutch.
    pub fn is_today(&self) -> bool {
        let when = self.when.to_lowercase();
        when.contains("today") || when.contains("vandaag")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tag: String,
    /// The exam date as entered, expected as `YYYY-MM-DD`. May be empty or
    /// malformed, in which case the course has no exam date.
    #[serde(default, deserialize_with = "lenient::text")]
    pub exam_date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub chapters: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub questions: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub files: Vec<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub qa: Vec<Card>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub blocks: Vec<StudyBlock>,
    #[serde(default, deserialize_with = "lenient::summaries")]
    pub summaries: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub notes: Notebook,

    // Derived by `refresh`. Written out for readers of the file, but never
    // read back.
    #[serde(default, deserialize_with = "lenient::ignored")]
    pub days_to_exam: Option<i64>,
    #[serde(default, deserialize_with = "lenient::ignored")]
    pub progress_pct: u8,
    #[serde(default, deserialize_with = "lenient::ignored")]
    pub progress_label: ProgressLabel,
    #[serde(default, deserialize_with = "lenient::ignored")]
    pub mastered_questions: usize,
    #[serde(default, deserialize_with = "lenient::ignored")]
    pub total_questions: usize,
    #[serde(default, deserialize_with = "lenient::ignored")]
    pub risk_status: RiskStatus,

    /// Keys this model doesn't know, such as other tools' data. Kept as they
    /// are and written back on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Changes to a course's descriptive fields. Empty text leaves a field as
/// it is, except for the exam date, where empty text clears the date.
#[derive(Clone, Debug, Default)]
pub struct CourseEdit {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub exam_date: Option<String>,
    pub chapters: Option<String>,
    pub questions: Option<String>,
}

/// The answer stored for questions entered without one.
pub const NO_ANSWER: &str = "\u{2014}";

impl Course {
    pub fn new(
        name: impl Into<String>,
        tag: impl Into<String>,
        exam_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            exam_date: exam_date.into(),
            chapters: String::new(),
            questions: String::new(),
            files: Vec::new(),
            topics: Vec::new(),
            qa: Vec::new(),
            blocks: Vec::new(),
            summaries: BTreeMap::new(),
            notes: Notebook::default(),
            days_to_exam: None,
            progress_pct: 0,
            progress_label: ProgressLabel::default(),
            mastered_questions: 0,
            total_questions: 0,
            risk_status: RiskStatus::default(),
            extra: Map::new(),
        }
    }

    /// Create a course from user input. The name is required; the other
    /// descriptive fields get placeholder text when left empty.
    pub fn create(
        name: &str,
        tag: &str,
        exam_date: &str,
        chapters: &str,
        questions: &str,
    ) -> Fallible<Self> {
        let name = name.trim();
        if name.is_empty() {
            return fail("course name is empty.");
        }
        let tag = or_placeholder(tag, "New course");
        let mut course = Course::new(name, tag, exam_date.trim());
        course.chapters = or_placeholder(chapters, "No chapters yet");
        course.questions = or_placeholder(questions, "No questions yet");
        Ok(course)
    }

    pub fn edit(&mut self, edit: CourseEdit) {
        if let Some(name) = non_empty(edit.name) {
            self.name = name;
        }
        if let Some(tag) = non_empty(edit.tag) {
            self.tag = tag;
        }
        if let Some(chapters) = non_empty(edit.chapters) {
            self.chapters = chapters;
        }
        if let Some(questions) = non_empty(edit.questions) {
            self.questions = questions;
        }
        if let Some(exam_date) = edit.exam_date {
            self.exam_date = exam_date.trim().to_string();
        }
    }

    pub fn add_topic(&mut self, title: &str) -> Fallible<()> {
        let title = title.trim();
        if title.is_empty() {
            return fail("topic title is empty.");
        }
        self.topics.push(title.to_string());
        Ok(())
    }

    /// Append a question. An empty answer is stored as a dash.
    pub fn add_question(&mut self, question: &str, answer: &str) -> Fallible<usize> {
        let question = question.trim();
        if question.is_empty() {
            return fail("question is empty.");
        }
        let answer = match answer.trim() {
            "" => NO_ANSWER,
            answer => answer,
        };
        self.qa.push(Card::new(question, answer));
        Ok(self.qa.len() - 1)
    }

    pub fn add_block(&mut self, title: &str, duration: &str, when: &str) -> Fallible<()> {
        let title = title.trim();
        if title.is_empty() {
            return fail("block title is empty.");
        }
        self.blocks.push(StudyBlock::new(title, duration.trim(), when.trim()));
        Ok(())
    }

    pub fn set_summary(&mut self, topic: &str, summary: &str) -> Fallible<()> {
        let topic = topic.trim();
        if topic.is_empty() {
            return fail("topic is empty.");
        }
        self.summaries.insert(topic.to_string(), summary.trim().to_string());
        Ok(())
    }

    pub fn clear_topics(&mut self) {
        self.topics.clear();
    }

    /// Remove every card. This is the only way cards are ever removed.
    pub fn clear_questions(&mut self) {
        self.qa.clear();
    }

    pub fn clear_plan(&mut self) {
        self.blocks.clear();
    }
}

fn or_placeholder(text: &str, placeholder: &str) -> String {
    match text.trim() {
        "" => placeholder.to_string(),
        text => text.to_string(),
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_is_today() {
        assert!(StudyBlock::new("Read", "30 min", "Today").is_today());
        assert!(StudyBlock::new("Read", "30 min", "today, after lunch").is_today());
        assert!(!StudyBlock::new("Read", "30 min", "Tomorrow").is_today());
        assert!(StudyBlock::new("Lezen", "30 min", "Vandaag").is_today());
        assert!(!StudyBlock::new("Lezen", "30 min", "Morgen").is_today());
    }

    #[test]
    fn test_create() {
        assert!(Course::create("  ", "", "", "", "").is_err());
        let course = Course::create(" Anatomy I ", "", " 2026-01-25 ", "", "34 made").unwrap();
        assert_eq!(course.name, "Anatomy I");
        assert_eq!(course.tag, "New course");
        assert_eq!(course.exam_date, "2026-01-25");
        assert_eq!(course.chapters, "No chapters yet");
        assert_eq!(course.questions, "34 made");
        assert!(course.qa.is_empty());
    }

    #[test]
    fn test_edit() {
        let mut course = Course::new("Anatomy I", "Medicine", "2026-01-25");
        course.edit(CourseEdit {
            name: Some("  ".to_string()),
            tag: Some("Bachelor".to_string()),
            ..CourseEdit::default()
        });
        assert_eq!(course.name, "Anatomy I");
        assert_eq!(course.tag, "Bachelor");
        assert_eq!(course.exam_date, "2026-01-25");

        course.edit(CourseEdit {
            exam_date: Some(String::new()),
            ..CourseEdit::default()
        });
        assert_eq!(course.exam_date, "");
    }

    #[test]
    fn test_add_and_clear() {
        let mut course = Course::new("Anatomy I", "", "");
        assert!(course.add_topic("").is_err());
        course.add_topic("Skeleton").unwrap();
        assert!(course.add_question(" ", "x").is_err());
        let index = course.add_question("Name three muscle types.", "").unwrap();
        assert_eq!(index, 0);
        assert_eq!(course.qa[0].answer(), NO_ANSWER);
        course.add_block("Read chapter 3", "30 min", "Today").unwrap();
        course.set_summary("Skeleton", "Bones.").unwrap();
        assert_eq!(course.summaries["Skeleton"], "Bones.");

        course.clear_topics();
        course.clear_questions();
        course.clear_plan();
        assert!(course.topics.is_empty());
        assert!(course.qa.is_empty());
        assert!(course.blocks.is_empty());
        assert_eq!(course.summaries.len(), 1);
    }

    #[test]
    fn test_deserialize_minimal() {
        let course: Course = serde_json::from_str(r#"{"name": "Biophysics"}"#).unwrap();
        assert_eq!(course.name, "Biophysics");
        assert!(course.qa.is_empty());
        assert!(course.topics.is_empty());
        assert!(course.summaries.is_empty());
        assert_eq!(course.exam_date, "");
    }

    #[test]
    fn test_deserialize_nulls_and_stale_derived_fields() {
        let json = r#"{
            "name": "Anatomy I",
            "exam_date": null,
            "topics": null,
            "qa": [{"question": "Q", "answer": "A", "correct": 2}],
            "summaries": "not a map",
            "progress_pct": 93,
            "risk_status": "Examen alarm",
            "ai_chat_history": []
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert!(course.topics.is_empty());
        assert_eq!(course.qa.len(), 1);
        assert_eq!(course.qa[0].correct(), 2);
        assert!(course.summaries.is_empty());
        assert_eq!(course.progress_pct, 0);
        assert_eq!(course.risk_status, RiskStatus::NoExamDate);
        assert_eq!(course.extra.len(), 1);
        assert!(course.extra.contains_key("ai_chat_history"));
    }

    #[test]
    fn test_unknown_keys_survive_a_round_trip() {
        let json = r#"{
            "name": "Anatomy I",
            "ai_chat_history": [{"role": "user", "content": "Explain synapses."}],
            "uploads": {"notes.pdf": {"size": 1024}},
            "risk_status": "Examen alarm"
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&course).unwrap();
        assert_eq!(value["ai_chat_history"][0]["content"], "Explain synapses.");
        assert_eq!(value["uploads"]["notes.pdf"]["size"], 1024);
        assert_eq!(value["risk_status"], "no exam date");
        let text = serde_json::to_string(&course).unwrap();
        assert_eq!(text.matches("\"risk_status\"").count(), 1);
    }

    #[test]
    fn test_serialize_writes_derived_fields() {
        let course = Course::new("Neurobiology", "Focus", "");
        let value = serde_json::to_value(&course).unwrap();
        assert_eq!(value["progress_pct"], 0);
        assert_eq!(value["progress_label"], "starting");
        assert_eq!(value["risk_status"], "no exam date");
        assert!(value["days_to_exam"].is_null());
    }
}
