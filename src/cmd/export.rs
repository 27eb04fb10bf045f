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

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::progress::ProgressLabel;
use crate::risk::RiskStatus;
use crate::types::course::Course;
use crate::types::date::Date;

pub fn export_course(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    let export: CourseExport = get_export(coll.course(id)?);
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseExport {
    name: String,
    tag: String,
    exam_date: String,
    days_to_exam: Option<i64>,
    progress_pct: u8,
    progress_label: ProgressLabel,
    risk_status: RiskStatus,
    mastered_questions: usize,
    total_questions: usize,
    chapters: String,
    questions: String,
    topics: Vec<TopicExport>,
    cards: Vec<CardExport>,
    blocks: Vec<BlockExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopicExport {
    title: String,
    summary: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardExport {
    question: String,
    answer: String,
    correct: u32,
    wrong: u32,
    strong: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockExport {
    title: String,
    duration: String,
    when: String,
}

fn get_export(course: &Course) -> CourseExport {
    CourseExport {
        name: course.name.clone(),
        tag: course.tag.clone(),
        exam_date: course.exam_date.clone(),
        days_to_exam: course.days_to_exam,
        progress_pct: course.progress_pct,
        progress_label: course.progress_label,
        risk_status: course.risk_status,
        mastered_questions: course.mastered_questions,
        total_questions: course.total_questions,
        chapters: course.chapters.clone(),
        questions: course.questions.clone(),
        topics: get_topic_export(&course.topics, &course.summaries),
        cards: course
            .qa
            .iter()
            .map(|card| CardExport {
                question: card.question().to_owned(),
                answer: card.answer().to_owned(),
                correct: card.correct(),
                wrong: card.wrong(),
                strong: card.is_strong(),
            })
            .collect(),
        blocks: course
            .blocks
            .iter()
            .map(|block| BlockExport {
                title: block.title.clone(),
                duration: block.duration.clone(),
                when: block.when.clone(),
            })
            .collect(),
    }
}

/// Topics in order, followed by summaries of topics no longer listed.
fn get_topic_export(topics: &[String], summaries: &BTreeMap<String, String>) -> Vec<TopicExport> {
    let mut export: Vec<TopicExport> = topics
        .iter()
        .map(|title| TopicExport {
            title: title.clone(),
            summary: summaries.get(title).cloned(),
        })
        .collect();
    for (title, summary) in summaries.iter() {
        if !topics.contains(title) {
            export.push(TopicExport {
                title: title.clone(),
                summary: Some(summary.clone()),
            });
        }
    }
    export
}
