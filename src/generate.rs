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

//! Offline, template-based question and plan generation.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use rand::seq::SliceRandom;

use crate::types::card::Card;
use crate::types::course::Course;
use crate::types::course::NO_ANSWER;
use crate::types::course::StudyBlock;

const QUESTION_TEMPLATES: [&str; 5] = [
    "Explain what is meant by: {topic}.",
    "Why does {topic} matter in this course?",
    "Name the main components of {topic}.",
    "Give a concrete example that illustrates {topic}.",
    "Which mistakes are commonly made with {topic}?",
];

const PLAN_TEMPLATES: [&str; 4] = [
    "Read: {topic}",
    "Summarize key concepts: {topic}",
    "Practice questions on {topic}",
    "Review and flashcards: {topic}",
];

const DURATIONS: [&str; 3] = ["25 min", "30 min", "40 min"];

const MOMENTS: [&str; 4] = ["Today", "Tomorrow", "This week", "Next weekend"];

/// The name of the demo course.
pub const DEMO_COURSE: &str = "Study OS Demo";

/// The course's topics, or its name when it has none.
fn seeds(course: &Course) -> Vec<String> {
    if course.topics.is_empty() {
        vec![course.name.clone()]
    } else {
        course.topics.clone()
    }
}

fn fill(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}

/// Append up to `max` new questions, skipping any whose text the course
/// already has. Returns how many were added.
pub fn generate_questions<R: Rng>(course: &mut Course, max: usize, rng: &mut R) -> usize {
    let mut existing: HashSet<String> = course
        .qa
        .iter()
        .map(|card| card.question().to_string())
        .collect();
    let mut topics = seeds(course);
    topics.shuffle(rng);
    let mut templates = QUESTION_TEMPLATES;
    templates.shuffle(rng);

    let mut created = 0;
    'outer: for topic in &topics {
        for template in &templates {
            if created >= max {
                break 'outer;
            }
            let question = fill(template, topic);
            if existing.contains(&question) {
                continue;
            }
            course.qa.push(Card::new(question.clone(), NO_ANSWER));
            existing.insert(question);
            created += 1;
        }
    }
    log::debug!("Generated {created} questions for {:?}.", course.name);
    created
}

/// Append up to `max` new study blocks, skipping any whose title the course
/// already has. Returns how many were added.
pub fn generate_plan<R: Rng>(course: &mut Course, max: usize, rng: &mut R) -> usize {
    let mut existing: HashSet<String> =
        course.blocks.iter().map(|b| b.title.clone()).collect();
    let mut topics = seeds(course);
    topics.shuffle(rng);

    let mut created = 0;
    'outer: for topic in &topics {
        let mut templates = PLAN_TEMPLATES;
        templates.shuffle(rng);
        for template in &templates {
            if created >= max {
                break 'outer;
            }
            let title = fill(template, topic);
            if existing.contains(&title) {
                continue;
            }
            let duration = DURATIONS.choose(rng).copied().unwrap_or(DURATIONS[0]);
            let when = MOMENTS.choose(rng).copied().unwrap_or(MOMENTS[0]);
            course.blocks.push(StudyBlock::new(title.clone(), duration, when));
            existing.insert(title);
            created += 1;
        }
    }
    log::debug!("Generated {created} blocks for {:?}.", course.name);
    created
}

/// A small course to explore the tool with.
pub fn demo_course() -> Course {
    let mut course = Course::new(DEMO_COURSE, "Demo \u{b7} Medicine", "2026-02-10");
    course.chapters = "3/6 chapters scanned".to_string();
    course.questions = "12 questions made".to_string();
    course.topics = vec![
        "Chapter 1 \u{2013} Overview of the nervous system".to_string(),
        "Chapter 2 \u{2013} Neurons & synapses".to_string(),
        "Chapter 3 \u{2013} Clinical cases".to_string(),
    ];
    course.qa = vec![
        Card::new(
            "What is the difference between a sensory and a motor neuron?",
            "Sensory neurons carry information to the central nervous system; \
             motor neurons carry commands to muscles and glands.",
        ),
        Card::new(
            "Briefly explain what a synapse is.",
            "The junction between two neurons where signals pass via neurotransmitters.",
        ),
    ];
    course.blocks = vec![
        StudyBlock::new("Chapter 1 \u{2013} reading pass", "30 min", "Today"),
        StudyBlock::new("Practice questions neurons & synapses", "25 min", "Today"),
        StudyBlock::new("Review flashcards clinical cases", "20 min", "Tomorrow"),
    ];
    course
}
