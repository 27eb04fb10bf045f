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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::countdown::days_until;
use crate::error::Fallible;
use crate::error::fail;
use crate::progress::to_pct;
use crate::types::date::Date;
use crate::types::lenient;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub done: bool,
}

/// A longer piece of work with a deadline: a thesis, a paper, a lab report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tag: String,
    /// Expected as `YYYY-MM-DD`, or empty.
    #[serde(default, deserialize_with = "lenient::text")]
    pub deadline: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// Share of tasks done, updated whenever a task is toggled.
    #[serde(default, deserialize_with = "progress_pct")]
    pub progress_pct: u8,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub tasks: Vec<Task>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,

    #[serde(default, deserialize_with = "lenient::ignored")]
    pub days_to_deadline: Option<i64>,
    #[serde(default, deserialize_with = "lenient::ignored")]
    pub status: DeadlineStatus,

    /// Keys this model doesn't know, written back on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub enum DeadlineStatus {
    #[default]
    #[serde(rename = "no deadline")]
    NoDeadline,
    #[serde(rename = "deadline passed")]
    DeadlinePassed,
    #[serde(rename = "final sprint")]
    FinalSprint,
    #[serde(rename = "deadline alarm")]
    DeadlineAlarm,
    #[serde(rename = "on track")]
    OnTrack,
    #[serde(rename = "needs extra focus")]
    NeedsExtraFocus,
    #[serde(rename = "steady build-up")]
    SteadyBuildUp,
    #[serde(rename = "getting started")]
    GettingStarted,
}

impl DeadlineStatus {
    pub fn derive(days_to_deadline: Option<i64>, progress_pct: u8) -> Self {
        match days_to_deadline {
            None => DeadlineStatus::NoDeadline,
            Some(days) if days < 0 => DeadlineStatus::DeadlinePassed,
            Some(days) if days <= 7 => {
                if progress_pct >= 70 {
                    DeadlineStatus::FinalSprint
                } else {
                    DeadlineStatus::DeadlineAlarm
                }
            }
            Some(days) if days <= 21 => {
                if progress_pct >= 50 {
                    DeadlineStatus::OnTrack
                } else {
                    DeadlineStatus::NeedsExtraFocus
                }
            }
            Some(_) => {
                if progress_pct >= 30 {
                    DeadlineStatus::SteadyBuildUp
                } else {
                    DeadlineStatus::GettingStarted
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineStatus::NoDeadline => "no deadline",
            DeadlineStatus::DeadlinePassed => "deadline passed",
            DeadlineStatus::FinalSprint => "final sprint",
            DeadlineStatus::DeadlineAlarm => "deadline alarm",
            DeadlineStatus::OnTrack => "on track",
            DeadlineStatus::NeedsExtraFocus => "needs extra focus",
            DeadlineStatus::SteadyBuildUp => "steady build-up",
            DeadlineStatus::GettingStarted => "getting started",
        }
    }
}

impl Display for DeadlineStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Project {
    /// Create a project. The title is required; the tag defaults to
    /// "Project".
    pub fn new(title: &str, tag: &str, deadline: &str, description: &str) -> Fallible<Self> {
        let title = title.trim();
        if title.is_empty() {
            return fail("project title is empty.");
        }
        let tag = match tag.trim() {
            "" => "Project",
            tag => tag,
        };
        Ok(Self {
            title: title.to_string(),
            tag: tag.to_string(),
            deadline: deadline.trim().to_string(),
            description: description.trim().to_string(),
            progress_pct: 0,
            tasks: Vec::new(),
            notes: String::new(),
            days_to_deadline: None,
            status: DeadlineStatus::default(),
            extra: Map::new(),
        })
    }

    pub fn refresh(&mut self, today: Date) {
        self.days_to_deadline = days_until(&self.deadline, today);
        self.status = DeadlineStatus::derive(self.days_to_deadline, self.progress_pct);
    }

    pub fn add_task(&mut self, title: &str) -> Fallible<usize> {
        let title = title.trim();
        if title.is_empty() {
            return fail("task title is empty.");
        }
        self.tasks.push(Task {
            title: title.to_string(),
            done: false,
        });
        Ok(self.tasks.len() - 1)
    }

    /// Flip a task between done and not done, and update the progress.
    pub fn toggle_task(&mut self, task_index: usize) -> Fallible<bool> {
        let task = match self.tasks.get_mut(task_index) {
            Some(task) => task,
            None => return fail(format!("no task with index {task_index}.")),
        };
        task.done = !task.done;
        let done = task.done;
        let finished = self.tasks.iter().filter(|t| t.done).count();
        self.progress_pct = to_pct(finished as f64 / self.tasks.len() as f64);
        Ok(done)
    }
}

fn progress_pct<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let pct = lenient::counter(deserializer)?;
    Ok(pct.min(100) as u8)
}
