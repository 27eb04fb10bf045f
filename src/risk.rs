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

use serde::Serialize;

/// How urgent a course's exam is, relative to how ready the student is.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub enum RiskStatus {
    #[default]
    #[serde(rename = "no exam date")]
    NoExamDate,
    #[serde(rename = "exam passed")]
    ExamPassed,
    #[serde(rename = "ample margin")]
    AmpleMargin,
    #[serde(rename = "calm start")]
    CalmStart,
    #[serde(rename = "on track")]
    OnTrack,
    #[serde(rename = "needs extra focus")]
    NeedsExtraFocus,
    #[serde(rename = "ready for exam")]
    ReadyForExam,
    #[serde(rename = "keep pushing")]
    KeepPushing,
    #[serde(rename = "exam alarm")]
    ExamAlarm,
}

impl RiskStatus {
    /// Evaluate the decision table. The first matching row wins.
    pub fn derive(days_to_exam: Option<i64>, progress_pct: u8) -> Self {
        match days_to_exam {
            None => RiskStatus::NoExamDate,
            Some(days) if days < 0 => RiskStatus::ExamPassed,
            Some(days) if days > 21 => {
                if progress_pct >= 40 {
                    RiskStatus::AmpleMargin
                } else {
                    RiskStatus::CalmStart
                }
            }
            Some(days) if days > 7 => {
                if progress_pct >= 60 {
                    RiskStatus::OnTrack
                } else {
                    RiskStatus::NeedsExtraFocus
                }
            }
            Some(_) => {
                if progress_pct >= 75 {
                    RiskStatus::ReadyForExam
                } else if progress_pct >= 50 {
                    RiskStatus::KeepPushing
                } else {
                    RiskStatus::ExamAlarm
                }
            }
        }
    }

    /// Whether the course deserves a spot among the focus courses.
    pub fn needs_focus(&self) -> bool {
        matches!(
            self,
            RiskStatus::ExamAlarm | RiskStatus::NeedsExtraFocus | RiskStatus::KeepPushing
        )
    }

    pub fn is_alarm(&self) -> bool {
        *self == RiskStatus::ExamAlarm
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::NoExamDate => "no exam date",
            RiskStatus::ExamPassed => "exam passed",
            RiskStatus::AmpleMargin => "ample margin",
            RiskStatus::CalmStart => "calm start",
            RiskStatus::OnTrack => "on track",
            RiskStatus::NeedsExtraFocus => "needs extra focus",
            RiskStatus::ReadyForExam => "ready for exam",
            RiskStatus::KeepPushing => "keep pushing",
            RiskStatus::ExamAlarm => "exam alarm",
        }
    }
}

impl Display for RiskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
