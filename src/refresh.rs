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

use crate::countdown::days_until;
use crate::progress;
use crate::risk::RiskStatus;
use crate::types::course::Course;
use crate::types::date::Date;

/// Recompute a course's derived fields: the exam countdown, then progress,
/// then the risk status, which depends on both.
pub fn refresh(course: &mut Course, today: Date) {
    course.days_to_exam = days_until(&course.exam_date, today);
    let progress = progress::score(course);
    progress::apply(course, &progress);
    course.risk_status = RiskStatus::derive(course.days_to_exam, course.progress_pct);
}

pub fn refresh_all(courses: &mut [Course], today: Date) {
    for course in courses.iter_mut() {
        refresh(course, today);
    }
}
