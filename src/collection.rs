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

use std::env::current_dir;
use std::fs::read_to_string;
use std::fs::rename;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::refresh::refresh_all;
use crate::types::course::Course;
use crate::types::date::Date;
use crate::types::project::Project;

/// Everything in a data directory: the courses, the projects, and the
/// configuration naming their files.
///
/// Nothing is written implicitly. Callers save the collection they changed
/// right after changing it.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub courses: Vec<Course>,
    pub projects: Vec<Project>,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let courses: Vec<Course> = {
            log::debug!("Loading courses...");
            let start = Instant::now();
            let courses = load_list(&directory.join(&config.courses_file))?;
            let duration = Instant::now().duration_since(start).as_millis();
            log::debug!("Loaded {} courses in {duration}ms.", courses.len());
            courses
        };
        let projects: Vec<Project> = load_list(&directory.join(&config.projects_file))?;
        log::debug!("Loaded {} projects.", projects.len());

        Ok(Self {
            directory,
            config,
            courses,
            projects,
        })
    }

    /// Recompute the derived fields of every course and project.
    pub fn refresh(&mut self, today: Date) {
        refresh_all(&mut self.courses, today);
        for project in self.projects.iter_mut() {
            project.refresh(today);
        }
    }

    pub fn courses_path(&self) -> PathBuf {
        self.directory.join(&self.config.courses_file)
    }

    pub fn projects_path(&self) -> PathBuf {
        self.directory.join(&self.config.projects_file)
    }

    pub fn save_courses(&self) -> Fallible<()> {
        log::debug!("Writing {} courses.", self.courses.len());
        write_list(&self.courses_path(), &self.courses)
    }

    pub fn save_projects(&self) -> Fallible<()> {
        log::debug!("Writing {} projects.", self.projects.len());
        write_list(&self.projects_path(), &self.projects)
    }

    pub fn course(&self, id: usize) -> Fallible<&Course> {
        match self.courses.get(id) {
            Some(course) => Ok(course),
            None => fail(format!("no course with id {id}.")),
        }
    }

    pub fn course_mut(&mut self, id: usize) -> Fallible<&mut Course> {
        match self.courses.get_mut(id) {
            Some(course) => Ok(course),
            None => fail(format!("no course with id {id}.")),
        }
    }

    /// Add a course and return its id.
    pub fn add_course(&mut self, course: Course) -> usize {
        log::info!("Adding course {:?}.", course.name);
        self.courses.push(course);
        self.courses.len() - 1
    }

    pub fn delete_course(&mut self, id: usize) -> Fallible<Course> {
        self.course(id)?;
        let course = self.courses.remove(id);
        log::info!("Deleted course {:?}.", course.name);
        Ok(course)
    }

    pub fn project(&self, id: usize) -> Fallible<&Project> {
        match self.projects.get(id) {
            Some(project) => Ok(project),
            None => fail(format!("no project with id {id}.")),
        }
    }

    pub fn project_mut(&mut self, id: usize) -> Fallible<&mut Project> {
        match self.projects.get_mut(id) {
            Some(project) => Ok(project),
            None => fail(format!("no project with id {id}.")),
        }
    }

    /// Add a project and return its id.
    pub fn add_project(&mut self, project: Project) -> usize {
        log::info!("Adding project {:?}.", project.title);
        self.projects.push(project);
        self.projects.len() - 1
    }

    pub fn delete_project(&mut self, id: usize) -> Fallible<Project> {
        self.project(id)?;
        let project = self.projects.remove(id);
        log::info!("Deleted project {:?}.", project.title);
        Ok(project)
    }
}

/// Read a JSON array from `path`. A missing file is an empty list; a file
/// that doesn't parse is an error, so it is never overwritten by a save.
fn load_list<T: DeserializeOwned>(path: &Path) -> Fallible<Vec<T>> {
    if !path.exists() {
        log::debug!("{} does not exist, starting empty.", path.display());
        return Ok(Vec::new());
    }
    let content = read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(list) => Ok(list),
        Err(e) => fail(format!("failed to read {}: {e}", path.display())),
    }
}

/// Replace the file at `path` with `list` as pretty-printed JSON. The data
/// goes to a temporary file first and is renamed into place, so a failed
/// write leaves the old file intact.
fn write_list<T: Serialize>(path: &Path, list: &[T]) -> Fallible<()> {
    let mut json = serde_json::to_string_pretty(list)?;
    json.push('\n');
    let tmp = path.with_extension("json.tmp");
    write(&tmp, json)?;
    rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::rating::Rating;
    use crate::risk::RiskStatus;
    use crate::types::card::Card;

    fn open(dir: &Path) -> Fallible<Collection> {
        Collection::new(Some(dir.display().to_string()))
    }

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: directory does not exist."
        );
    }

    #[test]
    fn test_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        let coll = open(dir.path())?;
        assert!(coll.courses.is_empty());
        assert!(coll.projects.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Fallible<()> {
        let dir = tempdir()?;
        let mut coll = open(dir.path())?;
        let id = coll.add_course(Course::new("Anatomy I", "Medicine", "2026-01-25"));
        coll.course_mut(id)?.qa.push(Card::new("Q", "A"));
        coll.course_mut(id)?.qa[0].record(Rating::Know);
        coll.add_project(Project::new("Thesis", "", "", "")?);
        coll.save_courses()?;
        coll.save_projects()?;
        assert!(!dir.path().join("courses_data.json.tmp").exists());

        let coll = open(dir.path())?;
        assert_eq!(coll.courses.len(), 1);
        assert_eq!(coll.courses[0].name, "Anatomy I");
        assert_eq!(coll.courses[0].qa[0].correct(), 1);
        assert_eq!(coll.projects[0].tag, "Project");
        Ok(())
    }

    #[test]
    fn test_legacy_file() -> Fallible<()> {
        let dir = tempdir()?;
        let json = r#"[
          {
            "name": "Anatomie I",
            "tag": "Medisch",
            "exam_date": "2026-01-25",
            "progress": "mid",
            "topics": ["Beenderstelsel"],
            "qa": [{"question": "Q", "answer": "A"}],
            "blocks": [{"title": "Lezen", "duration": "30 min", "when": "Vandaag"}],
            "risk_status": "Examen alarm"
          }
        ]"#;
        std::fs::write(dir.path().join("courses_data.json"), json)?;
        let mut coll = open(dir.path())?;
        let today = Date::new(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        coll.refresh(today);
        let course = coll.course(0)?;
        assert_eq!(course.days_to_exam, Some(5));
        assert_eq!(course.total_questions, 1);
        assert_eq!(course.risk_status, RiskStatus::ExamAlarm);
        assert!(course.blocks[0].is_today());
        Ok(())
    }

    #[test]
    fn test_save_keeps_unknown_keys() -> Fallible<()> {
        let dir = tempdir()?;
        let json = r#"[
          {
            "name": "Anatomie I",
            "qa": [{"question": "Q", "answer": "A"}],
            "ai_chat_history": [{"role": "assistant", "content": "Hallo!"}]
          }
        ]"#;
        std::fs::write(dir.path().join("courses_data.json"), json)?;
        let mut coll = open(dir.path())?;
        coll.course_mut(0)?.qa[0].record(Rating::Know);
        coll.save_courses()?;

        let saved = std::fs::read_to_string(dir.path().join("courses_data.json"))?;
        assert!(saved.contains("\"ai_chat_history\""));
        assert!(saved.contains("\"Hallo!\""));
        let coll = open(dir.path())?;
        assert_eq!(coll.courses[0].extra.len(), 1);
        assert_eq!(coll.courses[0].qa[0].correct(), 1);
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_an_error() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join("courses_data.json"), "[{")?;
        assert!(open(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_configured_file_names() -> Fallible<()> {
        let dir = tempdir()?;
        std::fs::write(
            dir.path().join("studyos.toml"),
            "courses_file = \"vakken.json\"\n",
        )?;
        let mut coll = open(dir.path())?;
        coll.add_course(Course::new("Biophysics", "", ""));
        coll.save_courses()?;
        assert!(dir.path().join("vakken.json").exists());
        assert!(!dir.path().join("courses_data.json").exists());
        Ok(())
    }

    #[test]
    fn test_missing_ids() -> Fallible<()> {
        let dir = tempdir()?;
        let mut coll = open(dir.path())?;
        assert_eq!(
            coll.course(0).err().unwrap().to_string(),
            "error: no course with id 0."
        );
        assert!(coll.delete_course(0).is_err());
        assert!(coll.project_mut(3).is_err());
        Ok(())
    }

    #[test]
    fn test_delete() -> Fallible<()> {
        let dir = tempdir()?;
        let mut coll = open(dir.path())?;
        coll.add_course(Course::new("A", "", ""));
        coll.add_course(Course::new("B", "", ""));
        let deleted = coll.delete_course(0)?;
        assert_eq!(deleted.name, "A");
        assert_eq!(coll.course(0)?.name, "B");
        Ok(())
    }
}
