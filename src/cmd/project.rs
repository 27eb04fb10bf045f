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

use crate::cmd::status::describe_days;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::project::Project;

pub fn list_projects(directory: Option<String>, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    if coll.projects.is_empty() {
        println!("No projects yet.");
    }
    for (id, project) in coll.projects.iter().enumerate() {
        println!("{}", project_line(id, project));
    }
    Ok(())
}

pub fn new_project(
    directory: Option<String>,
    title: &str,
    tag: &str,
    deadline: &str,
    description: &str,
    today: Date,
) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let id = coll.add_project(Project::new(title, tag, deadline, description)?);
    coll.refresh(today);
    coll.save_projects()?;
    println!("Added project {id}.");
    Ok(())
}

pub fn show_project(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    coll.refresh(today);
    print!("{}", render_project(id, coll.project(id)?));
    Ok(())
}

pub fn add_task(directory: Option<String>, id: usize, title: &str, today: Date) -> Fallible<()> {
    let index = update_project(directory, id, today, |project| project.add_task(title))?;
    println!("Added task {index}.");
    Ok(())
}

pub fn toggle_task(directory: Option<String>, id: usize, task: usize, today: Date) -> Fallible<()> {
    let done = update_project(directory, id, today, |project| project.toggle_task(task))?;
    if done {
        println!("Task {task} done.");
    } else {
        println!("Task {task} reopened.");
    }
    Ok(())
}

pub fn set_notes(directory: Option<String>, id: usize, text: &str, today: Date) -> Fallible<()> {
    update_project(directory, id, today, |project| {
        project.notes = text.to_string();
        Ok(())
    })?;
    println!("Saved notes.");
    Ok(())
}

pub fn delete_project(directory: Option<String>, id: usize, today: Date) -> Fallible<()> {
    let mut coll: Collection = Collection::new(directory)?;
    let project = coll.delete_project(id)?;
    coll.refresh(today);
    coll.save_projects()?;
    println!("Deleted project {:?}.", project.title);
    Ok(())
}

fn update_project<T>(
    directory: Option<String>,
    id: usize,
    today: Date,
    change: impl FnOnce(&mut Project) -> Fallible<T>,
) -> Fallible<T> {
    let mut coll: Collection = Collection::new(directory)?;
    let result = change(coll.project_mut(id)?)?;
    coll.refresh(today);
    coll.save_projects()?;
    Ok(result)
}

fn project_line(id: usize, project: &Project) -> String {
    format!(
        "[{id}] {} ({}): {}%, {}, {}",
        project.title,
        project.tag,
        project.progress_pct,
        describe_days(project.days_to_deadline, "deadline"),
        project.status
    )
}

fn render_project(id: usize, project: &Project) -> String {
    let mut out = project_line(id, project);
    out.push('\n');
    if !project.description.is_empty() {
        out.push_str(&format!("{}\n", project.description));
    }
    out.push_str(&format!("Tasks ({}):\n", project.tasks.len()));
    for (index, task) in project.tasks.iter().enumerate() {
        let mark = if task.done { "x" } else { " " };
        out.push_str(&format!("  {index}. [{mark}] {}\n", task.title));
    }
    if !project.notes.is_empty() {
        out.push_str(&format!("Notes:\n{}\n", project.notes));
    }
    out
}
