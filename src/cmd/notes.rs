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

use crate::cmd::course::update_course;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::notebook::Notebook;

/// Show the folders of a course's notebook, and the selected note.
pub fn show_notes(directory: Option<String>, id: usize, folder: i64, note: i64) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    print!("{}", render_notebook(&coll.course(id)?.notes, folder, note));
    Ok(())
}

pub fn add_folder(directory: Option<String>, id: usize, name: &str, today: Date) -> Fallible<()> {
    let index = update_course(directory, id, today, |course| course.notes.add_folder(name))?;
    println!("Added folder {index}.");
    Ok(())
}

pub fn delete_folder(
    directory: Option<String>,
    id: usize,
    folder: usize,
    today: Date,
) -> Fallible<()> {
    let removed = update_course(directory, id, today, |course| {
        course.notes.delete_folder(folder)
    })?;
    println!("Deleted folder {:?}.", removed.name);
    Ok(())
}

pub fn add_note(
    directory: Option<String>,
    id: usize,
    folder: usize,
    title: &str,
    today: Date,
) -> Fallible<()> {
    let index = update_course(directory, id, today, |course| {
        course.notes.add_note(folder, title)
    })?;
    println!("Added note {index}.");
    Ok(())
}

pub fn save_note(
    directory: Option<String>,
    id: usize,
    folder: usize,
    note: usize,
    title: &str,
    content: &str,
    today: Date,
) -> Fallible<()> {
    update_course(directory, id, today, |course| {
        course.notes.save_note(folder, note, title, content)
    })?;
    println!("Saved note.");
    Ok(())
}

pub fn delete_note(
    directory: Option<String>,
    id: usize,
    folder: usize,
    note: usize,
    today: Date,
) -> Fallible<()> {
    let removed = update_course(directory, id, today, |course| {
        course.notes.delete_note(folder, note)
    })?;
    println!("Deleted note {:?}.", removed.title);
    Ok(())
}

fn render_notebook(notebook: &Notebook, folder: i64, note: i64) -> String {
    let Some(selection) = notebook.select(folder, note) else {
        return "No folders yet.\n".to_string();
    };
    let mut out = String::from("Folders:\n");
    for (index, f) in notebook.folders.iter().enumerate() {
        let mark = if index == selection.folder_index { ">" } else { " " };
        out.push_str(&format!("{mark} {index}. {} ({} notes)\n", f.name, f.notes.len()));
    }
    out.push_str(&format!("Notes in {}:\n", selection.folder.name));
    for (index, n) in selection.folder.notes.iter().enumerate() {
        let mark = if index == selection.note_index { ">" } else { " " };
        out.push_str(&format!("{mark} {index}. {}\n", n.title));
    }
    match selection.note {
        Some(n) => out.push_str(&format!("\n# {}\n{}\n", n.title, n.content)),
        None => out.push_str("  none\n"),
    }
    out
}
