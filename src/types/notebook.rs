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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::lenient;

/// A course's notes, grouped into folders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub folders: Vec<Folder>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub notes: Vec<Note>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub content: String,
}

/// The folder and note a reader lands on after clamping the requested
/// indices.
#[derive(Debug, PartialEq, Eq)]
pub struct Selection<'a> {
    pub folder_index: usize,
    pub folder: &'a Folder,
    pub note_index: usize,
    pub note: Option<&'a Note>,
}

impl Notebook {
    /// Add a folder and return its index.
    pub fn add_folder(&mut self, name: &str) -> Fallible<usize> {
        let name = name.trim();
        if name.is_empty() {
            return fail("folder name is empty.");
        }
        self.folders.push(Folder {
            name: name.to_string(),
            notes: Vec::new(),
        });
        Ok(self.folders.len() - 1)
    }

    pub fn delete_folder(&mut self, folder_index: usize) -> Fallible<Folder> {
        self.folder(folder_index)?;
        Ok(self.folders.remove(folder_index))
    }

    /// Add an empty note to a folder and return its index.
    pub fn add_note(&mut self, folder_index: usize, title: &str) -> Fallible<usize> {
        let title = title.trim();
        if title.is_empty() {
            return fail("note title is empty.");
        }
        let folder = self.folder_mut(folder_index)?;
        folder.notes.push(Note {
            title: title.to_string(),
            content: String::new(),
        });
        Ok(folder.notes.len() - 1)
    }

    /// Replace a note's content, and its title when a non-empty one is given.
    pub fn save_note(
        &mut self,
        folder_index: usize,
        note_index: usize,
        title: &str,
        content: &str,
    ) -> Fallible<()> {
        let note = self.note_mut(folder_index, note_index)?;
        let title = title.trim();
        if !title.is_empty() {
            note.title = title.to_string();
        }
        note.content = content.to_string();
        Ok(())
    }

    pub fn delete_note(&mut self, folder_index: usize, note_index: usize) -> Fallible<Note> {
        self.note_mut(folder_index, note_index)?;
        Ok(self.folders[folder_index].notes.remove(note_index))
    }

    /// Resolve a requested folder and note, clamping both into range. Returns
    /// `None` when there are no folders.
    pub fn select(&self, folder_index: i64, note_index: i64) -> Option<Selection<'_>> {
        let folder_index = clamp_index(folder_index, self.folders.len())?;
        let folder = &self.folders[folder_index];
        match clamp_index(note_index, folder.notes.len()) {
            Some(note_index) => Some(Selection {
                folder_index,
                folder,
                note_index,
                note: Some(&folder.notes[note_index]),
            }),
            None => Some(Selection {
                folder_index,
                folder,
                note_index: 0,
                note: None,
            }),
        }
    }

    fn folder(&self, folder_index: usize) -> Fallible<&Folder> {
        match self.folders.get(folder_index) {
            Some(folder) => Ok(folder),
            None => fail(format!("no folder with index {folder_index}.")),
        }
    }

    fn folder_mut(&mut self, folder_index: usize) -> Fallible<&mut Folder> {
        match self.folders.get_mut(folder_index) {
            Some(folder) => Ok(folder),
            None => fail(format!("no folder with index {folder_index}.")),
        }
    }

    fn note_mut(&mut self, folder_index: usize, note_index: usize) -> Fallible<&mut Note> {
        let folder = self.folder_mut(folder_index)?;
        match folder.notes.get_mut(note_index) {
            Some(note) => Ok(note),
            None => fail(format!(
                "no note with index {note_index} in folder {folder_index}."
            )),
        }
    }
}

fn clamp_index(requested: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = (len - 1) as i64;
    Some(requested.clamp(0, last) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Notebook {
        let mut notebook = Notebook::default();
        let f = notebook.add_folder("Lectures").unwrap();
        notebook.add_note(f, "Week 1").unwrap();
        notebook.add_note(f, "Week 2").unwrap();
        notebook.add_folder("Empty").unwrap();
        notebook
    }

    #[test]
    fn test_add_rejects_blank_names() {
        let mut notebook = Notebook::default();
        assert!(notebook.add_folder("   ").is_err());
        let f = notebook.add_folder(" Lectures ").unwrap();
        assert_eq!(notebook.folders[f].name, "Lectures");
        assert!(notebook.add_note(f, "").is_err());
        assert!(notebook.add_note(5, "Week 1").is_err());
    }

    #[test]
    fn test_save_note() {
        let mut notebook = sample();
        notebook.save_note(0, 1, "", "synapses").unwrap();
        assert_eq!(notebook.folders[0].notes[1].title, "Week 2");
        assert_eq!(notebook.folders[0].notes[1].content, "synapses");
        notebook.save_note(0, 1, "Week two", "").unwrap();
        assert_eq!(notebook.folders[0].notes[1].title, "Week two");
        assert_eq!(notebook.folders[0].notes[1].content, "");
        assert!(notebook.save_note(0, 2, "x", "y").is_err());
    }

    #[test]
    fn test_delete() {
        let mut notebook = sample();
        let note = notebook.delete_note(0, 0).unwrap();
        assert_eq!(note.title, "Week 1");
        assert_eq!(notebook.folders[0].notes.len(), 1);
        let folder = notebook.delete_folder(1).unwrap();
        assert_eq!(folder.name, "Empty");
        assert!(notebook.delete_folder(1).is_err());
    }

    #[test]
    fn test_select_clamps() {
        let notebook = sample();
        let selection = notebook.select(-4, 99).unwrap();
        assert_eq!(selection.folder_index, 0);
        assert_eq!(selection.note_index, 1);
        assert_eq!(selection.note.unwrap().title, "Week 2");

        let selection = notebook.select(7, 3).unwrap();
        assert_eq!(selection.folder_index, 1);
        assert_eq!(selection.note_index, 0);
        assert!(selection.note.is_none());

        assert!(Notebook::default().select(0, 0).is_none());
    }
}
