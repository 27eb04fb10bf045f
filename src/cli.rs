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

use clap::Parser;
use clap::Subcommand;

use crate::cmd::course;
use crate::cmd::drill::drill;
use crate::cmd::export::export_course;
use crate::cmd::flashcards::practice;
use crate::cmd::flashcards::rate;
use crate::cmd::flashcards::show_flashcard;
use crate::cmd::generate;
use crate::cmd::notes;
use crate::cmd::overview::print_agenda;
use crate::cmd::overview::print_exams;
use crate::cmd::overview::print_stats;
use crate::cmd::project;
use crate::cmd::status::OutputFormat;
use crate::cmd::status::print_status;
use crate::error::Fallible;
use crate::flashcards::FilterMode;
use crate::flashcards::Position;
use crate::rating::Rating;
use crate::types::course::CourseEdit;
use crate::types::date::Date;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the data directory. Defaults to the current directory.
    #[arg(long, short, global = true)]
    directory: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show progress and exam status for every course.
    Status {
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Create, edit and delete courses.
    Course {
        #[command(subcommand)]
        command: CourseCommand,
    },
    /// Manage a course's topics.
    Topic {
        #[command(subcommand)]
        command: TopicCommand,
    },
    /// Manage a course's practice questions.
    Question {
        #[command(subcommand)]
        command: QuestionCommand,
    },
    /// Manage a course's study plan.
    Block {
        #[command(subcommand)]
        command: BlockCommand,
    },
    /// Set a topic summary.
    Summary {
        course: usize,
        topic: String,
        text: String,
    },
    /// Show one flashcard.
    Flashcards {
        course: usize,
        #[arg(long, default_value_t = FilterMode::All)]
        mode: FilterMode,
        /// Position within the filtered cards. Clamped into range.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        pos: i64,
        /// Pick a random card instead.
        #[arg(long)]
        random: bool,
    },
    /// Rate a flashcard and show where the review continues.
    Rate {
        course: usize,
        /// The card's index among all of the course's cards.
        #[arg(allow_negative_numbers = true)]
        index: i64,
        rating: Rating,
        #[arg(long, default_value_t = FilterMode::All)]
        mode: FilterMode,
    },
    /// Review flashcards interactively.
    Drill {
        course: usize,
        #[arg(long, default_value_t = FilterMode::All)]
        mode: FilterMode,
    },
    /// Show a practice question with its model answer.
    Practice {
        course: usize,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        question: i64,
    },
    /// List courses by exam date.
    Exams,
    /// Show today's study blocks and the courses that need focus.
    Today,
    /// Show statistics across all courses.
    Stats {
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print one course as JSON.
    Export { course: usize },
    /// Generate questions or study blocks from templates.
    Generate {
        #[command(subcommand)]
        command: GenerateCommand,
    },
    /// Add the demo course.
    Demo,
    /// Track projects and their tasks.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Manage a course's notebook.
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
}

#[derive(Subcommand)]
enum CourseCommand {
    /// Add a course.
    New {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        tag: String,
        /// Exam date as YYYY-MM-DD.
        #[arg(long, default_value = "")]
        exam_date: String,
        #[arg(long, default_value = "")]
        chapters: String,
        #[arg(long, default_value = "")]
        questions: String,
    },
    /// Edit a course. An empty exam date removes it.
    Edit {
        course: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        exam_date: Option<String>,
        #[arg(long)]
        chapters: Option<String>,
        #[arg(long)]
        questions: Option<String>,
    },
    /// Delete a course.
    Delete { course: usize },
    /// Show a course in full.
    Show { course: usize },
}

#[derive(Subcommand)]
enum TopicCommand {
    Add { course: usize, title: String },
    Clear { course: usize },
}

#[derive(Subcommand)]
enum QuestionCommand {
    Add {
        course: usize,
        question: String,
        #[arg(default_value = "")]
        answer: String,
    },
    /// Remove every question, and with it every review count.
    Clear { course: usize },
}

#[derive(Subcommand)]
enum BlockCommand {
    Add {
        course: usize,
        title: String,
        #[arg(long, default_value = "")]
        duration: String,
        #[arg(long, default_value = "")]
        when: String,
    },
    Clear { course: usize },
}

#[derive(Subcommand)]
enum GenerateCommand {
    Questions {
        course: usize,
        #[arg(long)]
        max: Option<usize>,
    },
    Plan {
        course: usize,
        #[arg(long)]
        max: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// List all projects.
    List,
    New {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        tag: String,
        /// Deadline as YYYY-MM-DD.
        #[arg(long, default_value = "")]
        deadline: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Show { project: usize },
    TaskAdd { project: usize, title: String },
    TaskToggle { project: usize, task: usize },
    Notes { project: usize, text: String },
    Delete { project: usize },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// Show a folder and note. Indices are clamped into range.
    Show {
        course: usize,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        folder: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        note: i64,
    },
    FolderAdd { course: usize, name: String },
    FolderDelete { course: usize, folder: usize },
    Add { course: usize, folder: usize, title: String },
    Save {
        course: usize,
        folder: usize,
        note: usize,
        #[arg(long, default_value = "")]
        title: String,
        content: String,
    },
    Delete { course: usize, folder: usize, note: usize },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let directory = cli.directory;
    let today = Date::today();
    match cli.command {
        Command::Status { format } => print_status(directory, format, today),
        Command::Course { command } => match command {
            CourseCommand::New {
                name,
                tag,
                exam_date,
                chapters,
                questions,
            } => course::new_course(
                directory, &name, &tag, &exam_date, &chapters, &questions, today,
            ),
            CourseCommand::Edit {
                course,
                name,
                tag,
                exam_date,
                chapters,
                questions,
            } => {
                let edit = CourseEdit {
                    name,
                    tag,
                    exam_date,
                    chapters,
                    questions,
                };
                course::edit_course(directory, course, edit, today)
            }
            CourseCommand::Delete { course } => course::delete_course(directory, course, today),
            CourseCommand::Show { course } => course::show_course(directory, course, today),
        },
        Command::Topic { command } => match command {
            TopicCommand::Add { course, title } => {
                course::add_topic(directory, course, &title, today)
            }
            TopicCommand::Clear { course } => course::clear_topics(directory, course, today),
        },
        Command::Question { command } => match command {
            QuestionCommand::Add {
                course,
                question,
                answer,
            } => course::add_question(directory, course, &question, &answer, today),
            QuestionCommand::Clear { course } => {
                course::clear_questions(directory, course, today)
            }
        },
        Command::Block { command } => match command {
            BlockCommand::Add {
                course,
                title,
                duration,
                when,
            } => course::add_block(directory, course, &title, &duration, &when, today),
            BlockCommand::Clear { course } => course::clear_plan(directory, course, today),
        },
        Command::Summary {
            course,
            topic,
            text,
        } => course::set_summary(directory, course, &topic, &text, today),
        Command::Flashcards {
            course,
            mode,
            pos,
            random,
        } => {
            let position = if random {
                Position::Random
            } else {
                Position::At(pos)
            };
            show_flashcard(directory, course, mode, position)
        }
        Command::Rate {
            course,
            index,
            rating,
            mode,
        } => rate(directory, course, index, rating, mode, today),
        Command::Drill { course, mode } => drill(directory, course, mode, today),
        Command::Practice { course, question } => practice(directory, course, question),
        Command::Exams => print_exams(directory, today),
        Command::Today => print_agenda(directory, today),
        Command::Stats { format } => print_stats(directory, format, today),
        Command::Export { course } => export_course(directory, course, today),
        Command::Generate { command } => match command {
            GenerateCommand::Questions { course, max } => {
                generate::questions(directory, course, max, today)
            }
            GenerateCommand::Plan { course, max } => generate::plan(directory, course, max, today),
        },
        Command::Demo => generate::demo(directory, today),
        Command::Project { command } => match command {
            ProjectCommand::List => project::list_projects(directory, today),
            ProjectCommand::New {
                title,
                tag,
                deadline,
                description,
            } => project::new_project(directory, &title, &tag, &deadline, &description, today),
            ProjectCommand::Show { project } => project::show_project(directory, project, today),
            ProjectCommand::TaskAdd { project, title } => {
                project::add_task(directory, project, &title, today)
            }
            ProjectCommand::TaskToggle { project, task } => {
                project::toggle_task(directory, project, task, today)
            }
            ProjectCommand::Notes { project, text } => {
                project::set_notes(directory, project, &text, today)
            }
            ProjectCommand::Delete { project } => {
                project::delete_project(directory, project, today)
            }
        },
        Command::Notes { command } => match command {
            NotesCommand::Show {
                course,
                folder,
                note,
            } => notes::show_notes(directory, course, folder, note),
            NotesCommand::FolderAdd { course, name } => {
                notes::add_folder(directory, course, &name, today)
            }
            NotesCommand::FolderDelete { course, folder } => {
                notes::delete_folder(directory, course, folder, today)
            }
            NotesCommand::Add {
                course,
                folder,
                title,
            } => notes::add_note(directory, course, folder, &title, today),
            NotesCommand::Save {
                course,
                folder,
                note,
                title,
                content,
            } => notes::save_note(directory, course, folder, note, &title, &content, today),
            NotesCommand::Delete {
                course,
                folder,
                note,
            } => notes::delete_note(directory, course, folder, note, today),
        },
    }
}
