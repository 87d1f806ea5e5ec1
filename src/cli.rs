use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tasklist", about = "A to-do list with on-demand translation")]
pub struct Cli {
    /// Path to the SQLite database [default: ~/.tasklist/tasklist.db]
    #[arg(long, env = "TASKLIST_DB", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(short, long)]
        desc: Option<String>,
        /// Priority (low, medium, high) [default: medium]
        #[arg(short, long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// List pending tasks
    List {
        /// List completed tasks instead
        #[arg(long, conflicts_with = "all")]
        completed: bool,
        /// Show pending and completed sections
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show task details
    Show {
        /// Task id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a pending task as completed
    Done {
        /// Task id
        id: i64,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },

    /// Translate a task's text
    Translate {
        /// Task id
        id: i64,
        /// Target language [default: first configured language]
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// List the target languages offered for translation
    Languages,

    /// Launch interactive TUI
    Ui {
        /// Initial target language
        #[arg(short, long)]
        lang: Option<String>,
    },
}
