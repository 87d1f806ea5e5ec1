mod cli;
mod output;
mod tui;

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use tasklist::validate::{parse_due_date, validate_language};
use tasklist::{
    Config, CreateTaskRequest, GeminiClient, Priority, TaskStore, TranslateRequest, Translator,
};

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

/// Log to stderr, or to `log_file` when the terminal is taken over by the UI.
fn setup_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.format_timestamp_secs().init();
    Ok(())
}

fn open_store(db_path: &Path) -> Result<TaskStore> {
    if let Some(parent) = db_path.parent() {
        ensure_dir(parent)?;
    }
    TaskStore::open(db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let ui_mode = matches!(cli.command, Command::Ui { .. });
    if ui_mode {
        ensure_dir(&config.data_dir)?;
        setup_logging(Some(&config.log_path()))?;
    } else {
        setup_logging(None)?;
    }

    match cli.command {
        Command::Add {
            title,
            desc,
            priority,
            due,
        } => {
            let store = open_store(&config.db_path)?;
            let request = CreateTaskRequest {
                title,
                description: desc,
                priority: priority.as_deref().map(Priority::parse).transpose()?,
                due_date: due.as_deref().map(parse_due_date).transpose()?,
            };
            let task = store.create(&request)?;
            eprintln!("Added task #{}: {}", task.id, task.title);
        }

        Command::List {
            completed,
            all,
            json,
        } => {
            let store = open_store(&config.db_path)?;
            if all {
                let pending = store.list(false)?;
                let done = store.list(true)?;
                if json {
                    let all: Vec<_> = pending.iter().chain(done.iter()).collect();
                    println!("{}", serde_json::to_string_pretty(&all)?);
                } else {
                    print!("{}", output::format_sections(&pending, &done));
                }
            } else {
                let tasks = store.list(completed)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&tasks)?);
                } else {
                    print!("{}", output::format_task_list(&tasks));
                }
            }
        }

        Command::Show { id, json } => {
            let store = open_store(&config.db_path)?;
            let task = store.get(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                print!("{}", output::format_task_detail(&task));
            }
        }

        Command::Done { id } => {
            let store = open_store(&config.db_path)?;
            let task = store.mark_completed(id)?;
            eprintln!("Marked #{} '{}' as completed", task.id, task.title);
        }

        Command::Rm { id } => {
            let store = open_store(&config.db_path)?;
            store.delete(id)?;
            eprintln!("Deleted task #{id}");
        }

        Command::Translate { id, lang } => {
            let languages = &config.translation.languages;
            let lang = validate_language(
                languages,
                lang.as_deref()
                    .unwrap_or(config.translation.default_language()),
            )?;
            let translator = GeminiClient::new(&config.translation)?;
            let store = open_store(&config.db_path)?;
            let task = store.get(id)?;
            let request = TranslateRequest::for_task(&task, lang);
            let translated = translator.translate_request(&request)?;
            println!("{translated}");
        }

        Command::Languages => {
            for language in &config.translation.languages {
                println!("{language}");
            }
        }

        Command::Ui { lang } => {
            let languages = config.translation.languages.clone();
            let initial = match lang.as_deref() {
                Some(name) => validate_language(&languages, name)?.to_string(),
                None => config.translation.default_language().to_string(),
            };
            let translator = GeminiClient::new(&config.translation)
                .map(|c| Box::new(c) as Box<dyn Translator>);
            if let Err(e) = &translator {
                log::warn!("{e}");
            }
            let store = open_store(&config.db_path)?;
            tui::run(&store, translator, languages, &initial)?;
        }
    }

    Ok(())
}
