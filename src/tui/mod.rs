mod app;
mod event;
mod view;

use std::io;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use tasklist::{TaskStore, Translator};

use app::App;
use event::KeyAction;

pub fn run(
    store: &TaskStore,
    translator: tasklist::Result<Box<dyn Translator>>,
    languages: Vec<String>,
    initial_language: &str,
) -> Result<()> {
    let mut app = App::new(store, translator, languages, initial_language)?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, store);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &TaskStore,
) -> Result<()> {
    loop {
        terminal.draw(|frame| view::render(frame, app))?;

        let Event::Key(key) = ct_event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match event::handle_key(app, key) {
            KeyAction::Quit => return Ok(()),
            KeyAction::Submit => app.submit_add(store)?,
            KeyAction::MarkCompleted => app.mark_completed(store)?,
            KeyAction::ConfirmDelete => app.confirm_delete(store)?,
            KeyAction::Translate => {
                // Blocks until the service answers or the client times out.
                app.status = Some(format!("Translating to {}...", app.current_language()));
                terminal.draw(|frame| view::render(frame, app))?;
                app.translate_selected();
            }
            KeyAction::Refresh => {
                app.error = None;
                app.status = None;
                app.refresh(store)?;
            }
            KeyAction::Continue => {}
        }
    }
}
