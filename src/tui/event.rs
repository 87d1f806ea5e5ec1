use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

/// Result of handling a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    Refresh,
    MarkCompleted,
    ConfirmDelete,
    Translate,
    Continue,
}

/// Handle a key press. Returns an action indicating what the event loop should do.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    match app.mode {
        Mode::AddTask => handle_add(app, key),
        Mode::ConfirmDelete(_) => handle_confirm(app, key),
        Mode::Help => {
            app.toggle_help();
            KeyAction::Continue
        }
        Mode::Normal => handle_normal(app, key),
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Tab => app.switch_section(),
        KeyCode::Char('a') => app.enter_add_mode(),
        KeyCode::Char('c') => return KeyAction::MarkCompleted,
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('t') => return KeyAction::Translate,
        KeyCode::Char('l') => app.next_language(),
        KeyCode::Char('L') => app.prev_language(),
        KeyCode::Char('r') => return KeyAction::Refresh,
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_confirm(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => KeyAction::ConfirmDelete,
        _ => {
            app.cancel_delete();
            KeyAction::Continue
        }
    }
}

fn handle_add(app: &mut App, key: KeyEvent) -> KeyAction {
    let Some(form) = app.add_form.as_mut() else {
        app.cancel_add_mode();
        return KeyAction::Continue;
    };
    match key.code {
        KeyCode::Esc => {
            app.cancel_add_mode();
            KeyAction::Continue
        }
        KeyCode::Tab => {
            form.next_field();
            KeyAction::Continue
        }
        KeyCode::BackTab => {
            form.prev_field();
            KeyAction::Continue
        }
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Left => {
            if form.focused_buf_mut().is_none() {
                form.priority = form.priority.cycle().cycle();
            }
            KeyAction::Continue
        }
        KeyCode::Right => {
            if form.focused_buf_mut().is_none() {
                form.priority = form.priority.cycle();
            }
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            if let Some(buf) = form.focused_buf_mut() {
                buf.pop();
            }
            form.error = None;
            KeyAction::Continue
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                if let Some(buf) = form.focused_buf_mut() {
                    buf.clear();
                }
            } else if let Some(buf) = form.focused_buf_mut() {
                buf.push(c);
            } else if c == ' ' {
                form.priority = form.priority.cycle();
            }
            form.error = None;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}
