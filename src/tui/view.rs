use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use tasklist::{Priority, Task};

use super::app::{AddField, App, Mode, Section};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_section(frame, app, Section::Pending, chunks[1]);
    render_section(frame, app, Section::Completed, chunks[2]);
    render_detail(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);

    match app.mode {
        Mode::AddTask => render_add_dialog(frame, app),
        Mode::ConfirmDelete(id) => render_confirm(frame, app, id),
        Mode::Help => render_help(frame),
        Mode::Normal => {}
    }
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("Translate to: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.current_language().to_string(), Style::default().bold()),
    ];
    if app.translation_unavailable().is_some() {
        spans.push(Span::styled(
            "  (translation unavailable)",
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn task_line(index: usize, task: &Task) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("{}. ", index + 1)),
        Span::styled(task.title.clone(), Style::default().bold()),
        Span::raw("  "),
        Span::styled(task.priority.label(), priority_style(task.priority)),
    ];
    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!("  due {}", due.format("%Y-%m-%d")),
            Style::default().fg(Color::Cyan),
        ));
    }
    let line = Line::from(spans);
    if task.completed {
        line.style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        line
    }
}

fn render_section(frame: &mut Frame, app: &App, section: Section, area: Rect) {
    let (tasks, title) = match section {
        Section::Pending => (&app.pending, " Pending Tasks "),
        Section::Completed => (&app.completed, " Completed Tasks "),
    };
    let active = app.section == section;

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let item = ListItem::new(task_line(i, task));
            if active && i == app.cursor {
                item.style(Style::default().bg(Color::DarkGray))
            } else {
                item
            }
        })
        .collect();

    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    frame.render_widget(list, area);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    match app.selected() {
        Some(task) => {
            if let Some(desc) = &task.description {
                lines.push(Line::from(Span::styled(
                    desc.clone(),
                    Style::default().italic(),
                )));
            }
            if let Some(translated) = app.translation_for(task.id) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("Translated ({}): ", app.current_language()),
                        Style::default().bold(),
                    ),
                    Span::styled(translated.to_string(), Style::default().italic()),
                ]));
            }
        }
        None if app.pending.is_empty() && app.completed.is_empty() => {
            lines.push(Line::raw("No to-do items yet! Press 'a' to add one."));
        }
        None => {}
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(err) = &app.error {
        Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red)))
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(status.clone(), Style::default().fg(Color::Green)))
    } else {
        Line::from(Span::styled(
            "a: add  c: complete  d: delete  t: translate  l/L: language  ?: help  q: quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Center a rectangle within an area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_field(
    frame: &mut Frame,
    label: &str,
    value: &str,
    focused: bool,
    chunks: &[Rect],
    idx: &mut usize,
) {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(label).style(label_style), chunks[*idx]);
    *idx += 1;

    let cursor = if focused { "_" } else { "" };
    frame.render_widget(
        Paragraph::new(format!("  {value}{cursor}")).style(Style::default().fg(Color::White)),
        chunks[*idx],
    );
    *idx += 1;
}

/// Every priority in order, the selected one bracketed.
fn priority_choices(selected: Priority) -> String {
    Priority::ALL
        .iter()
        .map(|&p| {
            if p == selected {
                format!("[{}]", p.label())
            } else {
                p.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_add_dialog(frame: &mut Frame, app: &App) {
    let Some(form) = &app.add_form else {
        return;
    };

    let term = frame.area();
    let width = 60.min(term.width.saturating_sub(4));
    let content_rows: u16 = 9 + u16::from(form.error.is_some()); // 4*(label+input) + hint
    let height = (content_rows + 2).min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add To-Do ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); 8];
    if form.error.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1)); // hint
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut idx = 0;
    render_field(
        frame,
        "Title:",
        &form.title,
        form.focused == AddField::Title,
        &chunks,
        &mut idx,
    );
    render_field(
        frame,
        "Description (optional):",
        &form.description,
        form.focused == AddField::Description,
        &chunks,
        &mut idx,
    );
    render_field(
        frame,
        "Priority (Space/Left/Right):",
        &priority_choices(form.priority),
        form.focused == AddField::Priority,
        &chunks,
        &mut idx,
    );
    render_field(
        frame,
        "Due date (YYYY-MM-DD, optional):",
        &form.due_date,
        form.focused == AddField::DueDate,
        &chunks,
        &mut idx,
    );

    if let Some(err) = &form.error {
        frame.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            chunks[idx],
        );
        idx += 1;
    }

    frame.render_widget(
        Paragraph::new("Enter: add  Tab/S-Tab: fields  Esc: cancel  C-u: clear")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[idx],
    );
}

fn render_confirm(frame: &mut Frame, app: &App, id: i64) {
    let term = frame.area();
    let width = 50.min(term.width.saturating_sub(4));
    let height = 5.min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete ")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = app
        .pending
        .iter()
        .chain(app.completed.iter())
        .find(|t| t.id == id)
        .map(|t| t.title.clone())
        .unwrap_or_else(|| format!("#{id}"));

    let text = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(title, Style::default().bold()),
            Span::raw(" permanently?"),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Proceed? "),
            Span::styled("y", Style::default().fg(Color::Green).bold()),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).bold()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_help(frame: &mut Frame) {
    let term = frame.area();
    let width = 50.min(term.width.saturating_sub(4));
    let height = 15.min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let keys = [
        ("j/Down  ", "Move down"),
        ("k/Up    ", "Move up"),
        ("Tab     ", "Switch pending/completed"),
        ("a       ", "Add task"),
        ("c       ", "Mark completed"),
        ("d       ", "Delete task"),
        ("t       ", "Translate selected task"),
        ("l/L     ", "Next/previous language"),
        ("r       ", "Refresh"),
        ("?       ", "Toggle help"),
        ("q/Esc   ", "Quit"),
    ];
    let help_text: Vec<Line> = keys
        .iter()
        .map(|(k, desc)| {
            Line::from(vec![
                Span::styled(*k, Style::default().fg(Color::Cyan)),
                Span::raw(*desc),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(help_text), inner);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tasklist::{CreateTaskRequest, TaskStore, Translator};

    use super::*;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn centered_rect_centers_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(40, 10, area);
        assert_eq!(r.x, 20);
        assert_eq!(r.y, 7);
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 10);
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_rect(40, 20, area);
        assert_eq!(r.width, 20);
        assert_eq!(r.height, 10);
    }

    #[test]
    fn renders_both_sections() {
        let store = TaskStore::open_memory().unwrap();
        store.create(&CreateTaskRequest::new("Pending one")).unwrap();
        let done = store.create(&CreateTaskRequest::new("Done one")).unwrap();
        store.mark_completed(done.id).unwrap();
        let missing: tasklist::Result<Box<dyn Translator>> =
            Err(tasklist::Error::Configuration("no key".into()));
        let app = App::new(&store, missing, vec!["French".into()], "French").unwrap();

        let text = draw(&app);
        assert!(text.contains("Pending Tasks"));
        assert!(text.contains("Completed Tasks"));
        assert!(text.contains("Pending one"));
        assert!(text.contains("translation unavailable"));
        assert!(!text.contains("Add To-Do"));
    }

    #[test]
    fn add_dialog_overlays_the_lists() {
        let store = TaskStore::open_memory().unwrap();
        let missing: tasklist::Result<Box<dyn Translator>> =
            Err(tasklist::Error::Configuration("no key".into()));
        let mut app = App::new(&store, missing, vec!["French".into()], "French").unwrap();
        app.enter_add_mode();

        let text = draw(&app);
        assert!(text.contains("Add To-Do"));
        assert!(text.contains("Low [Medium] High"));
    }

    #[test]
    fn priority_choices_mark_the_selection() {
        assert_eq!(priority_choices(Priority::Low), "[Low] Medium High");
        assert_eq!(priority_choices(Priority::High), "Low Medium [High]");
    }
}
