use std::collections::HashMap;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tasklist::validate::{parse_due_date, validate_title};
use tasklist::{CreateTaskRequest, Priority, Task, TaskStore, TranslateRequest, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    AddTask,
    ConfirmDelete(i64),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Title,
    Description,
    Priority,
    DueDate,
}

pub struct AddForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
    pub focused: AddField,
    pub error: Option<String>,
}

impl AddForm {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::default(),
            due_date: String::new(),
            focused: AddField::Title,
            error: None,
        }
    }

    /// Text buffer for the focused field; `None` on the priority selector.
    pub fn focused_buf_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            AddField::Title => Some(&mut self.title),
            AddField::Description => Some(&mut self.description),
            AddField::Priority => None,
            AddField::DueDate => Some(&mut self.due_date),
        }
    }

    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            AddField::Title => AddField::Description,
            AddField::Description => AddField::Priority,
            AddField::Priority => AddField::DueDate,
            AddField::DueDate => AddField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused = match self.focused {
            AddField::Title => AddField::DueDate,
            AddField::Description => AddField::Title,
            AddField::Priority => AddField::Description,
            AddField::DueDate => AddField::Priority,
        };
    }

    /// Build the request, or record a form error and return `None`.
    pub fn to_request(&mut self) -> Option<CreateTaskRequest> {
        self.to_request_as_of(Local::now().date_naive())
    }

    /// As [`to_request`](Self::to_request), rejecting due dates before `today`.
    fn to_request_as_of(&mut self, today: NaiveDate) -> Option<CreateTaskRequest> {
        if let Err(e) = validate_title(&self.title) {
            self.error = Some(e.to_string());
            return None;
        }
        let due_date = if self.due_date.trim().is_empty() {
            None
        } else {
            match parse_due_date(&self.due_date) {
                Ok(d) if d < today => {
                    self.error = Some(format!("due date {d} is in the past"));
                    return None;
                }
                Ok(d) => Some(d),
                Err(e) => {
                    self.error = Some(e.to_string());
                    return None;
                }
            }
        };
        self.error = None;
        Some(CreateTaskRequest {
            title: self.title.clone(),
            description: Some(self.description.clone()),
            priority: Some(self.priority),
            due_date,
        })
    }
}

pub struct App {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
    pub section: Section,
    pub cursor: usize,
    pub languages: Vec<String>,
    pub language: usize,
    /// Session-only translations keyed by (task id, language).
    pub translations: HashMap<(i64, String), String>,
    pub mode: Mode,
    pub add_form: Option<AddForm>,
    pub error: Option<String>,
    pub status: Option<String>,
    translator: std::result::Result<Box<dyn Translator>, String>,
}

impl App {
    pub fn new(
        store: &TaskStore,
        translator: tasklist::Result<Box<dyn Translator>>,
        languages: Vec<String>,
        initial_language: &str,
    ) -> Result<Self> {
        let language = languages
            .iter()
            .position(|l| l == initial_language)
            .unwrap_or(0);
        let mut app = App {
            pending: Vec::new(),
            completed: Vec::new(),
            section: Section::Pending,
            cursor: 0,
            languages,
            language,
            translations: HashMap::new(),
            mode: Mode::Normal,
            add_form: None,
            error: None,
            status: None,
            translator: translator.map_err(|e| e.to_string()),
        };
        app.refresh(store)?;
        Ok(app)
    }

    pub fn refresh(&mut self, store: &TaskStore) -> Result<()> {
        self.pending = store.list(false)?;
        self.completed = store.list(true)?;
        self.clamp_cursor();
        Ok(())
    }

    pub fn rows(&self) -> &[Task] {
        match self.section {
            Section::Pending => &self.pending,
            Section::Completed => &self.completed,
        }
    }

    pub fn selected(&self) -> Option<&Task> {
        self.rows().get(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if !self.rows().is_empty() && self.cursor < self.rows().len() - 1 {
            self.cursor += 1;
        }
    }

    pub fn switch_section(&mut self) {
        self.section = match self.section {
            Section::Pending => Section::Completed,
            Section::Completed => Section::Pending,
        };
        self.cursor = 0;
    }

    pub fn current_language(&self) -> &str {
        self.languages
            .get(self.language)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn next_language(&mut self) {
        if !self.languages.is_empty() {
            self.language = (self.language + 1) % self.languages.len();
        }
    }

    pub fn prev_language(&mut self) {
        if !self.languages.is_empty() {
            self.language = (self.language + self.languages.len() - 1) % self.languages.len();
        }
    }

    /// Why translation is disabled, if it is.
    pub fn translation_unavailable(&self) -> Option<&str> {
        self.translator.as_ref().err().map(String::as_str)
    }

    pub fn translation_for(&self, id: i64) -> Option<&str> {
        self.translations
            .get(&(id, self.current_language().to_string()))
            .map(String::as_str)
    }

    pub fn mark_completed(&mut self, store: &TaskStore) -> Result<()> {
        self.error = None;
        if self.section == Section::Completed {
            self.error = Some("task is already completed".into());
            return Ok(());
        }
        let Some(id) = self.selected().map(|t| t.id) else {
            return Ok(());
        };
        match store.mark_completed(id) {
            Ok(task) => self.status = Some(format!("Completed '{}'", task.title)),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.refresh(store)
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected().map(|t| t.id) {
            self.mode = Mode::ConfirmDelete(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn confirm_delete(&mut self, store: &TaskStore) -> Result<()> {
        let Mode::ConfirmDelete(id) = self.mode else {
            return Ok(());
        };
        self.mode = Mode::Normal;
        self.error = None;
        match store.delete(id) {
            Ok(()) => {
                self.translations.retain(|(task_id, _), _| *task_id != id);
                self.status = Some(format!("Deleted task #{id}"));
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.refresh(store)
    }

    /// Translate the selected task into the current language.
    pub fn translate_selected(&mut self) {
        self.error = None;
        self.status = None;
        let Some(task) = self.selected() else {
            return;
        };
        let id = task.id;
        let request = TranslateRequest::for_task(task, self.current_language());
        let translator = match &self.translator {
            Ok(t) => t,
            Err(reason) => {
                self.error = Some(format!("translation unavailable: {reason}"));
                return;
            }
        };
        match translator.translate_request(&request) {
            Ok(translated) => {
                self.translations
                    .insert((id, request.target_language), translated);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.add_form = Some(AddForm::new());
        self.mode = Mode::AddTask;
    }

    pub fn cancel_add_mode(&mut self) {
        self.add_form = None;
        self.mode = Mode::Normal;
    }

    pub fn submit_add(&mut self, store: &TaskStore) -> Result<()> {
        let Some(form) = self.add_form.as_mut() else {
            return Ok(());
        };
        let Some(request) = form.to_request() else {
            return Ok(());
        };
        match store.create(&request) {
            Ok(task) => {
                self.add_form = None;
                self.mode = Mode::Normal;
                self.status = Some(format!("Added '{}'", task.title));
                self.refresh(store)?;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
        Ok(())
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            _ => Mode::Help,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::Days;

    use super::*;

    struct Upper {
        calls: Cell<usize>,
    }

    impl Translator for Upper {
        fn translate(&self, text: &str, target_language: &str) -> tasklist::Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("[{target_language}] {}", text.to_uppercase()))
        }
    }

    fn languages() -> Vec<String> {
        vec!["English".into(), "French".into(), "German".into()]
    }

    fn app_with(store: &TaskStore, titles: &[&str]) -> App {
        for t in titles {
            store.create(&CreateTaskRequest::new(*t)).unwrap();
        }
        let translator: Box<dyn Translator> = Box::new(Upper { calls: Cell::new(0) });
        App::new(store, Ok(translator), languages(), "French").unwrap()
    }

    #[test]
    fn starts_on_requested_language() {
        let store = TaskStore::open_memory().unwrap();
        let app = app_with(&store, &[]);
        assert_eq!(app.current_language(), "French");
    }

    #[test]
    fn language_cycles_both_ways() {
        let store = TaskStore::open_memory().unwrap();
        let mut app = app_with(&store, &[]);
        app.next_language();
        assert_eq!(app.current_language(), "German");
        app.next_language();
        assert_eq!(app.current_language(), "English");
        app.prev_language();
        assert_eq!(app.current_language(), "German");
    }

    #[test]
    fn cursor_clamps() {
        let store = TaskStore::open_memory().unwrap();
        let mut app = app_with(&store, &["a", "b"]);
        app.move_up();
        assert_eq!(app.cursor, 0);
        app.move_down();
        app.move_down();
        assert_eq!(app.cursor, 1);
        assert_eq!(app.selected().unwrap().title, "b");
    }

    #[test]
    fn complete_moves_task_to_completed_section() {
        let store = TaskStore::open_memory().unwrap();
        let mut app = app_with(&store, &["a"]);
        app.mark_completed(&store).unwrap();
        assert!(app.pending.is_empty());
        assert_eq!(app.completed.len(), 1);
        assert!(app.error.is_none());

        app.switch_section();
        app.mark_completed(&store).unwrap();
        assert!(app.error.is_some());
    }

    #[test]
    fn delete_requires_confirmation_and_drops_translations() {
        let store = TaskStore::open_memory().unwrap();
        let mut app = app_with(&store, &["a"]);
        let id = app.selected().unwrap().id;
        app.translate_selected();
        assert!(app.translation_for(id).is_some());

        app.request_delete();
        assert_eq!(app.mode, Mode::ConfirmDelete(id));
        app.cancel_delete();
        assert_eq!(app.pending.len(), 1);

        app.request_delete();
        app.confirm_delete(&store).unwrap();
        assert!(app.pending.is_empty());
        assert!(app.translations.is_empty());
        assert!(store.get(id).unwrap_err().is_not_found());
    }

    #[test]
    fn translations_are_kept_per_language() {
        let store = TaskStore::open_memory().unwrap();
        let mut app = app_with(&store, &["buy milk"]);
        let id = app.selected().unwrap().id;
        app.translate_selected();
        assert_eq!(
            app.translation_for(id),
            Some("[French] BUY MILK (PRIORITY: MEDIUM)")
        );
        app.next_language();
        assert_eq!(app.translation_for(id), None);
    }

    #[test]
    fn translation_disabled_without_translator() {
        let store = TaskStore::open_memory().unwrap();
        store.create(&CreateTaskRequest::new("a")).unwrap();
        let missing = Err(tasklist::Error::Configuration("GOOGLE_API_KEY is not set".into()));
        let mut app = App::new(&store, missing, languages(), "English").unwrap();
        assert!(app.translation_unavailable().is_some());
        app.translate_selected();
        assert!(app.error.as_deref().unwrap().contains("translation unavailable"));
        assert!(app.translations.is_empty());
    }

    #[test]
    fn add_form_validates_title_and_date() {
        let store = TaskStore::open_memory().unwrap();
        let mut app = app_with(&store, &[]);
        app.enter_add_mode();
        app.submit_add(&store).unwrap();
        assert_eq!(app.mode, Mode::AddTask);
        assert!(app.add_form.as_ref().unwrap().error.is_some());

        let form = app.add_form.as_mut().unwrap();
        form.title = "Write report".into();
        form.due_date = "tomorrow".into();
        app.submit_add(&store).unwrap();
        assert!(app.add_form.as_ref().unwrap().error.is_some());

        let due = Local::now().date_naive() + Days::new(30);
        let form = app.add_form.as_mut().unwrap();
        form.due_date = due.format("%Y-%m-%d").to_string();
        form.priority = Priority::High;
        app.submit_add(&store).unwrap();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.pending.len(), 1);
        assert_eq!(app.pending[0].priority, Priority::High);
        assert_eq!(app.pending[0].due_date, Some(due));
    }

    #[test]
    fn add_form_rejects_past_due_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let mut form = AddForm::new();
        form.title = "Write report".into();

        form.due_date = "2025-01-09".into();
        assert!(form.to_request_as_of(today).is_none());
        assert!(form.error.as_deref().unwrap().contains("in the past"));

        form.due_date = "2025-01-10".into();
        let request = form.to_request_as_of(today).unwrap();
        assert_eq!(request.due_date, Some(today));
        assert!(form.error.is_none());
    }

    #[test]
    fn add_form_field_order() {
        let mut form = AddForm::new();
        form.next_field();
        assert_eq!(form.focused, AddField::Description);
        form.next_field();
        assert!(form.focused_buf_mut().is_none());
        form.prev_field();
        form.prev_field();
        form.prev_field();
        assert_eq!(form.focused, AddField::DueDate);
    }
}
