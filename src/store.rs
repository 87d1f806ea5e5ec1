use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db;
use crate::error::{Error, Result};
use crate::model::{CreateTaskRequest, DeleteTaskRequest, MarkCompletedRequest, Task};
use crate::validate::{normalize_description, validate_title};

const TASK_COLUMNS: &str = "id, title, description, priority, due_date, completed, created_at";

const INSERT_TASK: &str = "
INSERT INTO tasks (title, description, priority, due_date, completed, created_at)
VALUES (?1, ?2, ?3, ?4, 0, ?5)
";

const SET_COMPLETED: &str = "
UPDATE tasks
SET completed = 1
WHERE id = ?1 AND completed = 0
";

const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

fn read_task_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        due_date: row.get(4)?,
        completed: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Owns the `tasks` table. Nothing else writes to it.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Wrap an open connection, creating the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        db::init(&conn)?;
        Ok(Self { conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::new(db::open(path)?)
    }

    pub fn open_memory() -> Result<Self> {
        Ok(Self {
            conn: db::open_memory()?,
        })
    }

    pub fn create(&self, request: &CreateTaskRequest) -> Result<Task> {
        validate_title(&request.title)?;
        let title = request.title.trim();
        let description = normalize_description(request.description.as_deref());
        let priority = request.priority.unwrap_or_default();

        self.conn.execute(
            INSERT_TASK,
            params![title, description, priority, request.due_date, Utc::now()],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("created task {id} ({priority})");
        self.get(id)
    }

    /// Tasks whose completion flag equals `completed`, oldest first.
    pub fn list(&self, completed: bool) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE completed = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map([completed], read_task_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    pub fn get(&self, id: i64) -> Result<Task> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                [id],
                read_task_row,
            )
            .optional()?
            .ok_or(Error::NotFound(id))
    }

    /// Flip a pending task to completed. Already-completed or missing ids are
    /// both `NotFound`.
    pub fn mark_completed(&self, request: impl Into<MarkCompletedRequest>) -> Result<Task> {
        let MarkCompletedRequest { id } = request.into();
        let changed = self.conn.execute(SET_COMPLETED, [id])?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        log::debug!("marked task {id} completed");
        self.get(id)
    }

    pub fn delete(&self, request: impl Into<DeleteTaskRequest>) -> Result<()> {
        let DeleteTaskRequest { id } = request.into();
        let changed = self.conn.execute(DELETE_TASK, [id])?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        log::debug!("deleted task {id}");
        Ok(())
    }
}
