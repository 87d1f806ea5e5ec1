//! Single-user to-do list core.
//!
//! A [`TaskStore`] owns the SQLite table of tasks; a [`Translator`] turns task
//! text into another language on request. Presentation layers (the CLI and
//! terminal UI in this crate's binary) hold an instance of each and call them
//! directly.
//!
//! ```no_run
//! use tasklist::{CreateTaskRequest, Priority, TaskStore};
//!
//! let store = TaskStore::open_memory()?;
//! let task = store.create(&CreateTaskRequest::new("Write report").priority(Priority::High))?;
//! store.mark_completed(task.id)?;
//! assert_eq!(store.list(true)?.len(), 1);
//! # Ok::<(), tasklist::Error>(())
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod store;
pub mod translate;
pub mod validate;

pub use config::{Config, TranslationConfig};
pub use error::{Error, Result};
pub use model::{CreateTaskRequest, DeleteTaskRequest, MarkCompletedRequest, Priority, Task};
pub use store::TaskStore;
pub use translate::{GeminiClient, TranslateRequest, Translator};
