use thiserror::Error;

/// Every failure the task store and translation client can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied task fields violate the data model.
    #[error("invalid task: {0}")]
    Validation(String),

    /// No task with this id, or the task is in the wrong state for the operation.
    #[error("task {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Missing or invalid translation credential or configuration file.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("translation failed: {0}")]
    Translation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// `err` followed by each of its sources, skipping causes already in the text.
fn with_sources(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !msg.contains(&cause_msg) {
            msg.push_str(": ");
            msg.push_str(&cause_msg);
        }
        source = cause.source();
    }
    msg
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let detail = with_sources(&err);
        if err.is_timeout() {
            Self::Translation(format!("request timed out: {detail}"))
        } else if err.is_connect() {
            Self::Translation(format!("could not reach translation service: {detail}"))
        } else if err.is_decode() {
            Self::Translation(format!("malformed response: {detail}"))
        } else {
            Self::Translation(detail)
        }
    }
}
