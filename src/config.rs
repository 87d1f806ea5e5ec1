//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then `~/.tasklist/config.toml`
//! (or the file named by `TASKLIST_CONFIG`), then environment variables.
//! Command-line flags are applied on top by the binary. The translation
//! credential is only ever read from `GOOGLE_API_KEY`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Target languages offered when the config file doesn't list its own.
/// The first entry is the default target.
pub const DEFAULT_LANGUAGES: [&str; 10] = [
    "English",
    "Spanish",
    "French",
    "German",
    "Hindi",
    "Marathi",
    "Japanese",
    "Chinese (Simplified)",
    "Korean",
    "Portuguese",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub translation: TranslationConfig,
}

#[derive(Clone)]
pub struct TranslationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub languages: Vec<String>,
}

impl fmt::Debug for TranslationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("languages", &self.languages)
            .finish()
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl TranslationConfig {
    pub fn default_language(&self) -> &str {
        self.languages
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANGUAGES[0])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    store: StoreSection,
    #[serde(default)]
    translation: TranslationSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreSection {
    db: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TranslationSection {
    model: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    languages: Option<Vec<String>>,
}

impl FileConfig {
    /// Missing file means defaults.
    fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(Error::Configuration(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        let config: FileConfig = toml::from_str(&contents).map_err(|e| {
            Error::Configuration(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let t = &self.translation;
        if t.timeout_secs == Some(0) {
            return Err(Error::Configuration(format!(
                "{}: translation.timeout_secs must be greater than zero",
                path.display()
            )));
        }
        if let Some(languages) = &t.languages {
            if languages.is_empty() || languages.iter().any(|l| l.trim().is_empty()) {
                return Err(Error::Configuration(format!(
                    "{}: translation.languages must be a non-empty list of names",
                    path.display()
                )));
            }
        }
        if t.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(Error::Configuration(format!(
                "{}: translation.model must not be empty",
                path.display()
            )));
        }
        Ok(())
    }
}

/// `$HOME/.tasklist`, or `./.tasklist` when HOME is unset.
fn default_data_dir(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    let home = env("HOME").unwrap_or_else(|| ".".into());
    PathBuf::from(home).join(".tasklist")
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `env` for variable lookups.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = default_data_dir(&env);
        let path = env("TASKLIST_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("config.toml"));
        let file = FileConfig::load_from(&path)?;
        Ok(Self::resolve(data_dir, file, &env))
    }

    fn resolve(data_dir: PathBuf, file: FileConfig, env: &impl Fn(&str) -> Option<String>) -> Self {
        let mut translation = TranslationConfig::default();
        let section = file.translation;
        if let Some(model) = section.model {
            translation.model = model;
        }
        if let Some(endpoint) = section.endpoint {
            translation.endpoint = endpoint;
        }
        if let Some(secs) = section.timeout_secs {
            translation.timeout = Duration::from_secs(secs);
        }
        if let Some(languages) = section.languages {
            translation.languages = languages;
        }
        if let Some(model) = env("TASKLIST_MODEL").filter(|m| !m.trim().is_empty()) {
            translation.model = model;
        }
        translation.api_key = env(API_KEY_VAR).filter(|k| !k.trim().is_empty());

        let db_path = file
            .store
            .db
            .unwrap_or_else(|| data_dir.join("tasklist.db"));

        Config {
            data_dir,
            db_path,
            translation,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("tasklist.log")
    }
}
