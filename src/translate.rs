//! On-demand translation of task text through the Gemini API.
//!
//! Translations are never stored or cached here: every call goes to the
//! service with the original text.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::TranslationConfig;
use crate::error::{Error, Result};
use crate::model::Task;

pub trait Translator {
    /// Translate `text` into `target_language` (a language name such as "French").
    fn translate(&self, text: &str, target_language: &str) -> Result<String>;

    fn translate_request(&self, request: &TranslateRequest) -> Result<String> {
        self.translate(&request.text, &request.target_language)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}

impl TranslateRequest {
    /// Request translating a task's composed text.
    pub fn for_task(task: &Task, target_language: impl Into<String>) -> Self {
        Self {
            text: compose_task_text(task),
            target_language: target_language.into(),
        }
    }
}

/// The instruction sent to the model.
pub fn build_prompt(text: &str, target_language: &str) -> String {
    format!("Translate the following text into {target_language}: {text}")
}

/// The text translated for a task: its title plus whichever optional fields are set.
pub fn compose_task_text(task: &Task) -> String {
    let mut text = task.title.clone();
    if let Some(desc) = &task.description {
        text.push_str(&format!(" (Description: {desc})"));
    }
    text.push_str(&format!(" (Priority: {})", task.priority));
    if let Some(due) = task.due_date {
        text.push_str(&format!(" (Due Date: {})", due.format("%Y-%m-%d")));
    }
    text
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Concatenated text parts of the first candidate, verbatim.
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| Error::Translation(format!("malformed response: {e}")))?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(Error::Translation("response contained no text".into()));
    }
    Ok(text)
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "authentication failed",
        StatusCode::TOO_MANY_REQUESTS => "quota exceeded",
        s if s.is_server_error() => "service unavailable",
        _ => "request rejected",
    };
    if detail.is_empty() {
        format!("{kind} ({status})")
    } else {
        format!("{kind} ({status}): {detail}")
    }
}

pub struct GeminiClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    /// Fails with `Configuration` when no API key is configured; nothing is sent.
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "{} is not set; translation is unavailable",
                    crate::config::API_KEY_VAR
                ))
            })?
            .to_string();
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_key,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

impl Translator for GeminiClient {
    fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        let prompt = build_prompt(text, target_language);
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };
        log::debug!(
            "translating {} bytes into {target_language} via {}",
            text.len(),
            self.model
        );

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            log::debug!("translation request failed with {status}");
            return Err(Error::Translation(describe_failure(status, &body)));
        }
        extract_text(&body)
    }
}
