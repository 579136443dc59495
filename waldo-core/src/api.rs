//! Wire contract with the scoring/verification server.
//!
//! Paths are relative to [`GameConfig::api_url`](crate::GameConfig). The
//! actual transport is behind [`Backend`] so the same request logic runs over
//! `fetch` in the browser and over a scripted mock in tests.

use std::fmt;

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::character::CharacterId;
use crate::click::NormalizedClick;
use crate::error::{GameError, Result};
use crate::scores::{ScoreEntry, parse_scores};
use crate::session::ScoreRecord;

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Opaque id the server hands out on registration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<String>,
}

impl Request {
    fn get(path: impl Into<String>) -> Self {
        Request { method: Method::Get, path: path.into(), body: None }
    }

    fn post(path: impl Into<String>, body: Option<String>) -> Self {
        Request { method: Method::Post, path: path.into(), body }
    }
}

/// Request/response transport. Implementations return the response body for
/// 2xx statuses and [`GameError::Transport`] for anything else.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn send(&self, request: Request) -> Result<String>;
}

#[derive(Serialize)]
struct ScorePayload<'a> {
    name: &'a str,
    end_date: DateTime<Utc>,
}

pub fn register_request() -> Request {
    Request::post("users/", None)
}

pub fn verify_request(character: CharacterId, click: NormalizedClick) -> Request {
    Request::get(format!(
        "coordinates/{}&{}&{}",
        character.slug(),
        click.x_percent,
        click.y_percent
    ))
}

pub fn score_request(record: &ScoreRecord) -> Result<Request> {
    let body = serde_json::to_string(&ScorePayload {
        name: &record.nickname,
        end_date: record.end_date,
    })
    .map_err(|e| GameError::Encode(e.to_string()))?;
    let id = utf8_percent_encode(record.user_id.as_str(), PATH_SEGMENT);
    Ok(Request::post(format!("users/{}", id), Some(body)))
}

pub fn scores_request() -> Request {
    Request::get("users/")
}

/// The registration endpoint answers with the bare id as a JSON string; an
/// object carrying `_id` or `id` is accepted as well.
pub fn parse_user_id(body: &str) -> Result<UserId> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|e| GameError::InvalidResponse(format!("registration body: {e}")))?;
    let id = match &value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("_id")
            .or_else(|| map.get("id"))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        _ => None,
    };
    match id {
        Some(id) if !id.is_empty() => Ok(UserId(id)),
        _ => Err(GameError::InvalidResponse(format!("no user id in {value}"))),
    }
}

/// JavaScript truthiness of a JSON body. Empty or unparsable bodies are
/// false.
pub fn is_truthy(body: &str) -> bool {
    match serde_json::from_str::<Value>(body.trim()) {
        Ok(Value::Bool(b)) => b,
        Ok(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Ok(Value::String(s)) => !s.is_empty(),
        Ok(Value::Array(_)) | Ok(Value::Object(_)) => true,
        Ok(Value::Null) | Err(_) => false,
    }
}

pub async fn register<B: Backend>(backend: &B) -> Result<UserId> {
    let body = backend.send(register_request()).await?;
    parse_user_id(&body)
}

/// The id already held, or a fresh registration when the one at page load
/// never came through.
pub async fn ensure_user<B: Backend>(backend: &B, known: Option<UserId>) -> Result<UserId> {
    match known {
        Some(id) => Ok(id),
        None => {
            log::info!("no user id yet, registering again");
            register(backend).await
        }
    }
}

/// Ask whether `click` is close enough to where `character` hides. The
/// tolerance is decided by the server.
pub async fn verify<B: Backend>(
    backend: &B,
    character: CharacterId,
    click: NormalizedClick,
) -> Result<bool> {
    let body = backend.send(verify_request(character, click)).await?;
    let found = is_truthy(&body);
    log::debug!(
        "verify {} at ({}, {}) -> {}",
        character.slug(),
        click.x_percent,
        click.y_percent,
        found
    );
    Ok(found)
}

/// Single attempt; a failure is returned to the caller and not retried.
pub async fn submit_score<B: Backend>(backend: &B, record: &ScoreRecord) -> Result<()> {
    backend.send(score_request(record)?).await?;
    log::info!(
        "score posted for {} ({}s)",
        record.user_id,
        record.duration_seconds
    );
    Ok(())
}

pub async fn fetch_scores<B: Backend>(backend: &B) -> Result<Vec<ScoreEntry>> {
    let body = backend.send(scores_request()).await?;
    parse_scores(&body)
}
