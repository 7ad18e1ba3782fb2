//! HTTP client for the EPG programs endpoint.
//!
//! Uses gloo-net to issue a plain `GET`. Every failure is normalized into
//! a [`FetchError`] whose `Display` is the message shown to the user.

use gloo_net::http::Request;

use crate::filter::ProgramQuery;
use crate::types::Program;

/// Ergonomic result alias.
pub type ApiResult<T> = Result<T, FetchError>;

/// Why a schedule request failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx response.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The request never produced a response, or its body could not be read.
    #[error("{0}")]
    Network(String),
    /// 2xx response whose body is not a program list.
    #[error("{0}")]
    Decode(String),
}

impl FetchError {
    /// Body text becomes the message; an empty body falls back to `HTTP {status}`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        };
        FetchError::Http { status, message }
    }
}

/// Build the request URL. Parameters keep the order `channel`, `date`.
pub fn program_url(base: &str, query: &ProgramQuery) -> String {
    let params: Vec<String> = [("channel", &query.channel), ("date", &query.date)]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{key}={}", urlencoding::encode(v)))
        })
        .collect();

    if params.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", params.join("&"))
    }
}

/// Turn a status code and body into the schedule or an error.
pub fn interpret_response(status: u16, body: &str) -> ApiResult<Vec<Program>> {
    if !(200..300).contains(&status) {
        return Err(FetchError::from_status(status, body));
    }
    serde_json::from_str::<Option<Vec<Program>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| FetchError::Decode(format!("invalid program list: {e}")))
}

// ── Programs ────────────────────────────────────────────────────────

pub async fn fetch_programs(base: &str, query: &ProgramQuery) -> ApiResult<Vec<Program>> {
    let url = program_url(base, query);
    log::debug!("GET {url}");

    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    interpret_response(status, &body)
}
