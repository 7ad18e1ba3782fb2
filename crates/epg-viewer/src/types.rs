//! EPG API types — mirrors the program objects served by the backend.
//!
//! Entries are deserialized leniently: a missing, `null` or wrong-typed field
//! degrades that one cell of the table instead of failing the whole schedule.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Programs ────────────────────────────────────────────────────────

/// Opaque program identifier. The backend may send either a number or a
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramId::Number(n) => write!(f, "{n}"),
            ProgramId::Text(s) => f.write_str(s),
        }
    }
}

/// One scheduled broadcast item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<ProgramId>,
    #[serde(default, deserialize_with = "text_or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_default")]
    pub start_time: String,
    #[serde(default, deserialize_with = "text_or_default")]
    pub end_time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

impl Program {
    /// Row key: the program id when present, else its position in the list.
    pub fn row_key(&self, index: usize) -> String {
        match &self.id {
            Some(ProgramId::Text(s)) if s.is_empty() => index.to_string(),
            Some(id) => id.to_string(),
            None => index.to_string(),
        }
    }

    /// Non-empty channel name, if any.
    pub fn channel_name(&self) -> Option<&str> {
        self.channel.as_deref().filter(|c| !c.is_empty())
    }

    /// Non-empty genre, if any.
    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}

/// Strings pass through, numbers and booleans are stringified, anything
/// else (null, arrays, objects) is treated as absent.
fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_text(Value::deserialize(deserializer)?))
}

fn text_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<ProgramId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(ProgramId::Number(n)),
        Value::String(s) => Some(ProgramId::Text(s)),
        _ => None,
    })
}
