//! Extracting a JSON object from free-form LLM output.
//!
//! Models asked for "only JSON" still wrap it in Markdown fences or add a
//! sentence around it. `parse_json_reply` tolerates both.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why an LLM reply could not be read as the expected JSON.
#[derive(Debug, Error)]
pub enum JsonReplyError {
    /// No `{ ... }` object in the reply.
    #[error("no JSON object in reply")]
    NoObject,
    /// An object was found but did not match the expected shape.
    #[error("invalid JSON reply: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Strips a surrounding Markdown code fence (```json ... ``` or ``` ... ```).
fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) on the opening fence line.
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parses the first JSON object in `raw` into `T`.
///
/// Fences are stripped; then the slice from the first `{` to the last `}` is
/// deserialized, so leading or trailing prose is ignored.
pub fn parse_json_reply<T: DeserializeOwned>(raw: &str) -> Result<T, JsonReplyError> {
    let body = strip_fence(raw);
    let start = body.find('{').ok_or(JsonReplyError::NoObject)?;
    let end = body.rfind('}').ok_or(JsonReplyError::NoObject)?;
    if end < start {
        return Err(JsonReplyError::NoObject);
    }
    Ok(serde_json::from_str(&body[start..=end])?)
}
