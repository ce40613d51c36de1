//! Manual ingestion of ACN session dumps (`{"_meta": {...}, "_items": [...]}`).
//!
//! Pasted text is checked before anything is sent: a payload that is not a
//! JSON object with a non-empty `_items` list is rejected as an invalid format
//! and nothing is ingested.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};

const ITEMS_KEY: &str = "_items";

/// A validated ingestion payload, ready to post to `/ingest-json`.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestPayload {
    body: Map<String, Value>,
}

impl IngestPayload {
    /// Parses pasted or loaded text strictly.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text.trim())
            .map_err(|e| DashboardError::InvalidFormat(format!("not valid JSON ({})", e)))?;

        let Value::Object(body) = value else {
            return Err(DashboardError::InvalidFormat(
                "expected a JSON object with an \"_items\" list".to_string(),
            ));
        };

        match body.get(ITEMS_KEY) {
            Some(Value::Array(items)) if !items.is_empty() => {
                debug!(items = items.len(), "Parsed ingestion payload");
                Ok(Self { body })
            }
            Some(Value::Array(_)) => Err(DashboardError::InvalidFormat(
                "\"_items\" is empty".to_string(),
            )),
            Some(_) => Err(DashboardError::InvalidFormat(
                "\"_items\" must be a list".to_string(),
            )),
            None => Err(DashboardError::InvalidFormat(
                "no \"_items\" found in payload".to_string(),
            )),
        }
    }

    /// Salvages the complete records of a truncated dump.
    ///
    /// Everything after the last complete object of the `_items` list is
    /// dropped; `_meta` is not kept. Fails like [`IngestPayload::parse`] when
    /// no complete record survives.
    pub fn recover(text: &str) -> Result<Self> {
        if let Ok(payload) = Self::parse(text) {
            return Ok(payload);
        }

        let start = items_start(text).ok_or_else(|| {
            DashboardError::InvalidFormat("cannot find \"_items\" in text".to_string())
        })?;

        let mut items = Vec::new();
        let mut rest = &text[start..];
        loop {
            rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
            if !rest.starts_with('{') {
                break;
            }
            let Some(end) = object_end(rest) else {
                break;
            };
            match serde_json::from_str::<Value>(&rest[..end]) {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!("Stopping recovery at malformed record: {}", e);
                    break;
                }
            }
            rest = &rest[end..];
        }

        if items.is_empty() {
            return Err(DashboardError::InvalidFormat(
                "no complete records found in \"_items\"".to_string(),
            ));
        }

        debug!(items = items.len(), "Recovered records from truncated dump");
        let mut body = Map::new();
        body.insert(ITEMS_KEY.to_string(), Value::Array(items));
        Ok(Self { body })
    }

    pub fn item_count(&self) -> usize {
        self.body
            .get(ITEMS_KEY)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Request body for the service.
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_body(self) -> Value {
        Value::Object(self.body)
    }
}

/// Byte offset just past the `[` opening the `_items` list.
fn items_start(text: &str) -> Option<usize> {
    let key = text.find("\"_items\"")?;
    let after_key = key + "\"_items\"".len();
    let rest = &text[after_key..];
    let colon = rest.find(|c: char| !c.is_whitespace())?;
    if !rest[colon..].starts_with(':') {
        return None;
    }
    let after_colon = &rest[colon + 1..];
    let bracket = after_colon.find(|c: char| !c.is_whitespace())?;
    if !after_colon[bracket..].starts_with('[') {
        return None;
    }
    Some(after_key + colon + 1 + bracket + 1)
}

/// Length of the balanced object at the start of `text`, if it is complete.
fn object_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
