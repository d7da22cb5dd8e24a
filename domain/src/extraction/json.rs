//! JSON object extraction
//!
//! Models wrap their JSON in prose, markdown fences or trailing remarks. The
//! extractor takes the span from the first `{` to the last `}` and parses it
//! strictly. When that span is not valid JSON (typically because the model
//! wrote a second object or a stray brace after the first one), the first
//! brace-balanced object is tried before giving up.

use serde_json::{Map, Value};
use thiserror::Error;

/// Why no JSON object could be extracted. Both variants keep the raw text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("No JSON found in response")]
    NoJson { raw_response: String },

    #[error("Failed to parse JSON: {message}")]
    Parse {
        message: String,
        raw_response: String,
    },
}

impl ExtractionError {
    pub fn raw_response(&self) -> &str {
        match self {
            ExtractionError::NoJson { raw_response } => raw_response,
            ExtractionError::Parse { raw_response, .. } => raw_response,
        }
    }
}

/// Extract the JSON object embedded in `text`.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, ExtractionError> {
    let Some(start) = text.find('{') else {
        return Err(no_json(text));
    };
    let end = match text.rfind('}') {
        Some(end) if end > start => end,
        _ => return Err(no_json(text)),
    };

    let err = match parse_object(&text[start..=end]) {
        Ok(object) => return Ok(object),
        Err(err) => err,
    };

    if let Some(candidate) = first_balanced_object(&text[start..])
        && let Ok(object) = parse_object(candidate)
    {
        return Ok(object);
    }

    Err(ExtractionError::Parse {
        message: err,
        raw_response: text.to_string(),
    })
}

fn no_json(text: &str) -> ExtractionError {
    ExtractionError::NoJson {
        raw_response: text.to_string(),
    }
}

fn parse_object(candidate: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Slice of the first complete `{...}` in `text`, which must start with `{`.
/// Braces inside string literals are ignored.
fn first_balanced_object(text: &str) -> Option<&str> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escape = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escape {
                escape = false;
                continue;
            }
            match ch {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }
    None
}
