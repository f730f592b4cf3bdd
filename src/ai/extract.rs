use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

// (?s) so the span can cross newlines. Greedy so nested objects survive.
static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object span pattern compiles"));
static ARRAY_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("array span pattern compiles"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response contains no JSON payload")]
    NoJsonSpan,
    #[error("payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Model responses wrap payloads in prose and markdown fences. Strip the
/// fences, take the widest brace or bracket span, then deserialize into the
/// expected shape. Type mismatches surface as Parse errors rather than
/// panics downstream.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractError> {
    let cleaned = strip_fences(raw);
    let span = widest_span(&cleaned).ok_or(ExtractError::NoJsonSpan)?;
    Ok(serde_json::from_str(span)?)
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

fn widest_span(text: &str) -> Option<&str> {
    let object = OBJECT_SPAN.find(text);
    let array = ARRAY_SPAN.find(text);
    match (object, array) {
        (Some(o), Some(a)) => {
            if o.start() <= a.start() {
                Some(o.as_str())
            } else {
                Some(a.as_str())
            }
        }
        (Some(o), None) => Some(o.as_str()),
        (None, Some(a)) => Some(a.as_str()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Block {
        title: String,
        duration: u32,
    }

    #[test]
    fn test_clean_json_parses() {
        let block: Block = extract_json(r#"{"title": "Math", "duration": 60}"#).unwrap();
        assert_eq!(block.title, "Math");
        assert_eq!(block.duration, 60);
    }

    #[test]
    fn test_fenced_json_parses() {
        let raw = "Here is your plan:\n```json\n{\"title\": \"Math\", \"duration\": 60}\n```\nGood luck!";
        let block: Block = extract_json(raw).unwrap();
        assert_eq!(block.title, "Math");
    }

    #[test]
    fn test_array_payload() {
        let raw = "Sure!\n[{\"title\": \"A\", \"duration\": 30}, {\"title\": \"B\", \"duration\": 45}]";
        let blocks: Vec<Block> = extract_json(raw).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].title, "B");
    }

    #[test]
    fn test_multiline_payload() {
        let raw = "{\n  \"title\": \"Essay\",\n  \"duration\": 90\n}";
        let block: Block = extract_json(raw).unwrap();
        assert_eq!(block.duration, 90);
    }

    #[test]
    fn test_no_json_at_all() {
        let result: Result<Block, _> = extract_json("I cannot help with that.");
        assert!(matches!(result, Err(ExtractError::NoJsonSpan)));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let result: Result<Block, _> = extract_json(r#"{"name": "Math"}"#);
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }

    #[test]
    fn test_truncated_json_is_parse_error() {
        let result: Result<Block, _> = extract_json(r#"{"title": "Math", "dur"#);
        // Truncated text has no closing brace, so no span is found.
        assert!(result.is_err());
    }
}
