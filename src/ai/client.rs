use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNREACHABLE_FALLBACK: &str = "System Error: AI Unreachable.";
pub const PLAN_FALLBACK: &str = "Connection failed. Manual planning required.";

#[derive(Debug, Error)]
pub enum GenError {
    #[error("no API key configured")]
    MissingKey,
    #[error("network feature disabled at build time")]
    Disabled,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API returned status {0}")]
    Api(u16),
    #[error("response carried no candidates")]
    EmptyResponse,
}

impl GenError {
    /// User-facing text shown in place of generated content.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            GenError::Transport(_) => PLAN_FALLBACK,
            _ => UNREACHABLE_FALLBACK,
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Thin blocking client for the Gemini generateContent endpoint. Cloned into
/// each worker thread.
#[derive(Clone)]
pub struct GenClient {
    api_key: String,
    model: String,
}

impl GenClient {
    pub fn new(api_key: Option<String>, model: String) -> Result<Self, GenError> {
        let api_key = api_key.ok_or(GenError::MissingKey)?;
        Ok(Self { api_key, model })
    }

    #[cfg(feature = "network")]
    pub fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String, GenError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| GenError::Transport(e.to_string()))?;
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| GenError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenError::Api(response.status().as_u16()));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GenError::Transport(e.to_string()))?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(GenError::EmptyResponse)
    }

    #[cfg(not(feature = "network"))]
    pub fn generate(&self, _prompt: &str, _system_instruction: &str) -> Result<String, GenError> {
        Err(GenError::Disabled)
    }
}
