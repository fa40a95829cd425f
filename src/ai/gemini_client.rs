// Gemini content-generation client
//
// Sends the combined instruction + user prompt as a single generation
// request and digs the reply text out of the candidate tree. The model is
// asked for a bare JSON array but tends to wrap it in prose, so parsing
// goes through a balanced-bracket extraction before giving up.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ai::system_prompt::PLAYLIST_PROMPT;
use crate::error::GatewayError;
use crate::models::GenerationResult;

const API_NAME: &str = "Gemini";
const GEMINI_MODEL: &str = "gemini-pro";

// ---- Wire types ----

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ReplyContent>,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// First candidate's first part, or empty when any level is absent.
    fn reply_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default()
    }
}

// ---- Client ----

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Generate a playlist from a natural-language prompt.
    ///
    /// One generation request, no retries. The reply's first JSON array is
    /// returned verbatim; the model may produce more or fewer than the 8
    /// songs the instruction asks for and the count is not enforced.
    pub async fn generate_playlist(&self, prompt: &str) -> Result<GenerationResult, GatewayError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}\nUser request: {}", PLAYLIST_PROMPT, prompt),
                }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, GEMINI_MODEL);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::network(API_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::from_upstream(API_NAME, status.as_u16(), body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::network(API_NAME, e))?;

        let reply = parsed.reply_text();
        let playlist = parse_playlist(&reply)?;
        log::debug!("model returned {} songs", playlist.len());

        Ok(GenerationResult {
            success: true,
            playlist,
        })
    }
}

// ---- Reply parsing ----

/// Parse the model reply into a song array.
///
/// Tries the first `[...]` substring, then the whole reply. Only a JSON
/// array is accepted; objects and scalars count as interpretation failures.
fn parse_playlist(reply: &str) -> Result<Vec<Value>, GatewayError> {
    if let Some(candidate) = extract_first_json_array(reply) {
        if let Ok(Value::Array(songs)) = serde_json::from_str::<Value>(candidate) {
            return Ok(songs);
        }
    }
    if let Ok(Value::Array(songs)) = serde_json::from_str::<Value>(reply.trim()) {
        return Ok(songs);
    }
    Err(GatewayError::Interpretation {
        reply: reply.to_string(),
    })
}

/// Extract the first top-level `[...]` substring from free-form text.
///
/// Bracket depth is tracked outside string literals so quoted brackets and
/// escapes don't end the scan early. The first array wins; whether its
/// interior is valid JSON is the caller's problem.
pub fn extract_first_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
