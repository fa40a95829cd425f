// Environment-derived configuration
//
// Keys are read once at process start. A missing key does not stop the
// process; requests fail with a configuration error instead, so the service
// can come up before its secrets do.

use std::env;

pub const DEFAULT_PORT: u16 = 8787;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    /// Video-search credential. `None` when unset or empty.
    pub youtube_api_key: Option<String>,
    /// Generative-text credential. `None` when unset or empty.
    pub gemini_api_key: Option<String>,
    pub youtube_api_base: String,
    pub gemini_api_base: String,
    /// Preferred listen port; the bind falls back to nearby ports.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            youtube_api_key: non_empty("YOUTUBE_API_KEY"),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            youtube_api_base: non_empty("YOUTUBE_API_BASE")
                .unwrap_or_else(|| YOUTUBE_API_BASE.to_string()),
            gemini_api_base: non_empty("GEMINI_API_BASE")
                .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            youtube_api_key: None,
            gemini_api_key: None,
            youtube_api_base: YOUTUBE_API_BASE.to_string(),
            gemini_api_base: GEMINI_API_BASE.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}
