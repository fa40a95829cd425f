// AI module for Gemini API integration and playlist generation
//
// This module provides:
// - Gemini content-generation client
// - The fixed playlist instruction prompt
// - JSON-array extraction from free-form model replies

pub mod gemini_client;
pub mod system_prompt;

// Re-export commonly used types
pub use gemini_client::GeminiClient;
pub use system_prompt::PLAYLIST_PROMPT;
