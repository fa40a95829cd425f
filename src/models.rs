// Transient request/response values
// Nothing here outlives a single request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A song entry as returned to the client.
///
/// Search results carry a video id and thumbnail URL; generated playlists
/// only guarantee title and artist, so both extras are omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Successful createPlaylist response envelope.
///
/// The playlist is the model's array verbatim. Elements are not validated
/// beyond being JSON; entries missing title or artist pass through as-is.
#[derive(Debug, Serialize)]
pub struct GenerationResult {
    pub success: bool,
    pub playlist: Vec<Value>,
}
