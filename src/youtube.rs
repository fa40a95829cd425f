// YouTube Data API search client
//
// One GET per search, capped at 10 results upstream and mapped into the
// gateway's Song shape in upstream order. Also carries the one-result key
// probe used at startup.

use reqwest::Client;
use serde::Deserialize;

use crate::error::GatewayError;
use crate::models::Song;

const API_NAME: &str = "YouTube";
const MAX_RESULTS: u32 = 10;

// ---- Upstream response shapes ----

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    fn into_song(self) -> Song {
        Song {
            id: Some(self.id.video_id),
            title: self.snippet.title,
            artist: self.snippet.channel_title,
            thumbnail: self.snippet.thumbnails.default.map(|t| t.url),
        }
    }
}

// ---- Client ----

pub struct SearchClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SearchClient {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Search for videos matching the query.
    ///
    /// Returns at most 10 songs in the upstream's relevance order; zero
    /// matches is an empty vector, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<Song>, GatewayError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("part", "snippet"), ("q", query), ("type", "video")])
            .query(&[("maxResults", MAX_RESULTS)])
            .query(&[("key", self.api_key.as_str())])
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

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::network(API_NAME, e))?;

        log::debug!("search {:?} returned {} items", query, parsed.items.len());
        Ok(parsed.items.into_iter().map(SearchItem::into_song).collect())
    }

    /// Probe the API with a one-result search to check the configured key.
    /// Only used at startup; never on the request path.
    pub async fn validate_key(&self) -> bool {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("part", "snippet"), ("q", "test")])
            .query(&[("maxResults", 1u32)])
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => true,
            Ok(r) => {
                log::warn!("YouTube key probe rejected with status {}", r.status());
                false
            }
            Err(e) => {
                log::warn!("YouTube key probe failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_mapping_preserves_order() {
        let raw = r#"{
            "items": [
                {
                    "id": {"videoId": "vid0"},
                    "snippet": {
                        "title": "First",
                        "channelTitle": "Channel A",
                        "thumbnails": {"default": {"url": "https://i.ytimg.com/vi/vid0/default.jpg"}}
                    }
                },
                {
                    "id": {"videoId": "vid1"},
                    "snippet": {
                        "title": "Second",
                        "channelTitle": "Channel B",
                        "thumbnails": {"default": {"url": "https://i.ytimg.com/vi/vid1/default.jpg"}}
                    }
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let songs: Vec<Song> = parsed.items.into_iter().map(SearchItem::into_song).collect();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id.as_deref(), Some("vid0"));
        assert_eq!(songs[0].title, "First");
        assert_eq!(songs[0].artist, "Channel A");
        assert_eq!(
            songs[0].thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/vid0/default.jpg")
        );
        assert_eq!(songs[1].id.as_deref(), Some("vid1"));
    }

    #[test]
    fn test_search_response_tolerates_missing_items() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_search_response_tolerates_missing_thumbnail() {
        let raw = r#"{
            "items": [{
                "id": {"videoId": "vid0"},
                "snippet": {"title": "First", "channelTitle": "Channel A"}
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let song = parsed.items.into_iter().next().unwrap().into_song();
        assert!(song.thumbnail.is_none());
    }
}
