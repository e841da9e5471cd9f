//! Game model matching the FreeToGame catalog records.
//!
//! Field names stay in the catalog's snake_case so records pass through unchanged.

use serde::{Deserialize, Serialize};

/// A screenshot attached to a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: i64,
    pub image: String,
}

/// A gameplay video attached to a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub video_url: String,
    pub thumbnail: String,
}

/// A free-to-play game as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freetogame_profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<Screenshot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_thumb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Video>>,
}

impl Game {
    /// Link used to play the game: `game_url`, then `url`, then `#`.
    pub fn play_url(&self) -> &str {
        self.game_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.url.as_deref().filter(|u| !u.is_empty()))
            .unwrap_or("#")
    }

    /// URL of the first gameplay video, if the catalog provided any.
    pub fn preview_video_url(&self) -> Option<&str> {
        self.videos
            .as_ref()
            .and_then(|videos| videos.first())
            .map(|video| video.video_url.as_str())
    }
}

/// A game together with its resolved links, returned by the detail endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub game: Game,
    pub play_url: String,
    pub video_url: Option<String>,
}

impl From<Game> for GameDetail {
    fn from(game: Game) -> Self {
        let play_url = game.play_url().to_string();
        let video_url = game.preview_video_url().map(str::to_string);
        Self {
            game,
            play_url,
            video_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(id: i64, title: &str) -> Game {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    #[test]
    fn test_minimal_record_deserializes() {
        let game = bare(7, "Warframe");
        assert_eq!(game.id, 7);
        assert_eq!(game.title, "Warframe");
        assert!(game.videos.is_none());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let result: Result<Game, _> = serde_json::from_value(serde_json::json!({ "id": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_play_url_precedence() {
        let mut game = bare(1, "A");
        assert_eq!(game.play_url(), "#");

        game.url = Some("https://example.com/url".to_string());
        assert_eq!(game.play_url(), "https://example.com/url");

        game.game_url = Some("https://example.com/play".to_string());
        assert_eq!(game.play_url(), "https://example.com/play");
    }

    #[test]
    fn test_preview_video_url_uses_first_video() {
        let mut game = bare(1, "A");
        assert_eq!(game.preview_video_url(), None);

        game.videos = Some(vec![
            Video {
                id: 1,
                video_url: "https://example.com/1.mp4".to_string(),
                thumbnail: "t1".to_string(),
            },
            Video {
                id: 2,
                video_url: "https://example.com/2.mp4".to_string(),
                thumbnail: "t2".to_string(),
            },
        ]);
        assert_eq!(game.preview_video_url(), Some("https://example.com/1.mp4"));
    }

    #[test]
    fn test_unknown_catalog_fields_are_ignored() {
        let game: Game = serde_json::from_value(serde_json::json!({
            "id": 540,
            "title": "Overwatch 2",
            "genre": "Shooter",
            "minimum_system_requirements": { "os": "Windows 10" }
        }))
        .unwrap();
        assert_eq!(game.genre.as_deref(), Some("Shooter"));
    }
}
