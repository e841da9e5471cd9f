//! Sample catalog served in mock mode.

use crate::models::{Game, Video};

#[allow(clippy::too_many_arguments)]
fn sample(
    id: i64,
    title: &str,
    short_description: &str,
    thumbnail_text: &str,
    platform: &str,
    genre: &str,
    release_date: &str,
    publisher: &str,
    video_url: &str,
    video_thumb_text: &str,
) -> Game {
    Game {
        id,
        title: title.to_string(),
        short_description: Some(short_description.to_string()),
        description: None,
        thumbnail: Some(format!(
            "https://via.placeholder.com/400x225.png?text={}",
            thumbnail_text
        )),
        platform: Some(platform.to_string()),
        genre: Some(genre.to_string()),
        release_date: Some(release_date.to_string()),
        publisher: Some(publisher.to_string()),
        developer: None,
        game_url: Some("#".to_string()),
        url: None,
        freetogame_profile_url: None,
        screenshots: None,
        video_thumb: None,
        videos: Some(vec![Video {
            id: 1,
            video_url: video_url.to_string(),
            thumbnail: format!(
                "https://via.placeholder.com/400x225.png?text={}",
                video_thumb_text
            ),
        }]),
    }
}

/// The fixed games shown when mock mode is on.
pub fn mock_games() -> Vec<Game> {
    vec![
        sample(
            1,
            "Mock MMORPG",
            "A sample MMORPG",
            "Mock+MMO",
            "PC",
            "mmorpg",
            "2022-01-01",
            "Mock Studio",
            "https://www.w3schools.com/html/mov_bbb.mp4",
            "Video+1",
        ),
        sample(
            2,
            "Mock Shooter",
            "A sample shooter",
            "Mock+Shooter",
            "Browser",
            "shooter",
            "2021-05-10",
            "Mock Labs",
            "https://www.w3schools.com/html/movie.mp4",
            "Video+2",
        ),
    ]
}
