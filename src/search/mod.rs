//! Local title search over the fetched games.

use crate::models::Game;

/// Keep the games whose title contains `search`, ignoring case.
///
/// A blank search returns every game.
pub fn filter_by_title(games: &[Game], search: &str) -> Vec<Game> {
    if search.trim().is_empty() {
        return games.to_vec();
    }

    let needle = search.to_lowercase();
    games
        .iter()
        .filter(|game| game.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(titles: &[&str]) -> Vec<Game> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                serde_json::from_value(serde_json::json!({ "id": i, "title": title })).unwrap()
            })
            .collect()
    }

    fn titles(games: &[Game]) -> Vec<&str> {
        games.iter().map(|g| g.title.as_str()).collect()
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let all = games(&["Mock MMORPG", "Mock Shooter"]);
        assert_eq!(titles(&filter_by_title(&all, "shoot")), vec!["Mock Shooter"]);
        assert_eq!(titles(&filter_by_title(&all, "SHOOT")), vec!["Mock Shooter"]);
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let all = games(&["Mock MMORPG", "Mock Shooter"]);
        assert_eq!(filter_by_title(&all, ""), all);
        assert_eq!(filter_by_title(&all, "   "), all);
    }

    #[test]
    fn test_no_match() {
        let all = games(&["Warframe", "Path of Exile"]);
        assert!(filter_by_title(&all, "racing").is_empty());
    }

    #[test]
    fn test_search_keeps_inner_whitespace() {
        let all = games(&["Path of Exile", "Pathfinder"]);
        assert_eq!(titles(&filter_by_title(&all, "path of")), vec!["Path of Exile"]);
    }
}
