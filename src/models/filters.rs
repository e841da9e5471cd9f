//! Filter option lists offered to the front end.

use serde::Serialize;

/// Platform sentinel meaning "do not filter by platform".
pub const PLATFORM_ALL: &str = "all";

/// A selectable value with its display label.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

const fn option(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption {
        value,
        label,
        icon: None,
    }
}

pub const PLATFORMS: &[FilterOption] = &[
    FilterOption {
        value: PLATFORM_ALL,
        label: "All",
        icon: Some("🎮"),
    },
    FilterOption {
        value: "pc",
        label: "PC",
        icon: Some("🖥️"),
    },
];

pub const CATEGORIES: &[FilterOption] = &[
    option("", "All Categories"),
    option("mmorpg", "MMORPG"),
    option("shooter", "Shooter"),
    option("strategy", "Strategy"),
    option("moba", "MOBA"),
    option("card-games", "Card Games"),
    option("racing", "Racing"),
    option("sports", "Sports"),
    option("social", "Social"),
    option("sandbox", "Sandbox"),
    option("open-world", "Open World"),
    option("survival", "Survival"),
    option("pvp", "PvP"),
    option("fantasy", "Fantasy"),
    option("sci-fi", "Sci-Fi"),
];

pub const SORT_KEYS: &[FilterOption] = &[
    option("", "Default"),
    option("release-date", "Release Date"),
    option("popularity", "Popularity"),
    option("alphabetical", "Alphabetical"),
    option("relevance", "Relevance"),
];

/// Returns true if `value` is one of the offered options.
pub fn is_known(options: &[FilterOption], value: &str) -> bool {
    options.iter().any(|o| o.value == value)
}

/// All option lists, as served by `GET /api/options`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub platforms: &'static [FilterOption],
    pub categories: &'static [FilterOption],
    pub sort_keys: &'static [FilterOption],
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            platforms: PLATFORMS,
            categories: CATEGORIES,
            sort_keys: SORT_KEYS,
        }
    }
}
