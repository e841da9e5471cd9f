//! Catalog query parameters and target URL construction.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::models::PLATFORM_ALL;

/// Default catalog endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.freetogame.com/api/games";

/// Optional filters sent to the catalog endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub platform: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
}

impl CatalogQuery {
    pub fn new(platform: Option<&str>, category: Option<&str>, sort_by: Option<&str>) -> Self {
        Self {
            platform: platform.map(str::to_string),
            category: category.map(str::to_string),
            sort_by: sort_by.map(str::to_string),
        }
    }

    /// Form-encoded query string, or an empty string when no filter applies.
    ///
    /// Parameters appear in the order `platform`, `category`, `sort-by`. The `all`
    /// platform and blank values are omitted rather than sent empty.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some(platform) = non_blank(&self.platform) {
            if platform != PLATFORM_ALL {
                serializer.append_pair("platform", platform);
            }
        }
        if let Some(category) = non_blank(&self.category) {
            serializer.append_pair("category", category);
        }
        if let Some(sort_by) = non_blank(&self.sort_by) {
            serializer.append_pair("sort-by", sort_by);
        }

        serializer.finish()
    }

    /// Absolute URL of the catalog request, without any relay.
    pub fn target_url(&self, endpoint: &str) -> String {
        let qs = self.query_string();
        if qs.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, qs)
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_platform_and_blanks_produce_bare_endpoint() {
        let query = CatalogQuery::new(Some("all"), Some(""), Some(""));
        assert_eq!(query.query_string(), "");
        assert_eq!(query.target_url(DEFAULT_ENDPOINT), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_absent_parameters_produce_bare_endpoint() {
        let query = CatalogQuery::default();
        assert_eq!(query.target_url(DEFAULT_ENDPOINT), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_full_query_order() {
        let query = CatalogQuery::new(Some("pc"), Some("shooter"), Some("release-date"));
        assert_eq!(
            query.query_string(),
            "platform=pc&category=shooter&sort-by=release-date"
        );
        assert_eq!(
            query.target_url(DEFAULT_ENDPOINT),
            "https://www.freetogame.com/api/games?platform=pc&category=shooter&sort-by=release-date"
        );
    }

    #[test]
    fn test_whitespace_values_are_omitted() {
        let query = CatalogQuery::new(Some("  "), Some(" \t"), Some("   "));
        assert_eq!(query.query_string(), "");
    }

    #[test]
    fn test_all_platform_never_sent() {
        for category in [None, Some(""), Some("mmorpg")] {
            for sort_by in [None, Some(""), Some("popularity")] {
                let qs = CatalogQuery::new(Some("all"), category, sort_by).query_string();
                assert!(!qs.contains("platform"), "unexpected platform in {qs}");
            }
        }
    }

    #[test]
    fn test_partial_query() {
        let query = CatalogQuery::new(None, Some("mmorpg"), None);
        assert_eq!(query.query_string(), "category=mmorpg");

        let query = CatalogQuery::new(Some("pc"), None, Some("alphabetical"));
        assert_eq!(query.query_string(), "platform=pc&sort-by=alphabetical");
    }

    #[test]
    fn test_values_are_form_encoded() {
        let query = CatalogQuery::new(None, Some("card games"), None);
        assert_eq!(query.query_string(), "category=card+games");
    }
}
