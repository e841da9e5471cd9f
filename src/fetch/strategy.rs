//! Access strategies: the direct call and the relays tried after it.
//!
//! Each relay expects the target URL in its own shape. The shape is carried as a
//! [`RelayConvention`] next to the relay address.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Characters left alone by a URI component encoder.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Relays used after the direct call, in order.
pub const DEFAULT_RELAYS: &[&str] = &[
    "https://thingproxy.freeboard.io/fetch/",
    "https://api.allorigins.win/raw?url=",
    "https://cors.bridged.cc/",
    "https://cors-anywhere.herokuapp.com/",
];

/// How a relay expects to receive the target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelayConvention {
    /// Target percent-encoded as a query value: `relay + encode(target)`.
    EncodedQuery,
    /// Raw target appended after the relay path: `relay + target`.
    RawPath,
    /// Plain concatenation, collapsing a doubled `/` at the join.
    Concat,
}

impl RelayConvention {
    /// Guess the convention from well-known relay addresses.
    pub fn infer(address: &str) -> Self {
        if address.contains("api.allorigins.win") {
            RelayConvention::EncodedQuery
        } else if address.ends_with("/fetch/") || address.contains("thingproxy.freeboard.io") {
            RelayConvention::RawPath
        } else if address.contains("cors.bridged.cc") || address.contains("cors-anywhere") {
            RelayConvention::RawPath
        } else {
            RelayConvention::Concat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelayConvention::EncodedQuery => "encoded",
            RelayConvention::RawPath => "raw",
            RelayConvention::Concat => "concat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "encoded" => Some(RelayConvention::EncodedQuery),
            "raw" => Some(RelayConvention::RawPath),
            "concat" => Some(RelayConvention::Concat),
            _ => None,
        }
    }
}

/// One way of reaching the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AccessStrategy {
    /// Call the endpoint itself.
    Direct,
    /// Go through a relay.
    Relay {
        address: String,
        convention: RelayConvention,
    },
}

impl AccessStrategy {
    /// A relay whose convention is inferred from its address.
    pub fn relay(address: impl Into<String>) -> Self {
        let address = address.into();
        let convention = RelayConvention::infer(&address);
        AccessStrategy::Relay {
            address,
            convention,
        }
    }

    /// A relay with an explicit convention.
    pub fn relay_with(address: impl Into<String>, convention: RelayConvention) -> Self {
        AccessStrategy::Relay {
            address: address.into(),
            convention,
        }
    }

    /// Parse one relay list entry, e.g. `https://r.example/` or `encoded:https://r.example/?u=`.
    ///
    /// Returns `None` for blank entries and for `direct`, which is handled separately.
    pub fn parse_relay(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() || entry.eq_ignore_ascii_case("direct") {
            return None;
        }

        if let Some((prefix, address)) = entry.split_once(':') {
            if let Some(convention) = RelayConvention::from_str(prefix) {
                let address = address.trim();
                if address.is_empty() {
                    return None;
                }
                return Some(AccessStrategy::relay_with(address, convention));
            }
        }

        Some(AccessStrategy::relay(entry))
    }

    /// Short name used in diagnostics.
    pub fn label(&self) -> &str {
        match self {
            AccessStrategy::Direct => "direct",
            AccessStrategy::Relay { address, .. } => address,
        }
    }

    /// URL to request in order to reach `target` through this strategy.
    pub fn request_url(&self, target: &str) -> String {
        match self {
            AccessStrategy::Direct => target.to_string(),
            AccessStrategy::Relay {
                address,
                convention,
            } => match convention {
                RelayConvention::EncodedQuery => {
                    format!("{}{}", address, utf8_percent_encode(target, URI_COMPONENT))
                }
                RelayConvention::RawPath => format!("{}{}", address, target),
                RelayConvention::Concat => {
                    if address.ends_with('/') && target.starts_with('/') {
                        format!("{}{}", address, &target[1..])
                    } else {
                        format!("{}{}", address, target)
                    }
                }
            },
        }
    }
}

impl std::fmt::Display for AccessStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessStrategy::Direct => write!(f, "direct"),
            AccessStrategy::Relay {
                address,
                convention,
            } => write!(f, "{} ({})", address, convention.as_str()),
        }
    }
}

/// Direct call followed by the default relays.
pub fn default_strategies() -> Vec<AccessStrategy> {
    std::iter::once(AccessStrategy::Direct)
        .chain(DEFAULT_RELAYS.iter().map(|r| AccessStrategy::relay(*r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "https://www.freetogame.com/api/games?platform=pc&category=shooter";

    #[test]
    fn test_direct_uses_target_unchanged() {
        assert_eq!(AccessStrategy::Direct.request_url(TARGET), TARGET);
    }

    #[test]
    fn test_allorigins_encodes_target() {
        let relay = AccessStrategy::relay("https://api.allorigins.win/raw?url=");
        assert_eq!(
            relay.request_url(TARGET),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fwww.freetogame.com%2Fapi%2Fgames%3Fplatform%3Dpc%26category%3Dshooter"
        );
    }

    #[test]
    fn test_uri_component_set_keeps_unreserved_marks() {
        let relay = AccessStrategy::relay_with("r?u=", RelayConvention::EncodedQuery);
        assert_eq!(relay.request_url("a b!~*'()-_."), "r?u=a%20b!~*'()-_.");
    }

    #[test]
    fn test_fetch_suffix_appends_raw_target() {
        let relay = AccessStrategy::relay("https://relay.example/fetch/");
        assert_eq!(
            relay.request_url(TARGET),
            format!("https://relay.example/fetch/{}", TARGET)
        );

        let thing = AccessStrategy::relay("https://thingproxy.freeboard.io/fetch/");
        assert_eq!(
            thing.request_url(TARGET),
            format!("https://thingproxy.freeboard.io/fetch/{}", TARGET)
        );
    }

    #[test]
    fn test_concat_collapses_doubled_separator() {
        let relay = AccessStrategy::relay("https://relay.example/");
        assert_eq!(
            relay.request_url("/api/games?platform=pc"),
            "https://relay.example/api/games?platform=pc"
        );
        assert_eq!(
            relay.request_url(TARGET),
            format!("https://relay.example/{}", TARGET)
        );
    }

    #[test]
    fn test_convention_inference() {
        assert_eq!(
            RelayConvention::infer("https://api.allorigins.win/raw?url="),
            RelayConvention::EncodedQuery
        );
        assert_eq!(
            RelayConvention::infer("https://thingproxy.freeboard.io/fetch/"),
            RelayConvention::RawPath
        );
        assert_eq!(
            RelayConvention::infer("https://cors.bridged.cc/"),
            RelayConvention::RawPath
        );
        assert_eq!(
            RelayConvention::infer("https://cors-anywhere.herokuapp.com/"),
            RelayConvention::RawPath
        );
        assert_eq!(
            RelayConvention::infer("https://relay.example/"),
            RelayConvention::Concat
        );
    }

    #[test]
    fn test_default_strategies_order() {
        let strategies = default_strategies();
        assert_eq!(strategies.len(), 5);
        assert_eq!(strategies[0], AccessStrategy::Direct);
        assert_eq!(strategies[1].label(), "https://thingproxy.freeboard.io/fetch/");
        assert_eq!(strategies[2].label(), "https://api.allorigins.win/raw?url=");
    }

    #[test]
    fn test_display() {
        assert_eq!(AccessStrategy::Direct.to_string(), "direct");
        assert_eq!(
            AccessStrategy::relay("https://api.allorigins.win/raw?url=").to_string(),
            "https://api.allorigins.win/raw?url= (encoded)"
        );
    }

    #[test]
    fn test_parse_relay_entries() {
        assert_eq!(AccessStrategy::parse_relay("  "), None);
        assert_eq!(AccessStrategy::parse_relay("direct"), None);
        assert_eq!(AccessStrategy::parse_relay("encoded:"), None);
        assert_eq!(
            AccessStrategy::parse_relay("https://relay.example/"),
            Some(AccessStrategy::relay_with(
                "https://relay.example/",
                RelayConvention::Concat
            ))
        );
        assert_eq!(
            AccessStrategy::parse_relay("encoded:http://127.0.0.1:9000/raw?url="),
            Some(AccessStrategy::relay_with(
                "http://127.0.0.1:9000/raw?url=",
                RelayConvention::EncodedQuery
            ))
        );
        assert_eq!(
            AccessStrategy::parse_relay(" raw:https://relay.example/p/ "),
            Some(AccessStrategy::relay_with(
                "https://relay.example/p/",
                RelayConvention::RawPath
            ))
        );
    }
}
