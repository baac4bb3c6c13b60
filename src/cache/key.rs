//! Endpoint cache keys.

use serde::{Deserialize, Serialize};

/// Normalized endpoint identifier used to key the client caches.
///
/// A missing endpoint and an empty string both map to [`EndpointKey::Default`],
/// so every "no endpoint specified" call lands on the same slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointKey {
    #[default]
    Default,
    Endpoint(String),
}

impl EndpointKey {
    pub fn new(endpoint: Option<&str>) -> Self {
        match endpoint {
            None | Some("") => EndpointKey::Default,
            Some(e) => EndpointKey::Endpoint(e.to_string()),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, EndpointKey::Default)
    }

    /// The raw endpoint, `None` for the default slot.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            EndpointKey::Default => None,
            EndpointKey::Endpoint(e) => Some(e.as_str()),
        }
    }
}

impl std::fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointKey::Default => write!(f, "<default>"),
            EndpointKey::Endpoint(e) => write!(f, "{}", e),
        }
    }
}

impl From<Option<&str>> for EndpointKey {
    fn from(s: Option<&str>) -> Self {
        Self::new(s)
    }
}
impl From<Option<String>> for EndpointKey {
    fn from(s: Option<String>) -> Self {
        Self::new(s.as_deref())
    }
}
impl From<&str> for EndpointKey {
    fn from(s: &str) -> Self {
        Self::new(Some(s))
    }
}
impl From<String> for EndpointKey {
    fn from(s: String) -> Self {
        Self::new(Some(&s))
    }
}
impl From<()> for EndpointKey {
    fn from(_: ()) -> Self {
        EndpointKey::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_collide() {
        let none: EndpointKey = None::<&str>.into();
        let empty: EndpointKey = "".into();
        let empty_owned: EndpointKey = Some(String::new()).into();
        let unit: EndpointKey = ().into();
        assert_eq!(none, empty);
        assert_eq!(none, empty_owned);
        assert_eq!(none, unit);
        assert!(none.is_default());
        assert_eq!(none.endpoint(), None);
    }

    #[test]
    fn test_endpoints_compare_by_value() {
        let a: EndpointKey = "http://a/api/v1".into();
        let b: EndpointKey = String::from("http://a/api/v1").into();
        let c: EndpointKey = "http://b/api/v1".into();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.endpoint(), Some("http://a/api/v1"));
        assert_eq!(a.to_string(), "http://a/api/v1");
        assert_eq!(EndpointKey::Default.to_string(), "<default>");
    }
}
