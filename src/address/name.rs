//! Routable address names

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Result, RoutingError};

use super::wildcard::{self, WildcardConfiguration};

/// One delimiter-separated piece of an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text, matched exactly
    Literal(Box<str>),
    /// Matches exactly one segment
    SingleWord,
    /// Matches the remaining segments
    AnyWords,
}

/// A routable address
///
/// Equality and hashing use only the raw string, so an `Address` can be
/// looked up in a map with a `&str`. Cloning is cheap.
#[derive(Clone)]
pub struct Address {
    raw: Arc<str>,
    segments: Arc<[Segment]>,
    has_wildcard: bool,
}

impl Address {
    /// Parse an address, recognizing wildcard segments
    ///
    /// Rejects empty segments and an any-words token anywhere but last.
    pub fn parse(raw: &str, config: &WildcardConfiguration) -> Result<Self> {
        let mut segments = Vec::new();
        for part in raw.split(config.delimiter) {
            if part.is_empty() {
                return Err(RoutingError::malformed(raw, "empty segment"));
            }
            if segments.last() == Some(&Segment::AnyWords) {
                return Err(RoutingError::malformed(
                    raw,
                    "any-words token must be the final segment",
                ));
            }
            segments.push(config.segment(part));
        }

        let has_wildcard = segments
            .iter()
            .any(|s| matches!(s, Segment::SingleWord | Segment::AnyWords));

        Ok(Self {
            raw: raw.into(),
            segments: segments.into(),
            has_wildcard,
        })
    }

    /// Build an address without wildcard interpretation
    ///
    /// The whole string is a single literal segment. Used when wildcard
    /// routing is disabled.
    pub fn literal(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(RoutingError::malformed(raw, "empty segment"));
        }
        Ok(Self {
            raw: raw.into(),
            segments: vec![Segment::Literal(raw.into())].into(),
            has_wildcard: false,
        })
    }

    /// The original address string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any segment is a wildcard token
    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }

    /// Whether this address, used as a pattern, matches `candidate`
    pub fn matches(&self, candidate: &Address) -> bool {
        wildcard::matches(&self.segments, &candidate.segments)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `str`'s hash for the `Borrow<str>` lookups
        self.as_str().hash(state);
    }
}

impl Borrow<str> for Address {
    fn borrow(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:?})", &*self.raw)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn parse(raw: &str) -> Result<Address> {
        Address::parse(raw, &WildcardConfiguration::default())
    }

    #[test]
    fn test_parse_concrete() {
        let addr = parse("news.sports").unwrap();

        assert_eq!(addr.as_str(), "news.sports");
        assert!(!addr.has_wildcard());
        assert_eq!(
            addr.segments(),
            &[
                Segment::Literal("news".into()),
                Segment::Literal("sports".into())
            ]
        );
    }

    #[test]
    fn test_parse_wildcards() {
        let addr = parse("news.*.#").unwrap();

        assert!(addr.has_wildcard());
        assert_eq!(addr.segments()[1], Segment::SingleWord);
        assert_eq!(addr.segments()[2], Segment::AnyWords);
    }

    #[test]
    fn test_embedded_token_is_literal() {
        let addr = parse("news.a*b").unwrap();
        assert!(!addr.has_wildcard());
    }

    #[test]
    fn test_malformed() {
        for raw in ["", "a..b", ".a", "a.", "a.#.b", "#.a"] {
            let err = parse(raw).unwrap_err();
            assert!(
                matches!(err, RoutingError::MalformedAddress { .. }),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_literal() {
        let addr = Address::literal("a.#.b").unwrap();
        assert!(!addr.has_wildcard());
        assert_eq!(addr.segments().len(), 1);
        assert!(Address::literal("").is_err());
    }

    #[test]
    fn test_identity_by_raw() {
        let mut set = HashSet::new();
        set.insert(parse("a.b").unwrap());
        set.insert(parse("a.b").unwrap());

        assert_eq!(set.len(), 1);
        assert!(set.contains("a.b"));
        assert!(!set.contains("a.c"));
    }
}
