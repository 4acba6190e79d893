//! Wildcard tokens and segment matching
//!
//! Addresses are split on a delimiter into segments. Two segment values are
//! special when wildcard routing is enabled:
//!
//! - single word (`*` by default): matches exactly one segment
//! - any words (`#` by default): matches the remaining segments, zero or more
//!
//! ```text
//!   news.*     matches  news.sports          (not news, not news.sports.extra)
//!   news.#     matches  news, news.sports, news.sports.extra
//!   *.#        matches  every non-empty address
//! ```

use crate::error::{Result, RoutingError};

use super::name::Segment;

/// Default segment delimiter
pub const DEFAULT_DELIMITER: char = '.';

/// Default single-word wildcard token
pub const DEFAULT_SINGLE_WORD: char = '*';

/// Default any-words wildcard token
pub const DEFAULT_ANY_WORDS: char = '#';

/// Characters used to split addresses and to recognize wildcard segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WildcardConfiguration {
    /// Segment delimiter
    pub delimiter: char,
    /// Token matching exactly one segment
    pub single_word: char,
    /// Token matching any number of trailing segments
    pub any_words: char,
}

impl Default for WildcardConfiguration {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            single_word: DEFAULT_SINGLE_WORD,
            any_words: DEFAULT_ANY_WORDS,
        }
    }
}

impl WildcardConfiguration {
    /// Set the segment delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the single-word token
    pub fn single_word(mut self, token: char) -> Self {
        self.single_word = token;
        self
    }

    /// Set the any-words token
    pub fn any_words(mut self, token: char) -> Self {
        self.any_words = token;
        self
    }

    /// Check that the three characters are distinct
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.single_word || self.delimiter == self.any_words {
            return Err(RoutingError::InvalidConfig(
                "delimiter must differ from the wildcard tokens",
            ));
        }
        if self.single_word == self.any_words {
            return Err(RoutingError::InvalidConfig(
                "single-word and any-words tokens must differ",
            ));
        }
        Ok(())
    }

    /// Classify one raw segment
    pub(crate) fn segment(&self, raw: &str) -> Segment {
        if is_token(raw, self.single_word) {
            Segment::SingleWord
        } else if is_token(raw, self.any_words) {
            Segment::AnyWords
        } else {
            Segment::Literal(raw.into())
        }
    }
}

fn is_token(segment: &str, token: char) -> bool {
    let mut chars = segment.chars();
    chars.next() == Some(token) && chars.next().is_none()
}

/// Test whether `pattern` matches `candidate`, segment by segment
///
/// Matching is directional. Wildcard segments in `candidate` are compared
/// literally, so they only match the identical wildcard in `pattern` or a
/// `SingleWord` position.
pub fn matches(pattern: &[Segment], candidate: &[Segment]) -> bool {
    for (pos, segment) in pattern.iter().enumerate() {
        if *segment == Segment::AnyWords {
            return true;
        }

        let Some(other) = candidate.get(pos) else {
            return false;
        };

        if *segment != Segment::SingleWord && segment != other {
            return false;
        }
    }

    pattern.len() == candidate.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;

    fn addr(raw: &str) -> Address {
        Address::parse(raw, &WildcardConfiguration::default()).unwrap()
    }

    fn check(pattern: &str, candidate: &str) -> bool {
        addr(pattern).matches(&addr(candidate))
    }

    #[test]
    fn test_single_word() {
        assert!(check("news.*", "news.sports"));
        assert!(!check("news.*", "news.sports.extra"));
        assert!(!check("news.*", "news"));
        assert!(check("*.sports", "news.sports"));
        assert!(!check("*.sports", "news.weather"));
    }

    #[test]
    fn test_any_words() {
        assert!(check("news.#", "news"));
        assert!(check("news.#", "news.sports"));
        assert!(check("news.#", "news.sports.extra"));
        assert!(!check("news.#", "weather.today"));
        assert!(check("#", "anything.at.all"));
    }

    #[test]
    fn test_single_then_any() {
        assert!(check("*.#", "a"));
        assert!(check("*.#", "a.b"));
        assert!(check("*.#", "a.b.c.d"));
    }

    #[test]
    fn test_literal_only() {
        assert!(check("a.b", "a.b"));
        assert!(!check("a.b", "a.c"));
        assert!(!check("a.b", "a.b.c"));
        assert!(!check("a.b.c", "a.b"));
    }

    #[test]
    fn test_directional() {
        // A concrete candidate never matches as a pattern against a wildcard
        assert!(check("a.*", "a.b"));
        assert!(!check("a.b", "a.*"));
    }

    #[test]
    fn test_custom_tokens() {
        let config = WildcardConfiguration::default()
            .delimiter('/')
            .single_word('+');
        let pattern = Address::parse("news/+", &config).unwrap();
        let candidate = Address::parse("news/sports", &config).unwrap();

        assert!(pattern.has_wildcard());
        assert!(pattern.matches(&candidate));
        // '*' is a plain character under this configuration
        assert!(!Address::parse("news/*", &config).unwrap().has_wildcard());
    }

    #[test]
    fn test_validate() {
        assert!(WildcardConfiguration::default().validate().is_ok());
        assert!(WildcardConfiguration::default()
            .delimiter('*')
            .validate()
            .is_err());
        assert!(WildcardConfiguration::default()
            .any_words('*')
            .validate()
            .is_err());
    }
}
