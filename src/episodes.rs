//! Episode number parsing for scraped canon lists.
//!
//! Filler list pages write episodes as a sequence of link texts such as
//! `"1"`, `"5-12"` or the occasional stray `"0"`. This module turns those
//! tokens into absolute episode numbers and records what it could not read.

use std::collections::HashSet;
use std::fmt;

/// Absolute, 1-based episode number.
pub type EpisodeNumber = u32;

/// A token that looked like an episode reference but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A token with a `-` whose bounds did not parse.
    MalformedRange(String),
    /// A token without a `-` that is not a positive number.
    MalformedSingle(String),
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MalformedRange(token) => write!(f, "range '{}'", token),
            ParseWarning::MalformedSingle(token) => write!(f, "single '{}'", token),
        }
    }
}

/// Deduplicated episode numbers in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeList {
    order: Vec<EpisodeNumber>,
    seen: HashSet<EpisodeNumber>,
}

impl EpisodeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an episode, returning false if it was already present.
    pub fn insert(&mut self, episode: EpisodeNumber) -> bool {
        if self.seen.insert(episode) {
            self.order.push(episode);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, episode: EpisodeNumber) -> bool {
        self.seen.contains(&episode)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EpisodeNumber> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[EpisodeNumber] {
        &self.order
    }
}

impl FromIterator<EpisodeNumber> for EpisodeList {
    fn from_iter<I: IntoIterator<Item = EpisodeNumber>>(iter: I) -> Self {
        let mut list = EpisodeList::new();
        for episode in iter {
            list.insert(episode);
        }
        list
    }
}

impl Extend<EpisodeNumber> for EpisodeList {
    fn extend<I: IntoIterator<Item = EpisodeNumber>>(&mut self, iter: I) {
        for episode in iter {
            self.insert(episode);
        }
    }
}

/// Episodes found in one section of a page, plus its unreadable tokens.
#[derive(Debug, Clone, Default)]
pub struct SectionParse {
    pub episodes: EpisodeList,
    pub warnings: Vec<ParseWarning>,
}

/// Lenient integer read: surrounding whitespace is ignored and anything
/// unparseable counts as zero.
fn lenient_number(text: &str) -> EpisodeNumber {
    text.trim().parse().unwrap_or(0)
}

/// Parses one token into the inclusive range of episodes it names.
///
/// Returns `Ok(None)` for tokens that are deliberately empty (blank text,
/// a literal `0` or `0-0`, or a reversed range), and a warning for tokens
/// that could not be read at all.
pub fn parse_token(
    token: &str,
) -> Result<Option<std::ops::RangeInclusive<EpisodeNumber>>, ParseWarning> {
    let text = token.trim();
    if text.is_empty() {
        return Ok(None);
    }

    if let Some((start_text, end_text)) = text.split_once('-') {
        let start = lenient_number(start_text);
        let end = lenient_number(end_text);

        if start > 0 && end >= start {
            return Ok(Some(start..=end));
        }
        // Open-ended ranges like "12-" name a single episode.
        if start > 0 && end == 0 {
            return Ok(Some(start..=start));
        }
        if start == 0 && end == 0 && (start_text.trim() != "0" || end_text.trim() != "0") {
            return Err(ParseWarning::MalformedRange(text.to_string()));
        }
        return Ok(None);
    }

    match lenient_number(text) {
        0 if text == "0" => Ok(None),
        0 => Err(ParseWarning::MalformedSingle(text.to_string())),
        episode => Ok(Some(episode..=episode)),
    }
}

/// Parses every token of a section.
pub fn parse_section<I, S>(tokens: I) -> SectionParse
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = SectionParse::default();

    for token in tokens {
        match parse_token(token.as_ref()) {
            Ok(Some(range)) => parsed.episodes.extend(range),
            Ok(None) => {}
            Err(warning) => parsed.warnings.push(warning),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn episodes(tokens: &[&str]) -> Vec<EpisodeNumber> {
        parse_section(tokens).episodes.as_slice().to_vec()
    }

    #[test]
    fn test_valid_range() {
        assert_eq!(parse_token("3-6").unwrap(), Some(3..=6));
        assert_eq!(parse_token(" 7 - 7 ").unwrap(), Some(7..=7));
        assert_eq!(episodes(&["1-3"]), vec![1, 2, 3]);
    }

    #[test]
    fn test_open_ended_range_is_single() {
        assert_eq!(parse_token("12-").unwrap(), Some(12..=12));
        assert_eq!(parse_token("12-abc").unwrap(), Some(12..=12));
    }

    #[test]
    fn test_malformed_range_warns() {
        assert_eq!(
            parse_token("a-b"),
            Err(ParseWarning::MalformedRange("a-b".to_string()))
        );
        assert_eq!(
            parse_token("0-x"),
            Err(ParseWarning::MalformedRange("0-x".to_string()))
        );
    }

    #[test]
    fn test_quiet_non_episodes() {
        assert_eq!(parse_token("0-0").unwrap(), None);
        assert_eq!(parse_token("0").unwrap(), None);
        assert_eq!(parse_token("   ").unwrap(), None);
        assert_eq!(parse_token("").unwrap(), None);
        // Reversed and zero-start ranges are dropped without a warning.
        assert_eq!(parse_token("9-4").unwrap(), None);
        assert_eq!(parse_token("0-4").unwrap(), None);
    }

    #[test]
    fn test_split_on_first_dash() {
        // "1-2-3" reads as start 1, end "2-3" which is not a number.
        assert_eq!(parse_token("1-2-3").unwrap(), Some(1..=1));
    }

    #[test]
    fn test_malformed_single_warns() {
        assert_eq!(
            parse_token("abc"),
            Err(ParseWarning::MalformedSingle("abc".to_string()))
        );
        assert_eq!(
            parse_token("00"),
            Err(ParseWarning::MalformedSingle("00".to_string()))
        );
        assert_eq!(parse_token(" 42 ").unwrap(), Some(42..=42));
    }

    #[test]
    fn test_section_example() {
        let parsed = parse_section(["1-3", "5", "5", "abc"]);
        assert_eq!(parsed.episodes.as_slice(), &[1, 2, 3, 5]);
        assert_eq!(
            parsed.warnings,
            vec![ParseWarning::MalformedSingle("abc".to_string())]
        );
        assert_eq!(parsed.warnings[0].to_string(), "single 'abc'");
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        assert_eq!(episodes(&["10", "2-4", "3", "10-11"]), vec![10, 2, 3, 4, 11]);
    }

    #[test]
    fn test_set_is_order_independent() {
        let forward = ["1-3", "8", "x", "2-5", "0"];
        let mut backward = forward;
        backward.reverse();

        let a: BTreeSet<_> = parse_section(forward).episodes.iter().collect();
        let b: BTreeSet<_> = parse_section(backward).episodes.iter().collect();
        assert_eq!(a, b);
        assert_eq!(a, BTreeSet::from([1, 2, 3, 4, 5, 8]));
    }

    #[test]
    fn test_episode_list_membership() {
        let mut list: EpisodeList = [4, 1, 4].into_iter().collect();
        assert_eq!(list.len(), 2);
        assert!(list.contains(4));
        assert!(!list.contains(2));
        assert!(!list.insert(1));
        assert!(list.insert(2));
        assert_eq!(list.as_slice(), &[4, 1, 2]);
    }
}
