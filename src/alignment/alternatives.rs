use std::collections::{HashMap, HashSet};

use crate::error::AnalysisError;
use crate::pipeline::traits::WordSplitter;

/// Table member that turns the other members of its line into wildcards.
pub const WILDCARD_MARKER: &str = "*";

const MEMBER_SEPARATOR: char = '|';

#[derive(Debug, Clone)]
struct AlternativeClass {
    members: Vec<String>,
    wildcard: bool,
}

/// Equivalence classes of interchangeable words, one class per table line.
///
/// A word may sit in several classes; two words are alternatives when they
/// share at least one class.
#[derive(Debug, Clone, Default)]
pub struct AlternativeSet {
    classes: Vec<AlternativeClass>,
    index: HashMap<String, Vec<usize>>,
}

impl AlternativeSet {
    /// Parse a table such as:
    ///
    /// ```text
    /// colour|color
    /// okay|ok
    /// um|uh|*
    /// ```
    ///
    /// Members go through `splitter`, the same splitter that produces the
    /// transcript words they are compared with. Empty members, members that
    /// split into no word or several words, and wildcard lines without a word
    /// are configuration errors.
    pub fn parse(table: &str, splitter: &dyn WordSplitter) -> Result<Self, AnalysisError> {
        let mut set = Self::default();
        for (line_idx, line) in table.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut members = Vec::new();
            let mut wildcard = false;
            for raw in line.split(MEMBER_SEPARATOR) {
                let raw = raw.trim();
                if raw == WILDCARD_MARKER {
                    wildcard = true;
                    continue;
                }
                let mut words = splitter.split_words(raw);
                if words.is_empty() {
                    return Err(AnalysisError::config(format!(
                        "alternatives line {}: empty member in '{line}'",
                        line_idx + 1
                    )));
                }
                if words.len() > 1 {
                    return Err(AnalysisError::config(format!(
                        "alternatives line {}: '{raw}' is not a single word",
                        line_idx + 1
                    )));
                }
                let member = words.remove(0);
                if !members.contains(&member) {
                    members.push(member);
                }
            }

            if members.is_empty() {
                return Err(AnalysisError::config(format!(
                    "alternatives line {}: wildcard marker without a word",
                    line_idx + 1
                )));
            }

            let class_id = set.classes.len();
            for member in &members {
                set.index.entry(member.clone()).or_default().push(class_id);
            }
            set.classes.push(AlternativeClass { members, wildcard });
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn are_alternatives(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(a_classes), Some(b_classes)) => {
                a_classes.iter().any(|class| b_classes.contains(class))
            }
            _ => false,
        }
    }
}

/// Words that match any opposing word, taken from the wildcard lines of an
/// [`AlternativeSet`].
#[derive(Debug, Clone, Default)]
pub struct WildcardSet {
    words: HashSet<String>,
}

impl WildcardSet {
    pub fn from_alternatives(alternatives: &AlternativeSet) -> Self {
        let words = alternatives
            .classes
            .iter()
            .filter(|class| class.wildcard)
            .flat_map(|class| class.members.iter().cloned())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::defaults::{NormalizedWordSplitter, UnicodeWordSplitter};

    fn parse(table: &str) -> Result<AlternativeSet, AnalysisError> {
        AlternativeSet::parse(table, &NormalizedWordSplitter)
    }

    #[test]
    fn empty_table_is_valid() {
        let set = parse("").expect("empty table parses");
        assert!(set.is_empty());
        assert!(WildcardSet::from_alternatives(&set).is_empty());
    }

    #[test]
    fn members_of_a_line_are_alternatives() {
        let set = parse("colour|color\nokay|ok").expect("valid table");
        assert_eq!(set.class_count(), 2);
        assert!(set.are_alternatives("colour", "color"));
        assert!(set.are_alternatives("ok", "okay"));
        assert!(!set.are_alternatives("colour", "ok"));
        assert!(!set.are_alternatives("colour", "unknown"));
    }

    #[test]
    fn members_are_normalized() {
        let set = parse(" Grey | GRAY. ").expect("valid table");
        assert!(set.are_alternatives("grey", "gray"));
    }

    #[test]
    fn classes_are_not_transitive() {
        let set = parse("a|b\nb|c").expect("valid table");
        assert!(set.are_alternatives("a", "b"));
        assert!(set.are_alternatives("b", "c"));
        assert!(!set.are_alternatives("a", "c"));
    }

    #[test]
    fn wildcard_lines_feed_wildcard_set() {
        let set = parse("um|uh|*\ncolour|color").expect("valid table");
        let wildcards = WildcardSet::from_alternatives(&set);
        assert_eq!(wildcards.len(), 2);
        assert!(wildcards.contains("um"));
        assert!(wildcards.contains("uh"));
        assert!(!wildcards.contains("colour"));
    }

    #[test]
    fn empty_member_is_config_error() {
        let err = parse("a||b").unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }

    #[test]
    fn bare_wildcard_is_config_error() {
        let err = parse("colour|color\n*").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn multi_word_member_is_config_error() {
        let err = parse("gonna|going to").unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }

    #[test]
    fn members_follow_the_session_splitter() {
        let normalized = parse("don't|do").expect("valid table");
        assert!(normalized.are_alternatives("dont", "do"));
        assert!(!normalized.are_alternatives("don't", "do"));

        let unicode = AlternativeSet::parse("Don't|do", &UnicodeWordSplitter).expect("valid table");
        assert!(unicode.are_alternatives("don't", "do"));
        assert!(!unicode.are_alternatives("dont", "do"));
    }
}
