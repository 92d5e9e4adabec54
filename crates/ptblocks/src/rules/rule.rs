//! Rule and Filter types for line classification.

use ptblocks_core::ListKind;
use regex::{Captures, Regex};

use crate::Result;

/// What a trimmed, non-blank line contributes to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Emitted immediately as a heading block
    Heading { level: u8, text: String },
    /// Appended to the current list run
    ListItem { kind: ListKind, text: String },
    /// Appended to the current paragraph
    Text(String),
}

/// Type alias for classification functions
pub type ClassifyFn = Box<dyn Fn(&str) -> Line + Send + Sync>;

/// A filter determines which lines a rule applies to
pub enum Filter {
    /// Match a regular expression
    Pattern(Regex),
    /// Match lines starting with a prefix
    Prefix(String),
    /// Match using a predicate function
    Predicate(Box<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter from a regular expression
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Filter::Pattern(Regex::new(pattern)?))
    }

    /// Create a filter for lines starting with `prefix`
    pub fn prefix(prefix: &str) -> Self {
        Filter::Prefix(prefix.to_string())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches a line
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Filter::Pattern(re) => re.is_match(line),
            Filter::Prefix(prefix) => line.starts_with(prefix.as_str()),
            Filter::Predicate(f) => f(line),
        }
    }
}

/// A rule decides what a matched line becomes
pub struct Rule {
    /// Filter to determine which lines this rule applies to
    pub filter: Filter,
    /// Classification of a matched line
    pub classify: ClassifyFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, classify: F) -> Self
    where
        F: Fn(&str) -> Line + Send + Sync + 'static,
    {
        Self {
            filter,
            classify: Box::new(classify),
        }
    }

    /// Create a rule whose classification reads the captures of `regex`.
    ///
    /// A line that matched the filter always has captures, so the fallback to
    /// [`Line::Text`] is unreachable in practice.
    pub fn with_captures<F>(regex: Regex, classify: F) -> Self
    where
        F: Fn(&Captures<'_>) -> Line + Send + Sync + 'static,
    {
        let matcher = regex.clone();
        Self::new(Filter::Pattern(regex), move |line| {
            match matcher.captures(line) {
                Some(caps) => classify(&caps),
                None => Line::Text(line.to_string()),
            }
        })
    }

    /// Apply this rule to a line, if its filter matches
    pub fn apply(&self, line: &str) -> Option<Line> {
        if self.filter.matches(line) {
            Some((self.classify)(line))
        } else {
            None
        }
    }
}
