//! Rule system for line classification.

mod markdown;
mod rule;

pub use markdown::{markdown_rules, numbered_list_rule};
pub use rule::{ClassifyFn, Filter, Line, Rule};

use indexmap::IndexMap;

/// Collection of rules for classifying lines
pub struct Rules {
    /// Custom rules added by the user (checked first, in insertion order)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in heading and bullet rules
    markdown_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            markdown_rules: markdown_rules(),
        }
    }

    /// Add a custom rule. Re-using a key replaces the earlier rule in place.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Remove a custom rule
    pub fn remove(&mut self, key: &str) -> Option<Rule> {
        self.custom_rules.shift_remove(key)
    }

    /// Names of the custom rules, in the order they are checked
    pub fn custom_keys(&self) -> impl Iterator<Item = &str> {
        self.custom_rules.keys().map(String::as_str)
    }

    /// Classify a trimmed, non-blank line. Lines no rule claims are text.
    pub fn classify(&self, line: &str) -> Line {
        self.custom_rules
            .values()
            .chain(&self.markdown_rules)
            .find_map(|rule| rule.apply(line))
            .unwrap_or_else(|| Line::Text(line.to_string()))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
