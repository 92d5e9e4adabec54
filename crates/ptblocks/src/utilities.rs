//! Utility functions for line handling.

/// Join paragraph fragments with `joiner` and trim the result
pub fn join_fragments(fragments: &[String], joiner: &str) -> String {
    fragments.join(joiner).trim().to_string()
}

/// Check if a line separates blocks
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
