//! Built-in rules for the lightweight markdown line grammar.

use once_cell::sync::Lazy;
use ptblocks_core::ListKind;
use regex::Regex;

use super::{Line, Rule};

/// One to four `#`, whitespace, then content
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,4})\s+(.+)$").unwrap());

/// `-` or `*`, whitespace, then content
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+(.+)$").unwrap());

/// Digits, `.` or `)`, whitespace, then content
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s+(.+)$").unwrap());

/// Create the default rules, in the order they are checked
pub fn markdown_rules() -> Vec<Rule> {
    vec![heading_rule(), bullet_list_rule()]
}

fn heading_rule() -> Rule {
    Rule::with_captures(HEADING.clone(), |caps| Line::Heading {
        level: caps[1].len() as u8,
        text: caps[2].to_string(),
    })
}

fn bullet_list_rule() -> Rule {
    Rule::with_captures(BULLET.clone(), |caps| Line::ListItem {
        kind: ListKind::Bullet,
        text: caps[1].to_string(),
    })
}

/// Opt-in rule turning `1. item` lines into numbered list items
pub fn numbered_list_rule() -> Rule {
    Rule::with_captures(NUMBERED.clone(), |caps| Line::ListItem {
        kind: ListKind::Number,
        text: caps[1].to_string(),
    })
}
