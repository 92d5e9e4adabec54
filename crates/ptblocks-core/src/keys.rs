//! Node key generation
//!
//! Portable Text requires a `_key` on every block and span. Keys only need to
//! be unique within one document and carry no meaning.

use uuid::Uuid;

/// Length of keys produced by [`RandomKeys`]
pub const KEY_LENGTH: usize = 12;

/// Source of per-node keys
pub trait KeyGenerator {
    fn next_key(&mut self) -> String;
}

/// Random keys: the first 12 hex digits of a v4 UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeys;

impl KeyGenerator for RandomKeys {
    fn next_key(&mut self) -> String {
        let mut key = Uuid::new_v4().simple().to_string();
        key.truncate(KEY_LENGTH);
        key
    }
}

/// Deterministic keys: `prefix` followed by a counter starting at 0
#[derive(Debug, Clone)]
pub struct SequentialKeys {
    prefix: String,
    next: u64,
}

impl SequentialKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialKeys {
    fn default() -> Self {
        Self::new("k")
    }
}

impl KeyGenerator for SequentialKeys {
    fn next_key(&mut self) -> String {
        let key = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        key
    }
}
