//! Configuration options shared by conversion and serialization

/// Options for text conversion and preview serialization
#[derive(Debug, Clone)]
pub struct Options {
    /// Delimiter that toggles bold on and off
    pub strong_delimiter: String,

    /// String placed between the lines of one paragraph
    pub line_joiner: String,

    /// Bullet list marker used when serializing
    pub bullet_list_marker: char,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strong_delimiter: "**".to_string(),
            line_joiner: " ".to_string(),
            bullet_list_marker: '-',
        }
    }
}
