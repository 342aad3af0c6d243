//! Input normalization
//!
//! Raw text arrives from paste buffers and scrapers with arbitrary layout.
//! Collapsing whitespace and capping the length keeps feature extraction
//! cheap and makes the result independent of formatting.

/// Default character cap applied before vectorizing.
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Marker appended when input is truncated.
pub const DEFAULT_TRUNCATION_MARKER: &str = "...";

/// Whitespace collapsing + truncation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    /// Maximum number of characters kept (counted as chars, not bytes)
    max_chars: usize,
    /// Appended after the kept prefix when the input was longer
    truncation_marker: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            truncation_marker: DEFAULT_TRUNCATION_MARKER.to_string(),
        }
    }
}

impl Normalizer {
    /// The marker must be non-empty and free of whitespace: a truncated
    /// result is then always longer than the cap and ends in the same
    /// marker, so normalizing it again cuts at the same place.
    pub fn new(max_chars: usize, truncation_marker: impl Into<String>) -> Result<Self, String> {
        let truncation_marker = truncation_marker.into();
        if truncation_marker.is_empty() {
            return Err("truncation marker must not be empty".into());
        }
        if truncation_marker.chars().any(char::is_whitespace) {
            return Err("truncation marker must not contain whitespace".into());
        }
        Ok(Self {
            max_chars,
            truncation_marker,
        })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn truncation_marker(&self) -> &str {
        &self.truncation_marker
    }

    /// Normalize raw text. Total: never fails, empty output is valid.
    ///
    /// The kept prefix is not trimmed again after cutting, so running the
    /// result through `normalize` a second time yields the same string.
    pub fn normalize(&self, raw: &str) -> String {
        let mut collapsed = String::with_capacity(raw.len());
        for word in raw.split_whitespace() {
            if !collapsed.is_empty() {
                collapsed.push(' ');
            }
            collapsed.push_str(word);
        }

        match collapsed.char_indices().nth(self.max_chars) {
            Some((cut, _)) => {
                collapsed.truncate(cut);
                collapsed.push_str(&self.truncation_marker);
                collapsed
            }
            None => collapsed,
        }
    }
}
