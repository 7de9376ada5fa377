//! Settings for turning a font file into display names.

use crate::encoding_table::EncodingTable;
use crate::language::LanguagePriority;
use crate::repair::NameDecoder;
use crate::select::MissingLanguage;

/// Largest font file accepted (256 MiB).
pub const MAX_INPUT_SIZE: usize = 256 * 1024 * 1024;

/// How faces are named and how their names are joined.
#[derive(Debug, Clone)]
pub struct Options {
    /// Placed between the names of a collection's faces.
    pub separator: String,
    pub priority: LanguagePriority,
    pub decoder: NameDecoder,
    pub missing_language: MissingLanguage,
    /// Inputs above this many bytes are rejected unread.
    pub max_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            separator: " & ".to_owned(),
            priority: LanguagePriority::default(),
            decoder: NameDecoder::default(),
            missing_language: MissingLanguage::default(),
            max_size: MAX_INPUT_SIZE,
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: LanguagePriority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_encoding_table(mut self, table: EncodingTable) -> Self {
        self.decoder = NameDecoder::new(table);
        self
    }

    #[must_use]
    pub fn with_missing_language(mut self, missing: MissingLanguage) -> Self {
        self.missing_language = missing;
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}
