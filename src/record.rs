//! Name records as handed over by the font parser.

/// Name ID of the full font name.
pub const FULL_NAME: u16 = 4;

/// One entry of a face's `name` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    /// Undecoded string bytes.
    pub raw: Vec<u8>,
    /// The font parser's own decode, when it understands the record's
    /// encoding (Unicode platforms and Mac Roman). It is lenient: a high
    /// surrogate absorbs whatever unit follows it and an odd last byte is
    /// dropped.
    pub parsed: Option<String>,
}

impl NameRecord {
    pub fn new(
        platform_id: u16,
        encoding_id: u16,
        language_id: u16,
        name_id: u16,
        raw: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            platform_id,
            encoding_id,
            language_id,
            name_id,
            raw: raw.into(),
            parsed: None,
        }
    }

    #[must_use]
    pub fn with_parsed(mut self, parsed: impl Into<String>) -> Self {
        self.parsed = Some(parsed.into());
        self
    }

    pub fn is_full_name(&self) -> bool {
        self.name_id == FULL_NAME
    }
}
