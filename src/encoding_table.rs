//! Platform/encoding ID to codec mapping.
//!
//! The default assignment follows the OpenType `name` table platform and
//! encoding IDs. Anything unassigned resolves to UTF-16BE, which decodes
//! every even-length byte string it is given.

use std::collections::HashMap;

use crate::codec::Codec;
use crate::error::Result;

/// Unicode platform.
pub const PLATFORM_UNICODE: u16 = 0;
/// Macintosh platform.
pub const PLATFORM_MAC: u16 = 1;
/// ISO platform (deprecated).
pub const PLATFORM_ISO: u16 = 2;
/// Windows platform.
pub const PLATFORM_WINDOWS: u16 = 3;

#[rustfmt::skip]
const DEFAULT_ASSIGNMENTS: &[(u16, u16, Codec)] = &[
    (PLATFORM_MAC, 0, Codec::MacRoman),
    (PLATFORM_MAC, 1, Codec::MacJapanese),
    (PLATFORM_MAC, 2, Codec::MacChineseTrad),
    (PLATFORM_MAC, 3, Codec::MacKorean),
    (PLATFORM_MAC, 4, Codec::Iso8859_6),   // Arabic
    (PLATFORM_MAC, 5, Codec::Iso8859_8),   // Hebrew
    (PLATFORM_MAC, 6, Codec::MacGreek),
    (PLATFORM_MAC, 7, Codec::MacCyrillic), // Russian
    (PLATFORM_MAC, 21, Codec::Windows874), // Thai
    (PLATFORM_MAC, 25, Codec::MacChineseSimp),
    (PLATFORM_MAC, 30, Codec::Windows1258), // Vietnamese
    (PLATFORM_ISO, 0, Codec::Ascii),
    (PLATFORM_ISO, 1, Codec::Utf16Be),     // ISO 10646
    (PLATFORM_ISO, 2, Codec::Latin1),      // ISO 8859-1
    (PLATFORM_WINDOWS, 0, Codec::Utf16Be), // Symbol
    (PLATFORM_WINDOWS, 1, Codec::Utf16Be), // Unicode BMP
    (PLATFORM_WINDOWS, 2, Codec::ShiftJis),
    (PLATFORM_WINDOWS, 3, Codec::Gb2312),  // PRC
    (PLATFORM_WINDOWS, 4, Codec::Big5),
    (PLATFORM_WINDOWS, 5, Codec::Windows949), // Wansung
    (PLATFORM_WINDOWS, 6, Codec::Johab),
    (PLATFORM_WINDOWS, 10, Codec::Utf16Be), // Unicode full repertoire
];

/// Maps a record's (platform ID, encoding ID) to the codec it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingTable {
    exact: HashMap<(u16, u16), Codec>,
    /// Codec for every encoding ID of a platform without an exact entry.
    platforms: HashMap<u16, Codec>,
    fallback: Codec,
}

impl Default for EncodingTable {
    fn default() -> Self {
        let mut table = Self::empty().with_platform(PLATFORM_UNICODE, Codec::Utf16Be);
        for &(platform, encoding, codec) in DEFAULT_ASSIGNMENTS {
            table = table.with(platform, encoding, codec);
        }
        table
    }
}

impl EncodingTable {
    /// A table with no assignments; every lookup yields the fallback.
    pub fn empty() -> Self {
        Self {
            exact: HashMap::new(),
            platforms: HashMap::new(),
            fallback: Codec::Utf16Be,
        }
    }

    /// Build a table from codec identifiers, rejecting unknown names.
    pub fn from_names(entries: &[(u16, u16, &str)]) -> Result<Self> {
        entries
            .iter()
            .try_fold(Self::empty(), |table, &(platform, encoding, name)| {
                Ok(table.with(platform, encoding, name.parse()?))
            })
    }

    /// Assign `codec` to one platform/encoding pair.
    #[must_use]
    pub fn with(mut self, platform_id: u16, encoding_id: u16, codec: Codec) -> Self {
        self.exact.insert((platform_id, encoding_id), codec);
        self
    }

    /// Assign `codec` to every encoding of `platform_id` not listed exactly.
    #[must_use]
    pub fn with_platform(mut self, platform_id: u16, codec: Codec) -> Self {
        self.platforms.insert(platform_id, codec);
        self
    }

    /// Codec used when nothing matches.
    #[must_use]
    pub fn with_fallback(mut self, codec: Codec) -> Self {
        self.fallback = codec;
        self
    }

    pub fn fallback(&self) -> Codec {
        self.fallback
    }

    /// Codec declared by a platform/encoding pair. Never fails.
    pub fn lookup(&self, platform_id: u16, encoding_id: u16) -> Codec {
        self.get(platform_id, encoding_id).unwrap_or(self.fallback)
    }

    /// Codec declared by a platform/encoding pair, if the table assigns one.
    pub fn get(&self, platform_id: u16, encoding_id: u16) -> Option<Codec> {
        self.exact
            .get(&(platform_id, encoding_id))
            .or_else(|| self.platforms.get(&platform_id))
            .copied()
    }
}
