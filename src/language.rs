//! Preferred display-language ranking.

/// Ordered language IDs, most preferred first.
///
/// Each language appears with both its Windows LCID and its Macintosh
/// language code, since a face may carry either platform's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePriority(Vec<u16>);

#[rustfmt::skip]
const DEFAULT_ORDER: &[u16] = &[
    2052, 33, // zh-Hans
    1028, 19, // zh-Hant
    1041, 11, // ja
    1042, 23, // ko
    1033, 0,  // en-US
];

impl Default for LanguagePriority {
    fn default() -> Self {
        Self(DEFAULT_ORDER.to_vec())
    }
}

impl LanguagePriority {
    pub fn new(ids: impl IntoIterator<Item = u16>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn ids(&self) -> &[u16] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    /// Position of `language_id` in the ranking.
    pub fn rank(&self, language_id: u16) -> Option<usize> {
        self.0.iter().position(|&id| id == language_id)
    }
}

impl From<Vec<u16>> for LanguagePriority {
    fn from(ids: Vec<u16>) -> Self {
        Self(ids)
    }
}
