//! Pick one display name from a face's localized full names.

use std::collections::HashMap;

use log::warn;

use crate::error::{FontnameError, Result};
use crate::language::LanguagePriority;
use crate::record::NameRecord;
use crate::repair::{DecodeResult, NameDecoder};

/// What to do when none of the preferred languages has a full name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingLanguage {
    /// Fail with [`FontnameError::NoPreferredName`].
    #[default]
    Error,
    /// Use the last full-name record of the table.
    Fallback,
}

/// Decode the full name in the most preferred language present.
///
/// When a language has several full-name records the last one wins.
pub fn select_display_name(
    records: &[NameRecord],
    priority: &LanguagePriority,
    decoder: &NameDecoder,
    missing: MissingLanguage,
) -> Result<String> {
    let full_names: Vec<&NameRecord> = records.iter().filter(|r| r.is_full_name()).collect();
    let Some(&last) = full_names.last() else {
        return Err(FontnameError::NoFullName);
    };

    let by_language: HashMap<u16, &NameRecord> = full_names
        .iter()
        .map(|&record| (record.language_id, record))
        .collect();

    let chosen = match priority.iter().find_map(|id| by_language.get(&id)) {
        Some(&record) => record,
        None => {
            let mut languages: Vec<u16> = by_language.keys().copied().collect();
            languages.sort_unstable();
            match missing {
                MissingLanguage::Error => {
                    return Err(FontnameError::NoPreferredName { languages });
                }
                MissingLanguage::Fallback => {
                    warn!(
                        "no full name in a preferred language (have {languages:?}); using language {}",
                        last.language_id
                    );
                    last
                }
            }
        }
    };

    let decoded = decoder.decode_record(chosen);
    Ok(decoded.text.trim_matches('\0').to_owned())
}

/// Every full-name record with its decode, in table order.
pub fn full_names<'a>(
    records: &'a [NameRecord],
    decoder: &NameDecoder,
) -> Vec<(&'a NameRecord, DecodeResult)> {
    records
        .iter()
        .filter(|r| r.is_full_name())
        .map(|record| (record, decoder.decode_record(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repair::IssueLevel;

    fn windows_name(language_id: u16, text: &str) -> NameRecord {
        let raw: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        NameRecord::new(3, 1, language_id, 4, raw)
    }

    fn select(records: &[NameRecord], priority: &LanguagePriority) -> Result<String> {
        select_display_name(
            records,
            priority,
            &NameDecoder::default(),
            MissingLanguage::Error,
        )
    }

    // ── priority ─────────────────────────────────────────────────

    #[test]
    fn first_priority_hit_wins() {
        let records = [
            windows_name(1033, "A"),
            windows_name(1041, "B"),
            windows_name(2052, "C"),
        ];
        let priority = LanguagePriority::new([2052, 1033]);
        assert_eq!(select(&records, &priority).unwrap(), "C");
    }

    #[test]
    fn default_priority_prefers_chinese_over_english() {
        let records = [windows_name(1033, "SimSun"), windows_name(2052, "宋体")];
        assert_eq!(select(&records, &LanguagePriority::default()).unwrap(), "宋体");
    }

    #[test]
    fn mac_language_codes_count() {
        let mac = NameRecord::new(1, 0, 0, 4, b"Geneva".to_vec());
        assert_eq!(select(&[mac], &LanguagePriority::default()).unwrap(), "Geneva");
    }

    #[test]
    fn last_record_per_language_wins() {
        let records = [windows_name(1033, "Old"), windows_name(1033, "New")];
        assert_eq!(select(&records, &LanguagePriority::default()).unwrap(), "New");
    }

    #[test]
    fn other_name_ids_are_ignored() {
        let mut family = windows_name(2052, "宋体");
        family.name_id = 1;
        let records = [family, windows_name(1033, "SimSun Regular")];
        assert_eq!(
            select(&records, &LanguagePriority::default()).unwrap(),
            "SimSun Regular"
        );
    }

    // ── trimming ─────────────────────────────────────────────────

    #[test]
    fn nul_padding_is_stripped() {
        let records = [windows_name(1033, "\0\0Tahoma\0")];
        let name = select(&records, &LanguagePriority::default()).unwrap();
        assert_eq!(name, "Tahoma");
        assert!(!name.starts_with('\0') && !name.ends_with('\0'));
    }

    // ── missing language ─────────────────────────────────────────

    #[test]
    fn missing_language_is_an_error_by_default() {
        let records = [windows_name(1049, "Шрифт"), windows_name(1031, "Schrift")];
        let err = select(&records, &LanguagePriority::default()).unwrap_err();
        match err {
            FontnameError::NoPreferredName { languages } => assert_eq!(languages, vec![1031, 1049]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_language_fallback_uses_last_record() {
        let _ = env_logger::builder().is_test(true).try_init();
        let records = [windows_name(1049, "Шрифт"), windows_name(1031, "Schrift")];
        let name = select_display_name(
            &records,
            &LanguagePriority::default(),
            &NameDecoder::default(),
            MissingLanguage::Fallback,
        )
        .unwrap();
        assert_eq!(name, "Schrift");
    }

    #[test]
    fn no_full_name_at_all() {
        let mut family = windows_name(1033, "Arial");
        family.name_id = 1;
        let err = select(&[family], &LanguagePriority::default()).unwrap_err();
        assert!(matches!(err, FontnameError::NoFullName));
        assert!(matches!(
            select(&[], &LanguagePriority::default()),
            Err(FontnameError::NoFullName)
        ));
    }

    // ── diagnostics ──────────────────────────────────────────────

    #[test]
    fn full_names_lists_every_decode() {
        let records = [
            windows_name(1033, "Arial"),
            NameRecord::new(3, 2, 1041, 4, vec![0x98, 0xA8]),
        ];
        let decoded = full_names(&records, &NameDecoder::default());
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].1.issue, IssueLevel::None);
        assert_eq!(decoded[1].1.text, "風");
        assert_eq!(decoded[1].1.issue, IssueLevel::Mark);
    }
}
