//! Decode-repair engine for name strings.
//!
//! Font tools have written name records under the wrong encoding tag, or
//! with damaged bytes, for decades. Each rule here recognizes one known
//! malformation and tries a corrected decode:
//!
//! - NUL bytes interleaved into single-byte text, or UTF-16 tagged as a
//!   legacy code page
//! - Big5/Shift-JIS bytes tagged as Mac Roman
//! - GB2312 bytes decoded as Big5 and then stored as UTF-16
//! - vendor names whose leading bytes give the real code page away
//! - strings cut off in the middle of a multi-byte character
//!
//! The rules run in a fixed order and the first one that yields text wins.
//! Narrow vendor signatures come before the general fallbacks so that the
//! fallbacks never swallow them. A final lossy UTF-16BE decode makes the
//! cascade total.

use std::fmt;

use log::{debug, trace};

use crate::codec::{Codec, ErrorMode, Malformed};
use crate::encoding_table::EncodingTable;
use crate::record::NameRecord;

/// How much to trust a decoded name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueLevel {
    /// Decoded under the declared codec.
    None,
    /// Decoded cleanly, but under a different codec than declared.
    Mark,
    /// Bytes had to be dropped, reshuffled or replaced.
    Data,
}

impl IssueLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            IssueLevel::None => "none",
            IssueLevel::Mark => "mark",
            IssueLevel::Data => "data",
        }
    }
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of decoding one name string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    pub text: String,
    pub issue: IssueLevel,
    /// Codec that produced the text; `None` exactly when `issue` is `Data`.
    pub actual_encoding: Option<Codec>,
}

impl DecodeResult {
    fn damaged(text: String) -> Self {
        Self {
            text,
            issue: IssueLevel::Data,
            actual_encoding: None,
        }
    }

    fn mislabeled(text: String, codec: Codec) -> Self {
        Self {
            text,
            issue: IssueLevel::Mark,
            actual_encoding: Some(codec),
        }
    }
}

/// Decode `raw`, repairing known vendor malformations.
///
/// `declared` is the codec implied by the record's platform and encoding
/// IDs; `None` means the IDs resolved to nothing. Never fails.
pub fn decode(raw: &[u8], declared: Option<Codec>) -> DecodeResult {
    repair(raw, declared, Codec::Utf16Be, None)
}

/// Decodes name records against an encoding table.
#[derive(Debug, Clone, Default)]
pub struct NameDecoder {
    table: EncodingTable,
}

impl NameDecoder {
    pub fn new(table: EncodingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &EncodingTable {
        &self.table
    }

    /// Decode one record. Pairs missing from the table are decoded under
    /// the table's fallback codec and never classified as clean.
    pub fn decode_record(&self, record: &NameRecord) -> DecodeResult {
        let declared = self.table.get(record.platform_id, record.encoding_id);
        repair(
            &record.raw,
            declared,
            self.table.fallback(),
            record.parsed.as_deref(),
        )
    }
}

/// Inputs every rule sees.
struct Attempt<'a> {
    raw: &'a [u8],
    declared: Codec,
    /// Set when nothing was declared and `declared` is only assumed.
    assumed: bool,
    parsed: Option<&'a str>,
}

impl Attempt<'_> {
    /// Strict decode under `codec`. A failure in the last two bytes is a
    /// truncated tail: the rest is kept and the result marked `Data`.
    fn try_codec(&self, codec: Codec) -> Option<DecodeResult> {
        match codec.decode(self.raw, ErrorMode::Strict) {
            Ok(text) => Some(self.confirmed(text, codec)),
            Err(Malformed { offset }) if offset + 2 >= self.raw.len() => {
                Some(DecodeResult::damaged(codec.decode_lossy(self.raw)))
            }
            Err(_) => None,
        }
    }

    /// Grade text that decoded cleanly under `codec`. It is `None` or
    /// `Mark` only if it encodes back to exactly the input bytes.
    fn confirmed(&self, text: String, codec: Codec) -> DecodeResult {
        if codec.encode(&text).as_deref() != Some(self.raw) {
            return DecodeResult::damaged(text);
        }
        if codec == self.declared && !self.assumed {
            DecodeResult {
                text,
                issue: IssueLevel::None,
                actual_encoding: Some(codec),
            }
        } else {
            DecodeResult::mislabeled(text, codec)
        }
    }

    /// NUL-based rules only apply to legacy code pages with a NUL before
    /// the trailing padding.
    fn has_inner_nul(&self) -> bool {
        if self.declared.is_unicode() {
            return false;
        }
        let end = self
            .raw
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        self.raw[..end].contains(&0)
    }
}

type Rule = fn(&Attempt<'_>) -> Option<DecodeResult>;

#[rustfmt::skip]
const RULES: &[(&str, Rule)] = &[
    ("empty", empty),
    ("interleaved padding", interleaved_padding),
    ("mislabeled utf-16", mislabeled_utf16),
    ("mac roman over range", mac_roman_over_range),
    ("double re-encoding", double_reencoding),
    ("vendor prefix", vendor_prefix),
    ("mac cjk cross label", mac_cjk_cross_label),
    ("reverse utf-16", reverse_utf16),
    ("font parser", font_parser),
    ("extended code page", extended_code_page),
    ("truncation", truncation),
];

fn repair(raw: &[u8], declared: Option<Codec>, assumed: Codec, parsed: Option<&str>) -> DecodeResult {
    let attempt = Attempt {
        raw,
        declared: declared.unwrap_or(assumed),
        assumed: declared.is_none(),
        parsed,
    };

    if attempt.assumed {
        if let Some(result) = attempt.try_codec(assumed) {
            return finish("missing encoding", &attempt, result);
        }
    }
    for &(name, rule) in RULES {
        if let Some(result) = rule(&attempt) {
            return finish(name, &attempt, result);
        }
    }
    finish("last resort", &attempt, last_resort(&attempt))
}

fn finish(rule: &str, attempt: &Attempt<'_>, result: DecodeResult) -> DecodeResult {
    debug!(
        "name string ({} bytes, declared {}) decoded by rule `{rule}`: issue {}",
        attempt.raw.len(),
        attempt.declared,
        result.issue
    );
    if result.issue == IssueLevel::Data {
        trace!("repaired {:02X?} -> {:?}", attempt.raw, result.text);
    }
    result
}

// ── rules ─────────────────────────────────────────────────────────

fn empty(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if !attempt.raw.is_empty() {
        return None;
    }
    attempt.try_codec(attempt.declared)
}

/// Single-byte text with a zero written before every byte.
fn interleaved_padding(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if !attempt.has_inner_nul() || !attempt.raw.iter().step_by(2).all(|&b| b == 0) {
        return None;
    }
    let odd: Vec<u8> = attempt.raw.iter().skip(1).step_by(2).copied().collect();
    let text = attempt.declared.decode(&odd, ErrorMode::Strict).ok()?;
    Some(DecodeResult::damaged(text))
}

/// UTF-16BE tagged as a legacy code page.
fn mislabeled_utf16(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if !attempt.has_inner_nul() || attempt.raw.iter().step_by(2).all(|&b| b == 0) {
        return None;
    }
    attempt.try_codec(Codec::Utf16Be)
}

/// Big5 or Shift-JIS bytes tagged as Mac Roman.
fn mac_roman_over_range(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if attempt.declared != Codec::MacRoman {
        return None;
    }
    if attempt.raw.iter().filter(|&&b| b > 0x7F).count() <= 3 {
        return None;
    }
    attempt
        .try_codec(Codec::MacChineseTrad)
        .or_else(|| attempt.try_codec(Codec::MacJapanese))
}

/// Leading "文鼎" after GB2312 bytes were read as Big5 and stored as UTF-16.
const DOUBLE_ENCODED_PREFIX: &[u8] = &[0x60, 0x45, 0x96, 0x8B];

fn double_reencoding(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if attempt.declared != Codec::Utf16Be || !attempt.raw.starts_with(DOUBLE_ENCODED_PREFIX) {
        return None;
    }
    let misread = Codec::Utf16Be.decode(attempt.raw, ErrorMode::Strict).ok()?;
    let gb_bytes = Codec::Big5.encode(&misread)?;
    let text = Codec::Gb2312.decode(&gb_bytes, ErrorMode::Replace).ok()?;

    let mut chars: Vec<char> = text.chars().collect();
    // the vendor tool appended one stray character, which comes back as
    // a replacement followed by its trail byte
    if chars.len() >= 2 && chars[chars.len() - 2] == char::REPLACEMENT_CHARACTER {
        chars.truncate(chars.len() - 2);
    }
    Some(DecodeResult::damaged(chars.into_iter().collect()))
}

#[rustfmt::skip]
const VENDOR_PREFIXES: &[(&[u8], Codec)] = &[
    (&[0xBB, 0xAA, 0xBF, 0xB5], Codec::Gb2312), // 华康
    (&[0xB5, 0xD8, 0xB1, 0x64], Codec::Big5),   // 華康
    (b"HanDing", Codec::Ascii),
];

/// Legacy bytes behind a UTF-16BE tag, recognized by the vendor name.
fn vendor_prefix(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if attempt.declared != Codec::Utf16Be {
        return None;
    }
    VENDOR_PREFIXES
        .iter()
        .filter(|(prefix, _)| attempt.raw.starts_with(prefix))
        .find_map(|&(_, codec)| attempt.try_codec(codec))
        .map(|result| DecodeResult::damaged(result.text))
}

/// Leading "森泽" in GB2312, tagged as Mac Japanese.
const CROSS_LABEL_PREFIX: &[u8] = &[0xC9, 0xAD, 0xD4, 0xF3];

fn mac_cjk_cross_label(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if attempt.declared != Codec::MacJapanese || !attempt.raw.starts_with(CROSS_LABEL_PREFIX) {
        return None;
    }
    attempt.try_codec(Codec::MacChineseSimp)
}

/// UTF-16BE whose characters all exist in the declared code page.
fn reverse_utf16(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if attempt.declared.is_unicode() || attempt.raw.len() % 2 != 0 {
        return None;
    }
    let text = Codec::Utf16Be.decode(attempt.raw, ErrorMode::Strict).ok()?;
    attempt.declared.encode(&text)?;
    Some(DecodeResult::mislabeled(text, Codec::Utf16Be))
}

/// The font parser's own decode. `read-fonts` never fails: it drops a
/// trailing odd byte and pairs a high surrogate with whatever unit follows,
/// so its text is trusted only when a strict decode agrees with it.
fn font_parser(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    let parsed = attempt.parsed?;
    match attempt.declared.decode(attempt.raw, ErrorMode::Strict) {
        Ok(text) if text == parsed => Some(attempt.confirmed(text, attempt.declared)),
        _ => Some(DecodeResult::damaged(parsed.to_owned())),
    }
}

/// GBK-only characters under a Mac Simplified Chinese tag.
fn extended_code_page(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    if attempt.declared != Codec::MacChineseSimp {
        return None;
    }
    let text = Codec::Gbk.decode(attempt.raw, ErrorMode::Strict).ok()?;
    Some(DecodeResult::damaged(text))
}

fn truncation(attempt: &Attempt<'_>) -> Option<DecodeResult> {
    attempt.try_codec(attempt.declared)
}

fn last_resort(attempt: &Attempt<'_>) -> DecodeResult {
    DecodeResult::damaged(Codec::Utf16Be.decode_lossy(attempt.raw))
}
