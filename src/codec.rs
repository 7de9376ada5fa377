//! Text codecs used by OpenType name records.
//!
//! Every codec can decode in three modes (strict, ignore, replace) and
//! strict decoding reports the offset of the first byte it could not
//! decode; the repair cascade relies on that offset to tell a truncated
//! tail from real corruption. Legacy code pages are decoded through
//! `encoding_rs`, one character at a time, with a byte-structure table per
//! code page. The tables narrow `encoding_rs`' WHATWG supersets back to the
//! strict charset: GB2312 inside GBK, JIS X 0208 inside Windows-31J, Big5
//! without ETEN or HKSCS, EUC-KR inside Windows-949. A double-byte code is
//! accepted only if it lies inside the table, decodes to a single
//! character outside the Private Use Area, and encodes back to itself
//! whenever that character has a code inside the charset.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::error::FontnameError;
use crate::johab;

/// A text codec a name record can be declared (or discovered) to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// UTF-16, big endian. The universal fallback.
    Utf16Be,
    /// UTF-32, big endian.
    Utf32Be,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1.
    Latin1,
    /// Mac OS Roman.
    MacRoman,
    /// Mac OS Greek.
    MacGreek,
    /// Mac OS Cyrillic.
    MacCyrillic,
    /// Mac OS Japanese: Shift-JIS plus Apple single-byte additions.
    MacJapanese,
    /// Mac OS Traditional Chinese: Big5 plus Apple single-byte additions.
    MacChineseTrad,
    /// Mac OS Simplified Chinese: GB2312 plus Apple single-byte additions.
    MacChineseSimp,
    /// Mac OS Korean: EUC-KR plus Apple single-byte additions.
    MacKorean,
    /// Shift-JIS (Windows code page 932 repertoire).
    ShiftJis,
    /// Big5, without the HKSCS extension.
    Big5,
    /// EUC-KR (KS X 1001 only).
    EucKr,
    /// Windows code page 949 (Unified Hangul Code).
    Windows949,
    /// GB2312 in its EUC-CN form.
    Gb2312,
    /// GBK, the Windows code page 936 superset of GB2312.
    Gbk,
    /// Johab (KS C 5601-1992 annex 3).
    Johab,
    /// ISO-8859-5 (Cyrillic).
    Iso8859_5,
    /// ISO-8859-6 (Arabic).
    Iso8859_6,
    /// ISO-8859-8 (Hebrew).
    Iso8859_8,
    /// Windows code page 874 (Thai).
    Windows874,
    /// Windows code page 1258 (Vietnamese).
    Windows1258,
}

/// How a decode treats bytes it cannot map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Stop at the first undecodable byte.
    Strict,
    /// Drop undecodable bytes.
    Ignore,
    /// Substitute U+FFFD for each undecodable sequence.
    Replace,
}

/// A strict decode stopped at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Malformed {
    pub offset: usize,
}

impl Codec {
    /// Every supported codec.
    pub const ALL: [Codec; 23] = [
        Codec::Utf16Be,
        Codec::Utf32Be,
        Codec::Ascii,
        Codec::Latin1,
        Codec::MacRoman,
        Codec::MacGreek,
        Codec::MacCyrillic,
        Codec::MacJapanese,
        Codec::MacChineseTrad,
        Codec::MacChineseSimp,
        Codec::MacKorean,
        Codec::ShiftJis,
        Codec::Big5,
        Codec::EucKr,
        Codec::Windows949,
        Codec::Gb2312,
        Codec::Gbk,
        Codec::Johab,
        Codec::Iso8859_5,
        Codec::Iso8859_6,
        Codec::Iso8859_8,
        Codec::Windows874,
        Codec::Windows1258,
    ];

    /// Stable identifier of this codec.
    pub const fn name(self) -> &'static str {
        match self {
            Codec::Utf16Be => "utf_16_be",
            Codec::Utf32Be => "utf_32_be",
            Codec::Ascii => "ascii",
            Codec::Latin1 => "latin_1",
            Codec::MacRoman => "mac_roman",
            Codec::MacGreek => "mac_greek",
            Codec::MacCyrillic => "mac_cyrillic",
            Codec::MacJapanese => "x_mac_japanese",
            Codec::MacChineseTrad => "x_mac_trad_chinese",
            Codec::MacChineseSimp => "x_mac_simp_chinese",
            Codec::MacKorean => "x_mac_korean",
            Codec::ShiftJis => "shift_jis",
            Codec::Big5 => "big5",
            Codec::EucKr => "euc_kr",
            Codec::Windows949 => "cp949",
            Codec::Gb2312 => "gb2312",
            Codec::Gbk => "gbk",
            Codec::Johab => "johab",
            Codec::Iso8859_5 => "iso8859_5",
            Codec::Iso8859_6 => "iso8859_6",
            Codec::Iso8859_8 => "iso8859_8",
            Codec::Windows874 => "cp874",
            Codec::Windows1258 => "cp1258",
        }
    }

    /// UTF-16BE or UTF-32BE, where NUL bytes are part of ordinary text.
    pub const fn is_unicode(self) -> bool {
        matches!(self, Codec::Utf16Be | Codec::Utf32Be)
    }

    /// Decode `raw` under this codec.
    ///
    /// `Ignore` and `Replace` never return an error.
    pub fn decode(self, raw: &[u8], mode: ErrorMode) -> Result<String, Malformed> {
        match self.backend() {
            Backend::Utf16Be => drive(raw, mode, utf16_be_step),
            Backend::Utf32Be => drive(raw, mode, utf32_be_step),
            Backend::Ascii => drive(raw, mode, ascii_step),
            Backend::Latin1 => drive(raw, mode, latin1_step),
            Backend::MacGreek => drive(raw, mode, mac_greek_step),
            Backend::Johab => drive(raw, mode, johab::decode_step),
            Backend::Table(layout) => drive(raw, mode, |bytes, out| layout.decode_step(bytes, out)),
        }
    }

    /// Lossy decode that never fails; undecodable bytes are dropped.
    pub fn decode_lossy(self, raw: &[u8]) -> String {
        // Ignore mode has no error path
        self.decode(raw, ErrorMode::Ignore).unwrap_or_default()
    }

    /// Strict encode. `None` if any character has no mapping.
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self.backend() {
            Backend::Utf16Be => Some(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Backend::Utf32Be => Some(
                text.chars()
                    .flat_map(|c| u32::from(c).to_be_bytes())
                    .collect(),
            ),
            Backend::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
            Backend::Latin1 => text.chars().map(|c| u8::try_from(c).ok()).collect(),
            Backend::MacGreek => text.chars().map(mac_greek_encode).collect(),
            Backend::Johab => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for c in text.chars() {
                    johab::encode_char(c, &mut out)?;
                }
                Some(out)
            }
            Backend::Table(layout) => {
                let mut out = Vec::with_capacity(text.len());
                for c in text.chars() {
                    layout.encode_char(c, &mut out)?;
                }
                Some(out)
            }
        }
    }

    fn backend(self) -> Backend {
        match self {
            Codec::Utf16Be => Backend::Utf16Be,
            Codec::Utf32Be => Backend::Utf32Be,
            Codec::Ascii => Backend::Ascii,
            Codec::Latin1 => Backend::Latin1,
            Codec::MacGreek => Backend::MacGreek,
            Codec::Johab => Backend::Johab,
            Codec::MacRoman => Backend::Table(&MAC_ROMAN),
            Codec::MacCyrillic => Backend::Table(&MAC_CYRILLIC),
            Codec::Iso8859_5 => Backend::Table(&ISO_8859_5),
            Codec::Iso8859_6 => Backend::Table(&ISO_8859_6),
            Codec::Iso8859_8 => Backend::Table(&ISO_8859_8),
            Codec::Windows874 => Backend::Table(&WINDOWS_874),
            Codec::Windows1258 => Backend::Table(&WINDOWS_1258),
            Codec::ShiftJis => Backend::Table(&SHIFT_JIS),
            Codec::MacJapanese => Backend::Table(&MAC_JAPANESE),
            Codec::Big5 => Backend::Table(&BIG5),
            Codec::MacChineseTrad => Backend::Table(&MAC_CHINESE_TRAD),
            Codec::Gb2312 => Backend::Table(&GB2312),
            Codec::MacChineseSimp => Backend::Table(&MAC_CHINESE_SIMP),
            Codec::Gbk => Backend::Table(&GBK),
            Codec::EucKr => Backend::Table(&EUC_KR),
            Codec::MacKorean => Backend::Table(&MAC_KOREAN),
            Codec::Windows949 => Backend::Table(&WINDOWS_949),
        }
    }
}

/// Where the bytes of a codec are decoded.
enum Backend {
    Utf16Be,
    Utf32Be,
    Ascii,
    Latin1,
    MacGreek,
    Johab,
    /// `encoding_rs`, restricted by a byte-structure table.
    Table(&'static Layout),
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = FontnameError;

    /// Parse a codec identifier. Case-insensitive; `-`, `_` and spaces are
    /// interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        let codec = match key.as_str() {
            "utf_16_be" | "utf_16be" | "utf16be" | "utf_16" | "utf16" => Codec::Utf16Be,
            "utf_32_be" | "utf_32be" | "utf32be" => Codec::Utf32Be,
            "ascii" | "us_ascii" => Codec::Ascii,
            "latin_1" | "latin1" | "iso8859_1" | "iso_8859_1" => Codec::Latin1,
            "mac_roman" | "macintosh" | "x_mac_roman" => Codec::MacRoman,
            "mac_greek" | "x_mac_greek" => Codec::MacGreek,
            "mac_cyrillic" | "x_mac_cyrillic" => Codec::MacCyrillic,
            "x_mac_japanese" | "x_mac_japanese_ttx" | "mac_japanese" => Codec::MacJapanese,
            "x_mac_trad_chinese" | "x_mac_trad_chinese_ttx" | "mac_trad_chinese" => {
                Codec::MacChineseTrad
            }
            "x_mac_simp_chinese" | "x_mac_simp_chinese_ttx" | "mac_simp_chinese" => {
                Codec::MacChineseSimp
            }
            "x_mac_korean" | "x_mac_korean_ttx" | "mac_korean" => Codec::MacKorean,
            "shift_jis" | "shiftjis" | "sjis" | "cp932" => Codec::ShiftJis,
            "big5" | "cp950" => Codec::Big5,
            "euc_kr" | "euckr" => Codec::EucKr,
            "cp949" | "windows_949" | "uhc" => Codec::Windows949,
            "gb2312" | "euc_cn" | "euccn" => Codec::Gb2312,
            "gbk" | "cp936" => Codec::Gbk,
            "johab" | "cp1361" => Codec::Johab,
            "iso8859_5" | "iso_8859_5" => Codec::Iso8859_5,
            "iso8859_6" | "iso_8859_6" => Codec::Iso8859_6,
            "iso8859_8" | "iso_8859_8" => Codec::Iso8859_8,
            "cp874" | "windows_874" => Codec::Windows874,
            "cp1258" | "windows_1258" => Codec::Windows1258,
            _ => return Err(FontnameError::UnknownCodec(s.to_string())),
        };
        Ok(codec)
    }
}

/// Run a decode step over `raw` until it is consumed.
///
/// A step pushes the text for the bytes at the front of its input and
/// returns how many bytes it consumed, or returns the length of the
/// undecodable sequence without pushing anything.
fn drive<F>(raw: &[u8], mode: ErrorMode, mut step: F) -> Result<String, Malformed>
where
    F: FnMut(&[u8], &mut String) -> Result<usize, usize>,
{
    let mut out = String::with_capacity(raw.len());
    let mut pos = 0;
    while pos < raw.len() {
        match step(&raw[pos..], &mut out) {
            Ok(used) => pos += used,
            Err(bad) => {
                match mode {
                    ErrorMode::Strict => return Err(Malformed { offset: pos }),
                    ErrorMode::Ignore => {}
                    ErrorMode::Replace => out.push(char::REPLACEMENT_CHARACTER),
                }
                pos += bad.max(1);
            }
        }
    }
    Ok(out)
}

/// One UTF-16BE character. An unpaired surrogate is a two-byte error and
/// a dangling odd byte is a one-byte error.
fn utf16_be_step(bytes: &[u8], out: &mut String) -> Result<usize, usize> {
    if bytes.len() < 2 {
        return Err(bytes.len());
    }
    let units = bytes
        .chunks_exact(2)
        .take(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    match char::decode_utf16(units).next() {
        Some(Ok(c)) => {
            out.push(c);
            Ok(c.len_utf16() * 2)
        }
        _ => Err(2),
    }
}

fn utf32_be_step(bytes: &[u8], out: &mut String) -> Result<usize, usize> {
    let Some(quad) = bytes.get(..4) else {
        return Err(bytes.len());
    };
    let scalar = u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]);
    let c = char::from_u32(scalar).ok_or(4_usize)?;
    out.push(c);
    Ok(4)
}

fn ascii_step(bytes: &[u8], out: &mut String) -> Result<usize, usize> {
    match bytes[0] {
        b @ 0x00..=0x7F => {
            out.push(char::from(b));
            Ok(1)
        }
        _ => Err(1),
    }
}

fn latin1_step(bytes: &[u8], out: &mut String) -> Result<usize, usize> {
    out.push(char::from(bytes[0]));
    Ok(1)
}

fn mac_greek_step(bytes: &[u8], out: &mut String) -> Result<usize, usize> {
    out.push(mac_greek_decode(bytes[0]));
    Ok(1)
}

fn mac_greek_decode(byte: u8) -> char {
    if byte < 0x80 {
        return char::from(byte);
    }
    char::from_u32(u32::from(MAC_GREEK_DECODE[usize::from(byte - 0x80)]))
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn mac_greek_encode(c: char) -> Option<u8> {
    if c.is_ascii() {
        return u8::try_from(c).ok();
    }
    let code = u16::try_from(u32::from(c)).ok()?;
    MAC_GREEK_DECODE
        .iter()
        .position(|&v| v == code)
        .and_then(|idx| u8::try_from(idx + 0x80).ok())
}

/// Byte structure of an `encoding_rs`-backed code page.
struct Layout {
    encoding: &'static Encoding,
    /// Bytes that decode on their own.
    single: &'static [RangeInclusive<u8>],
    /// Lead bytes of double-byte characters.
    lead: &'static [RangeInclusive<u8>],
    /// Trail bytes of double-byte characters.
    trail: &'static [RangeInclusive<u8>],
    /// Double-byte codes outside the charset despite a valid lead and trail.
    excluded: &'static [RangeInclusive<u16>],
    /// Apple single-byte additions, consulted only when the base code page
    /// rejects the byte.
    extras: &'static [(u8, char)],
}

fn in_ranges(ranges: &[RangeInclusive<u8>], byte: u8) -> bool {
    ranges.iter().any(|r| r.contains(&byte))
}

impl Layout {
    fn decode_step(&self, bytes: &[u8], out: &mut String) -> Result<usize, usize> {
        let first = bytes[0];
        if in_ranges(self.single, first) {
            if first < 0x80 {
                out.push(char::from(first));
                return Ok(1);
            }
            if let Some(text) = self
                .encoding
                .decode_without_bom_handling_and_without_replacement(&bytes[..1])
            {
                out.push_str(&text);
                return Ok(1);
            }
        }
        if let Some(c) = bytes.get(..2).and_then(|pair| self.decode_pair(pair)) {
            out.push(c);
            return Ok(2);
        }
        if let Some(&(_, c)) = self.extras.iter().find(|(b, _)| *b == first) {
            out.push(c);
            return Ok(1);
        }
        Err(1)
    }

    /// The character at a double-byte code, if the charset has one there.
    fn decode_pair(&self, pair: &[u8]) -> Option<char> {
        if !self.accepts(pair) {
            return None;
        }
        let text = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(pair)?;
        let mut chars = text.chars();
        let c = chars.next()?;
        if chars.next().is_some() || is_private_use(c) {
            return None;
        }
        // a character listed twice encodes to its other code only when that
        // code lies outside this charset
        let mut buf = [0u8; 4];
        let (bytes, _, unmappable) = self.encoding.encode(c.encode_utf8(&mut buf));
        (!unmappable && (bytes[..] == *pair || !self.accepts(&bytes))).then_some(c)
    }

    fn encode_char(&self, c: char, out: &mut Vec<u8>) -> Option<()> {
        let mut buf = [0u8; 4];
        let (bytes, _, unmappable) = self.encoding.encode(c.encode_utf8(&mut buf));
        let valid = match bytes.len() {
            2 => self.decode_pair(&bytes) == Some(c),
            _ => self.accepts(&bytes),
        };
        if !unmappable && valid {
            out.extend_from_slice(&bytes);
            return Some(());
        }
        let &(byte, _) = self.extras.iter().find(|(_, mapped)| *mapped == c)?;
        out.push(byte);
        Some(())
    }

    /// Whether `bytes` is one well-formed character of this layout.
    fn accepts(&self, bytes: &[u8]) -> bool {
        match *bytes {
            [b] => in_ranges(self.single, b),
            [lead, trail] => {
                let code = u16::from_be_bytes([lead, trail]);
                in_ranges(self.lead, lead)
                    && in_ranges(self.trail, trail)
                    && !self.excluded.iter().any(|r| r.contains(&code))
            }
            _ => false,
        }
    }
}

fn is_private_use(c: char) -> bool {
    matches!(c, '\u{E000}'..='\u{F8FF}')
}

const ASCII_RANGE: &[RangeInclusive<u8>] = &[0x00..=0x7F];
const ANY_BYTE: &[RangeInclusive<u8>] = &[0x00..=0xFF];

const fn single_byte(encoding: &'static Encoding) -> Layout {
    Layout {
        encoding,
        single: ANY_BYTE,
        lead: &[],
        trail: &[],
        excluded: &[],
        extras: &[],
    }
}

static MAC_ROMAN: Layout = single_byte(&encoding_rs::MACINTOSH_INIT);
static MAC_CYRILLIC: Layout = single_byte(&encoding_rs::X_MAC_CYRILLIC_INIT);
static ISO_8859_5: Layout = single_byte(&encoding_rs::ISO_8859_5_INIT);
static ISO_8859_6: Layout = single_byte(&encoding_rs::ISO_8859_6_INIT);
static ISO_8859_8: Layout = single_byte(&encoding_rs::ISO_8859_8_INIT);
static WINDOWS_874: Layout = single_byte(&encoding_rs::WINDOWS_874_INIT);
static WINDOWS_1258: Layout = single_byte(&encoding_rs::WINDOWS_1258_INIT);

const SJIS_SINGLE: &[RangeInclusive<u8>] = &[0x00..=0x7F, 0xA1..=0xDF];
// JIS X 0208 rows 1-8 and 16-84; row 13 and everything past EA are
// vendor or user-defined
const SJIS_LEAD: &[RangeInclusive<u8>] = &[0x81..=0x84, 0x88..=0x9F, 0xE0..=0xEA];
const SJIS_TRAIL: &[RangeInclusive<u8>] = &[0x40..=0x7E, 0x80..=0xFC];

static SHIFT_JIS: Layout = Layout {
    encoding: &encoding_rs::SHIFT_JIS_INIT,
    single: SJIS_SINGLE,
    lead: SJIS_LEAD,
    trail: SJIS_TRAIL,
    excluded: &[],
    extras: &[],
};

static MAC_JAPANESE: Layout = Layout {
    encoding: &encoding_rs::SHIFT_JIS_INIT,
    single: SJIS_SINGLE,
    lead: SJIS_LEAD,
    trail: SJIS_TRAIL,
    excluded: &[],
    extras: &[
        (0x80, '\\'),
        (0xA0, '\u{A0}'),
        (0xFC, '|'),
        (0xFD, '\u{A9}'),
        (0xFE, '\u{2122}'),
        (0xFF, '\u{2026}'),
    ],
};

const BIG5_LEAD: &[RangeInclusive<u8>] = &[0xA1..=0xF9];
const BIG5_TRAIL: &[RangeInclusive<u8>] = &[0x40..=0x7E, 0xA1..=0xFE];
// euro sign and ETEN symbols, ETEN kana and Cyrillic, ETEN tail of F9
const BIG5_EXCLUDED: &[RangeInclusive<u16>] =
    &[0xA3C0..=0xA3FE, 0xC6A1..=0xC8FE, 0xF9D6..=0xF9FE];

static BIG5: Layout = Layout {
    encoding: &encoding_rs::BIG5_INIT,
    single: ASCII_RANGE,
    lead: BIG5_LEAD,
    trail: BIG5_TRAIL,
    excluded: BIG5_EXCLUDED,
    extras: &[],
};

static MAC_CHINESE_TRAD: Layout = Layout {
    encoding: &encoding_rs::BIG5_INIT,
    single: ASCII_RANGE,
    lead: BIG5_LEAD,
    trail: BIG5_TRAIL,
    excluded: BIG5_EXCLUDED,
    extras: &[
        (0x80, '\\'),
        (0xA0, '\u{A0}'),
        (0xFD, '\u{A9}'),
        (0xFE, '\u{2122}'),
        (0xFF, '\u{2026}'),
    ],
};

const GB2312_LEAD: &[RangeInclusive<u8>] = &[0xA1..=0xA9, 0xB0..=0xF7];
// unassigned cells of the symbol rows, which GBK and GB18030 fill
#[rustfmt::skip]
const GB2312_EXCLUDED: &[RangeInclusive<u16>] = &[
    0xA2A1..=0xA2B0, 0xA2E3..=0xA2E4, 0xA2EF..=0xA2F0, 0xA2FD..=0xA2FE,
    0xA4F4..=0xA4FE,
    0xA5F7..=0xA5FE,
    0xA6B9..=0xA6C0, 0xA6D9..=0xA6FE,
    0xA7C2..=0xA7D0, 0xA7F2..=0xA7FE,
    0xA8BB..=0xA8C4, 0xA8EA..=0xA8FE,
    0xA9A1..=0xA9A3, 0xA9F0..=0xA9FE,
    0xD7FA..=0xD7FE,
];
const EUC_TRAIL: &[RangeInclusive<u8>] = &[0xA1..=0xFE];

static GB2312: Layout = Layout {
    encoding: &encoding_rs::GBK_INIT,
    single: ASCII_RANGE,
    lead: GB2312_LEAD,
    trail: EUC_TRAIL,
    excluded: GB2312_EXCLUDED,
    extras: &[],
};

static MAC_CHINESE_SIMP: Layout = Layout {
    encoding: &encoding_rs::GBK_INIT,
    single: ASCII_RANGE,
    lead: GB2312_LEAD,
    trail: EUC_TRAIL,
    excluded: GB2312_EXCLUDED,
    extras: &[
        (0x80, '\u{FC}'),
        (0xA0, '\u{A0}'),
        (0xFD, '\u{A9}'),
        (0xFE, '\u{2122}'),
        (0xFF, '\u{2026}'),
    ],
};

static GBK: Layout = Layout {
    encoding: &encoding_rs::GBK_INIT,
    single: ASCII_RANGE,
    lead: &[0x81..=0xFE],
    trail: &[0x40..=0x7E, 0x80..=0xFE],
    excluded: &[],
    extras: &[],
};

static EUC_KR: Layout = Layout {
    encoding: &encoding_rs::EUC_KR_INIT,
    single: ASCII_RANGE,
    lead: &[0xA1..=0xFE],
    trail: EUC_TRAIL,
    excluded: &[],
    extras: &[],
};

static MAC_KOREAN: Layout = Layout {
    encoding: &encoding_rs::EUC_KR_INIT,
    single: ASCII_RANGE,
    lead: &[0xA1..=0xFE],
    trail: EUC_TRAIL,
    excluded: &[],
    extras: &[
        (0x80, '\u{A0}'),
        (0x81, '\u{20A9}'),
        (0x82, '\u{2014}'),
        (0x83, '\u{A9}'),
        (0xFE, '\u{2122}'),
        (0xFF, '\u{2026}'),
    ],
};

static WINDOWS_949: Layout = Layout {
    encoding: &encoding_rs::EUC_KR_INIT,
    single: ASCII_RANGE,
    lead: &[0x81..=0xFE],
    trail: &[0x41..=0x5A, 0x61..=0x7A, 0x81..=0xFE],
    excluded: &[],
    extras: &[],
};

/// Mac OS Greek, bytes 0x80..=0xFF.
#[rustfmt::skip]
static MAC_GREEK_DECODE: [u16; 128] = [
    0x00C4, 0x00B9, 0x00B2, 0x00C9, 0x00B3, 0x00D6, 0x00DC, 0x0385,
    0x00E0, 0x00E2, 0x00E4, 0x0384, 0x00A8, 0x00E7, 0x00E9, 0x00E8,
    0x00EA, 0x00EB, 0x00A3, 0x2122, 0x00EE, 0x00EF, 0x2022, 0x00BD,
    0x2030, 0x00F4, 0x00F6, 0x00A6, 0x20AC, 0x00F9, 0x00FB, 0x00FC,
    0x2020, 0x0393, 0x0394, 0x0398, 0x039B, 0x039E, 0x03A0, 0x00DF,
    0x00AE, 0x00A9, 0x03A3, 0x03AA, 0x00A7, 0x2260, 0x00B0, 0x00B7,
    0x0391, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x0392, 0x0395, 0x0396,
    0x0397, 0x0399, 0x039A, 0x039C, 0x03A6, 0x03AB, 0x03A8, 0x03A9,
    0x03AC, 0x039D, 0x00AC, 0x039F, 0x03A1, 0x2248, 0x03A4, 0x00AB,
    0x00BB, 0x2026, 0x00A0, 0x03A5, 0x03A7, 0x0386, 0x0388, 0x0153,
    0x2013, 0x2015, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x0389,
    0x038A, 0x038C, 0x038E, 0x03AD, 0x03AE, 0x03AF, 0x03CC, 0x038F,
    0x03CD, 0x03B1, 0x03B2, 0x03C8, 0x03B4, 0x03B5, 0x03C6, 0x03B3,
    0x03B7, 0x03B9, 0x03BE, 0x03BA, 0x03BB, 0x03BC, 0x03BD, 0x03BF,
    0x03C0, 0x03CE, 0x03C1, 0x03C3, 0x03C4, 0x03B8, 0x03C9, 0x03C2,
    0x03C7, 0x03C5, 0x03B6, 0x03CA, 0x03CB, 0x0390, 0x03B0, 0x00AD,
];

#[cfg(test)]
mod tests {
    use super::*;

    // ── names ────────────────────────────────────────────────────

    #[test]
    fn names_round_trip_through_from_str() {
        for codec in Codec::ALL {
            assert_eq!(codec.name().parse::<Codec>().unwrap(), codec);
        }
    }

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!("UTF-16BE".parse::<Codec>().unwrap(), Codec::Utf16Be);
        assert_eq!("EUC-CN".parse::<Codec>().unwrap(), Codec::Gb2312);
        assert_eq!("x_mac_japanese_ttx".parse::<Codec>().unwrap(), Codec::MacJapanese);
        assert_eq!("macintosh".parse::<Codec>().unwrap(), Codec::MacRoman);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "klingon".parse::<Codec>().unwrap_err();
        assert!(matches!(err, FontnameError::UnknownCodec(ref s) if s == "klingon"));
    }

    // ── utf-16 / utf-32 ──────────────────────────────────────────

    #[test]
    fn utf16_surrogate_pair() {
        let raw = [0xD8, 0x3D, 0xDE, 0x00];
        assert_eq!(Codec::Utf16Be.decode(&raw, ErrorMode::Strict).unwrap(), "\u{1F600}");
    }

    #[test]
    fn utf16_odd_length_fails_at_last_byte() {
        let raw = [0x00, 0x41, 0x00];
        assert_eq!(
            Codec::Utf16Be.decode(&raw, ErrorMode::Strict),
            Err(Malformed { offset: 2 })
        );
        assert_eq!(Codec::Utf16Be.decode_lossy(&raw), "A");
    }

    #[test]
    fn utf16_lone_surrogate_modes() {
        let raw = [0x00, 0x41, 0xDC, 0x00, 0x00, 0x42];
        assert_eq!(
            Codec::Utf16Be.decode(&raw, ErrorMode::Strict),
            Err(Malformed { offset: 2 })
        );
        assert_eq!(Codec::Utf16Be.decode(&raw, ErrorMode::Ignore).unwrap(), "AB");
        assert_eq!(Codec::Utf16Be.decode(&raw, ErrorMode::Replace).unwrap(), "A\u{FFFD}B");
    }

    #[test]
    fn utf32_decodes() {
        let raw = [0x00, 0x01, 0xF6, 0x00, 0x00, 0x00, 0x00, 0x41];
        assert_eq!(Codec::Utf32Be.decode(&raw, ErrorMode::Strict).unwrap(), "\u{1F600}A");
    }

    // ── single byte ──────────────────────────────────────────────

    #[test]
    fn ascii_rejects_high_bytes() {
        assert_eq!(
            Codec::Ascii.decode(b"ab\xE9", ErrorMode::Strict),
            Err(Malformed { offset: 2 })
        );
    }

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        assert_eq!(Codec::Latin1.decode(b"caf\xE9", ErrorMode::Strict).unwrap(), "café");
        assert_eq!(Codec::Latin1.encode("café").unwrap(), b"caf\xE9");
        assert_eq!(Codec::Latin1.encode("漢"), None);
    }

    #[test]
    fn mac_roman_high_half() {
        // 0x8E = é, 0xA5 = •
        assert_eq!(Codec::MacRoman.decode(b"\x8E\xA5", ErrorMode::Strict).unwrap(), "é•");
        assert_eq!(Codec::MacRoman.encode("é•").unwrap(), b"\x8E\xA5");
    }

    #[test]
    fn mac_greek_alpha_omega() {
        assert_eq!(Codec::MacGreek.decode(b"\xE1\xF6", ErrorMode::Strict).unwrap(), "αω");
        assert_eq!(Codec::MacGreek.encode("αω").unwrap(), b"\xE1\xF6");
    }

    #[test]
    fn iso8859_6_unmapped_byte_is_malformed() {
        // 0xA1 is unassigned in ISO-8859-6
        assert_eq!(
            Codec::Iso8859_6.decode(b"a\xA1", ErrorMode::Strict),
            Err(Malformed { offset: 1 })
        );
    }

    // ── double byte ──────────────────────────────────────────────

    #[test]
    fn shift_jis_kanji_and_katakana() {
        // 風 = 0x954F, ｱ = 0xB1
        let raw = [0x95, 0x4F, 0xB1];
        assert_eq!(Codec::ShiftJis.decode(&raw, ErrorMode::Strict).unwrap(), "風ｱ");
        assert_eq!(Codec::ShiftJis.encode("風ｱ").unwrap(), raw);
    }

    #[test]
    fn shift_jis_truncated_lead_reports_tail_offset() {
        let raw = [0x41, 0x95];
        assert_eq!(
            Codec::ShiftJis.decode(&raw, ErrorMode::Strict),
            Err(Malformed { offset: 1 })
        );
        assert_eq!(Codec::ShiftJis.decode_lossy(&raw), "A");
    }

    #[test]
    fn gb2312_rejects_gbk_only_bytes() {
        // 0x8140 is a GBK extension character (丂), outside GB2312
        let raw = [0x81, 0x40];
        assert!(Codec::Gb2312.decode(&raw, ErrorMode::Strict).is_err());
        assert_eq!(Codec::Gbk.decode(&raw, ErrorMode::Strict).unwrap(), "丂");
        assert_eq!(Codec::Gb2312.encode("丂"), None);
    }

    #[test]
    fn gb2312_round_trip() {
        // 华康 = BB AA BF B5
        let raw = [0xBB, 0xAA, 0xBF, 0xB5];
        assert_eq!(Codec::Gb2312.decode(&raw, ErrorMode::Strict).unwrap(), "华康");
        assert_eq!(Codec::Gb2312.encode("华康").unwrap(), raw);
    }

    #[test]
    fn big5_round_trip() {
        // 華康 = B5 D8 B1 64
        let raw = [0xB5, 0xD8, 0xB1, 0x64];
        assert_eq!(Codec::Big5.decode(&raw, ErrorMode::Strict).unwrap(), "華康");
        assert_eq!(Codec::Big5.encode("華康").unwrap(), raw);
    }

    #[test]
    fn euc_kr_rejects_uhc_extension() {
        // 0x8141 is a Windows-949 extension syllable (갂)
        let raw = [0x81, 0x41];
        assert!(Codec::EucKr.decode(&raw, ErrorMode::Strict).is_err());
        assert_eq!(Codec::Windows949.decode(&raw, ErrorMode::Strict).unwrap(), "갂");
    }

    #[test]
    fn mac_japanese_apple_additions() {
        let raw = [0x41, 0xFD, 0xFE];
        assert_eq!(Codec::MacJapanese.decode(&raw, ErrorMode::Strict).unwrap(), "A©™");
        assert_eq!(Codec::MacJapanese.encode("A©™").unwrap(), raw);
        assert!(Codec::ShiftJis.decode(&raw, ErrorMode::Strict).is_err());
    }

    #[test]
    fn mac_japanese_lone_fc_is_vertical_bar() {
        let raw = [0xFC, 0x41];
        assert_eq!(Codec::MacJapanese.decode(&raw, ErrorMode::Strict).unwrap(), "|A");
        assert!(Codec::ShiftJis.decode(&raw, ErrorMode::Strict).is_err());
    }

    // ── strict repertoires ───────────────────────────────────────

    #[test]
    fn gb2312_rejects_gbk_cells_in_euc_range() {
        // AA A1 is user-defined (GBK maps it to U+E000); A2 A1 ⅰ, A6 E0 ︵ and
        // A8 BB ɑ are GBK additions to the symbol rows
        for raw in [[0xAA, 0xA1], [0xA2, 0xA1], [0xA6, 0xE0], [0xA8, 0xBB], [0xD7, 0xFA]] {
            assert!(Codec::Gb2312.decode(&raw, ErrorMode::Strict).is_err(), "{raw:02X?}");
            assert!(Codec::MacChineseSimp.decode(&raw, ErrorMode::Strict).is_err(), "{raw:02X?}");
        }
        assert_eq!(Codec::Gbk.decode(&[0xA2, 0xA1], ErrorMode::Strict).unwrap(), "ⅰ");
        assert_eq!(Codec::Gb2312.encode("ⅰ"), None);
        assert!(Codec::Gbk.decode(&[0xAA, 0xA1], ErrorMode::Strict).is_err());
    }

    #[test]
    fn shift_jis_rejects_vendor_rows() {
        // NEC row 13 (① ≒), NEC-selected IBM, user-defined, IBM extensions
        for raw in [[0x87, 0x40], [0x87, 0x90], [0xED, 0x40], [0xF0, 0x40], [0xFA, 0x40]] {
            assert!(Codec::ShiftJis.decode(&raw, ErrorMode::Strict).is_err(), "{raw:02X?}");
        }
        assert_eq!(Codec::ShiftJis.encode("①"), None);
        // ≒ is still reachable through its JIS X 0208 code
        assert_eq!(Codec::ShiftJis.decode(&[0x81, 0xE0], ErrorMode::Strict).unwrap(), "≒");
        assert_eq!(Codec::ShiftJis.encode("≒").unwrap(), [0x81, 0xE0]);
    }

    #[test]
    fn big5_rejects_eten_and_hkscs_cells() {
        for raw in [[0xA3, 0xE1], [0xC6, 0xA1], [0xC8, 0x40], [0xF9, 0xD6]] {
            assert!(Codec::Big5.decode(&raw, ErrorMode::Strict).is_err(), "{raw:02X?}");
            assert!(Codec::MacChineseTrad.decode(&raw, ErrorMode::Strict).is_err(), "{raw:02X?}");
        }
        assert_eq!(Codec::Big5.encode("€"), None);
    }

    #[test]
    fn utf16_high_surrogate_needs_low_partner() {
        let raw = [0xD8, 0x00, 0x00, 0x41];
        assert_eq!(
            Codec::Utf16Be.decode(&raw, ErrorMode::Strict),
            Err(Malformed { offset: 0 })
        );
        assert_eq!(Codec::Utf16Be.decode(&raw, ErrorMode::Replace).unwrap(), "\u{FFFD}A");
    }

    #[test]
    fn replace_mode_substitutes_each_bad_byte() {
        let raw = [0x41, 0xFF, 0x42];
        assert_eq!(Codec::Gb2312.decode(&raw, ErrorMode::Replace).unwrap(), "A\u{FFFD}B");
    }
}
