//! Recover display names from OpenType `name` tables.
//!
//! Name records declare their text encoding through platform and encoding
//! IDs, and for CJK fonts in particular that declaration is often wrong:
//! UTF-16 tagged as Shift-JIS, GB2312 tagged as UTF-16, zero bytes padded
//! into ASCII, strings cut off mid-character. This crate decodes each record
//! through a cascade of repair rules, grades how far the result can be
//! trusted, and picks the full name in the most preferred language.
//!
//! ```no_run
//! let options = fontname::Options::default();
//! let name = fontname::display_name("simsun.ttc", &options)?;
//! println!("{name}");
//! # Ok::<(), fontname::FontnameError>(())
//! ```
//!
//! The engine can also be driven one string at a time:
//!
//! ```
//! use fontname::{decode, Codec, IssueLevel};
//!
//! let result = decode(&[0x98, 0xA8], Some(Codec::ShiftJis));
//! assert_eq!(result.text, "風");
//! assert_eq!(result.issue, IssueLevel::Mark);
//! ```

mod codec;
mod encoding_table;
mod error;
mod font;
mod johab;
mod language;
mod options;
mod record;
mod repair;
mod select;

pub use codec::{Codec, ErrorMode, Malformed};
pub use encoding_table::{
    EncodingTable, PLATFORM_ISO, PLATFORM_MAC, PLATFORM_UNICODE, PLATFORM_WINDOWS,
};
pub use error::{FontnameError, Result};
pub use font::{display_name, display_names, display_names_from_bytes, load_faces, name_records};
pub use language::LanguagePriority;
pub use options::{Options, MAX_INPUT_SIZE};
pub use record::{NameRecord, FULL_NAME};
pub use repair::{decode, DecodeResult, IssueLevel, NameDecoder};
pub use select::{full_names, select_display_name, MissingLanguage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
