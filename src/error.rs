//! Error types for fontname.
//!
//! Decoding a name string never fails; everything here comes from loading
//! the font file or from picking a record out of a face.

/// All errors that can occur while loading fonts and selecting names.
#[derive(Debug, thiserror::Error)]
pub enum FontnameError {
    /// I/O error while reading the font file.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Font container or table parse error (from `read-fonts`).
    #[error("font: {0}")]
    Font(#[from] read_fonts::ReadError),

    /// The data does not start with a known sfnt or collection signature.
    #[error("not a font file (unrecognized signature)")]
    NotAFont,

    /// Input exceeds the configured size ceiling.
    #[error("too large ({size} bytes, max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    /// An error raised while reading one face of a file.
    #[error("face {index}: {source}")]
    Face {
        index: usize,
        #[source]
        source: Box<FontnameError>,
    },

    /// The face has no full-name record at all.
    #[error("no full name record")]
    NoFullName,

    /// None of the preferred languages has a full-name record.
    #[error("no full name in a preferred language (available: {languages:?})")]
    NoPreferredName { languages: Vec<u16> },

    /// Codec identifier that does not name a supported codec.
    #[error("unknown codec: {0}")]
    UnknownCodec(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FontnameError>;
