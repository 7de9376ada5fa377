//! Font files: magic check, face iteration and name-record extraction.
//!
//! A file is read whole, checked against the size ceiling and the sfnt
//! magic numbers, then handed to `read-fonts`, which tells a single font
//! from a collection. Each face contributes one display name.

use std::path::Path;

use log::debug;
use read_fonts::tables::name::Encoding;
use read_fonts::{FileRef, FontRef, Offset, ReadError, TableProvider};

use crate::error::{FontnameError, Result};
use crate::options::Options;
use crate::record::NameRecord;
use crate::select::select_display_name;

// Magic signatures
const TTC_MAGIC: [u8; 4] = *b"ttcf";
const TRUETYPE_MAGIC: [u8; 4] = [0x00, 0x01, 0x00, 0x00];
const CFF_MAGIC: [u8; 4] = *b"OTTO";
const APPLE_MAGIC: [u8; 4] = *b"true";
const TYPE1_MAGIC: [u8; 4] = *b"typ1";

const FONT_MAGICS: [[u8; 4]; 5] = [TTC_MAGIC, TRUETYPE_MAGIC, CFF_MAGIC, APPLE_MAGIC, TYPE1_MAGIC];

fn has_font_magic(data: &[u8]) -> bool {
    FONT_MAGICS.iter().any(|magic| data.starts_with(magic))
}

/// Display name of every face in the font file at `path`.
pub fn display_names(path: impl AsRef<Path>, options: &Options) -> Result<Vec<String>> {
    let data = std::fs::read(path.as_ref())?;
    display_names_from_bytes(&data, options)
}

/// Display names of every face, joined with `options.separator`.
pub fn display_name(path: impl AsRef<Path>, options: &Options) -> Result<String> {
    Ok(display_names(path, options)?.join(&options.separator))
}

/// Display name of every face in an in-memory font file.
pub fn display_names_from_bytes(data: &[u8], options: &Options) -> Result<Vec<String>> {
    load_faces(data, options.max_size)?
        .iter()
        .enumerate()
        .map(|(index, records)| {
            select_display_name(
                records,
                &options.priority,
                &options.decoder,
                options.missing_language,
            )
            .map_err(|source| FontnameError::Face {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Name records of every face in a font file or collection.
pub fn load_faces(data: &[u8], max_size: usize) -> Result<Vec<Vec<NameRecord>>> {
    if data.len() > max_size {
        return Err(FontnameError::TooLarge {
            size: data.len(),
            max: max_size,
        });
    }
    if !has_font_magic(data) {
        return Err(FontnameError::NotAFont);
    }

    let file = FileRef::new(data)?;
    file.fonts()
        .enumerate()
        .map(|(index, font)| {
            let records = font.map_err(FontnameError::from).and_then(|font| name_records(&font));
            let records = records.map_err(|source| FontnameError::Face {
                index,
                source: Box::new(source),
            })?;
            debug!("face {index}: {} name records", records.len());
            Ok(records)
        })
        .collect()
}

/// Copy the `name` table of one face into owned records.
pub fn name_records(font: &FontRef<'_>) -> Result<Vec<NameRecord>> {
    let name = font.name()?;
    let storage = name.string_data();
    let bytes: &[u8] = storage.as_ref();

    name.name_record()
        .iter()
        .map(|record| {
            let start = record.string_offset().non_null().unwrap_or(0);
            let end = start + usize::from(record.length());
            let raw = bytes.get(start..end).ok_or(ReadError::OutOfBounds)?;

            // read-fonts only decodes Unicode and Mac Roman records
            let parsed = match Encoding::new(record.platform_id(), record.encoding_id()) {
                Encoding::Unknown => None,
                _ => Some(record.string(storage)?.chars().collect::<String>()),
            };

            Ok(NameRecord {
                platform_id: record.platform_id(),
                encoding_id: record.encoding_id(),
                language_id: record.language_id(),
                name_id: record.name_id().to_u16(),
                raw: raw.to_vec(),
                parsed,
            })
        })
        .collect()
}
