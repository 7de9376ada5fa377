//! Johab (KS C 5601-1992 annex 3), Windows platform encoding 6.
//!
//! Hangul is composed from the 5-bit initial, medial and final fields of a
//! 16-bit code, so it is mapped algorithmically. Symbols and Hanja are a
//! transposition of the KS X 1001 rows: those codes are moved onto their
//! EUC-KR bytes and decoded through `encoding_rs`.

const SYLLABLE_BASE: u32 = 0xAC00;
const HANGUL_FILLER: char = '\u{3164}';

/// Compatibility jamo for the 19 initial consonants.
const COMPAT_INITIAL: [u32; 19] = [
    0x3131, 0x3132, 0x3134, 0x3137, 0x3138, 0x3139, 0x3141, 0x3142, 0x3143, 0x3145, 0x3146,
    0x3147, 0x3148, 0x3149, 0x314A, 0x314B, 0x314C, 0x314D, 0x314E,
];

/// Compatibility jamo for the 27 final consonants.
const COMPAT_FINAL: [u32; 27] = [
    0x3131, 0x3132, 0x3133, 0x3134, 0x3135, 0x3136, 0x3137, 0x3139, 0x313A, 0x313B, 0x313C,
    0x313D, 0x313E, 0x313F, 0x3140, 0x3141, 0x3142, 0x3144, 0x3145, 0x3146, 0x3147, 0x3148,
    0x314A, 0x314B, 0x314C, 0x314D, 0x314E,
];

/// First compatibility jamo vowel (ㅏ); the 21 vowels are contiguous.
const COMPAT_MEDIAL_BASE: u32 = 0x314F;

/// A decoded jamo field: the filler, or an index into its jamo class.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Fill,
    Jamo(u32),
}

fn initial_field(bits: u16) -> Option<Field> {
    match bits {
        1 => Some(Field::Fill),
        2..=20 => Some(Field::Jamo(u32::from(bits - 2))),
        _ => None,
    }
}

fn medial_field(bits: u16) -> Option<Field> {
    let index = match bits {
        2 => return Some(Field::Fill),
        3..=7 => bits - 3,
        10..=15 => bits - 5,
        18..=23 => bits - 7,
        26..=29 => bits - 9,
        _ => return None,
    };
    Some(Field::Jamo(u32::from(index)))
}

fn final_field(bits: u16) -> Option<Field> {
    let index = match bits {
        1 => return Some(Field::Fill),
        2..=17 => bits - 1,
        19..=29 => bits - 2,
        _ => return None,
    };
    Some(Field::Jamo(u32::from(index)))
}

fn medial_bits(index: u32) -> u16 {
    // index < 21, checked by callers
    let index = index as u16;
    match index {
        0..=4 => index + 3,
        5..=10 => index + 5,
        11..=16 => index + 7,
        _ => index + 9,
    }
}

fn final_bits(index: u32) -> u16 {
    let index = index as u16;
    match index {
        0 => 1,
        1..=16 => index + 1,
        _ => index + 2,
    }
}

fn decode_hangul(code: u16) -> Option<char> {
    let initial = initial_field((code >> 10) & 0x1F)?;
    let medial = medial_field((code >> 5) & 0x1F)?;
    let last = final_field(code & 0x1F)?;
    let scalar = match (initial, medial, last) {
        (Field::Jamo(l), Field::Jamo(v), Field::Fill) => SYLLABLE_BASE + (l * 21 + v) * 28,
        (Field::Jamo(l), Field::Jamo(v), Field::Jamo(t)) => SYLLABLE_BASE + (l * 21 + v) * 28 + t,
        (Field::Jamo(l), Field::Fill, Field::Fill) => COMPAT_INITIAL[l as usize],
        (Field::Fill, Field::Jamo(v), Field::Fill) => COMPAT_MEDIAL_BASE + v,
        (Field::Fill, Field::Fill, Field::Jamo(t)) => COMPAT_FINAL[t as usize - 1],
        (Field::Fill, Field::Fill, Field::Fill) => return Some(HANGUL_FILLER),
        _ => return None,
    };
    char::from_u32(scalar)
}

fn encode_hangul(c: char) -> Option<u16> {
    let scalar = u32::from(c);
    let (initial, medial, last) = if (SYLLABLE_BASE..SYLLABLE_BASE + 11172).contains(&scalar) {
        let index = scalar - SYLLABLE_BASE;
        (
            u16::try_from(index / 588).ok()? + 2,
            medial_bits((index % 588) / 28),
            final_bits(index % 28),
        )
    } else if c == HANGUL_FILLER {
        (1, 2, 1)
    } else if let Some(pos) = COMPAT_INITIAL.iter().position(|&j| j == scalar) {
        (u16::try_from(pos).ok()? + 2, 2, 1)
    } else if (COMPAT_MEDIAL_BASE..COMPAT_MEDIAL_BASE + 21).contains(&scalar) {
        (1, medial_bits(scalar - COMPAT_MEDIAL_BASE), 1)
    } else if let Some(pos) = COMPAT_FINAL.iter().position(|&j| j == scalar) {
        (1, 2, final_bits(u32::try_from(pos).ok()? + 1))
    } else {
        return None;
    };
    Some(0x8000 | (initial << 10) | (medial << 5) | last)
}

/// Move a Johab symbol or Hanja code onto its EUC-KR bytes.
fn to_euc_kr(lead: u8, trail: u8) -> Option<[u8; 2]> {
    if !matches!(lead, 0xD9..=0xDE | 0xE0..=0xF9) || !matches!(trail, 0x31..=0x7E | 0x91..=0xFE) {
        return None;
    }
    // jamo live in the Hangul area
    if lead == 0xDA && (0xA1..=0xD3).contains(&trail) {
        return None;
    }
    let lead = u16::from(lead);
    let trail = u16::from(trail);
    let base = if lead < 0xE0 { 2 * (lead - 0xD9) } else { 2 * lead - 0x197 };
    let offset = if trail < 0x91 { trail - 0x31 } else { trail - 0x43 };
    let (row, cell) = if offset < 0x5E {
        (base + 0x21, offset + 0x21)
    } else {
        (base + 0x22, offset - 0x5E + 0x21)
    };
    Some([(row | 0x80) as u8, (cell | 0x80) as u8])
}

/// Inverse of [`to_euc_kr`].
fn from_euc_kr(bytes: &[u8]) -> Option<[u8; 2]> {
    let &[lead, trail] = bytes else {
        return None;
    };
    if lead < 0xA1 || trail < 0xA1 {
        return None;
    }
    let row = u16::from(lead - 0x80);
    let cell = u16::from(trail - 0x80);
    if !matches!(row, 0x21..=0x2C | 0x4A..=0x7D) {
        return None;
    }
    let t = if row < 0x4A { row - 0x21 + 0x1B2 } else { row - 0x21 + 0x197 };
    let offset = (if t & 1 == 1 { 0x5E } else { 0 }) + (cell - 0x21);
    let johab_lead = (t >> 1) as u8;
    let johab_trail = (if offset < 0x4E { offset + 0x31 } else { offset + 0x43 }) as u8;
    if johab_lead == 0xDA && (0xA1..=0xD3).contains(&johab_trail) {
        return None;
    }
    Some([johab_lead, johab_trail])
}

/// Decode step over Johab bytes, in the shape `codec::drive` expects.
pub(crate) fn decode_step(bytes: &[u8], out: &mut String) -> Result<usize, usize> {
    let lead = bytes[0];
    if lead < 0x80 {
        out.push(char::from(lead));
        return Ok(1);
    }
    let Some(&trail) = bytes.get(1) else {
        return Err(1);
    };
    let decoded = match lead {
        0x84..=0xD3 => decode_hangul(u16::from_be_bytes([lead, trail])),
        _ => to_euc_kr(lead, trail).and_then(|euc| {
            encoding_rs::EUC_KR
                .decode_without_bom_handling_and_without_replacement(&euc)
                .and_then(|text| text.chars().next())
        }),
    };
    match decoded {
        Some(c) => {
            out.push(c);
            Ok(2)
        }
        None => Err(1),
    }
}

/// Append the Johab bytes for `c`, or `None` if it has no mapping.
pub(crate) fn encode_char(c: char, out: &mut Vec<u8>) -> Option<()> {
    if c.is_ascii() {
        out.push(c as u8);
        return Some(());
    }
    if let Some(code) = encode_hangul(c) {
        out.extend_from_slice(&code.to_be_bytes());
        return Some(());
    }
    let mut buf = [0u8; 4];
    let (euc, _, unmappable) = encoding_rs::EUC_KR.encode(c.encode_utf8(&mut buf));
    if unmappable {
        return None;
    }
    out.extend_from_slice(&from_euc_kr(&euc)?);
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &[u8]) -> Option<String> {
        let mut out = String::new();
        let mut pos = 0;
        while pos < raw.len() {
            pos += decode_step(&raw[pos..], &mut out).ok()?;
        }
        Some(out)
    }

    fn encode(text: &str) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        for c in text.chars() {
            encode_char(c, &mut out)?;
        }
        Some(out)
    }

    #[test]
    fn first_syllable() {
        // 가: initial ㄱ (2), medial ㅏ (3), no final (1)
        assert_eq!(decode(&[0x88, 0x61]).as_deref(), Some("가"));
        assert_eq!(encode("가"), Some(vec![0x88, 0x61]));
    }

    #[test]
    fn syllable_with_final() {
        // 한 = 0xD065
        assert_eq!(decode(&[0xD0, 0x65]).as_deref(), Some("한"));
        assert_eq!(encode("한"), Some(vec![0xD0, 0x65]));
    }

    #[test]
    fn last_syllable_round_trips() {
        let bytes = encode("힣").unwrap();
        assert_eq!(decode(&bytes).as_deref(), Some("힣"));
    }

    #[test]
    fn compatibility_jamo() {
        // ㄱ alone: initial 2, medial fill, final fill
        assert_eq!(decode(&[0x88, 0x41]).as_deref(), Some("ㄱ"));
        assert_eq!(encode("ㄱ"), Some(vec![0x88, 0x41]));
        let vowel = encode("ㅏ").unwrap();
        assert_eq!(decode(&vowel).as_deref(), Some("ㅏ"));
    }

    #[test]
    fn symbol_area_goes_through_ks_x_1001() {
        // D9 31 <-> EUC-KR A1 A1 (ideographic space)
        assert_eq!(to_euc_kr(0xD9, 0x31), Some([0xA1, 0xA1]));
        assert_eq!(from_euc_kr(&[0xA1, 0xA1]), Some([0xD9, 0x31]));
        assert_eq!(decode(&[0xD9, 0x31]).as_deref(), Some("\u{3000}"));
    }

    #[test]
    fn hanja_round_trips() {
        let bytes = encode("漢字").unwrap();
        assert!(bytes.iter().step_by(2).all(|&lead| (0xE0..=0xF9).contains(&lead)));
        assert_eq!(decode(&bytes).as_deref(), Some("漢字"));
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode(b"Gulim").as_deref(), Some("Gulim"));
    }

    #[test]
    fn truncated_lead_is_an_error() {
        let mut out = String::new();
        assert_eq!(decode_step(&[0x88], &mut out), Err(1));
    }
}
