//! Token wire format.
//!
//! A layout key is written as `{case}{row + 1}x{col + 1:02}`: `(0, 0)`
//! lowercase is `01x01`, `(2, 10)` uppercase is `13x11`. Row 0 never
//! names a layout key and is reserved for characters that are not keys:
//!
//! - `00x00` space, `10x00`..`10x06` control whitespace
//! - `00x01`..`00x1C` combining diacritics (hex column)
//! - `20x{HHHH}` any other whitespace, by hex code point

use crate::models::{Case, KeyPosition};

/// Separator between tokens in encoded text.
pub const TOKEN_SEPARATOR: &str = " ";

/// Fixed reserved tokens, in table order.
const RESERVED: &[(char, &str)] = &[
    (' ', "00x00"),
    ('\n', "10x00"),
    ('\t', "10x01"),
    ('\r', "10x02"),
    ('\u{08}', "10x03"),
    ('\u{0C}', "10x04"),
    ('\u{0B}', "10x05"),
    ('\u{07}', "10x06"),
    ('\u{0300}', "00x01"), // grave
    ('\u{0301}', "00x02"), // acute
    ('\u{0302}', "00x03"), // circumflex
    ('\u{0303}', "00x04"), // tilde
    ('\u{0304}', "00x05"), // macron
    ('\u{0305}', "00x06"), // overline
    ('\u{0306}', "00x07"), // breve
    ('\u{0307}', "00x08"), // dot above
    ('\u{0308}', "00x09"), // diaeresis
    ('\u{0309}', "00x0A"), // hook above
    ('\u{030A}', "00x0B"), // ring above
    ('\u{030B}', "00x0C"), // double acute
    ('\u{030C}', "00x0D"), // caron
    ('\u{030D}', "00x0E"), // vertical line above
    ('\u{030E}', "00x0F"), // double vertical line above
    ('\u{0310}', "00x10"), // candrabindu
    ('\u{0311}', "00x11"), // inverted breve
    ('\u{0312}', "00x12"), // turned comma above
    ('\u{0327}', "00x13"), // cedilla
    ('\u{0328}', "00x14"), // ogonek
    ('\u{0331}', "00x15"), // macron below
    ('\u{0332}', "00x16"), // low line
    ('\u{0333}', "00x17"), // double low line
    ('\u{0339}', "00x18"), // right half ring below
    ('\u{033A}', "00x19"), // inverted bridge below
    ('\u{033B}', "00x1A"), // square below
    ('\u{033C}', "00x1B"), // seagull below
    ('\u{0345}', "00x1C"), // ypogegrammeni
];

/// Prefix of the escape token for whitespace outside the fixed table.
const WHITESPACE_ESCAPE: &str = "20x";

/// Formats a key position as a token.
#[must_use]
pub fn format_position(position: KeyPosition) -> String {
    format!(
        "{}{}x{:02}",
        position.case.digit(),
        position.row + 1,
        position.col + 1
    )
}

/// Parses a key token back into a position.
///
/// Only the canonical spelling produced by [`format_position`] is
/// accepted, so every position has exactly one token.
#[must_use]
pub fn parse_position(token: &str) -> Option<KeyPosition> {
    let mut chars = token.chars();
    let case = Case::from_digit(chars.next()?)?;
    let (row, col) = chars.as_str().split_once('x')?;

    let position = KeyPosition::new(parse_index(row)?, parse_index(col)?, case);
    (format_position(position) == token).then_some(position)
}

/// Parses a 1-based decimal index into a 0-based one.
fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok()?.checked_sub(1)
}

/// Token for a character that is not a layout key, if it has one.
#[must_use]
pub fn reserved_token(character: char) -> Option<String> {
    if let Some((_, token)) = RESERVED.iter().find(|(c, _)| *c == character) {
        return Some((*token).to_string());
    }
    if character.is_whitespace() {
        return Some(format!("{WHITESPACE_ESCAPE}{:04X}", u32::from(character)));
    }
    None
}

/// Character for a reserved token.
#[must_use]
pub fn reserved_char(token: &str) -> Option<char> {
    if let Some((c, _)) = RESERVED.iter().find(|(_, t)| *t == token) {
        return Some(*c);
    }
    let hex = token.strip_prefix(WHITESPACE_ESCAPE)?;
    if hex.len() < 4 || !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')) {
        return None;
    }
    let character = char::from_u32(u32::from_str_radix(hex, 16).ok()?)?;
    // Must be the escape encode would have produced
    (reserved_token(character).as_deref() == Some(token)).then_some(character)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(KeyPosition::new(0, 0, Case::Lower)), "01x01");
        assert_eq!(format_position(KeyPosition::new(2, 10, Case::Upper)), "13x11");
        assert_eq!(format_position(KeyPosition::new(11, 4, Case::Lower)), "012x05");
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(
            parse_position("01x01"),
            Some(KeyPosition::new(0, 0, Case::Lower))
        );
        assert_eq!(
            parse_position("13x11"),
            Some(KeyPosition::new(2, 10, Case::Upper))
        );
        assert_eq!(
            parse_position("012x05"),
            Some(KeyPosition::new(11, 4, Case::Lower))
        );
    }

    #[test]
    fn test_parse_position_rejects_garbage() {
        for token in [
            "", "x", "01", "21x01", "00x01", "01x00", "0ax01", "01x0b", "01x+1", "01x1x", "01x001",
            "001x01", "01x1",
        ] {
            assert_eq!(parse_position(token), None, "token {token:?}");
        }
    }

    #[test]
    fn test_reserved_tokens_are_unique() {
        let mut tokens: Vec<&str> = RESERVED.iter().map(|(_, t)| *t).collect();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), RESERVED.len());

        for (_, token) in RESERVED {
            assert_eq!(parse_position(token), None, "{token} collides with a key token");
        }
    }

    #[test]
    fn test_reserved_round_trip() {
        for c in [' ', '\n', '\t', '\u{0301}', '\u{0345}', '\u{00A0}', '\u{3000}'] {
            let token = reserved_token(c).unwrap();
            assert_eq!(reserved_char(&token), Some(c), "token {token}");
        }
        assert_eq!(reserved_token(' ').as_deref(), Some("00x00"));
        assert_eq!(reserved_token('\u{00A0}').as_deref(), Some("20x00A0"));
    }

    #[test]
    fn test_reserved_rejects_non_whitespace_escape() {
        assert_eq!(reserved_token('a'), None);
        assert_eq!(reserved_char("20x0041"), None);
        assert_eq!(reserved_char("20x0020"), None);
        assert_eq!(reserved_char("20x00a0"), None);
        assert_eq!(reserved_char("20xZZ"), None);
        assert_eq!(reserved_char("20x000A0"), None);
    }
}
