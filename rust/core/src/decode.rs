// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Argument decoding helpers.
//!
//! String unescaping (including STEP's `\X2\...\X0\` extended-Unicode
//! convention), `#id` reference lists and locale-invariant number parsing.
//! Every helper degrades to an absent value on malformed input.

use smallvec::SmallVec;

/// Id list type; most reference lists in practice are short.
pub type IdList = SmallVec<[u32; 8]>;

const UNICODE_START: &str = "\\X2\\";
const UNICODE_END: &str = "\\X0\\";

/// Decode a quoted STEP string argument into normalized text.
///
/// Strips one layer of surrounding single quotes and expands any
/// `\X2\<hex4>...\X0\` spans, where each 4-hex-digit chunk is one UTF-16
/// code unit. Malformed chunks become a literal `?`. Idempotent for strings
/// without the marker.
pub fn unescape(raw: &str) -> String {
    let mut s = raw.trim();
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        s = &s[1..s.len() - 1];
    }
    if !s.contains(UNICODE_START) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find(UNICODE_START) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + UNICODE_START.len()..];

        // Consume 4-hex-digit UTF-16 code units until the terminator.
        let mut units: Vec<u16> = Vec::new();
        loop {
            if rest.starts_with(UNICODE_END) {
                rest = &rest[UNICODE_END.len()..];
                break;
            }
            match rest.get(..4) {
                Some(chunk) => {
                    match u16::from_str_radix(chunk, 16) {
                        Ok(unit) => units.push(unit),
                        Err(_) => units.push(b'?' as u16),
                    }
                    rest = &rest[4..];
                }
                None => {
                    // Truncated span: placeholder for whatever is left.
                    if !rest.is_empty() {
                        units.push(b'?' as u16);
                        rest = "";
                    }
                    break;
                }
            }
        }
        out.push_str(&String::from_utf16_lossy(&units));
    }
    out.push_str(rest);
    out
}

/// Parse a parenthesized list of `#id` references, e.g. `(#12,#45,#7)`.
///
/// Source order and duplicates are retained; tokens that fail to parse are
/// dropped silently. `$` or empty input yields an empty list.
pub fn parse_id_list(raw: &str) -> IdList {
    let mut s = raw.trim();
    let mut ids = IdList::new();
    if s.is_empty() || s == "$" {
        return ids;
    }
    if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        s = &s[1..s.len() - 1];
    }
    for piece in s.split(',') {
        let piece = piece.trim();
        let piece = piece.strip_prefix('#').unwrap_or(piece);
        if let Ok(id) = piece.parse::<u32>() {
            ids.push(id);
        }
    }
    ids
}

/// Parse a single `#id` reference, e.g. `#55`.
pub fn parse_ref(raw: &str) -> Option<u32> {
    let s = raw.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    s.parse().ok()
}

/// Parse a STEP real argument, locale-invariant.
///
/// Accepts trailing-dot forms like `3000.` and exponent notation.
pub fn parse_float(raw: &str) -> Option<f64> {
    fast_float::parse(raw.trim()).ok()
}

/// Whether a property value argument carries a concrete value, i.e. it is
/// neither the `$` null marker nor empty.
pub fn has_concrete_value(raw: &str) -> bool {
    let s = raw.trim();
    !s.is_empty() && s != "$"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_plain() {
        assert_eq!(unescape("'hello'"), "hello");
        assert_eq!(unescape("hello"), "hello");
        assert_eq!(unescape("''"), "");
    }

    #[test]
    fn test_unescape_is_idempotent_without_marker() {
        let once = unescape("'Wall-001'");
        assert_eq!(unescape(&once), once);
    }

    #[test]
    fn test_unescape_unicode_span() {
        assert_eq!(unescape("'\\X2\\4E8B\\X0\\'"), "\u{4E8B}");
    }

    #[test]
    fn test_unescape_preserves_surrounding_text() {
        assert_eq!(unescape("'Room \\X2\\4E8B52D9\\X0\\ East'"), "Room \u{4E8B}\u{52D9} East");
    }

    #[test]
    fn test_unescape_surrogate_pair() {
        // U+1F600 encoded as a UTF-16 surrogate pair D83D DE00.
        assert_eq!(unescape("'\\X2\\D83DDE00\\X0\\'"), "\u{1F600}");
    }

    #[test]
    fn test_unescape_malformed_chunk() {
        assert_eq!(unescape("'\\X2\\ZZZZ\\X0\\'"), "?");
        // Truncated span without terminator.
        assert_eq!(unescape("'\\X2\\4E'"), "?");
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("(#1,#2,#3)").as_slice(), &[1, 2, 3]);
        assert_eq!(parse_id_list("(#1,garbage,#3)").as_slice(), &[1, 3]);
        assert_eq!(parse_id_list("#7").as_slice(), &[7]);
        assert!(parse_id_list("$").is_empty());
        assert!(parse_id_list("").is_empty());
        assert_eq!(parse_id_list("(#4,#4)").as_slice(), &[4, 4]); // duplicates retained
    }

    #[test]
    fn test_parse_ref() {
        assert_eq!(parse_ref("#55"), Some(55));
        assert_eq!(parse_ref(" 55 "), Some(55));
        assert_eq!(parse_ref("$"), None);
        assert_eq!(parse_ref("(#55)"), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("3000."), Some(3000.0));
        assert_eq!(parse_float("-1.5E-2"), Some(-0.015));
        assert_eq!(parse_float("$"), None);
        assert_eq!(parse_float("'text'"), None);
    }

    #[test]
    fn test_has_concrete_value() {
        assert!(has_concrete_value("IFCLABEL('x')"));
        assert!(!has_concrete_value("$"));
        assert!(!has_concrete_value("  "));
    }
}
