//! Character reference decoding
//!
//! Resolves `&name;`, `&#NNN;` and `&#xHH;` references in text and attribute
//! values. Named references come from the full HTML5 table shipped with
//! `quick-xml`; unknown references are left untouched.

use alloc::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;

/// Legacy references that browsers resolve even without the trailing `;`
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Decode all character references in `input`
///
/// Borrows when there is nothing to decode.
///
/// # Example
///
/// ```rust
/// use sami_core::tokenizer::entities::decode_entities;
///
/// assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
/// assert_eq!(decode_entities("&#72;&#x69;"), "Hi");
/// assert_eq!(decode_entities("&unknown;"), "&unknown;");
/// ```
#[must_use]
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match decode_reference(after) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Decode one reference following a `&`
///
/// Returns the replacement and the number of bytes consumed after the `&`.
fn decode_reference(after: &str) -> Option<(Cow<'static, str>, usize)> {
    if let Some(numeric) = after.strip_prefix('#') {
        return decode_numeric(numeric).map(|(ch, used)| (Cow::Owned(ch.to_string()), used + 1));
    }

    let name_len = after
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &after[..name_len];

    if after[name_len..].starts_with(';') {
        if let Some(replacement) = resolve_html5_entity(name) {
            return Some((Cow::Borrowed(replacement), name_len + 1));
        }
    }

    // Longest legacy prefix wins, so "&nbspx" decodes as nbsp + "x"
    LEGACY_ENTITIES
        .iter()
        .filter(|legacy| name.starts_with(**legacy))
        .max_by_key(|legacy| legacy.len())
        .and_then(|legacy| resolve_html5_entity(legacy).map(|r| (Cow::Borrowed(r), legacy.len())))
}

/// Decode the digits of a numeric reference (after `&#`)
fn decode_numeric(input: &str) -> Option<(char, usize)> {
    let (radix, prefix_len) = match input.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };
    let digits = &input[prefix_len..];
    let digit_len = digits
        .bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count();
    if digit_len == 0 {
        return None;
    }

    let value = u32::from_str_radix(&digits[..digit_len], radix).unwrap_or(u32::MAX);
    let ch = match value {
        0 => '\u{fffd}',
        v => char::from_u32(v).unwrap_or('\u{fffd}'),
    };

    let mut used = prefix_len + digit_len;
    if digits[digit_len..].starts_with(';') {
        used += 1;
    }
    Some((ch, used))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrows_plain_text() {
        assert!(matches!(decode_entities("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode_entities("a &lt;b&gt; c"), "a <b> c");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("x&nbsp;y"), "x\u{a0}y");
    }

    #[test]
    fn decodes_html5_named_references() {
        assert_eq!(decode_entities("Caf&eacute;"), "Caf\u{e9}");
        assert_eq!(decode_entities("&hearts; you"), "\u{2665} you");
        assert_eq!(decode_entities("na&iuml;ve &Uuml;ber"), "na\u{ef}ve \u{dc}ber");
    }

    #[test]
    fn decodes_legacy_without_semicolon() {
        assert_eq!(decode_entities("caf&eacute au lait"), "caf\u{e9} au lait");
        assert_eq!(decode_entities("&notit;"), "\u{ac}it;");
        assert_eq!(decode_entities("&nbsp"), "\u{a0}");
        assert_eq!(decode_entities("&ampfoo"), "&foo");
        assert_eq!(decode_entities("&copy 2024"), "\u{a9} 2024");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("&#0;"), "\u{fffd}");
        assert_eq!(decode_entities("&#xD800;"), "\u{fffd}");
        assert_eq!(decode_entities("&#65 "), "A ");
    }

    #[test]
    fn leaves_unknown_references() {
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&#;"), "&#;");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }
}
