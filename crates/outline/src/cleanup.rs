//! Span-text normalization applied before lines are assembled.

use unicode_normalization::UnicodeNormalization;

/// Clean up one span's text.
///
/// Applies Unicode NFC normalization, ligature replacement, and replacement
/// character removal. Interior whitespace is left alone -- token counts feed
/// the heading heuristics downstream.
pub fn normalize_text(text: &str) -> String {
    let mut result: String = text.nfc().collect();

    // Fold the common typographic ligatures (ff, fi, fl, ffi, ffl).
    let ligatures = [
        ("\u{FB00}", "ff"),
        ("\u{FB01}", "fi"),
        ("\u{FB02}", "fl"),
        ("\u{FB03}", "ffi"),
        ("\u{FB04}", "ffl"),
    ];
    for (lig, replacement) in &ligatures {
        if result.contains(lig) {
            result = result.replace(lig, replacement);
        }
    }

    if result.contains('\u{FFFD}') {
        result = result.replace('\u{FFFD}', "");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize_text("Hello world."), "Hello world.");
    }

    #[test]
    fn test_ligature_fi() {
        assert_eq!(normalize_text("\u{FB01}nd"), "find");
    }

    #[test]
    fn test_ligature_ffl() {
        assert_eq!(normalize_text("a\u{FB04}e"), "affle");
    }

    #[test]
    fn test_replacement_char_removed() {
        assert_eq!(normalize_text("Hello\u{FFFD}World"), "HelloWorld");
    }

    #[test]
    fn test_nfc_normalization() {
        // e + combining acute should normalize to the single char.
        let input = "caf\u{0065}\u{0301}";
        assert_eq!(normalize_text(input), "caf\u{00E9}");
    }

    #[test]
    fn test_interior_whitespace_preserved() {
        assert_eq!(normalize_text("a   b"), "a   b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
    }
}
