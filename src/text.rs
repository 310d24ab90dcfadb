//! Small string helpers for headings and signatures.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Derive an anchor identifier from arbitrary text.
///
/// Decomposes to NFKD and drops combining marks (so `É` becomes `e`),
/// lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, then strips leading digits and hyphens and trailing hyphens, so
/// the result is always a valid HTML/XML id (or empty).
pub fn make_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut pending_sep = false;

    let folded = text.nfkd().filter(|c| !is_combining_mark(*c));
    for ch in folded.flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !id.is_empty() {
                id.push('-');
            }
            pending_sep = false;
            id.push(ch);
        } else {
            pending_sep = true;
        }
    }

    let start = id
        .find(|c: char| c.is_ascii_lowercase())
        .unwrap_or(id.len());
    id[start..].trim_end_matches('-').to_string()
}

/// Capitalise the first letter of every alphabetic run and lowercase the rest.
///
/// `"sample depth (m)"` becomes `"Sample Depth (M)"`; `"o'neil"` becomes `"O'Neil"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_id_simple() {
        assert_eq!(make_id("Rock Sample"), "rock-sample");
    }

    #[test]
    fn test_make_id_collapses_punctuation() {
        assert_eq!(make_id("U-Th/He  age (zircon)"), "u-th-he-age-zircon");
    }

    #[test]
    fn test_make_id_strips_leading_digits() {
        assert_eq!(make_id("3D Scan"), "d-scan");
        assert_eq!(make_id("--fields--"), "fields");
    }

    #[test]
    fn test_make_id_empty_when_no_letters() {
        assert_eq!(make_id("123 !!"), "");
    }

    #[test]
    fn test_make_id_folds_accents() {
        assert_eq!(make_id("Échantillon de roche"), "echantillon-de-roche");
        assert_eq!(make_id("Zircon ﬁssion track"), "zircon-fission-track");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sample depth"), "Sample Depth");
        assert_eq!(title_case("UPPER case"), "Upper Case");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("1st value"), "1St Value");
    }
}
