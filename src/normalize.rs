//! Journal title normalization.
//!
//! Titles arrive from CSV exports and scrapers with inconsistent casing,
//! accents and punctuation. [`normalize`] turns any of those spellings into
//! one comparison key so that "Ciência & Saúde" and "ciencia saude" are
//! recognized as the same journal.

use deunicode::deunicode_char;

/// Suffixes the CSV export tool appends to file names
const EXPORT_SUFFIXES: &[&str] = &[" RadGridExport", "_RadGridExport"];

/// Canonical comparison key for a journal title.
///
/// Lowercases, transliterates to ASCII (characters without an ASCII
/// equivalent are dropped), turns every run of punctuation or whitespace
/// into a single space and trims the result. Empty input gives an empty key.
pub fn normalize(title: &str) -> String {
    let folded = fold_ascii(&title.trim().to_lowercase());

    let mut key = String::with_capacity(folded.len());
    let mut pending_space = false;

    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(c);
        } else {
            pending_space = true;
        }
    }

    key
}

/// [`normalize`] for optional titles; `None` maps to an empty key
pub fn normalize_opt(title: Option<&str>) -> String {
    title.map(normalize).unwrap_or_default()
}

/// Light cleaning used for dataset keys built from CSV rows.
///
/// Lowercase, trimmed and ASCII-folded, but punctuation is kept so the
/// key still reads like the journal's name.
pub fn normalize_display(title: &str) -> String {
    fold_ascii(&title.trim().to_lowercase()).trim().to_string()
}

/// Strip export-tool suffixes from a CSV file stem to get the area/catalog name
pub fn clean_source_name(stem: &str) -> String {
    EXPORT_SUFFIXES
        .iter()
        .fold(stem.to_string(), |name, suffix| name.replace(suffix, ""))
}

/// Transliterate to lowercase ASCII, dropping what has no ASCII form
fn fold_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if is_combining_mark(c) {
            continue;
        } else if let Some(ascii) = deunicode_char(c) {
            out.extend(ascii.chars().map(|a| a.to_ascii_lowercase()));
        }
    }
    out
}

/// Combining Diacritical Marks block (U+0300..U+036F)
fn is_combining_mark(c: char) -> bool {
    ('\u{300}'..='\u{36f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("  Revista de   Biología  "), "revista de biologia");
        assert_eq!(normalize("Acta Médica (Lima)"), "acta medica lima");
        assert_eq!(normalize("Ciencia, Tecnología & Sociedad"), "ciencia tecnologia sociedad");
    }

    #[test]
    fn test_accent_insensitive() {
        assert_eq!(normalize("Ciência"), normalize("ciencia"));
        assert_eq!(normalize("ÁREA SAÚDE"), normalize("area saude"));
    }

    #[test]
    fn test_combining_marks_dropped() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT
        assert_eq!(normalize("Me\u{301}xico"), "mexico");
    }

    #[test]
    fn test_empty_and_none() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("¿?¡!"), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("Nature")), "nature");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Revista Colombiana de Matemáticas",
            "  J. Appl. Phys.  ",
            "Über-Journal für Ökologie",
            "Cuadernos--de...Historia",
            "",
        ];
        for s in samples {
            let key = normalize(s);
            assert_eq!(normalize(&key), key);
            assert_eq!(normalize(&normalize_display(&key)), key);
        }
    }

    #[test]
    fn test_normalize_display_keeps_punctuation() {
        assert_eq!(normalize_display(" Acta Médica (Lima) "), "acta medica (lima)");
    }

    #[test]
    fn test_clean_source_name() {
        assert_eq!(clean_source_name("Ciencias Sociales RadGridExport"), "Ciencias Sociales");
        assert_eq!(clean_source_name("Scopus_RadGridExport"), "Scopus");
        assert_eq!(clean_source_name("Latindex"), "Latindex");
    }
}
