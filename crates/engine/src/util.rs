use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Folds a user-entered name into a comparison key: NFKD, accents stripped,
/// lowercased, runs of non-alphanumerics collapsed to single spaces.
///
/// Returns `None` when nothing alphanumeric survives.
pub(crate) fn normalize_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut prev_space = false;
    for ch in trimmed.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Trims free text, mapping whitespace-only input to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_key_folds_case_and_accents() {
        assert_eq!(normalize_key("Café Fund"), Some("cafe fund".to_string()));
        assert_eq!(normalize_key("  AAPL  "), Some("aapl".to_string()));
        assert_eq!(
            normalize_key("Emergency--Fund!!"),
            Some("emergency fund".to_string())
        );
    }

    #[test]
    fn normalize_key_rejects_empty_input() {
        assert_eq!(normalize_key("   "), None);
        assert_eq!(normalize_key("!!!"), None);
    }

    #[test]
    fn optional_text_drops_blank_strings() {
        assert_eq!(normalize_optional_text(Some("  note ")), Some("note".to_string()));
        assert_eq!(normalize_optional_text(Some("   ")), None);
        assert_eq!(normalize_optional_text(None), None);
    }
}
