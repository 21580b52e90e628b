//! Cell-level parsing rules shared by validation and parameter overrides.

use crate::input::DataTable;

/// Whether a cell is absent, whitespace-only, or a null token.
pub fn is_blank(raw: Option<&str>) -> bool {
    raw.is_none_or(DataTable::is_null_value)
}

/// Parse a boolean cell.
///
/// Accepts `TRUE`/`FALSE`, `YES`/`NO` and `1`/`0` in any case. Any other
/// finite number is accepted too: non-zero is `true`. Returns `None` for
/// anything else. Blank cells are the caller's concern.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let value = raw.trim();
    match value.to_ascii_uppercase().as_str() {
        "TRUE" | "YES" | "1" => Some(true),
        "FALSE" | "NO" | "0" => Some(false),
        _ => value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| n != 0.0),
    }
}

/// Parse an integer cell. `"3.0"` is read as 3; `"3.5"` is rejected.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64)
        .map(|n| n as i64)
}

/// Parse a strictly positive, finite float.
pub fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_allow_list() {
        for (raw, expected) in [
            ("TRUE", true),
            ("true", true),
            (" Yes ", true),
            ("1", true),
            ("FALSE", false),
            ("no", false),
            ("0", false),
        ] {
            assert_eq!(parse_flag(raw), Some(expected), "input {:?}", raw);
        }
    }

    #[test]
    fn test_parse_flag_numeric_fallback() {
        assert_eq!(parse_flag("2"), Some(true));
        assert_eq!(parse_flag("-1.5"), Some(true));
        assert_eq!(parse_flag("0.0"), Some(false));
        assert_eq!(parse_flag("NaN"), None);
        assert_eq!(parse_flag("inf"), None);
    }

    #[test]
    fn test_parse_flag_rejects_other_words() {
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag("y"), None);
        assert_eq!(parse_flag("on"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer(" 4 "), Some(4));
        assert_eq!(parse_integer("2.0"), Some(2));
        assert_eq!(parse_integer("2.5"), None);
        assert_eq!(parse_integer("lots"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("80"), Some(80.0));
        assert_eq!(parse_positive("12.5"), Some(12.5));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("wide"), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("   ")));
        assert!(is_blank(Some("NA")));
        assert!(!is_blank(Some("FALSE")));
    }
}
