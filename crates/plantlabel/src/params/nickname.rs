//! Nickname extraction from quoted cultivar names.

use once_cell::sync::Lazy;
use regex::Regex;

static SINGLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"'([^']*)'").unwrap());
static DOUBLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Split a common name into (base name, nickname).
///
/// Single quotes are tried before double quotes. The first quoted segment
/// of the matching style supplies the nickname; then every segment of that
/// style is removed from the name and whitespace is collapsed. A name that is
/// only a quoted segment leaves an empty base name. Names without quotes come
/// back unchanged with an empty nickname.
///
/// ```
/// use plantlabel::params::extract_nickname;
///
/// let (name, nickname) = extract_nickname("Maranta 'Lemon Lime'");
/// assert_eq!(name, "Maranta");
/// assert_eq!(nickname, "Lemon Lime");
/// ```
pub fn extract_nickname(common_name: &str) -> (String, String) {
    for pattern in [&*SINGLE_QUOTED, &*DOUBLE_QUOTED] {
        let Some(caps) = pattern.captures(common_name) else {
            continue;
        };
        let nickname = caps[1].to_string();

        let stripped = pattern.replace_all(common_name, "");
        let base = WHITESPACE.replace_all(stripped.trim(), " ").into_owned();
        return (base, nickname);
    }

    (common_name.to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quotes() {
        assert_eq!(
            extract_nickname("Maranta 'Lemon Lime'"),
            ("Maranta".to_string(), "Lemon Lime".to_string())
        );
    }

    #[test]
    fn test_double_quotes() {
        assert_eq!(
            extract_nickname("Pothos \"Marble Queen\""),
            ("Pothos".to_string(), "Marble Queen".to_string())
        );
    }

    #[test]
    fn test_no_quotes() {
        assert_eq!(
            extract_nickname("Snake Plant"),
            ("Snake Plant".to_string(), String::new())
        );
    }

    #[test]
    fn test_inner_segment_collapses_whitespace() {
        assert_eq!(
            extract_nickname("Philodendron 'Brasil'  Vine"),
            ("Philodendron Vine".to_string(), "Brasil".to_string())
        );
    }

    #[test]
    fn test_first_found_all_removed() {
        // Nickname comes from the first segment, every segment is stripped
        assert_eq!(
            extract_nickname("Hoya 'Krimson' 'Queen'"),
            ("Hoya".to_string(), "Krimson".to_string())
        );
    }

    #[test]
    fn test_single_quotes_win_over_double() {
        assert_eq!(
            extract_nickname("Calathea \"Medallion\" 'Dottie'"),
            ("Calathea \"Medallion\"".to_string(), "Dottie".to_string())
        );
    }

    #[test]
    fn test_only_quoted_text() {
        assert_eq!(
            extract_nickname("'Lemon Lime'"),
            (String::new(), "Lemon Lime".to_string())
        );
    }

    #[test]
    fn test_segment_removed_without_padding() {
        // Neighbouring text is joined, not split by a space
        assert_eq!(
            extract_nickname("Hoya'Krimson'Queen"),
            ("HoyaQueen".to_string(), "Krimson".to_string())
        );
    }
}
