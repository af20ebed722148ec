//! Field-level parsers for raw dataset cells.

use chrono::{Datelike, NaiveDate};

/// Parse a numeric cell, yielding `NaN` when it is empty or malformed.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a money amount. Negative amounts are invalid and become `NaN`.
pub fn parse_amount(raw: &str) -> f64 {
    let value = parse_number(raw);
    if value < 0.0 {
        f64::NAN
    } else {
        value
    }
}

/// Split a multi-valued cell such as `"Action, Drama"`.
///
/// Tokens are trimmed, empty tokens dropped, and repeated values removed
/// while keeping the first occurrence.
///
/// # Examples
///
/// ```
/// use movie_dash::parsing::fields::split_multi_valued;
///
/// assert_eq!(
///     split_multi_valued("Action, Drama,  Action ,"),
///     vec!["Action".to_string(), "Drama".to_string()]
/// );
/// ```
pub fn split_multi_valued(raw: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() || values.iter().any(|v| v == token) {
            continue;
        }
        values.push(token.to_string());
    }
    values
}

/// Extract the release year from a `YYYY-MM-DD` date.
///
/// Falls back to the leading year token for partial dates such as `"1999"`
/// or `"1999-07"`.
pub fn parse_release_year(date: &str) -> Option<i32> {
    let date = date.trim();
    let head = date.split(['-', '/']).next()?;
    // chrono's %Y also accepts "94", so the year token is checked first
    if head.len() != 4 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }
    head.parse::<i32>().ok()
}

/// Parse a `release_year` column value (`"1999"` or `"1999.0"`).
pub fn parse_year_column(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 7.5 "), 7.5);
        assert!(parse_number("").is_nan());
        assert!(parse_number("n/a").is_nan());
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        assert_eq!(parse_amount("1000000"), 1_000_000.0);
        assert!(parse_amount("-5").is_nan());
        assert_eq!(parse_amount("0"), 0.0);
    }

    #[test]
    fn test_split_multi_valued() {
        assert!(split_multi_valued("").is_empty());
        assert_eq!(
            split_multi_valued("Tom Hanks, Meg Ryan"),
            vec!["Tom Hanks", "Meg Ryan"]
        );
        assert_eq!(split_multi_valued("Drama,Drama"), vec!["Drama"]);
    }

    #[test]
    fn test_parse_release_year() {
        assert_eq!(parse_release_year("1994-09-23"), Some(1994));
        assert_eq!(parse_release_year("1994"), Some(1994));
        assert_eq!(parse_release_year("1994-09"), Some(1994));
        assert_eq!(parse_release_year("94-09-23"), None);
        assert_eq!(parse_release_year(""), None);
    }

    #[test]
    fn test_parse_year_column() {
        assert_eq!(parse_year_column("2001"), Some(2001));
        assert_eq!(parse_year_column("2001.0"), Some(2001));
        assert_eq!(parse_year_column("2001.5"), None);
        assert_eq!(parse_year_column(""), None);
    }
}
