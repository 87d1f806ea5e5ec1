use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Validate a task title: must contain something other than whitespace.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".into()));
    }
    Ok(())
}

/// Blank descriptions are stored as absent.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Parse a due date in `YYYY-MM-DD` form.
pub fn parse_due_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::Validation(format!("invalid due date '{s}': expected YYYY-MM-DD")))
}

/// Resolve `name` against the language menu, ignoring case.
/// Returns the menu's spelling.
pub fn validate_language<'a>(languages: &'a [String], name: &str) -> Result<&'a str> {
    languages
        .iter()
        .find(|l| l.eq_ignore_ascii_case(name.trim()))
        .map(String::as_str)
        .ok_or_else(|| {
            Error::Validation(format!(
                "unsupported language '{name}': choose one of {}",
                languages.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_titles() {
        assert!(validate_title("Buy milk").is_ok());
        assert!(validate_title("  padded  ").is_ok());
        assert!(validate_title("x").is_ok());
    }

    #[test]
    fn invalid_titles() {
        assert!(validate_title("").unwrap_err().is_validation());
        assert!(validate_title("   ").unwrap_err().is_validation());
        assert!(validate_title("\t\n").unwrap_err().is_validation());
    }

    #[test]
    fn blank_descriptions_become_none() {
        assert_eq!(normalize_description(None), None);
        assert_eq!(normalize_description(Some("")), None);
        assert_eq!(normalize_description(Some("  ")), None);
        assert_eq!(
            normalize_description(Some(" two pints ")).as_deref(),
            Some("two pints")
        );
    }

    #[test]
    fn due_dates() {
        assert_eq!(
            parse_due_date("2025-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert!(parse_due_date("10/01/2025").is_err());
        assert!(parse_due_date("2025-02-30").is_err());
        assert!(parse_due_date("").is_err());
    }

    #[test]
    fn languages_match_case_insensitively() {
        let menu = vec!["French".to_string(), "Chinese (Simplified)".to_string()];
        assert_eq!(validate_language(&menu, "french").unwrap(), "French");
        assert_eq!(
            validate_language(&menu, "chinese (simplified)").unwrap(),
            "Chinese (Simplified)"
        );
        assert!(validate_language(&menu, "Klingon").unwrap_err().is_validation());
    }
}
