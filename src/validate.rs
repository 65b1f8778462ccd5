//! Policy checks layered on top of parsing.
//!
//! The parser accepts any menu that is well formed; whether a menu is good
//! enough to generate a site from is decided here. Both checks are pure and
//! report every problem they find rather than stopping at the first one.

use crate::config::ProjectConfig;
use crate::types::{Page, walk_pages};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9]+([-.][a-z0-9]+)*\.[a-z]{2,}$").expect("valid domain regex")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const BUSINESS_NAME_CHARS: std::ops::RangeInclusive<usize> = 2..=100;
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 9..=15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("menu must have at least {min} pages, found {found}")]
    TooFewPages { min: usize, found: usize },
    #[error("invalid project settings: {}", join_fields(.0))]
    Project(Vec<FieldError>),
}

/// One invalid `[project]` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project.{}: {}", self.field, self.message)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Require at least `min` pages in the tree, counting every level.
pub fn validate_menu_structure(pages: &[Page], min: usize) -> Result<(), ValidationError> {
    let found = walk_pages(pages).count();
    if found < min {
        return Err(ValidationError::TooFewPages { min, found });
    }
    Ok(())
}

/// Check the format of every `[project]` field that is set.
///
/// - business name: 2 to 100 characters after trimming
/// - domain: `name.tld` with dot or hyphen separated labels
/// - email: `local@host.tld`
/// - phone: 9 to 15 digits once spaces, hyphens and parentheses are removed;
///   a leading `+` is allowed
pub fn validate_project(project: &ProjectConfig) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if let Some(name) = project.business_name.as_deref() {
        let len = name.trim().chars().count();
        if !BUSINESS_NAME_CHARS.contains(&len) {
            errors.push(FieldError {
                field: "business_name",
                message: format!(
                    "must be {} to {} characters, got {len}",
                    BUSINESS_NAME_CHARS.start(),
                    BUSINESS_NAME_CHARS.end()
                ),
            });
        }
    }

    if let Some(domain) = project.domain.as_deref()
        && !DOMAIN.is_match(domain)
    {
        errors.push(FieldError {
            field: "domain",
            message: format!("{domain:?} is not a domain like example.com"),
        });
    }

    if let Some(email) = project.email.as_deref()
        && !EMAIL.is_match(email)
    {
        errors.push(FieldError {
            field: "email",
            message: format!("{email:?} is not an email address"),
        });
    }

    if let Some(phone) = project.phone.as_deref()
        && !is_phone_number(phone)
    {
        errors.push(FieldError {
            field: "phone",
            message: format!(
                "{phone:?} must have {} to {} digits",
                PHONE_DIGITS.start(),
                PHONE_DIGITS.end()
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Project(errors))
    }
}

fn is_phone_number(phone: &str) -> bool {
    let trimmed = phone.trim();
    let number = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = number
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();
    PHONE_DIGITS.contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ParseOptions, parse_menu};

    fn pages(content: &str) -> Vec<Page> {
        parse_menu(content, &ParseOptions::default())
            .unwrap()
            .combined
    }

    fn project(
        business_name: Option<&str>,
        domain: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> ProjectConfig {
        ProjectConfig {
            business_name: business_name.map(String::from),
            domain: domain.map(String::from),
            email: email.map(String::from),
            phone: phone.map(String::from),
        }
    }

    fn failing_fields(result: Result<(), ValidationError>) -> Vec<&'static str> {
        match result {
            Err(ValidationError::Project(errors)) => errors.iter().map(|e| e.field).collect(),
            other => panic!("expected project errors, got {other:?}"),
        }
    }

    // =========================================================================
    // Menu structure
    // =========================================================================

    #[test]
    fn single_page_menu_is_too_small() {
        let err = validate_menu_structure(&pages("Inicio\n"), 2).unwrap_err();
        assert_eq!(err, ValidationError::TooFewPages { min: 2, found: 1 });
        assert_eq!(err.to_string(), "menu must have at least 2 pages, found 1");
    }

    #[test]
    fn nested_pages_count_toward_minimum() {
        assert!(validate_menu_structure(&pages("Servicios (*)\n  Diseño\n"), 2).is_ok());
    }

    #[test]
    fn minimum_is_configurable() {
        let tree = pages("A\nB\nC\n");
        assert!(validate_menu_structure(&tree, 3).is_ok());
        assert!(validate_menu_structure(&tree, 4).is_err());
        assert!(validate_menu_structure(&[], 0).is_ok());
    }

    // =========================================================================
    // Project settings
    // =========================================================================

    #[test]
    fn empty_project_is_valid() {
        assert!(validate_project(&ProjectConfig::default()).is_ok());
    }

    #[test]
    fn valid_project() {
        let config = project(
            Some("Lar Living"),
            Some("lar-living.com"),
            Some("info@larliving.com"),
            Some("+34 (93) 123-45-67"),
        );
        assert!(validate_project(&config).is_ok());
    }

    #[test]
    fn business_name_length() {
        let long = "x".repeat(101);
        assert_eq!(
            failing_fields(validate_project(&project(Some(" A "), None, None, None))),
            vec!["business_name"]
        );
        assert_eq!(
            failing_fields(validate_project(&project(Some(&long), None, None, None))),
            vec!["business_name"]
        );
        assert!(validate_project(&project(Some("Ñu"), None, None, None)).is_ok());
    }

    #[test]
    fn domain_format() {
        for ok in ["example.com", "sub.example.co", "my-shop.es", "EXAMPLE.COM"] {
            assert!(validate_project(&project(None, Some(ok), None, None)).is_ok(), "{ok}");
        }
        for bad in ["example", "http://example.com", "-example.com", "example.c", "ex ample.com"] {
            assert!(validate_project(&project(None, Some(bad), None, None)).is_err(), "{bad}");
        }
    }

    #[test]
    fn email_format() {
        assert!(validate_project(&project(None, None, Some("a@b.cd"), None)).is_ok());
        for bad in ["a@b", "ab.cd", "a b@c.de", "a@@b.cd"] {
            assert!(validate_project(&project(None, None, Some(bad), None)).is_err(), "{bad}");
        }
    }

    #[test]
    fn phone_digit_count() {
        assert!(is_phone_number("600 000 000"));
        assert!(is_phone_number("+34 600-000-000"));
        assert!(!is_phone_number("12345678"));
        assert!(!is_phone_number("1234567890123456"));
        assert!(!is_phone_number("600 000 00x"));
        assert!(!is_phone_number("++34600000000"));
    }

    #[test]
    fn every_bad_field_is_reported() {
        let config = project(Some("X"), Some("nope"), Some("nope"), Some("123"));
        let result = validate_project(&config);
        let message = result.clone().unwrap_err().to_string();
        assert_eq!(
            failing_fields(result),
            vec!["business_name", "domain", "email", "phone"]
        );
        assert!(message.starts_with("invalid project settings: project.business_name:"));
    }
}
