//! Field-level checks shared by the request DTOs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{auth::password::check_policy, error::ValidationErrors};

pub const EMAIL_MAX: usize = 180;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref CATEGORY_SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    static ref TAG_SLUG_RE: Regex = Regex::new(r"^[a-z0-9\-]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_category_slug(slug: &str) -> bool {
    CATEGORY_SLUG_RE.is_match(slug)
}

pub fn is_valid_tag_slug(slug: &str) -> bool {
    TAG_SLUG_RE.is_match(slug)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Records "required", "too short" and "too long" for a trimmed text field.
/// Lengths are counted in characters.
pub fn check_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.add(field, format!("{label} is required."));
        return;
    }
    if len < min {
        errors.add(field, format!("{label} is too short."));
    }
    if let Some(max) = max {
        if len > max {
            errors.add(field, format!("{label} is too long."));
        }
    }
}

pub fn check_email(errors: &mut ValidationErrors, field: &'static str, email: &str) {
    if email.is_empty() {
        errors.add(field, "Email is required.");
    } else if !is_valid_email(email) {
        errors.add(field, "Please enter a valid email.");
    } else if email.chars().count() > EMAIL_MAX {
        errors.add(field, "Email is too long.");
    }
}

/// New password plus its repetition.
pub fn check_new_password(
    errors: &mut ValidationErrors,
    field: &'static str,
    password: &str,
    repeated: &str,
) {
    if let Err(violation) = check_policy(password) {
        errors.add(field, violation.to_string());
    }
    if password != repeated {
        errors.add(field, "Passwords do not match.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(is_valid_email("cook@example.com"));
        assert!(!is_valid_email("cook@example"));
        assert!(!is_valid_email("no spaces@example.com"));
        assert_eq!(normalize_email("  Cook@Example.COM "), "cook@example.com");
    }

    #[test]
    fn category_slug_rejects_double_and_edge_hyphens() {
        assert!(is_valid_category_slug("main-dishes"));
        assert!(is_valid_category_slug("soups2"));
        assert!(!is_valid_category_slug("-soups"));
        assert!(!is_valid_category_slug("soups-"));
        assert!(!is_valid_category_slug("main--dishes"));
        assert!(!is_valid_category_slug("Main"));
    }

    #[test]
    fn tag_slug_allows_any_hyphens() {
        assert!(is_valid_tag_slug("gluten-free"));
        assert!(is_valid_tag_slug("-odd-"));
        assert!(!is_valid_tag_slug("Vegan"));
        assert!(!is_valid_tag_slug("with space"));
    }

    #[test]
    fn text_length_messages() {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "title", "Title", "  ", 3, Some(255));
        check_text(&mut errors, "content", "Content", "short", 10, None);
        check_text(&mut errors, "name", "Name", &"x".repeat(101), 2, Some(100));
        assert_eq!(errors.get("title").unwrap()[0], "Title is required.");
        assert_eq!(errors.get("content").unwrap()[0], "Content is too short.");
        assert_eq!(errors.get("name").unwrap()[0], "Name is too long.");
    }

    #[test]
    fn new_password_rules() {
        let mut errors = ValidationErrors::new();
        check_new_password(&mut errors, "password", "secret1", "secret1");
        assert!(errors.is_empty());

        check_new_password(&mut errors, "password", "abc", "abd");
        let msgs = errors.get("password").unwrap();
        assert_eq!(msgs.len(), 2);
        assert!(msgs[1].contains("do not match"));
    }
}
