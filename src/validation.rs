//! Field rules shared by the auth and user handlers.
//!
//! Request bodies keep each field as a raw JSON value so that a wrong type is
//! reported like any other violation. Each check pushes a message into the
//! caller's violation list and returns the normalized value when the field is
//! acceptable, so a request can report every problem at once.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 256;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 255;
/// bcrypt ignores everything past this many bytes of input.
pub const PASSWORD_MAX_BYTES: usize = 72;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn required<'a>(field: &str, value: Option<&'a Value>, errors: &mut Vec<String>) -> Option<&'a str> {
    match value {
        None | Some(Value::Null) => {
            errors.push(format!("{field} is required"));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(format!("{field} is required"));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(format!("{field} must be a string"));
            None
        }
    }
}

/// Trimmed display name, 2..=256 characters.
pub(crate) fn name(value: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    let name = required("name", value, errors)?.trim();
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        errors.push(format!(
            "name must be between {NAME_MIN} and {NAME_MAX} characters"
        ));
        return None;
    }
    Some(name.to_string())
}

/// Trimmed, lowercased email.
pub(crate) fn email(value: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    let email = required("email", value, errors)?.trim().to_lowercase();
    if !is_valid_email(&email) {
        errors.push("email must be a valid email".into());
        return None;
    }
    Some(email)
}

/// Length is measured on the trimmed password; the value itself is kept
/// verbatim for hashing.
pub(crate) fn password(value: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    let password = required("password", value, errors)?;
    let len = password.trim().chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        errors.push(format!(
            "password must be between {PASSWORD_MIN} and {PASSWORD_MAX} characters"
        ));
        return None;
    }
    if password.len() > PASSWORD_MAX_BYTES {
        errors.push(format!(
            "password must be at most {PASSWORD_MAX_BYTES} bytes"
        ));
        return None;
    }
    Some(password.to_string())
}
