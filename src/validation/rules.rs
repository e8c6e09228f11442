//! Reusable field checks shared by every form.

use std::sync::LazyLock;

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,18}[0-9]$").expect("phone pattern is valid"));

/// Fails when the value is empty after trimming.
pub fn check_required(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", label));
    }
    Ok(())
}

pub fn check_email(value: &str) -> Result<(), String> {
    check_required("Email", value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

pub fn check_phone(value: &str) -> Result<(), String> {
    if !PHONE_RE.is_match(value.trim()) {
        return Err("Please enter a valid phone number".to_string());
    }
    Ok(())
}

/// Password policy: at least [`MIN_PASSWORD_LEN`] characters with at least
/// one letter and one digit.
pub fn check_password(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Password is required".to_string());
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    let has_letter = value.chars().any(char::is_alphabetic);
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err("Password must contain letters and numbers".to_string());
    }
    Ok(())
}
