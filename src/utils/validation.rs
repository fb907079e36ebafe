use validator::ValidateEmail;

use crate::error::{Error, Result};

pub fn require_field(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    require_field(email, "email")?;
    if !email.validate_email() {
        return Err(Error::BadRequest("email format is invalid".to_string()));
    }
    Ok(())
}

/// Loose phone check: at least 7 digits, only digits plus common
/// punctuation. Numbers arrive from a public form in many local formats.
pub fn validate_mobile(mobile: &str) -> Result<()> {
    require_field(mobile, "mobile")?;
    let digits = mobile.chars().filter(|c| c.is_ascii_digit()).count();
    let well_formed = mobile
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if digits < 7 || !well_formed {
        return Err(Error::BadRequest("mobile format is invalid".to_string()));
    }
    Ok(())
}
