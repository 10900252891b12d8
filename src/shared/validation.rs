use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

lazy_static! {
    /// At least one lowercase ASCII letter
    pub static ref LOWERCASE_REGEX: Regex = Regex::new(r"[a-z]").unwrap();

    /// At least one uppercase ASCII letter
    pub static ref UPPERCASE_REGEX: Regex = Regex::new(r"[A-Z]").unwrap();

    /// At least one digit
    pub static ref DIGIT_REGEX: Regex = Regex::new(r"\d").unwrap();

    /// At least one character that is not an ASCII letter or digit
    /// - Valid: "!", "#", " ", "é"
    /// - Invalid: "a", "Z", "7"
    pub static ref SYMBOL_REGEX: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
}

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password strength rule for new accounts: at least 8 characters with a
/// lowercase letter, an uppercase letter, a digit and a symbol.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && LOWERCASE_REGEX.is_match(password)
        && UPPERCASE_REGEX.is_match(password)
        && DIGIT_REGEX.is_match(password)
        && SYMBOL_REGEX.is_match(password)
}

/// Required-field rule: whitespace-only input counts as missing.
///
/// Use with `#[validate(custom(function = "validate_not_blank", message = "..."))]`.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Required email address: blank input reports only the required message,
/// anything else must be a well-formed address.
pub fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::Borrowed("Email is required."))
        );
    }
    if !value.validate_email() {
        return Err(ValidationError::new("email")
            .with_message(Cow::Borrowed("Please enter a valid email address.")));
    }
    Ok(())
}

/// Field- and form-level messages shown next to a re-rendered form.
///
/// Field keys are the form DTO's field names. Form-level messages are not tied
/// to any single input (e.g. "Invalid email or password.").
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormErrors {
    pub form: Vec<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single field error
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_field(name, message);
        errors
    }

    /// Single form-level error
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_form(message);
        errors
    }

    pub fn add_field(&mut self, name: &str, message: impl Into<String>) {
        self.fields
            .entry(name.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Messages recorded for a field (empty if none)
    #[cfg(test)]
    pub fn for_field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn messages(&self) -> impl Iterator<Item = &String> {
        self.form.iter().chain(self.fields.values().flatten())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.messages().map(String::as_str).collect();
        write!(f, "{}", messages.join(" "))
    }
}

/// `categoryId` -> `category_id`; snake_case input is returned unchanged
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Field keys are normalized to snake_case so camelCase form names map onto
/// the Rust field names the views look up.
impl From<ValidationErrors> for FormErrors {
    fn from(e: ValidationErrors) -> Self {
        let mut errors = FormErrors::new();
        for (field, field_errors) in e.field_errors() {
            let field = to_snake_case(&field);
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid.", field));
                errors.add_field(&field, message);
            }
        }
        errors
    }
}
