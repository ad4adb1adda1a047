// --- File: crates/summit_registration/src/validation.rs ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RegistrationError;
use crate::models::NewRegistration;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern must compile")
});

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

impl NewRegistration {
    /// Validate raw input. Never touches storage.
    ///
    /// Surrounding whitespace is trimmed from `name` and `email`; the message
    /// is kept as given.
    pub fn validate(name: &str, email: &str, message: &str) -> Result<Self, RegistrationError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(RegistrationError::MissingFields);
        }
        if !is_valid_email(email) {
            return Err(RegistrationError::InvalidEmail);
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}
