//! Login, registration and password-reset form validation.
//!
//! Everything here runs before any network call; a failing form never
//! reaches the auth service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Auth form fields, for per-field error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Username,
    Password,
    Name,
    Email,
    Mobile,
}

/// A form field failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Username is required.")]
    EmptyUsername,

    #[error("Password is required.")]
    EmptyPassword,

    #[error("Name is required.")]
    EmptyName,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least 6 characters.")]
    WeakPassword,

    #[error("Please enter a valid 10-digit mobile number.")]
    InvalidMobile,
}

impl CredentialError {
    /// The field this error belongs to.
    pub fn field(&self) -> FormField {
        match self {
            CredentialError::EmptyUsername => FormField::Username,
            CredentialError::EmptyPassword | CredentialError::WeakPassword => FormField::Password,
            CredentialError::EmptyName => FormField::Name,
            CredentialError::InvalidEmail => FormField::Email,
            CredentialError::InvalidMobile => FormField::Mobile,
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !email.chars().any(char::is_whitespace)
}

fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.bytes().all(|b| b.is_ascii_digit())
}

/// Login form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-blank. The username is trimmed.
    pub fn validate(&self) -> Result<Credentials, CredentialError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(CredentialError::EmptyUsername);
        }
        if self.password.trim().is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        Ok(Credentials::new(username, self.password.clone()))
    }
}

/// Registration form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
}

impl Registration {
    /// Check every field, returning all failures in form order.
    pub fn validate(&self) -> Result<Registration, Vec<CredentialError>> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        let email = self.email.trim();
        let mobile = self.mobile.trim();

        if name.is_empty() {
            errors.push(CredentialError::EmptyName);
        }
        if !is_valid_email(email) {
            errors.push(CredentialError::InvalidEmail);
        }
        if !is_valid_mobile(mobile) {
            errors.push(CredentialError::InvalidMobile);
        }
        if self.password.is_empty() {
            errors.push(CredentialError::EmptyPassword);
        } else if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(CredentialError::WeakPassword);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Registration {
            name: name.to_string(),
            email: email.to_string(),
            mobile: mobile.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Forgot-password form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub email: String,
}

impl PasswordReset {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<PasswordReset, CredentialError> {
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(CredentialError::InvalidEmail);
        }
        Ok(PasswordReset::new(email))
    }
}
