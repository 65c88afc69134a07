//! Client error type and the messages shown for it.

use bazaar_auth::{AuthError, CredentialError};
use bazaar_cache::CacheError;
use bazaar_commerce::review::ReviewValidationError;
use bazaar_commerce::CommerceError;
use bazaar_data::FetchError;
use thiserror::Error;

/// Shown for 401/403 responses and missing tokens.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
/// Shown when a review is posted without a valid login.
pub const LOGIN_TO_REVIEW_MESSAGE: &str = "Please log in to submit a review.";
/// Shown for network and unexpected errors.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Error categories, each with its own display rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected before any network call.
    Validation,
    /// The server refused the credentials, or none were available.
    Unauthorized,
    /// Transport failures, server errors, bad payloads.
    Network,
}

/// Errors returned by client services and cart backends.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A login or password-reset form field is invalid.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// One or more registration fields are invalid.
    #[error("invalid registration: {}", join_messages(.0))]
    Registration(Vec<CredentialError>),

    /// One or more review fields are invalid.
    #[error("invalid review: {}", join_messages(.0))]
    Review(Vec<ReviewValidationError>),

    /// A cart or pricing rule was violated.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Review submission needs a logged-in user.
    #[error("login required")]
    LoginRequired,

    /// HTTP request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Token or session problem.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Persisted storage failed.
    #[error(transparent)]
    Storage(#[from] CacheError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

fn join_messages<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ClientError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Credentials(_)
            | ClientError::Registration(_)
            | ClientError::Review(_)
            | ClientError::Commerce(_) => ErrorKind::Validation,
            ClientError::LoginRequired => ErrorKind::Unauthorized,
            ClientError::Fetch(e) if e.is_unauthorized() => ErrorKind::Unauthorized,
            ClientError::Auth(AuthError::Credentials(_)) => ErrorKind::Validation,
            ClientError::Auth(AuthError::NotLoggedIn | AuthError::InsufficientPermissions) => {
                ErrorKind::Unauthorized
            }
            ClientError::Fetch(_)
            | ClientError::Auth(AuthError::Storage(_))
            | ClientError::Storage(_)
            | ClientError::Config(_) => ErrorKind::Network,
        }
    }

    /// Message to store in state and show to the user.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::LoginRequired => LOGIN_TO_REVIEW_MESSAGE.to_string(),
            ClientError::Registration(errors) => join_messages(errors),
            ClientError::Review(errors) => join_messages(errors),
            _ => match self.kind() {
                ErrorKind::Validation => self.to_string(),
                ErrorKind::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
                ErrorKind::Network => GENERIC_ERROR_MESSAGE.to_string(),
            },
        }
    }

    /// Review field errors, if this is a review validation failure.
    pub fn review_errors(&self) -> &[ReviewValidationError] {
        match self {
            ClientError::Review(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message() {
        for status in [401, 403] {
            let err = ClientError::from(FetchError::HttpError {
                status,
                message: "jwt expired".to_string(),
            });
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
            assert_eq!(err.display_message(), SESSION_EXPIRED_MESSAGE);
        }

        let err = ClientError::from(AuthError::NotLoggedIn);
        assert_eq!(err.display_message(), SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn test_generic_message() {
        let err = ClientError::from(FetchError::HttpError {
            status: 500,
            message: "stack trace".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.display_message(), GENERIC_ERROR_MESSAGE);

        let err = ClientError::from(FetchError::Timeout);
        assert_eq!(err.display_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_validation_messages_are_field_messages() {
        let err = ClientError::from(CredentialError::EmptyPassword);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.display_message(), "Password is required.");

        let err = ClientError::Review(vec![ReviewValidationError::MissingRating]);
        assert_eq!(err.display_message(), "Please select a rating.");
        assert_eq!(err.review_errors().len(), 1);
    }

    #[test]
    fn test_login_required_message() {
        let err = ClientError::LoginRequired;
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.display_message(), LOGIN_TO_REVIEW_MESSAGE);
    }
}
