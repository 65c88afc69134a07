//! Authentication errors.

use crate::CredentialError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A form field failed validation.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// No token stored; the user must log in.
    #[error("not logged in")]
    NotLoggedIn,

    /// Insufficient permissions.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Token storage failed.
    #[error("token storage error: {0}")]
    Storage(#[from] bazaar_cache::CacheError),
}

impl AuthError {
    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::InsufficientPermissions)
    }
}
