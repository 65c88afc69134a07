//! Authentication module for the Bazaar storefront client.
//!
//! Holds the auth slice of client state (login flag, role, request status,
//! error), credential validation for the login/register/forgot-password
//! forms, and persistence of the bearer token.

mod credentials;
mod error;
mod role;
mod session;
mod token;

pub use credentials::{CredentialError, Credentials, FormField, PasswordReset, Registration};
pub use error::AuthError;
pub use role::Role;
pub use session::{AuthSession, AuthStatus};
pub use token::{TokenStore, DEFAULT_TOKEN_KEY};
