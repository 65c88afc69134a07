//! Auth slice of client state.

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Progress of the last login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Failed,
    Succeeded,
}

/// What every gated view reads to decide what to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuthSession {
    /// Whether a user is logged in; selects the authoritative cart.
    pub is_logged_in: bool,
    /// Role of the current user, `Guest` when logged out.
    pub role: Role,
    /// Progress of the last login attempt.
    pub status: AuthStatus,
    /// Message from the last failed attempt.
    pub error: Option<String>,
    /// Incremented on every successful login; never reset.
    pub login_epoch: u64,
}

impl AuthSession {
    /// A session restored from a persisted token.
    ///
    /// The role is not known until the server says so, so restored sessions
    /// start as `Customer`.
    pub fn restored() -> Self {
        Self {
            is_logged_in: true,
            role: Role::Customer,
            ..Self::default()
        }
    }

    /// A login request was sent.
    pub fn begin_login(&mut self) {
        self.status = AuthStatus::Loading;
        self.error = None;
    }

    /// The server accepted the credentials.
    pub fn login_succeeded(&mut self, role: Role) {
        self.is_logged_in = true;
        self.role = role;
        self.status = AuthStatus::Succeeded;
        self.error = None;
        self.login_epoch += 1;
    }

    /// The server rejected the credentials or could not be reached.
    pub fn login_failed(&mut self, message: impl Into<String>) {
        self.is_logged_in = false;
        self.role = Role::Guest;
        self.status = AuthStatus::Failed;
        self.error = Some(message.into());
    }

    /// Drop back to a guest session.
    pub fn logout(&mut self) {
        *self = Self {
            login_epoch: self.login_epoch,
            ..Self::default()
        };
    }

    /// Whether the current user may open admin views.
    pub fn is_admin(&self) -> bool {
        self.is_logged_in && self.role.has_permission(Role::Admin)
    }

    /// Whether a login request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_lifecycle() {
        let mut session = AuthSession::default();
        assert!(!session.is_logged_in);
        assert_eq!(session.role, Role::Guest);

        session.begin_login();
        assert!(session.is_loading());

        session.login_succeeded(Role::Admin);
        assert!(session.is_logged_in);
        assert!(session.is_admin());
        assert_eq!(session.login_epoch, 1);

        session.logout();
        assert!(!session.is_logged_in);
        assert_eq!(session.role, Role::Guest);
        assert_eq!(session.status, AuthStatus::Idle);
        assert_eq!(session.login_epoch, 1);
    }

    #[test]
    fn test_failed_login_keeps_epoch() {
        let mut session = AuthSession::default();
        session.begin_login();
        session.login_failed("Invalid username or password");

        assert!(!session.is_logged_in);
        assert_eq!(session.status, AuthStatus::Failed);
        assert_eq!(session.error.as_deref(), Some("Invalid username or password"));
        assert_eq!(session.login_epoch, 0);
    }

    #[test]
    fn test_begin_login_clears_previous_error() {
        let mut session = AuthSession::default();
        session.login_failed("nope");
        session.begin_login();
        assert_eq!(session.error, None);
    }

    #[test]
    fn test_customer_is_not_admin() {
        let mut session = AuthSession::default();
        session.login_succeeded(Role::Customer);
        assert!(!session.is_admin());
    }
}
