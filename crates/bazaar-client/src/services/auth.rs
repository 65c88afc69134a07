//! Login, registration, password reset and logout.

use super::Api;
use crate::reconcile::{Reconciler, Reconciliation};
use crate::routes::Route;
use crate::store::{Action, Store};
use crate::wire::{EmailRequest, LoginResponse};
use crate::ClientError;
use bazaar_auth::{Credentials, PasswordReset, Registration, Role};
use bazaar_data::FetchError;
use std::sync::Arc;
use tracing::instrument;

/// Shown when the server rejects a login without saying why.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password.";
/// Shown after a password reset request unless the server says otherwise.
pub const RESET_LINK_SENT_MESSAGE: &str =
    "If an account exists for this email, a password reset link has been sent.";

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub role: Role,
    /// `None` when the cart hand-off failed; the cart error is in the store.
    pub reconciliation: Option<Reconciliation>,
    /// Where to navigate next.
    pub redirect: Route,
}

/// Auth endpoints plus the session bookkeeping around them.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: Api,
    store: Store,
    reconciler: Arc<Reconciler>,
}

impl AuthService {
    pub fn new(api: Api, store: Store, reconciler: Arc<Reconciler>) -> Self {
        Self {
            api,
            store,
            reconciler,
        }
    }

    /// Log in, persist the token and hand the guest cart to the server.
    ///
    /// Returns only after the cart hand-off has finished, so the caller can
    /// navigate straight to the redirect.
    #[instrument(skip_all, fields(username = %credentials.username.trim()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ClientError> {
        let credentials = credentials.validate()?;

        self.store.emit(Action::LoginStarted);
        let response = match self.request_login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.store.emit(Action::LoginFailed(login_failure_message(&e)));
                return Err(e);
            }
        };

        let role = Role::from_login(response.role.as_deref());
        // Only a guest cart is handed over; a logged-in cart is already the
        // server's.
        let local_items = self.store.select(|s| {
            if s.auth.is_logged_in {
                Vec::new()
            } else {
                s.cart.cart.items().to_vec()
            }
        });
        self.store.emit(Action::LoginSucceeded { role });
        tracing::info!(%role, "logged in");

        let reconciliation = match self.reconciler.on_login_succeeded(local_items).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::warn!(error = %e, "cart reconciliation failed");
                None
            }
        };

        Ok(LoginOutcome {
            role,
            reconciliation,
            redirect: Route::home(),
        })
    }

    async fn request_login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let request = self.api.http().post("/auth/login").json(credentials)?;
        let response: LoginResponse = self.api.send(request).await?.json()?;
        if response.token.trim().is_empty() {
            return Err(FetchError::ParseError("login response has no token".to_string()).into());
        }
        self.api.tokens().save(&response.token)?;
        Ok(response)
    }

    /// Create an account. On success the user is sent to the login page.
    #[instrument(skip_all, fields(email = %registration.email.trim()))]
    pub async fn register(&self, registration: &Registration) -> Result<Route, ClientError> {
        let registration = registration.validate().map_err(ClientError::Registration)?;
        let request = self.api.http().post("/auth/register").json(&registration)?;
        self.api.send(request).await?;
        tracing::info!("registered");
        Ok(Route::Login)
    }

    /// Ask for a password reset link. Returns the message to show.
    #[instrument(skip_all)]
    pub async fn forgot_password(&self, reset: &PasswordReset) -> Result<String, ClientError> {
        let reset = reset.validate()?;
        let request = self
            .api
            .http()
            .post("/auth/forgot-password")
            .json(&EmailRequest {
                email: &reset.email,
            })?;
        let response = self.api.send(request).await?;
        let message = response
            .json::<serde_json::Value>()
            .ok()
            .and_then(|body| body.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| RESET_LINK_SENT_MESSAGE.to_string());
        Ok(message)
    }

    /// Forget the token and drop back to a guest session with an empty cart.
    #[instrument(skip_all)]
    pub fn logout(&self) -> Result<Route, ClientError> {
        self.api.tokens().clear()?;
        self.store.emit(Action::LoggedOut);
        tracing::info!("logged out");
        Ok(Route::home())
    }
}

/// Message stored on the session after a failed login.
fn login_failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Fetch(e) if matches!(e.status(), Some(400 | 401 | 403)) => e
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| INVALID_LOGIN_MESSAGE.to_string()),
        other => other.display_message(),
    }
}
