//! Storefront client for the Bazaar shop backend.
//!
//! This crate provides:
//! - `Store` - Application state with a pure reducer and change notification
//! - `CartFlow` - Cart operations against the guest or server cart
//! - `Reconciler` - One-shot guest cart hand-off after login
//! - REST services for auth, catalog, reviews and the admin customer list
//! - `Route` / `guard` - Navigation targets and role gating
//! - View models for the cart, catalog, customer table and reviews
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_client::prelude::*;
//!
//! let client = BazaarClient::from_config(ClientConfig::default().with_env())?;
//! client.catalog().categories().await?;
//!
//! let outcome = client
//!     .auth()
//!     .login(&Credentials::new("asha", "secret"))
//!     .await?;
//! println!("cart after login: {:?}", outcome.reconciliation);
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod routes;
pub mod sequencer;
pub mod services;
pub mod store;
pub mod views;

mod wire;

pub use backend::{CartBackend, CartFlow, LocalBackend, RemoteBackend};
pub use client::{BazaarClient, GUEST_CART_KEY};
pub use config::{ClientConfig, API_URL_ENV};
pub use error::{ClientError, ErrorKind};
pub use reconcile::{Reconciler, Reconciliation};
pub use routes::{guard, Gated, Route};
pub use sequencer::MutationSequencer;
pub use store::{Action, AppState, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        guard, Action, AppState, BazaarClient, CartFlow, ClientConfig, ClientError, ErrorKind,
        Gated, Reconciliation, Route, Store,
    };
    pub use bazaar_auth::{AuthSession, Credentials, PasswordReset, Registration, Role};
    pub use bazaar_commerce::prelude::*;
}
