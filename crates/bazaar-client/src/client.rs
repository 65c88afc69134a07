//! The assembled client.

use crate::backend::{CartFlow, RemoteBackend};
use crate::config::ClientConfig;
use crate::reconcile::Reconciler;
use crate::sequencer::MutationSequencer;
use crate::services::{
    Api, AuthService, CartService, CatalogService, CustomerService, ReviewService,
};
use crate::store::{Action, AppState, Store};
use crate::ClientError;
use bazaar_auth::{AuthSession, TokenStore};
use bazaar_cache::Cache;
use bazaar_commerce::Cart;
use bazaar_data::{FetchClient, ReqwestTransport, Transport};
use std::sync::Arc;

/// Storage key of the guest cart between runs.
pub const GUEST_CART_KEY: &str = "guest_cart";

/// Store, services and cart flow wired to one backend.
///
/// Cheap to clone; clones share the store, storage and transport.
#[derive(Debug, Clone)]
pub struct BazaarClient {
    config: ClientConfig,
    store: Store,
    cache: Cache,
    api: Api,
    auth: AuthService,
    catalog: CatalogService,
    cart: CartFlow,
    reviews: ReviewService,
    customers: CustomerService,
}

impl BazaarClient {
    /// Build a client over HTTP, with storage from `storage_path` or in memory.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let cache = match &config.storage_path {
            Some(dir) => Cache::open_dir(dir)?,
            None => Cache::open_memory(),
        };
        let transport = Arc::new(ReqwestTransport::new(config.timeout())?);
        Self::with_transport(config, transport, cache)
    }

    /// Build a client over any transport and storage.
    ///
    /// A stored token restores a logged-in customer session.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        cache: Cache,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        let currency = config.currency()?;

        let http = FetchClient::new(transport)
            .with_base_url(config.api_base_url.clone())
            .with_default_header("Accept", "application/json");
        let tokens = TokenStore::with_key(cache.clone(), config.token_key.clone());
        let auth_session = match tokens.load()? {
            Some(_) => AuthSession::restored(),
            None => AuthSession::default(),
        };
        tracing::debug!(
            base_url = %config.api_base_url,
            logged_in = auth_session.is_logged_in,
            "client ready"
        );

        let store = Store::new(AppState {
            auth: auth_session,
            ..AppState::default()
        });
        let api = Api::new(http, tokens)
            .with_envelope_field(&config.envelope_field)
            .with_currency(currency);

        let remote = Arc::new(RemoteBackend::new(
            CartService::new(api.clone()),
            store.clone(),
            Arc::new(MutationSequencer::new()),
        ));
        let reconciler = Arc::new(Reconciler::new(Arc::clone(&remote), store.clone()));

        Ok(Self {
            auth: AuthService::new(api.clone(), store.clone(), reconciler),
            catalog: CatalogService::new(api.clone(), store.clone()),
            cart: CartFlow::new(store.clone(), remote),
            reviews: ReviewService::new(api.clone()),
            customers: CustomerService::new(api.clone(), store.clone()),
            config,
            store,
            cache,
            api,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn cart(&self) -> &CartFlow {
        &self.cart
    }

    pub fn reviews(&self) -> &ReviewService {
        &self.reviews
    }

    pub fn customers(&self) -> &CustomerService {
        &self.customers
    }

    /// Snapshot of the store.
    pub fn state(&self) -> AppState {
        self.store.state()
    }

    /// Load the saved guest cart into the store. Does nothing when logged in.
    ///
    /// Returns whether a saved cart was found.
    pub fn restore_guest_cart(&self) -> Result<bool, ClientError> {
        if self.store.select(|s| s.auth.is_logged_in) {
            return Ok(false);
        }
        match self.cache.get::<Cart>(GUEST_CART_KEY)? {
            Some(cart) => {
                tracing::debug!(lines = cart.len(), "restored guest cart");
                self.store.emit(Action::CartRestored(cart));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save the guest cart, or drop the saved one once the session is
    /// logged in and the server owns the cart.
    pub fn persist_guest_cart(&self) -> Result<(), ClientError> {
        let (logged_in, cart) = self
            .store
            .select(|s| (s.auth.is_logged_in, s.cart.cart.clone()));
        if logged_in || cart.is_empty() {
            self.cache.delete(GUEST_CART_KEY)?;
        } else {
            self.cache.set(GUEST_CART_KEY, &cart)?;
        }
        Ok(())
    }
}
