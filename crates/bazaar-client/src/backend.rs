//! Where cart mutations go.
//!
//! Guests mutate the in-memory cart synchronously through the store
//! ([`LocalBackend`]); logged-in users mutate the server cart and the
//! store shows whatever the server answers ([`RemoteBackend`]). [`CartFlow`]
//! picks one per call from the session's login flag.

use crate::sequencer::{MutationSequencer, Ticket};
use crate::services::CartService;
use crate::store::{Action, Store};
use crate::ClientError;
use async_trait::async_trait;
use bazaar_auth::AuthSession;
use bazaar_commerce::{Cart, CartLineItem, CommerceError, ProductId};
use std::future::Future;
use std::sync::Arc;

/// Cart mutations, implemented once per cart lifecycle.
#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Add `item`, incrementing the quantity when the product is present.
    async fn add(&self, item: CartLineItem) -> Result<(), ClientError>;

    /// Set a line's quantity. A quantity below one removes the line.
    async fn update(&self, product_id: &ProductId, quantity: i64) -> Result<(), ClientError>;

    /// Remove a line. Removing an absent product is not an error.
    async fn remove(&self, product_id: &ProductId) -> Result<(), ClientError>;

    /// Empty the cart, whatever its size.
    async fn clear(&self) -> Result<(), ClientError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Guest cart held only in the store.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    store: Store,
}

impl LocalBackend {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartBackend for LocalBackend {
    async fn add(&self, item: CartLineItem) -> Result<(), ClientError> {
        Ok(self.store.dispatch(Action::CartItemAdded(item))?)
    }

    async fn update(&self, product_id: &ProductId, quantity: i64) -> Result<(), ClientError> {
        if quantity < 1 {
            return self.remove(product_id).await;
        }
        Ok(self.store.dispatch(Action::CartQuantitySet {
            product_id: product_id.clone(),
            quantity,
        })?)
    }

    async fn remove(&self, product_id: &ProductId) -> Result<(), ClientError> {
        Ok(self
            .store
            .dispatch(Action::CartItemRemoved(product_id.clone()))?)
    }

    async fn clear(&self) -> Result<(), ClientError> {
        Ok(self.store.dispatch(Action::CartCleared)?)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Server cart, updated from each response in issue order.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    service: CartService,
    store: Store,
    sequencer: Arc<MutationSequencer>,
}

impl RemoteBackend {
    pub fn new(service: CartService, store: Store, sequencer: Arc<MutationSequencer>) -> Self {
        Self {
            service,
            store,
            sequencer,
        }
    }

    /// Replace the displayed cart with the server cart.
    pub async fn fetch(&self) -> Result<Cart, ClientError> {
        let ticket = self.sequencer.whole_cart();
        self.run(ticket, self.service.fetch()).await
    }

    /// Send local lines to be merged into the server cart.
    pub async fn merge(&self, items: &[CartLineItem]) -> Result<Cart, ClientError> {
        let ticket = self.sequencer.whole_cart();
        self.run(ticket, self.service.merge(items)).await
    }

    /// Login flag and epoch; a response is only applied to the session
    /// that sent it.
    fn session(&self) -> (bool, u64) {
        self.store
            .select(|s| (s.auth.is_logged_in, s.auth.login_epoch))
    }

    /// Await `request` and apply its cart if `ticket` is still current and
    /// the session has not changed meanwhile.
    ///
    /// A failing call is recorded as the cart error and leaves the displayed
    /// cart unchanged. The server's answer is returned either way.
    async fn run<F>(&self, ticket: Ticket, request: F) -> Result<Cart, ClientError>
    where
        F: Future<Output = Result<Cart, ClientError>> + Send,
    {
        let session = self.session();
        let generation = self.store.select(|s| s.cart.generation);
        self.store.emit(Action::CartRequestStarted);
        let result = request.await;

        if self.session() != session {
            tracing::debug!(seq = ticket.seq(), "session changed, dropping cart response");
            self.store.emit(Action::CartRequestDropped { generation });
            return result;
        }
        match result {
            Ok(cart) => {
                if self.sequencer.complete(&ticket) {
                    self.store.emit(Action::CartLoaded(cart.clone()));
                } else {
                    tracing::debug!(seq = ticket.seq(), "dropping stale cart response");
                    self.store.emit(Action::CartRequestDropped { generation });
                }
                Ok(cart)
            }
            Err(e) => {
                tracing::warn!(seq = ticket.seq(), error = %e, "cart request failed");
                if self.sequencer.is_current(&ticket) {
                    self.store.emit(Action::CartRequestFailed(e.display_message()));
                } else {
                    self.store.emit(Action::CartRequestDropped { generation });
                }
                Err(e)
            }
        }
    }

    /// Run a product change, reloading the cart if a later response
    /// outran it.
    async fn mutate<F>(&self, ticket: Ticket, request: F) -> Result<(), ClientError>
    where
        F: Future<Output = Result<Cart, ClientError>> + Send,
    {
        let session = self.session();
        self.run(ticket.clone(), request).await?;
        if self.session() == session && self.sequencer.outrun(&ticket) {
            tracing::debug!(seq = ticket.seq(), "cart response outrun, reloading");
            self.fetch().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CartBackend for RemoteBackend {
    async fn add(&self, item: CartLineItem) -> Result<(), ClientError> {
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity).into());
        }
        if !self.store.select(|s| s.cart.synced) {
            self.fetch().await?;
        }
        let existing = self.store.select(|s| {
            s.cart
                .cart
                .get(&item.product_id)
                .map_or(0, |line| line.quantity)
        });
        let quantity = existing
            .checked_add(item.quantity)
            .ok_or(CommerceError::Overflow)?;
        self.update(&item.product_id, quantity).await
    }

    async fn update(&self, product_id: &ProductId, quantity: i64) -> Result<(), ClientError> {
        if quantity < 1 {
            return self.remove(product_id).await;
        }
        let ticket = self.sequencer.product(product_id);
        self.mutate(ticket, self.service.set_quantity(product_id, quantity))
            .await
    }

    async fn remove(&self, product_id: &ProductId) -> Result<(), ClientError> {
        let ticket = self.sequencer.product(product_id);
        self.mutate(ticket, self.service.remove(product_id)).await
    }

    async fn clear(&self) -> Result<(), ClientError> {
        let ticket = self.sequencer.whole_cart();
        self.run(ticket, self.service.clear()).await.map(drop)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// The backend a session's cart mutations go to.
pub fn select_backend<'a>(
    session: &AuthSession,
    local: &'a LocalBackend,
    remote: &'a RemoteBackend,
) -> &'a dyn CartBackend {
    if session.is_logged_in {
        remote
    } else {
        local
    }
}

/// Cart operations for the current session.
#[derive(Debug, Clone)]
pub struct CartFlow {
    store: Store,
    local: LocalBackend,
    remote: Arc<RemoteBackend>,
}

impl CartFlow {
    pub fn new(store: Store, remote: Arc<RemoteBackend>) -> Self {
        Self {
            local: LocalBackend::new(store.clone()),
            store,
            remote,
        }
    }

    /// Backend for the current login state, chosen once per operation.
    pub fn backend(&self) -> &dyn CartBackend {
        let session = self.store.select(|s| s.auth.clone());
        let backend = select_backend(&session, &self.local, &self.remote);
        tracing::trace!(backend = backend.name(), "selected cart backend");
        backend
    }

    pub async fn add(&self, item: CartLineItem) -> Result<(), ClientError> {
        self.backend().add(item).await
    }

    /// Set a quantity; zero or below removes the line.
    pub async fn update(&self, product_id: &ProductId, quantity: i64) -> Result<(), ClientError> {
        self.backend().update(product_id, quantity).await
    }

    pub async fn remove(&self, product_id: &ProductId) -> Result<(), ClientError> {
        self.backend().remove(product_id).await
    }

    pub async fn clear(&self) -> Result<(), ClientError> {
        self.backend().clear().await
    }

    /// Reload the server cart. Guests have nothing to reload.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        if self.store.select(|s| s.auth.is_logged_in) {
            self.remote.fetch().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;
    use bazaar_auth::Role;
    use bazaar_commerce::{Currency, Money};
    use bazaar_data::mock::{MockReply, MockTransport};
    use bazaar_data::{FetchError, Method};
    use serde_json::json;
    use std::time::Duration;

    fn line(id: &str, quantity: i64) -> CartLineItem {
        CartLineItem::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::new(50000, Currency::INR),
            quantity,
        )
    }

    fn server_line(id: &str, quantity: i64) -> serde_json::Value {
        json!({"productId": id, "productName": format!("Product {}", id), "price": 500.0, "quantity": quantity})
    }

    fn logged_in_flow(transport: &Arc<MockTransport>) -> (Store, CartFlow) {
        let store = Store::default();
        store.emit(Action::LoginSucceeded {
            role: Role::Customer,
        });
        let service = CartService::new(testing::logged_in_api(transport));
        let remote = Arc::new(RemoteBackend::new(
            service,
            store.clone(),
            Arc::new(MutationSequencer::new()),
        ));
        (store.clone(), CartFlow::new(store, remote))
    }

    fn guest_flow(transport: &Arc<MockTransport>) -> (Store, CartFlow) {
        let store = Store::default();
        let service = CartService::new(testing::api(transport));
        let remote = Arc::new(RemoteBackend::new(
            service,
            store.clone(),
            Arc::new(MutationSequencer::new()),
        ));
        (store.clone(), CartFlow::new(store, remote))
    }

    #[tokio::test]
    async fn test_guest_mutations_stay_local() {
        let transport = Arc::new(MockTransport::new());
        let (store, flow) = guest_flow(&transport);

        flow.add(line("a", 2)).await.unwrap();
        flow.add(line("a", 1)).await.unwrap();
        flow.add(line("b", 1)).await.unwrap();
        assert_eq!(store.state().cart.cart.get(&ProductId::new("a")).unwrap().quantity, 3);

        flow.update(&ProductId::new("a"), 0).await.unwrap();
        assert!(!store.state().cart.cart.contains(&ProductId::new("a")));

        flow.remove(&ProductId::new("missing")).await.unwrap();
        flow.clear().await.unwrap();
        assert!(store.state().cart.cart.is_empty());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_quantity_below_one_sends_delete() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Delete, "/cart/items/a", MockReply::json(200, json!([])));
        let (store, flow) = logged_in_flow(&transport);

        flow.update(&ProductId::new("a"), -1).await.unwrap();

        assert_eq!(transport.requests_to(Method::Delete, "/cart/items/a").len(), 1);
        assert!(transport.requests_to(Method::Put, "/cart/items/a").is_empty());
        assert!(store.state().cart.cart.is_empty());
    }

    #[tokio::test]
    async fn test_remote_add_increments_existing() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Put,
            "/cart/items/a",
            MockReply::json(200, json!([server_line("a", 3)])),
        );
        let (store, flow) = logged_in_flow(&transport);
        store.emit(Action::CartLoaded(Cart::from_items(vec![line("a", 2)])));

        flow.add(line("a", 1)).await.unwrap();

        let request = &transport.requests_to(Method::Put, "/cart/items/a")[0];
        assert_eq!(request.json::<serde_json::Value>().unwrap(), json!({"quantity": 3}));
        assert_eq!(store.state().cart.cart.item_count(), 3);
    }

    #[tokio::test]
    async fn test_remote_clear_empties_cart() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Delete, "/cart", MockReply::status(204));
        let (store, flow) = logged_in_flow(&transport);
        store.emit(Action::CartLoaded(Cart::from_items(vec![line("a", 2), line("b", 5)])));

        flow.clear().await.unwrap();
        assert!(store.state().cart.cart.is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_cart_and_records_error() {
        let transport = Arc::new(MockTransport::new());
        transport.on(Method::Put, "/cart/items/a", MockReply::status(500));
        let (store, flow) = logged_in_flow(&transport);
        let before = Cart::from_items(vec![line("a", 1)]);
        store.emit(Action::CartLoaded(before.clone()));

        let err = flow.update(&ProductId::new("a"), 4).await.unwrap_err();
        assert!(matches!(err, ClientError::Fetch(FetchError::HttpError { status: 500, .. })));

        let state = store.state();
        assert_eq!(state.cart.cart, before);
        assert_eq!(
            state.cart.error.as_deref(),
            Some("Something went wrong. Please try again.")
        );
        assert!(!state.cart.is_loading());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_overwrite_newer() {
        let transport = Arc::new(MockTransport::new());
        transport
            .on(
                Method::Put,
                "/cart/items/a",
                MockReply::json(200, json!([server_line("a", 2)]))
                    .delayed(Duration::from_millis(100)),
            )
            .on(
                Method::Put,
                "/cart/items/a",
                MockReply::json(200, json!([server_line("a", 5)])),
            );
        let (store, flow) = logged_in_flow(&transport);
        let product = ProductId::new("a");

        let (slow, fast) = tokio::join!(flow.update(&product, 2), flow.update(&product, 5));
        slow.unwrap();
        fast.unwrap();

        let state = store.state();
        assert_eq!(state.cart.cart.get(&product).unwrap().quantity, 5);
        assert!(!state.cart.is_loading());
        assert_eq!(transport.requests_to(Method::Put, "/cart/items/a").len(), 2);
    }

    #[tokio::test]
    async fn test_logout_drops_in_flight_response() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Put,
            "/cart/items/a",
            MockReply::json(200, json!([server_line("a", 3)]))
                .delayed(Duration::from_millis(100)),
        );
        let (store, flow) = logged_in_flow(&transport);
        let logout = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.emit(Action::LoggedOut);
        };

        let id = ProductId::new("a");
        let (result, ()) = tokio::join!(flow.update(&id, 3), logout);
        result.unwrap();

        let state = store.state();
        assert!(!state.auth.is_logged_in);
        assert!(state.cart.cart.is_empty());
        assert!(!state.cart.is_loading());
    }

    #[tokio::test]
    async fn test_relogin_drops_response_from_previous_login() {
        let transport = Arc::new(MockTransport::new());
        transport.on(
            Method::Put,
            "/cart/items/a",
            MockReply::json(200, json!([server_line("a", 3)]))
                .delayed(Duration::from_millis(100)),
        );
        let (store, flow) = logged_in_flow(&transport);
        let relogin = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.emit(Action::LoginSucceeded { role: Role::Admin });
        };

        let id = ProductId::new("a");
        let (result, ()) = tokio::join!(flow.update(&id, 3), relogin);
        result.unwrap();

        let state = store.state();
        assert_eq!(state.auth.login_epoch, 2);
        assert!(state.cart.cart.is_empty());
        assert!(!state.cart.is_loading());
    }

    #[tokio::test]
    async fn test_remote_add_loads_server_cart_first() {
        let transport = Arc::new(MockTransport::new());
        transport
            .on(Method::Get, "/cart", MockReply::json(200, json!([server_line("a", 2)])))
            .on(
                Method::Put,
                "/cart/items/a",
                MockReply::json(200, json!([server_line("a", 3)])),
            )
            .on(
                Method::Put,
                "/cart/items/a",
                MockReply::json(200, json!([server_line("a", 4)])),
            );
        let (store, flow) = logged_in_flow(&transport);

        flow.add(line("a", 1)).await.unwrap();
        flow.add(line("a", 1)).await.unwrap();

        assert_eq!(transport.requests_to(Method::Get, "/cart").len(), 1);
        let puts = transport.requests_to(Method::Put, "/cart/items/a");
        assert_eq!(puts[0].json::<serde_json::Value>().unwrap(), json!({"quantity": 3}));
        assert_eq!(puts[1].json::<serde_json::Value>().unwrap(), json!({"quantity": 4}));
        assert_eq!(store.state().cart.cart.item_count(), 4);
    }

    #[tokio::test]
    async fn test_outrun_product_response_reloads_cart() {
        let transport = Arc::new(MockTransport::new());
        transport
            .on(
                Method::Put,
                "/cart/items/a",
                MockReply::json(200, json!([server_line("a", 2), server_line("b", 1)]))
                    .delayed(Duration::from_millis(100)),
            )
            .on(
                Method::Put,
                "/cart/items/b",
                MockReply::json(200, json!([server_line("b", 1)])),
            )
            .on(
                Method::Get,
                "/cart",
                MockReply::json(200, json!([server_line("a", 2), server_line("b", 1)])),
            );
        let (store, flow) = logged_in_flow(&transport);
        let (a, b) = (ProductId::new("a"), ProductId::new("b"));

        let (first, second) = tokio::join!(flow.update(&a, 2), flow.update(&b, 1));
        first.unwrap();
        second.unwrap();

        assert_eq!(transport.requests_to(Method::Get, "/cart").len(), 1);
        let state = store.state();
        assert_eq!(state.cart.cart.get(&a).unwrap().quantity, 2);
        assert_eq!(state.cart.cart.get(&b).unwrap().quantity, 1);
        assert!(!state.cart.is_loading());
    }
}
