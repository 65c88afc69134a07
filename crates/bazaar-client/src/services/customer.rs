//! Admin customer directory.

use super::Api;
use crate::routes::{guard, Gated, Route};
use crate::store::{Action, Store};
use crate::wire::WireCustomer;
use crate::ClientError;
use bazaar_commerce::customer::Customer;
use tracing::instrument;

/// Customer listing for administrators.
#[derive(Debug, Clone)]
pub struct CustomerService {
    api: Api,
    store: Store,
}

impl CustomerService {
    pub fn new(api: Api, store: Store) -> Self {
        Self { api, store }
    }

    /// Load the customer list into the store.
    ///
    /// The role check runs first: anyone but an admin is redirected and no
    /// request is made.
    #[instrument(skip(self))]
    pub async fn customers(&self) -> Result<Gated<Vec<Customer>>, ClientError> {
        let session = self.store.select(|s| s.auth.clone());
        let route = guard(Route::Customers, &session);
        if route != Route::Customers {
            return Ok(Gated::Redirect(route));
        }

        self.store.emit(Action::CustomersLoading);
        match self.fetch().await {
            Ok(customers) => {
                tracing::debug!(count = customers.len(), "customers loaded");
                self.store.emit(Action::CustomersLoaded(customers.clone()));
                Ok(Gated::Allowed(customers))
            }
            Err(e) => {
                self.store.emit(Action::CustomersFailed(e.display_message()));
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Customer>, ClientError> {
        let request = self.api.authorized(self.api.http().get("/admin/customers"))?;
        let customers: Vec<WireCustomer> = self.api.send_list(request).await?;
        Ok(customers.into_iter().map(Into::into).collect())
    }
}
