//! Guest cart hand-off after login.
//!
//! Once per successful login exactly one of two things happens: a
//! non-empty guest cart is merged into the server cart, or an empty one is
//! replaced by the server cart. Either way the server cart becomes the
//! displayed cart.

use crate::backend::RemoteBackend;
use crate::store::Store;
use crate::ClientError;
use bazaar_commerce::CartLineItem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::instrument;

/// What reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Guest lines were merged; `lines` is the size of the server cart.
    Merged { lines: usize },
    /// The server cart was fetched.
    Fetched { lines: usize },
    /// Not logged in, or this login was already reconciled.
    Skipped,
}

/// Runs the hand-off, at most once per login epoch.
#[derive(Debug)]
pub struct Reconciler {
    remote: Arc<RemoteBackend>,
    store: Store,
    reconciled_epoch: AtomicU64,
}

impl Reconciler {
    pub fn new(remote: Arc<RemoteBackend>, store: Store) -> Self {
        Self {
            remote,
            store,
            reconciled_epoch: AtomicU64::new(0),
        }
    }

    /// Last login epoch that was reconciled.
    pub fn reconciled_epoch(&self) -> u64 {
        self.reconciled_epoch.load(Ordering::SeqCst)
    }

    /// Hand the guest cart captured before login over to the server.
    ///
    /// Only runs when the session is logged in with an epoch not seen
    /// before; failed and pending logins never reach it.
    #[instrument(skip_all, fields(local_lines = local_items.len()))]
    pub async fn on_login_succeeded(
        &self,
        local_items: Vec<CartLineItem>,
    ) -> Result<Reconciliation, ClientError> {
        let (logged_in, epoch) = self
            .store
            .select(|s| (s.auth.is_logged_in, s.auth.login_epoch));
        if !logged_in || epoch == 0 {
            tracing::debug!("not logged in, skipping reconciliation");
            return Ok(Reconciliation::Skipped);
        }

        let previous = self.reconciled_epoch.fetch_max(epoch, Ordering::SeqCst);
        if previous >= epoch {
            tracing::debug!(epoch, "login already reconciled");
            return Ok(Reconciliation::Skipped);
        }

        if local_items.is_empty() {
            tracing::info!(epoch, "guest cart empty, fetching server cart");
            let cart = self.remote.fetch().await?;
            Ok(Reconciliation::Fetched { lines: cart.len() })
        } else {
            tracing::info!(epoch, lines = local_items.len(), "merging guest cart");
            let cart = self.remote.merge(&local_items).await?;
            Ok(Reconciliation::Merged { lines: cart.len() })
        }
    }
}
