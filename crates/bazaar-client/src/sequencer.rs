//! Ordering of overlapping remote cart requests.
//!
//! Every remote cart call answers with the whole server cart, so applying
//! an older response after a newer one would roll the display back. Each
//! call takes a [`Ticket`] before sending; when the response arrives it is
//! applied only if [`MutationSequencer::complete`] says the ticket is still
//! current:
//!
//! - a product ticket is stale once a newer ticket for the same product,
//!   or a newer whole-cart ticket, has been issued;
//! - a whole-cart ticket (fetch, merge, clear) is stale once any newer
//!   ticket has been issued;
//! - any ticket older than the last applied response is stale.
//!
//! Requests are never cancelled; stale responses are just dropped.
//!
//! A product response can be dropped only because a later-issued response
//! for another product was applied first. The server may have handled the
//! two in either order, so that later snapshot might not include this
//! change. [`MutationSequencer::outrun`] reports that case so the caller can
//! reload the cart.

use bazaar_commerce::ProductId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What a ticket was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Product(ProductId),
    WholeCart,
}

/// Proof of issue order for one remote cart call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    scope: Scope,
}

impl Ticket {
    /// Issue order, starting at 1.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

#[derive(Debug, Default)]
struct SequencerState {
    issued: u64,
    latest_by_product: HashMap<ProductId, u64>,
    latest_whole_cart: u64,
    applied: u64,
}

/// Hands out tickets and decides which responses may still be applied.
#[derive(Debug, Default)]
pub struct MutationSequencer {
    state: Mutex<SequencerState>,
}

impl MutationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ticket for a call that changes one product's line.
    pub fn product(&self, product_id: &ProductId) -> Ticket {
        let mut state = self.lock();
        state.issued += 1;
        let seq = state.issued;
        state.latest_by_product.insert(product_id.clone(), seq);
        Ticket {
            seq,
            scope: Scope::Product(product_id.clone()),
        }
    }

    /// Ticket for a call that replaces the whole cart.
    pub fn whole_cart(&self) -> Ticket {
        let mut state = self.lock();
        state.issued += 1;
        let seq = state.issued;
        state.latest_whole_cart = seq;
        Ticket {
            seq,
            scope: Scope::WholeCart,
        }
    }

    /// Whether the response for `ticket` may still be applied.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        Self::check(&self.lock(), ticket)
    }

    /// Check `ticket` and, if current, record its response as applied.
    pub fn complete(&self, ticket: &Ticket) -> bool {
        let mut state = self.lock();
        let current = Self::check(&state, ticket);
        if current {
            state.applied = ticket.seq;
        }
        current
    }

    /// Whether `ticket` was a product's latest change but its response lost
    /// to a later-issued one, so the displayed cart may be missing it.
    pub fn outrun(&self, ticket: &Ticket) -> bool {
        let state = self.lock();
        match &ticket.scope {
            Scope::Product(product_id) => {
                ticket.seq < state.applied
                    && state.latest_whole_cart < ticket.seq
                    && state.latest_by_product.get(product_id) == Some(&ticket.seq)
            }
            Scope::WholeCart => false,
        }
    }

    fn check(state: &SequencerState, ticket: &Ticket) -> bool {
        if ticket.seq <= state.applied {
            return false;
        }
        match &ticket.scope {
            Scope::Product(product_id) => {
                state.latest_whole_cart < ticket.seq
                    && state.latest_by_product.get(product_id) == Some(&ticket.seq)
            }
            Scope::WholeCart => state.issued == ticket.seq,
        }
    }
}
