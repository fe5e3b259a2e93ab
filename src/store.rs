//! Shared state cell for [`MetadataState`]
//!
//! The store owns the current snapshot inside a `tokio::sync::watch`
//! channel. Readers always see a whole snapshot; writers go through
//! [`reduce`]. Concurrent dispatches are serialized by the channel and the
//! last one wins.

use crate::error::Result;
use crate::selectors::NetworkSelector;
use crate::state::{reduce, Action, MetadataState};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Sink for metadata actions.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action);
}

pub struct Store {
    state: watch::Sender<Arc<MetadataState>>,
    network: NetworkSelector,
}

impl Store {
    /// Create a store holding the initial state.
    pub fn new() -> Self {
        Self::with_state(MetadataState::default())
    }

    pub fn with_state(state: MetadataState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(state));
        Self {
            state: tx,
            network: NetworkSelector::new(),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<MetadataState> {
        self.state.borrow().clone()
    }

    /// Apply an action. Returns `true` if the state changed.
    pub fn apply(&self, action: Action) -> bool {
        let kind = action.kind().to_string();
        let changed = self.state.send_if_modified(|current| {
            let next = reduce(current, action);
            if Arc::ptr_eq(current, &next) {
                false
            } else {
                *current = next;
                true
            }
        });
        debug!("Dispatched {} (changed = {})", kind, changed);
        changed
    }

    /// Receiver woken on every state change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MetadataState>> {
        self.state.subscribe()
    }

    /// Memoized value of the selected network.
    pub fn network(&self) -> Result<String> {
        self.network.get_network(&self.state())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch for Store {
    fn dispatch(&self, action: Action) {
        self.apply(action);
    }
}
