//! State getters
//!
//! Plain projections of [`MetadataState`] plus the memoized
//! [`NetworkSelector`], which resolves the selected network id to the value
//! the API layer understands.

use crate::error::{MetadataError, Result};
use crate::explorer::BlockExplorer;
use crate::memo::Memo;
use crate::network::NetworkDescriptor;
use crate::state::MetadataState;
use std::sync::Arc;

pub fn get_block_height(state: &MetadataState) -> u64 {
    state.block_height
}

pub fn get_network_id(state: &MetadataState) -> &str {
    &state.network_id
}

pub fn get_block_explorer(state: &MetadataState) -> BlockExplorer {
    state.block_explorer
}

pub fn get_public_networks(state: &MetadataState) -> Arc<[NetworkDescriptor]> {
    Arc::clone(&state.public_networks)
}

pub fn get_private_networks(state: &MetadataState) -> Arc<[NetworkDescriptor]> {
    Arc::clone(&state.private_networks)
}

/// Public networks followed by private networks, each in stored order.
pub fn get_networks(state: &MetadataState) -> Vec<NetworkDescriptor> {
    state
        .public_networks
        .iter()
        .chain(state.private_networks.iter())
        .cloned()
        .collect()
}

/// Inputs of `get_network`. The lists compare by identity: the reducer
/// shares them until they are replaced, so a pointer check is enough.
struct NetworkKey {
    public: Arc<[NetworkDescriptor]>,
    private: Arc<[NetworkDescriptor]>,
    network_id: String,
}

impl NetworkKey {
    fn of(state: &MetadataState) -> Self {
        Self {
            public: get_public_networks(state),
            private: get_private_networks(state),
            network_id: get_network_id(state).to_string(),
        }
    }
}

// Holding the Arcs keeps the cached lists alive, so a pointer cannot be
// reused by a different list while it is cached.
impl PartialEq for NetworkKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.public, &other.public)
            && Arc::ptr_eq(&self.private, &other.private)
            && self.network_id == other.network_id
    }
}

/// Memoized `get_network`.
///
/// Keyed on the identity of both network lists and the selected id. Holding
/// one selector per store keeps repeated lookups against an unchanged state
/// free.
#[derive(Default)]
pub struct NetworkSelector {
    memo: Memo<NetworkKey, Result<String>>,
}

impl NetworkSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the selected network, or `UnknownNetwork` when the id
    /// matches no descriptor.
    pub fn get_network(&self, state: &MetadataState) -> Result<String> {
        self.memo.get_or_compute(NetworkKey::of(state), |key| {
            key.public
                .iter()
                .chain(key.private.iter())
                .find(|n| n.id == key.network_id)
                .map(|n| n.value.clone())
                .ok_or_else(|| MetadataError::UnknownNetwork(key.network_id.clone()))
        })
    }

    /// How many times the lookup actually ran.
    pub fn recomputations(&self) -> u64 {
        self.memo.recomputations()
    }
}

/// Uncached `get_network`, for one-off lookups.
pub fn get_network(state: &MetadataState) -> Result<String> {
    let network_id = get_network_id(state);
    state
        .public_networks
        .iter()
        .chain(state.private_networks.iter())
        .find(|n| n.id == network_id)
        .map(|n| n.value.clone())
        .ok_or_else(|| MetadataError::UnknownNetwork(network_id.to_string()))
}
