//! Metadata state, actions and the reducer
//!
//! State values are immutable snapshots behind `Arc`. The reducer never
//! touches its input: it builds a new snapshot that shares every field the
//! action does not name, so the network lists are only reallocated when an
//! action replaces them.

use crate::explorer::BlockExplorer;
use crate::network::{self, NetworkDescriptor};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const SET_HEIGHT: &str = "SET_HEIGHT";
pub const SET_NETWORK_ID: &str = "SET_NETWORK_ID";
pub const SET_EXPLORER: &str = "SET_EXPLORER";
pub const SET_PRIVATE_NETWORKS: &str = "SET_PRIVATE_NETWORKS";

/// Network and chain metadata tracked by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataState {
    /// Chain height as last observed
    pub block_height: u64,
    /// Id of the selected network descriptor
    pub network_id: String,
    pub block_explorer: BlockExplorer,
    /// Fixed at startup, never replaced
    pub public_networks: Arc<[NetworkDescriptor]>,
    pub private_networks: Arc<[NetworkDescriptor]>,
}

impl Default for MetadataState {
    fn default() -> Self {
        Self {
            block_height: 0,
            network_id: network::default_network_id(),
            block_explorer: BlockExplorer::default(),
            public_networks: network::public_networks(),
            private_networks: Arc::from(Vec::new()),
        }
    }
}

/// A state transition request.
///
/// On the wire an action is `{"type": "<KIND>", "payload": {...}}`. Kinds
/// owned by other parts of the application decode to [`Action::Other`] and
/// leave this state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub enum Action {
    SetNetworkId { network_id: String },
    SetHeight { block_height: u64 },
    SetExplorer { block_explorer: BlockExplorer },
    SetPrivateNetworks { private_networks: Vec<NetworkDescriptor> },
    Other { kind: String },
}

impl Action {
    /// The `type` tag of this action.
    pub fn kind(&self) -> &str {
        match self {
            Action::SetNetworkId { .. } => SET_NETWORK_ID,
            Action::SetHeight { .. } => SET_HEIGHT,
            Action::SetExplorer { .. } => SET_EXPLORER,
            Action::SetPrivateNetworks { .. } => SET_PRIVATE_NETWORKS,
            Action::Other { kind } => kind,
        }
    }
}

pub fn set_network_id(network_id: impl Into<String>) -> Action {
    Action::SetNetworkId {
        network_id: network_id.into(),
    }
}

pub fn set_block_height(block_height: u64) -> Action {
    Action::SetHeight { block_height }
}

pub fn set_block_explorer(block_explorer: BlockExplorer) -> Action {
    Action::SetExplorer { block_explorer }
}

pub fn set_private_networks(private_networks: Vec<NetworkDescriptor>) -> Action {
    Action::SetPrivateNetworks { private_networks }
}

/// Apply `action` to `state`.
///
/// Returns the same `Arc` for actions this state does not handle.
pub fn reduce(state: &Arc<MetadataState>, action: Action) -> Arc<MetadataState> {
    let current = state.as_ref();
    let next = match action {
        Action::SetHeight { block_height } => MetadataState {
            block_height,
            ..current.clone()
        },
        Action::SetExplorer { block_explorer } => MetadataState {
            block_explorer,
            ..current.clone()
        },
        Action::SetNetworkId { network_id } => MetadataState {
            network_id,
            ..current.clone()
        },
        Action::SetPrivateNetworks { private_networks } => MetadataState {
            private_networks: Arc::from(private_networks),
            ..current.clone()
        },
        Action::Other { .. } => return Arc::clone(state),
    };
    Arc::new(next)
}

#[derive(Serialize, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
}

fn payload_field<T: DeserializeOwned>(payload: &mut Value, name: &str) -> serde_json::Result<T> {
    let value = payload.get_mut(name).map(Value::take).unwrap_or(Value::Null);
    serde_json::from_value(value)
}

impl TryFrom<RawAction> for Action {
    type Error = serde_json::Error;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let mut payload = raw.payload;
        let action = match raw.kind.as_str() {
            SET_NETWORK_ID => Action::SetNetworkId {
                network_id: payload_field(&mut payload, "networkId")?,
            },
            SET_HEIGHT => Action::SetHeight {
                block_height: payload_field(&mut payload, "blockHeight")?,
            },
            SET_EXPLORER => Action::SetExplorer {
                block_explorer: payload_field(&mut payload, "blockExplorer")?,
            },
            SET_PRIVATE_NETWORKS => Action::SetPrivateNetworks {
                private_networks: payload_field(&mut payload, "privateNetworks")?,
            },
            _ => Action::Other { kind: raw.kind },
        };
        Ok(action)
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        let kind = action.kind().to_string();
        let payload = match action {
            Action::SetNetworkId { network_id } => json!({ "networkId": network_id }),
            Action::SetHeight { block_height } => json!({ "blockHeight": block_height }),
            Action::SetExplorer { block_explorer } => json!({ "blockExplorer": block_explorer }),
            Action::SetPrivateNetworks { private_networks } => {
                json!({ "privateNetworks": private_networks })
            }
            Action::Other { .. } => Value::Null,
        };
        RawAction { kind, payload }
    }
}
