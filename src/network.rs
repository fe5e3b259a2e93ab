//! Network descriptors known to the wallet
//!
//! The two public networks are fixed at compile time and shared by every
//! state value. Private networks are user supplied and arrive through the
//! settings store.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of the NEO main network
pub const MAIN_NET: &str = "MainNet";

/// Identifier of the NEO test network
pub const TEST_NET: &str = "TestNet";

/// A named reference to a network, public or user defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// Unique id, used as the selection key
    pub id: String,
    /// Display label
    pub label: String,
    /// Network identifier handed to the API (`MainNet`, `TestNet` or a node URL)
    pub value: String,
}

impl NetworkDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for NetworkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}

static PUBLIC_NETWORKS: Lazy<Arc<[NetworkDescriptor]>> = Lazy::new(|| {
    Arc::from(vec![
        NetworkDescriptor::new("1", MAIN_NET, MAIN_NET),
        NetworkDescriptor::new("2", TEST_NET, TEST_NET),
    ])
});

/// The fixed public networks, main net first.
pub fn public_networks() -> Arc<[NetworkDescriptor]> {
    Arc::clone(&PUBLIC_NETWORKS)
}

/// Id of the network selected in a fresh state.
pub fn default_network_id() -> String {
    PUBLIC_NETWORKS[0].id.clone()
}
