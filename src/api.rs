//! Blockchain API collaborators
//!
//! The metadata effects only see the traits in this module. [`HttpApi`] is
//! the production implementation talking to the NeonDB wallet API over
//! HTTP; tests substitute their own.

use crate::error::{MetadataError, Result};
use crate::network::{MAIN_NET, TEST_NET};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const MAIN_NET_API: &str = "http://api.wallet.cityofzion.io";
pub const TEST_NET_API: &str = "http://testnet-api.wallet.cityofzion.io";

/// Body of `GET /v2/version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct HeightResponse {
    block_height: u64,
}

/// Fetches the latest advertised wallet version from a URL.
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn fetch_version(&self, url: &str) -> Result<VersionInfo>;
}

/// Maps a network value to the base URL of its API.
pub trait EndpointResolver: Send + Sync {
    fn endpoint_for(&self, network: &str) -> String;
}

/// Queries the current chain height of a network.
#[async_trait]
pub trait HeightSource: Send + Sync {
    async fn height_for(&self, network: &str) -> Result<u64>;
}

/// Endpoint table of the NeonDB wallet API.
///
/// Public networks map to the hosted API; any other value is taken to be the
/// URL of a private node.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeonDbResolver;

impl EndpointResolver for NeonDbResolver {
    fn endpoint_for(&self, network: &str) -> String {
        match network {
            MAIN_NET => MAIN_NET_API.to_string(),
            TEST_NET => TEST_NET_API.to_string(),
            other => other.trim_end_matches('/').to_string(),
        }
    }
}

/// reqwest-backed client for the wallet API.
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    resolver: Arc<dyn EndpointResolver>,
}

impl HttpApi {
    /// Client using the NeonDB endpoint table.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_resolver(timeout, Arc::new(NeonDbResolver))
    }

    pub fn with_resolver(timeout: Duration, resolver: Arc<dyn EndpointResolver>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::NetworkError(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client, resolver })
    }

    pub fn resolver(&self) -> Arc<dyn EndpointResolver> {
        Arc::clone(&self.resolver)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl VersionSource for HttpApi {
    async fn fetch_version(&self, url: &str) -> Result<VersionInfo> {
        self.get_json(url).await
    }
}

#[async_trait]
impl HeightSource for HttpApi {
    async fn height_for(&self, network: &str) -> Result<u64> {
        let url = format!("{}/v2/block/height", self.resolver.endpoint_for(network));
        let body: HeightResponse = self.get_json(&url).await?;
        Ok(body.block_height)
    }
}
