//! Persisted user settings
//!
//! Settings live in a key-value store keyed by namespace. The metadata
//! effects only read them, through [`SettingsStore`]. [`JsonFileSettings`]
//! keeps one JSON document per namespace on disk, written atomically with a
//! backup of the previous version.

use crate::error::{MetadataError, Result};
use crate::explorer::BlockExplorer;
use crate::network::NetworkDescriptor;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Namespace holding the wallet settings document
pub const SETTINGS_NAMESPACE: &str = "settings";

const BACKUP_SUFFIX: &str = ".backup";

/// The settings document. Every field is optional; `null` reads as absent.
///
/// The four wallet fields decode independently: a malformed value is logged
/// and read as absent without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(
        default,
        deserialize_with = "lenient_block_explorer",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_explorer: Option<BlockExplorer>,
    #[serde(
        default,
        deserialize_with = "lenient_currency",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_private_networks",
        skip_serializing_if = "Option::is_none"
    )]
    pub private_networks: Option<Vec<NetworkDescriptor>>,
    #[serde(
        default,
        deserialize_with = "lenient_network_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_id: Option<String>,
    /// Keys owned by other parts of the wallet, preserved on save
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn lenient<'de, D, T>(deserializer: D, field: &str) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                warn!("Ignoring malformed setting {}: {}", field, e);
                Ok(None)
            }
        },
    }
}

fn lenient_block_explorer<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<BlockExplorer>, D::Error> {
    lenient(d, "blockExplorer")
}

fn lenient_currency<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    lenient(d, "currency")
}

fn lenient_private_networks<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<NetworkDescriptor>>, D::Error> {
    lenient(d, "privateNetworks")
}

fn lenient_network_id<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<String>, D::Error> {
    lenient(d, "networkId")
}

/// Asynchronous key-value settings reader.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn read(&self, namespace: &str) -> Result<Settings>;
}

/// Directory of `<namespace>.json` files.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    dir: PathBuf,
}

impl JsonFileSettings {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<config dir>/walletmeta`, falling back to `./walletmeta`.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("walletmeta")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{}.json", namespace))
    }

    /// Read `namespace`, apply `change` and write the result back.
    ///
    /// The blocking write runs on the tokio blocking pool.
    pub async fn update<F>(&self, namespace: &str, change: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.read(namespace).await?;
        change(&mut settings);

        let store = self.clone();
        let namespace = namespace.to_string();
        let to_save = settings.clone();
        tokio::task::spawn_blocking(move || store.save(&namespace, &to_save))
            .await
            .map_err(|e| MetadataError::SettingsError(format!("Settings write task failed: {}", e)))??;
        Ok(settings)
    }

    /// Write `settings` under `namespace`, keeping a backup of the previous file.
    pub fn save(&self, namespace: &str, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            MetadataError::SettingsError(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.path_for(namespace);
        if path.exists() {
            let backup_path = path.with_extension(format!("json{}", BACKUP_SUFFIX));
            fs::copy(&path, &backup_path)
                .map_err(|e| MetadataError::SettingsError(format!("Failed to create backup: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(settings)?;

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)
            .map_err(|e| MetadataError::SettingsError(format!("Failed to create temp file: {}", e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| MetadataError::SettingsError(format!("Failed to write settings: {}", e)))?;
        file.sync_all()
            .map_err(|e| MetadataError::SettingsError(format!("Failed to sync file: {}", e)))?;
        drop(file);

        fs::rename(&temp_path, &path)
            .map_err(|e| MetadataError::SettingsError(format!("Failed to finalize write: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettings {
    async fn read(&self, namespace: &str) -> Result<Settings> {
        let path = self.path_for(namespace);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => {
                return Err(MetadataError::SettingsError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_json::from_str(&contents).map_err(|e| {
            MetadataError::SettingsError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Settings held in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    namespaces: RwLock<HashMap<String, Settings>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, namespace: &str, settings: Settings) {
        self.namespaces
            .write()
            .insert(namespace.to_string(), settings);
    }
}

#[async_trait]
impl SettingsStore for InMemorySettings {
    async fn read(&self, namespace: &str) -> Result<Settings> {
        Ok(self
            .namespaces
            .read()
            .get(namespace)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_read_as_absent() {
        let json = r#"{"blockExplorer":null,"currency":"USD","privateNetworks":null,"networkId":null}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.currency.as_deref(), Some("USD"));
        assert!(settings.block_explorer.is_none());
        assert!(settings.private_networks.is_none());
        assert!(settings.network_id.is_none());
    }

    #[test]
    fn test_foreign_keys_are_kept() {
        let json = r#"{"networkId":"2","tokens":{"RPX":"abc"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.network_id.as_deref(), Some("2"));
        assert!(settings.extra.contains_key("tokens"));

        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back["tokens"]["RPX"], "abc");
        assert!(back.get("currency").is_none());
    }

    #[test]
    fn test_malformed_field_does_not_drop_others() {
        let json = r#"{"blockExplorer":"Etherscan","currency":"EUR","privateNetworks":[{"id":"3"}],"networkId":2}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(settings.block_explorer.is_none());
        assert!(settings.private_networks.is_none());
        assert!(settings.network_id.is_none());
        assert_eq!(settings.currency.as_deref(), Some("EUR"));
        assert!(settings.extra.is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemorySettings::new();
        assert_eq!(store.read(SETTINGS_NAMESPACE).await, Ok(Settings::default()));

        store.insert(
            SETTINGS_NAMESPACE,
            Settings {
                network_id: Some("2".to_string()),
                ..Settings::default()
            },
        );
        let settings = store.read(SETTINGS_NAMESPACE).await.unwrap();
        assert_eq!(settings.network_id.as_deref(), Some("2"));
    }
}
