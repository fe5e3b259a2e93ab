//! Integration tests for the JSON settings store and settings load

use std::fs;
use tempfile::TempDir;
use walletmeta::effects::init_settings;
use walletmeta::explorer::BlockExplorer;
use walletmeta::network::NetworkDescriptor;
use walletmeta::price::CurrencyState;
use walletmeta::settings::{JsonFileSettings, Settings, SettingsStore, SETTINGS_NAMESPACE};
use walletmeta::store::Store;

fn get_test_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    Ok(TempDir::new()?)
}

#[tokio::test]
async fn test_missing_file_reads_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    let store = JsonFileSettings::new(dir.path());

    let settings = store.read(SETTINGS_NAMESPACE).await?;
    assert_eq!(settings, Settings::default());
    Ok(())
}

#[tokio::test]
async fn test_save_then_read() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    let store = JsonFileSettings::new(dir.path().join("nested"));

    let settings = Settings {
        block_explorer: Some(BlockExplorer::Antchain),
        network_id: Some("2".to_string()),
        ..Settings::default()
    };
    store.save(SETTINGS_NAMESPACE, &settings)?;

    assert!(store.path_for(SETTINGS_NAMESPACE).exists());
    let loaded = store.read(SETTINGS_NAMESPACE).await?;
    assert_eq!(loaded, settings);
    Ok(())
}

#[tokio::test]
async fn test_second_save_keeps_backup() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    let store = JsonFileSettings::new(dir.path());

    let first = Settings {
        currency: Some("usd".to_string()),
        ..Settings::default()
    };
    let second = Settings {
        currency: Some("eur".to_string()),
        ..Settings::default()
    };
    store.save(SETTINGS_NAMESPACE, &first)?;
    store.save(SETTINGS_NAMESPACE, &second)?;

    let backup = dir.path().join("settings.json.backup");
    let backup: Settings = serde_json::from_str(&fs::read_to_string(backup)?)?;
    assert_eq!(backup.currency.as_deref(), Some("usd"));
    assert_eq!(
        store.read(SETTINGS_NAMESPACE).await?.currency.as_deref(),
        Some("eur")
    );
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    let store = JsonFileSettings::new(dir.path());
    fs::write(store.path_for(SETTINGS_NAMESPACE), "{ not json")?;

    assert!(store.read(SETTINGS_NAMESPACE).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_load_settings_from_disk_into_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    fs::write(
        dir.path().join("settings.json"),
        r#"{
            "blockExplorer": "Neoscan",
            "currency": null,
            "privateNetworks": [{"id": "3", "label": "Local", "value": "http://127.0.0.1:5000"}],
            "networkId": "3"
        }"#,
    )?;
    let settings = JsonFileSettings::new(dir.path());
    let store = Store::new();
    let price = CurrencyState::new();

    let dispatched = init_settings(&settings, &store, &price).await;

    assert_eq!(dispatched, 3);
    let state = store.state();
    assert_eq!(state.block_explorer, BlockExplorer::Neoscan);
    assert_eq!(
        state.private_networks.to_vec(),
        vec![NetworkDescriptor::new("3", "Local", "http://127.0.0.1:5000")]
    );
    assert_eq!(store.network()?, "http://127.0.0.1:5000");
    assert_eq!(price.currency(), "usd");
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_leaves_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    fs::write(dir.path().join("settings.json"), "[1, 2, 3]")?;
    let settings = JsonFileSettings::new(dir.path());
    let store = Store::new();
    let price = CurrencyState::new();

    let dispatched = init_settings(&settings, &store, &price).await;

    assert_eq!(dispatched, 0);
    assert_eq!(store.network()?, "MainNet");
    Ok(())
}

#[tokio::test]
async fn test_unknown_explorer_does_not_block_other_settings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    fs::write(
        dir.path().join("settings.json"),
        r#"{"blockExplorer":"Etherscan","currency":"EUR","networkId":"2"}"#,
    )?;
    let settings = JsonFileSettings::new(dir.path());
    let store = Store::new();
    let price = CurrencyState::new();

    let dispatched = init_settings(&settings, &store, &price).await;

    assert_eq!(dispatched, 2);
    assert_eq!(price.currency(), "eur");
    assert_eq!(store.state().network_id, "2");
    assert_eq!(store.state().block_explorer, BlockExplorer::Neotracker);
    assert_eq!(store.network()?, "TestNet");
    Ok(())
}

#[tokio::test]
async fn test_incomplete_private_network_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    fs::write(
        dir.path().join("settings.json"),
        r#"{"blockExplorer":"Antchain","privateNetworks":[{"id":"3","value":"http://127.0.0.1:5000"}],"networkId":"2"}"#,
    )?;
    let settings = JsonFileSettings::new(dir.path());
    let store = Store::new();
    let price = CurrencyState::new();

    let dispatched = init_settings(&settings, &store, &price).await;

    assert_eq!(dispatched, 2);
    let state = store.state();
    assert_eq!(state.block_explorer, BlockExplorer::Antchain);
    assert!(state.private_networks.is_empty());
    assert_eq!(state.network_id, "2");
    Ok(())
}

#[tokio::test]
async fn test_update_changes_one_field_and_keeps_the_rest() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    fs::write(
        dir.path().join("settings.json"),
        r#"{"currency":"eur","networkId":"1","tokens":{"RPX":"abc"}}"#,
    )?;
    let store = JsonFileSettings::new(dir.path());

    let updated = store
        .update(SETTINGS_NAMESPACE, |settings| {
            settings.network_id = Some("2".to_string())
        })
        .await?;
    assert_eq!(updated.network_id.as_deref(), Some("2"));

    let loaded = store.read(SETTINGS_NAMESPACE).await?;
    assert_eq!(loaded.network_id.as_deref(), Some("2"));
    assert_eq!(loaded.currency.as_deref(), Some("eur"));
    assert_eq!(loaded.extra["tokens"]["RPX"], "abc");
    assert!(dir.path().join("settings.json.backup").exists());
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn test_update_creates_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = get_test_dir()?;
    let store = JsonFileSettings::new(dir.path().join("fresh"));

    store
        .update(SETTINGS_NAMESPACE, |settings| {
            settings.block_explorer = Some(BlockExplorer::Neoscan)
        })
        .await?;

    let loaded = store.read(SETTINGS_NAMESPACE).await?;
    assert_eq!(loaded.block_explorer, Some(BlockExplorer::Neoscan));
    Ok(())
}
