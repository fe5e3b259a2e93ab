//! Side effects that feed the metadata store
//!
//! Each procedure awaits one external collaborator and dispatches the result
//! back as actions. None of them retries. Concurrent runs race and the last
//! dispatch wins.

use crate::api::{EndpointResolver, HeightSource, VersionSource};
use crate::error::{MetadataError, Result};
use crate::notification::{Notification, Notifier};
use crate::price::PriceState;
use crate::settings::{SettingsStore, SETTINGS_NAMESPACE};
use crate::state::{set_block_explorer, set_block_height, set_network_id, set_private_networks};
use crate::store::{Dispatch, Store};
use tracing::{debug, info, warn};

/// Page listing wallet releases
pub const RELEASE_LINK: &str = "https://github.com/CityOfZion/neon-wallet/releases";

/// Outcome of [`check_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    UpToDate,
    OutOfDate { latest: String },
    CheckFailed { reason: String },
}

fn release_anchor() -> String {
    format!(
        "<a href='{link}' target='_blank' class=\"notification-link\">{link}</a>",
        link = RELEASE_LINK
    )
}

/// Compare the running version with the one advertised by the API of the
/// selected network.
///
/// Request failures and mismatches each raise one sticky warning. Only an
/// unresolvable network selection is returned as an error.
pub async fn check_version(
    store: &Store,
    source: &dyn VersionSource,
    resolver: &dyn EndpointResolver,
    local_version: &str,
    notifier: &dyn Notifier,
) -> Result<VersionStatus> {
    let network = store.network()?;
    let url = format!("{}/v2/version", resolver.endpoint_for(&network));

    let status = match source.fetch_version(&url).await {
        Ok(info) if info.version == local_version => {
            debug!("Wallet version {} is current", local_version);
            return Ok(VersionStatus::UpToDate);
        }
        Ok(info) => {
            info!("Wallet {} is out of date (latest {})", local_version, info.version);
            VersionStatus::OutOfDate {
                latest: info.version,
            }
        }
        Err(e) => {
            warn!("Version check against {} failed: {}", url, e);
            VersionStatus::CheckFailed {
                reason: e.to_string(),
            }
        }
    };

    let message = match status {
        VersionStatus::CheckFailed { .. } => format!(
            "Error checking wallet version! Please make sure you have downloaded the latest version: {}",
            release_anchor()
        ),
        _ => format!(
            "Your wallet is out of date! Please download the latest version from {}",
            release_anchor()
        ),
    };
    notifier.notify(Notification::sticky_warning(message));

    Ok(status)
}

/// Load persisted settings and dispatch every field that is set.
///
/// Returns the number of dispatches. A failed read is logged and leaves the
/// current state in place.
pub async fn init_settings(
    settings: &dyn SettingsStore,
    dispatcher: &dyn Dispatch,
    price: &dyn PriceState,
) -> usize {
    let settings = match settings.read(SETTINGS_NAMESPACE).await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Could not load settings, keeping defaults: {}", e);
            return 0;
        }
    };

    let mut dispatched = 0;
    if let Some(explorer) = settings.block_explorer {
        dispatcher.dispatch(set_block_explorer(explorer));
        dispatched += 1;
    }
    if let Some(currency) = settings.currency {
        price.set_currency(currency);
        dispatched += 1;
    }
    if let Some(networks) = settings.private_networks {
        dispatcher.dispatch(set_private_networks(networks));
        dispatched += 1;
    }
    if let Some(network_id) = settings.network_id {
        dispatcher.dispatch(set_network_id(network_id));
        dispatched += 1;
    }

    debug!("Applied {} settings", dispatched);
    dispatched
}

/// Fetch the chain height of `network` and store it.
///
/// On failure nothing is dispatched and the stored height is kept.
pub async fn sync_block_height(
    network: &str,
    heights: &dyn HeightSource,
    dispatcher: &dyn Dispatch,
) -> Result<u64> {
    match heights.height_for(network).await {
        Ok(height) => {
            dispatcher.dispatch(set_block_height(height));
            Ok(height)
        }
        Err(e) => {
            warn!("Block height sync for {} failed: {}", network, e);
            Err(MetadataError::HeightSync(e.to_string()))
        }
    }
}
