//! Fiat currency preference owned by the price state

use parking_lot::RwLock;

pub const DEFAULT_CURRENCY: &str = "usd";

/// Receiver for the `currency` setting.
pub trait PriceState: Send + Sync {
    fn set_currency(&self, currency: String);
}

/// Minimal price state: remembers the selected currency.
#[derive(Debug)]
pub struct CurrencyState {
    currency: RwLock<String>,
}

impl CurrencyState {
    pub fn new() -> Self {
        Self {
            currency: RwLock::new(DEFAULT_CURRENCY.to_string()),
        }
    }

    pub fn currency(&self) -> String {
        self.currency.read().clone()
    }
}

impl Default for CurrencyState {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceState for CurrencyState {
    fn set_currency(&self, currency: String) {
        *self.currency.write() = currency.to_lowercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_state() {
        let state = CurrencyState::new();
        assert_eq!(state.currency(), "usd");
        state.set_currency("EUR".to_string());
        assert_eq!(state.currency(), "eur");
    }
}
