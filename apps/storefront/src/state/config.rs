//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MOBICARE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shop name shown in the header and on tickets.
    pub store_name: String,

    /// Service desk phone number shown on the track-repair page.
    pub support_phone: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Hosted backend endpoint (store + identity), for production wiring.
    pub backend_url: String,
}

impl Default for ConfigState {
    /// Defaults for an Indian electronics shop.
    fn default() -> Self {
        ConfigState {
            store_name: "MobiCare".to_string(),
            support_phone: "9876500000".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            backend_url: "http://localhost:9000".to_string(),
        }
    }
}

impl ConfigState {
    /// Builds the config, applying `MOBICARE_*` environment overrides.
    ///
    /// ## Overrides
    /// - `MOBICARE_STORE_NAME`
    /// - `MOBICARE_SUPPORT_PHONE`
    /// - `MOBICARE_BACKEND_URL`
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();
        if let Ok(name) = std::env::var("MOBICARE_STORE_NAME") {
            config.store_name = name;
        }
        if let Ok(phone) = std::env::var("MOBICARE_SUPPORT_PHONE") {
            config.support_phone = phone;
        }
        if let Ok(url) = std::env::var("MOBICARE_BACKEND_URL") {
            config.backend_url = url;
        }
        config
    }

    /// Formats an amount of paise for display ("₹1599.00").
    ///
    /// Indian digit grouping (1,59,900) is the view's job; this is the
    /// plain fallback used in logs and tests.
    pub fn format_currency(&self, paise: i64) -> String {
        let sign = if paise < 0 { "-" } else { "" };
        let abs = paise.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            abs / 100,
            abs % 100
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_inr() {
        let config = ConfigState::default();
        assert_eq!(config.currency_code, "INR");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.currency_decimals, 2);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(159_900), "₹1599.00");
        assert_eq!(config.format_currency(-550), "-₹5.50");
        assert_eq!(config.format_currency(5), "₹0.05");
    }
}
