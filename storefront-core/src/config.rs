//! Widget configuration and endpoint URLs.
//!
//! Every field has a default matching the production storefront, so an
//! empty JSON object (`{}`) is a valid configuration.

use crate::csrf::DEFAULT_CSRF_COOKIE;
use crate::error::SyncError;
use crate::price::NumberLocale;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Origin of the storefront backend, e.g. `https://shop.example`
    pub base_url: String,
    pub csrf_cookie: String,
    /// Prefix the URL-encoded geography API URL is appended to
    pub cors_relay: String,
    pub geo_api: String,
    pub number_locale: NumberLocale,
    pub cart_toast_ms: u64,
    pub location_toast_ms: u64,
    pub pulse_ms: u64,
    pub location_pulse_ms: u64,
    pub alert_delay_ms: u64,
    pub close_delay_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            csrf_cookie: DEFAULT_CSRF_COOKIE.to_string(),
            cors_relay: "https://api.allorigins.win/raw?url=".to_string(),
            geo_api: "https://iran-locations-api.ir/api/v1/fa".to_string(),
            number_locale: NumberLocale::Latin,
            cart_toast_ms: 3000,
            location_toast_ms: 4000,
            pulse_ms: 600,
            location_pulse_ms: 1000,
            alert_delay_ms: 500,
            close_delay_ms: 2000,
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn backend(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn cart_summary_url(&self) -> String {
        self.backend("/order/cart/summary/")
    }

    pub fn cart_add_url(&self) -> String {
        self.backend("/order/cart/add/")
    }

    pub fn cart_remove_url(&self) -> String {
        self.backend("/order/cart/remove/")
    }

    pub fn cart_update_url(&self) -> String {
        self.backend("/order/cart/update/")
    }

    pub fn cart_clear_url(&self) -> String {
        self.backend("/order/cart/clear/")
    }

    pub fn cart_count_url(&self) -> String {
        self.backend("/order/cart/count/")
    }

    pub fn save_location_url(&self) -> String {
        self.backend("/order/save-location/")
    }

    pub fn get_location_url(&self) -> String {
        self.backend("/order/get-location/")
    }

    fn relayed(&self, api_url: &str) -> String {
        format!("{}{}", self.cors_relay, urlencoding::encode(api_url))
    }

    pub fn states_url(&self) -> String {
        self.relayed(&format!("{}/states", self.geo_api.trim_end_matches('/')))
    }

    pub fn cities_url(&self, state_id: &str) -> String {
        self.relayed(&format!(
            "{}/cities?state_id={}",
            self.geo_api.trim_end_matches('/'),
            urlencoding::encode(state_id)
        ))
    }

    pub fn alert_delay(&self) -> Duration {
        Duration::from_millis(self.alert_delay_ms)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}
