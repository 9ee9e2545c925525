//! The two controllers, wired to HTTP, signals and the browser.

use crate::browser::{self, BrowserPlatform};
use crate::state::WidgetState;
use crate::view::{SignalCartView, SignalPickerView};
use storefront_core::client::HttpClient;
use storefront_core::config::WidgetConfig;
use storefront_core::picker::LocationPicker;
use storefront_core::sync::CartSync;

pub type Cart = CartSync<HttpClient, SignalCartView>;
pub type Picker = LocationPicker<HttpClient, SignalPickerView, BrowserPlatform>;

/// Provided through context next to `WidgetState`.
#[derive(Clone)]
pub struct Widgets {
    pub cart: Cart,
    pub picker: Picker,
}

impl Widgets {
    pub fn new(config: WidgetConfig, state: WidgetState) -> Self {
        let csrf_token = browser::cookie(&config.csrf_cookie);
        if csrf_token.is_none() {
            log::warn!("No {} cookie, mutating requests may be refused", config.csrf_cookie);
        }
        // The browser attaches the session cookie itself.
        let client = HttpClient::from_config(config.clone()).with_csrf_token(csrf_token);
        let cart = CartSync::new(
            client.clone(),
            SignalCartView::new(state, &config),
            config.number_locale,
        );
        let picker = LocationPicker::new(
            client,
            SignalPickerView::new(state, &config),
            BrowserPlatform,
            &config,
        );
        Self { cart, picker }
    }
}
