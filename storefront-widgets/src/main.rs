//! Storefront cart and location widgets
//!
//! Mounted into a server-rendered shop page. The page provides:
//! - `<div id="storefront-root">` to render into
//! - optionally `<script type="application/json" id="storefront-config">`
//!   overriding endpoints, timings and digit style
//! - product buttons with class `add-to-cart-btn` and `data-product-id`
//! - any element with `data-action="open-location"` to open the picker
//!
//! On mount the cart summary and the saved location are fetched, then the
//! page event loop forwards clicks, Escape and connectivity changes to the
//! two controllers. Connectivity is checked before the picker is opened.

use dioxus::prelude::*;
use futures::StreamExt;
use storefront_core::messages;
use storefront_core::location::PickerPhase;
use storefront_ui::browser::{self, PageEvent};
use storefront_ui::components::{
    CartBadge, CartPanel, LocationBadge, LocationModal, ToastHost,
};
use storefront_ui::state::WidgetState;
use storefront_ui::widgets::Widgets;

/// DOM id of the optional JSON config block.
const CONFIG_ELEMENT_ID: &str = "storefront-config";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("storefront-root"))
        .launch(App);
}

async fn handle_page_event(widgets: &Widgets, event: PageEvent) {
    match event {
        PageEvent::Online => widgets.picker.on_connectivity_change(true),
        PageEvent::Offline => widgets.picker.on_connectivity_change(false),
        PageEvent::Escape => {
            if widgets.picker.phase() != PickerPhase::Closed {
                widgets.picker.close();
            }
        }
        PageEvent::AddToCart {
            product_id,
            quantity,
            button,
        } => {
            let label = browser::set_button_busy(&button, Some(messages::CART_ADDING));
            widgets.cart.add(product_id, quantity).await;
            browser::restore_button(&button, &label);
        }
        PageEvent::OpenLocation => {
            if widgets.picker.check_online() {
                widgets.picker.open().await;
            }
        }
    }
}

#[component]
fn App() -> Element {
    let state = use_context_provider(WidgetState::new);
    let widgets = use_context_provider(|| Widgets::new(browser::page_config(CONFIG_ELEMENT_ID), state));

    // ─── Effect: initial fetches and the page event loop, once on mount ───
    use_effect(move || {
        let cart = widgets.cart.clone();
        spawn(async move {
            cart.load().await;
        });

        let picker = widgets.picker.clone();
        spawn(async move {
            picker.load_saved().await;
        });

        let widgets = widgets.clone();
        spawn(async move {
            let mut events = browser::page_events();
            log::info!("Storefront widgets mounted");
            while let Some(event) = events.next().await {
                // Each event runs on its own task so a slow request never
                // holds up the next click.
                let widgets = widgets.clone();
                spawn(async move {
                    handle_page_event(&widgets, event).await;
                });
            }
            log::warn!("Page event stream ended");
        });
    });

    // ─── Render ───
    rsx! {
        div {
            style: "font-family: Vazirmatn, Tahoma, sans-serif;",
            div {
                style: "display: flex; gap: 16px; align-items: center; justify-content: flex-end; direction: rtl;",
                LocationBadge {}
                CartBadge {}
            }
            CartPanel {}
            LocationModal {}
            ToastHost {}
        }
    }
}
