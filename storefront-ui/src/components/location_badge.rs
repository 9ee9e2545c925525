//! Saved location shown in the page header.

use crate::state::WidgetState;
use crate::widgets::Widgets;
use dioxus::prelude::*;
use storefront_core::messages;

/// Opens the location picker on click.
#[component]
pub fn LocationBadge() -> Element {
    let state = use_context::<WidgetState>();
    let widgets = use_context::<Widgets>();
    let location = state.header_location.read().clone();
    let pulsing = state.header_pulse.read().is_some();

    let on_open = move |_| {
        if !widgets.picker.check_online() {
            return;
        }
        let picker = widgets.picker.clone();
        spawn(async move {
            picker.open().await;
        });
    };

    rsx! {
        button {
            id: "header-location",
            class: if pulsing { "header-location animate-pulse" } else { "header-location" },
            style: "direction: rtl; background: none; border: none; cursor: pointer;",
            onclick: on_open,
            match location {
                Some(address) => rsx! { "📍 {address}" },
                None => rsx! { "📍 " {messages::LOCATION_CHOOSE} },
            }
        }
    }
}
