//! Cart counter badge for the page header.

use crate::state::WidgetState;
use dioxus::prelude::*;

/// Item count bubble. Pings briefly after each cart change.
#[component]
pub fn CartBadge() -> Element {
    let state = use_context::<WidgetState>();
    let counter = state.cart.read().counter.clone();
    let pulsing = state.counter_pulse.read().is_some();

    rsx! {
        span {
            id: "cart-counter",
            class: if pulsing { "cart-counter animate-ping" } else { "cart-counter" },
            style: "display: inline-block; min-width: 20px; padding: 2px 6px; border-radius: 10px; background: #E53935; color: white; font-size: 12px; text-align: center;",
            "{counter}"
        }
    }
}
