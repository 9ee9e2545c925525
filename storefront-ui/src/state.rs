//! Widget state managed via Dioxus context.
//!
//! `WidgetState` bundles all reactive signals into a single struct provided
//! via `use_context_provider`. Views write into it, components read it with
//! `use_context::<WidgetState>()`.

use dioxus::prelude::*;
use storefront_core::location::{Dropdown, LocationSelection};
use storefront_core::messages;
use storefront_core::render::CartRender;
use storefront_core::toast::Toast;

/// A value that is shown for a while. `id` tells a newer flash from the
/// one a pending timer is about to clear.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash<T> {
    pub id: u64,
    pub value: T,
}

#[derive(Clone, Copy)]
pub struct WidgetState {
    /// Texts of the four cart regions
    pub cart: Signal<CartRender>,
    /// Counter badge animation
    pub counter_pulse: Signal<Option<Flash<()>>>,
    /// Cart messages (top-left corner)
    pub cart_toast: Signal<Option<Flash<Toast>>>,
    /// Location and connectivity messages (top-right corner)
    pub location_toast: Signal<Option<Flash<Toast>>>,
    pub modal_open: Signal<bool>,
    pub states: Signal<Dropdown>,
    pub cities: Signal<Dropdown>,
    pub selection: Signal<LocationSelection>,
    pub save_enabled: Signal<bool>,
    pub saving: Signal<bool>,
    /// Address confirmed by the last save, shown inside the modal
    pub resolved_address: Signal<Option<String>>,
    /// Saved address shown in the page header
    pub header_location: Signal<Option<String>>,
    pub header_pulse: Signal<Option<Flash<()>>>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self {
            cart: Signal::new(CartRender::default()),
            counter_pulse: Signal::new(None),
            cart_toast: Signal::new(None),
            location_toast: Signal::new(None),
            modal_open: Signal::new(false),
            states: Signal::new(Dropdown::Placeholder(messages::STATES_PROMPT.to_string())),
            cities: Signal::new(Dropdown::city_placeholder()),
            selection: Signal::new(LocationSelection::default()),
            save_enabled: Signal::new(false),
            saving: Signal::new(false),
            resolved_address: Signal::new(None),
            header_location: Signal::new(None),
            header_pulse: Signal::new(None),
        }
    }
}
