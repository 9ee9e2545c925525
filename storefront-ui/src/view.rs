//! Core view traits implemented on top of `WidgetState` signals.

use crate::browser;
use crate::state::{Flash, WidgetState};
use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use storefront_core::backend::{CartView, PickerView};
use storefront_core::config::WidgetConfig;
use storefront_core::location::{Dropdown, LocationSelection};
use storefront_core::render::CartRender;
use storefront_core::toast::Toast;

/// Shared counter so a pending timer never clears a newer flash.
#[derive(Clone, Default)]
struct FlashIds(Rc<Cell<u64>>);

impl FlashIds {
    fn next(&self) -> u64 {
        let id = self.0.get() + 1;
        self.0.set(id);
        id
    }
}

/// Show `value` in `slot` for `millis`, then clear it unless replaced.
fn flash<T: 'static>(mut slot: Signal<Option<Flash<T>>>, ids: &FlashIds, value: T, millis: u64) {
    let id = ids.next();
    slot.set(Some(Flash { id, value }));
    spawn(async move {
        browser::sleep(Duration::from_millis(millis)).await;
        let still_shown = matches!(&*slot.peek(), Some(current) if current.id == id);
        if still_shown {
            slot.set(None);
        }
    });
}

#[derive(Clone)]
pub struct SignalCartView {
    state: WidgetState,
    ids: FlashIds,
    toast_ms: u64,
    pulse_ms: u64,
}

impl SignalCartView {
    pub fn new(state: WidgetState, config: &WidgetConfig) -> Self {
        Self {
            state,
            ids: FlashIds::default(),
            toast_ms: config.cart_toast_ms,
            pulse_ms: config.pulse_ms,
        }
    }
}

impl CartView for SignalCartView {
    fn render(&self, render: &CartRender) {
        let mut cart = self.state.cart;
        cart.set(render.clone());
    }

    fn pulse_counter(&self) {
        flash(self.state.counter_pulse, &self.ids, (), self.pulse_ms);
    }

    fn toast(&self, toast: Toast) {
        flash(self.state.cart_toast, &self.ids, toast, self.toast_ms);
    }
}

#[derive(Clone)]
pub struct SignalPickerView {
    state: WidgetState,
    ids: FlashIds,
    toast_ms: u64,
    pulse_ms: u64,
}

impl SignalPickerView {
    pub fn new(state: WidgetState, config: &WidgetConfig) -> Self {
        Self {
            state,
            ids: FlashIds::default(),
            toast_ms: config.location_toast_ms,
            pulse_ms: config.location_pulse_ms,
        }
    }
}

impl PickerView for SignalPickerView {
    fn set_open(&self, open: bool) {
        let mut modal_open = self.state.modal_open;
        modal_open.set(open);
        browser::lock_scroll(open);
    }

    fn show_states(&self, dropdown: Dropdown) {
        let mut states = self.state.states;
        states.set(dropdown);
    }

    fn show_cities(&self, dropdown: Dropdown) {
        let mut cities = self.state.cities;
        cities.set(dropdown);
    }

    fn show_selection(&self, selection: &LocationSelection) {
        let mut current = self.state.selection;
        current.set(selection.clone());
    }

    fn set_save_enabled(&self, enabled: bool) {
        let mut save_enabled = self.state.save_enabled;
        save_enabled.set(enabled);
    }

    fn set_saving(&self, saving: bool) {
        let mut current = self.state.saving;
        current.set(saving);
    }

    fn show_resolved_address(&self, address: Option<&str>) {
        let mut resolved = self.state.resolved_address;
        resolved.set(address.map(str::to_string));
    }

    fn show_header_location(&self, address: &str) {
        let mut header = self.state.header_location;
        header.set(Some(address.to_string()));
        flash(self.state.header_pulse, &self.ids, (), self.pulse_ms);
    }

    fn toast(&self, toast: Toast) {
        flash(self.state.location_toast, &self.ids, toast, self.toast_ms);
    }

    fn alert(&self, message: &str) {
        browser::alert(message);
    }
}
