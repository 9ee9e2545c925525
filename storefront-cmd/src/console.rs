//! Console implementations of the view and platform traits.

use log::{debug, info};
use std::time::Duration;
use storefront_core::backend::{CartView, PickerView, Platform};
use storefront_core::location::{Dropdown, LocationSelection};
use storefront_core::render::{CartBody, CartRender};
use storefront_core::toast::{Toast, ToastKind};

/// Lines printed for a cart.
pub fn cart_lines(render: &CartRender) -> Vec<String> {
    let mut lines = vec![format!("Items: {}", render.items_label)];
    match &render.body {
        CartBody::Empty(text) => lines.push(format!("  {}", text)),
        CartBody::Lines(cards) => {
            for card in cards {
                lines.push(format!(
                    "  [{}] {}  {}  = {}",
                    card.product_id, card.name, card.quantity_label, card.line_total
                ));
            }
        }
    }
    lines.push(format!("Total: {}", render.total));
    lines
}

pub fn toast_line(toast: &Toast) -> String {
    let tag = match toast.kind {
        ToastKind::Success => "ok",
        ToastKind::Error => "error",
    };
    format!("[{}] {}", tag, toast.message)
}

/// Prints what the widgets would show.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleView;

impl CartView for ConsoleView {
    fn render(&self, render: &CartRender) {
        for line in cart_lines(render) {
            println!("{}", line);
        }
    }

    fn pulse_counter(&self) {}

    fn toast(&self, toast: Toast) {
        eprintln!("{}", toast_line(&toast));
    }
}

impl PickerView for ConsoleView {
    fn set_open(&self, open: bool) {
        debug!("Picker open: {}", open);
    }

    fn show_states(&self, dropdown: Dropdown) {
        debug!("States: {}", dropdown.caption());
    }

    fn show_cities(&self, dropdown: Dropdown) {
        debug!("Cities: {}", dropdown.caption());
    }

    fn show_selection(&self, selection: &LocationSelection) {
        debug!("Selection: {:?}", selection);
    }

    fn set_save_enabled(&self, _enabled: bool) {}

    fn set_saving(&self, saving: bool) {
        if saving {
            info!("Saving location...");
        }
    }

    fn show_resolved_address(&self, address: Option<&str>) {
        debug!("Resolved address: {:?}", address);
    }

    fn show_header_location(&self, address: &str) {
        println!("{}", address);
    }

    fn toast(&self, toast: Toast) {
        eprintln!("{}", toast_line(&toast));
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Tokio timers; a command line is assumed to be online.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPlatform;

impl Platform for TokioPlatform {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn is_online(&self) -> bool {
        true
    }
}
