//! Dioxus components of the cart and location widgets.

mod cart_badge;
mod cart_panel;
mod location_badge;
mod location_modal;
mod toast_host;

pub use cart_badge::CartBadge;
pub use cart_panel::{CartLineCard, CartPanel};
pub use location_badge::LocationBadge;
pub use location_modal::LocationModal;
pub use toast_host::ToastHost;
