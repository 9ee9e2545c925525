//! Seams between the components and the outside world.
//!
//! `CartSync` and `LocationPicker` never touch HTTP or the DOM directly.
//! They call a backend for data and a view for output, so the same
//! component runs in the browser (Dioxus signals + fetch), in the CLI
//! (console + reqwest/tokio) and in tests (scripted fakes).
//!
//! Futures returned here are not required to be `Send`: everything runs on a
//! single cooperative thread.

use crate::cart::CartUpdate;
use crate::error::SyncError;
use crate::id::ProductId;
use crate::location::{Dropdown, LocationSelection, Region, SaveLocationRequest};
use crate::render::CartRender;
use crate::toast::Toast;
use std::future::Future;
use std::time::Duration;

/// The backend cart endpoints.
pub trait CartBackend {
    fn summary(&self) -> impl Future<Output = Result<CartUpdate, SyncError>>;
    fn add(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<CartUpdate, SyncError>>;
    fn remove(&self, product_id: ProductId) -> impl Future<Output = Result<CartUpdate, SyncError>>;
    fn update(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<CartUpdate, SyncError>>;
    fn clear(&self) -> impl Future<Output = Result<CartUpdate, SyncError>>;
}

/// The third-party geography service.
pub trait GeoSource {
    fn states(&self) -> impl Future<Output = Result<Vec<Region>, SyncError>>;
    fn cities(&self, state_id: &str) -> impl Future<Output = Result<Vec<Region>, SyncError>>;
}

/// The backend location endpoints. Both resolve to the full address text.
pub trait LocationBackend {
    fn save_location(
        &self,
        request: &SaveLocationRequest,
    ) -> impl Future<Output = Result<String, SyncError>>;
    fn saved_location(&self) -> impl Future<Output = Result<String, SyncError>>;
}

/// Output side of `CartSync`.
pub trait CartView {
    /// Paint counter, item-count label, item list and total.
    fn render(&self, render: &CartRender);
    /// Restart the counter badge animation.
    fn pulse_counter(&self);
    fn toast(&self, toast: Toast);
}

/// Output side of `LocationPicker`.
pub trait PickerView {
    fn set_open(&self, open: bool);
    fn show_states(&self, dropdown: Dropdown);
    fn show_cities(&self, dropdown: Dropdown);
    /// Reflect the selected values in both selectors.
    fn show_selection(&self, selection: &LocationSelection);
    fn set_save_enabled(&self, enabled: bool);
    /// Busy label and spinner on the save button.
    fn set_saving(&self, saving: bool);
    fn show_resolved_address(&self, address: Option<&str>);
    /// Persistent location display in the page header.
    fn show_header_location(&self, address: &str);
    fn toast(&self, toast: Toast);
    /// Blocking alert, used for geography load failures.
    fn alert(&self, message: &str);
}

/// Timers and connectivity of the host environment.
pub trait Platform {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
    fn is_online(&self) -> bool;
}
