//! Client-side state sync for the storefront widgets.
//!
//! This crate provides:
//! - `cart` / `location`: wire contracts and domain types
//! - `sync`: the `CartSync` component mirroring the server cart into a view
//! - `picker`: the `LocationPicker` state/city selection component
//! - `backend`: traits the components talk to (HTTP, view, platform)
//! - `client` (feature `api`): the reqwest implementation of the backends

pub mod backend;
pub mod cart;
pub mod config;
pub mod csrf;
pub mod error;
pub mod id;
pub mod location;
pub mod messages;
pub mod picker;
pub mod price;
pub mod render;
pub mod sync;
pub mod toast;

#[cfg(feature = "api")]
pub mod client;

pub use error::SyncError;
pub use id::ProductId;
