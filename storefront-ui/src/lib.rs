//! Dioxus widgets for the storefront cart and location picker.
//!
//! This crate provides:
//! - `browser`: `web-sys` wrappers (cookies, timers, page listeners)
//! - `state`: reactive `WidgetState` with Dioxus Signals
//! - `view`: signal-backed implementations of the core view traits
//! - `widgets`: the `Widgets` context bundling both controllers
//! - `components`: RSX components rendering the state

pub mod browser;
pub mod components;
pub mod state;
pub mod view;
pub mod widgets;
