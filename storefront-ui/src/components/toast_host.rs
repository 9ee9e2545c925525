//! Corner notifications.

use crate::state::{Flash, WidgetState};
use dioxus::prelude::*;
use storefront_core::toast::{Toast, ToastKind};

fn colors(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "background: #2E7D32; color: white;",
        ToastKind::Error => "background: #C62828; color: white;",
    }
}

#[derive(Props, Clone, PartialEq)]
struct ToastBoxProps {
    toast: Option<Flash<Toast>>,
    /// `left` or `right`
    corner: &'static str,
}

#[component]
fn ToastBox(props: ToastBoxProps) -> Element {
    let Some(flash) = props.toast else {
        return rsx! {};
    };
    let style = format!(
        "position: fixed; top: 16px; {}: 16px; z-index: 1000; padding: 10px 16px; border-radius: 6px; direction: rtl; box-shadow: 0 2px 6px rgba(0,0,0,0.2); {}",
        props.corner,
        colors(flash.value.kind)
    );
    rsx! {
        div {
            key: "{flash.id}",
            role: "status",
            style: "{style}",
            "{flash.value.message}"
        }
    }
}

/// Cart toasts top-left, location toasts top-right.
#[component]
pub fn ToastHost() -> Element {
    let state = use_context::<WidgetState>();
    let cart_toast = state.cart_toast.read().clone();
    let location_toast = state.location_toast.read().clone();

    rsx! {
        ToastBox { toast: cart_toast, corner: "left" }
        ToastBox { toast: location_toast, corner: "right" }
    }
}
