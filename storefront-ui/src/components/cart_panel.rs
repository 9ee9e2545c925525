//! Cart dropdown: item count, line cards and total.

use crate::state::WidgetState;
use crate::widgets::Widgets;
use dioxus::prelude::*;
use storefront_core::cart::QuantityStep;
use storefront_core::messages;
use storefront_core::render::{CartBody, LineCard};

#[derive(Props, Clone, PartialEq)]
pub struct CartLineCardProps {
    pub line: LineCard,
}

/// One cart line with its quantity controls.
#[component]
pub fn CartLineCard(props: CartLineCardProps) -> Element {
    let widgets = use_context::<Widgets>();
    let product_id = props.line.product_id;

    let cart = widgets.cart.clone();
    let on_decrement = move |_| {
        let cart = cart.clone();
        spawn(async move {
            cart.update_quantity(product_id, QuantityStep::Decrement).await;
        });
    };
    let cart = widgets.cart.clone();
    let on_increment = move |_| {
        let cart = cart.clone();
        spawn(async move {
            cart.update_quantity(product_id, QuantityStep::Increment).await;
        });
    };
    let cart = widgets.cart.clone();
    let on_remove = move |_| {
        let cart = cart.clone();
        spawn(async move {
            cart.remove(product_id).await;
        });
    };

    let line = props.line;
    rsx! {
        div {
            class: "cart-item",
            style: "display: flex; gap: 8px; align-items: center; padding: 8px 0; border-bottom: 1px solid #EEE;",
            img {
                src: "{line.image}",
                alt: "{line.name}",
                style: "width: 48px; height: 48px; object-fit: cover; border-radius: 4px;",
            }
            div {
                style: "flex: 1;",
                div { style: "font-weight: bold;", "{line.name}" }
                div { style: "font-size: 12px; color: #666;", "{line.quantity_label}" }
                div { style: "font-size: 12px;", "{line.line_total}" }
            }
            div {
                style: "display: flex; gap: 4px; align-items: center;",
                button { onclick: on_decrement, "−" }
                span { "{line.quantity}" }
                button { onclick: on_increment, "+" }
            }
            button {
                class: "remove-from-cart",
                title: messages::CART_REMOVE_LABEL,
                onclick: on_remove,
                "×"
            }
        }
    }
}

/// Item list and total of the cart dropdown.
#[component]
pub fn CartPanel() -> Element {
    let state = use_context::<WidgetState>();
    let widgets = use_context::<Widgets>();
    let render = state.cart.read().clone();

    let cart = widgets.cart.clone();
    let on_clear = move |_| {
        let cart = cart.clone();
        spawn(async move {
            cart.clear().await;
        });
    };

    rsx! {
        div {
            id: "cart-panel",
            style: "direction: rtl; width: 320px; padding: 12px; background: white; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.15);",
            div {
                style: "margin-bottom: 8px; color: #666;",
                span { id: "cart-items-count", "{render.items_label}" }
                " "
                {messages::CART_ITEMS_SUFFIX}
            }
            div {
                id: "cart-items",
                match render.body.clone() {
                    CartBody::Empty(text) => rsx! {
                        p { style: "text-align: center; color: #999;", "{text}" }
                    },
                    CartBody::Lines(lines) => rsx! {
                        for line in lines {
                            CartLineCard { key: "{line.product_id}", line }
                        }
                    },
                }
            }
            div {
                style: "display: flex; justify-content: space-between; margin-top: 8px; font-weight: bold;",
                span { {messages::CART_TOTAL_LABEL} }
                span { id: "cart-total", "{render.total}" }
            }
            if render.card_count() > 0 {
                button {
                    style: "margin-top: 8px; width: 100%;",
                    onclick: on_clear,
                    {messages::CART_CLEAR_LABEL}
                }
            }
        }
    }
}
