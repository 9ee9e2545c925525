//! View model for the cart regions.
//!
//! The widget shows the snapshot in four places: the counter badge, the
//! item-count label, the item list and the total. `CartRender` holds the
//! exact text each of them displays so any view can paint it without doing
//! its own formatting.

use crate::cart::{CartLine, CartSnapshot};
use crate::id::ProductId;
use crate::messages;
use crate::price::{format_price, format_toman, NumberLocale};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineCard {
    /// Target of the decrement/increment/remove controls on this card.
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// `"{quantity} × {unit price}"`
    pub quantity_label: String,
    /// `"{line total} تومان"`
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CartBody {
    Empty(String),
    Lines(Vec<LineCard>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRender {
    pub counter: String,
    pub items_label: String,
    pub body: CartBody,
    pub total: String,
}

impl CartRender {
    pub fn from_snapshot(snapshot: &CartSnapshot, locale: NumberLocale) -> Self {
        let body = if snapshot.items.is_empty() {
            CartBody::Empty(messages::CART_EMPTY.to_string())
        } else {
            CartBody::Lines(
                snapshot
                    .items
                    .iter()
                    .map(|line| LineCard::from_line(line, locale))
                    .collect(),
            )
        };
        Self {
            counter: snapshot.cart_count.to_string(),
            items_label: snapshot.cart_count.to_string(),
            body,
            total: format_toman(snapshot.total_price, locale),
        }
    }

    /// Number of cards in the item list.
    pub fn card_count(&self) -> usize {
        match &self.body {
            CartBody::Empty(_) => 0,
            CartBody::Lines(cards) => cards.len(),
        }
    }
}

impl Default for CartRender {
    fn default() -> Self {
        Self::from_snapshot(&CartSnapshot::default(), NumberLocale::default())
    }
}

impl LineCard {
    fn from_line(line: &CartLine, locale: NumberLocale) -> Self {
        Self {
            product_id: line.id,
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            quantity_label: format!(
                "{} × {}",
                line.quantity,
                format_price(line.unit_price, locale)
            ),
            line_total: format_toman(line.line_total, locale),
        }
    }
}
