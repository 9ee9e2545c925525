//! Cart wire contract and the snapshot it decodes into.
//!
//! Every cart endpoint answers with the same envelope:
//! `{success, cart_count, items[], total_price, message?, error?}`.
//! A successful envelope carries the complete cart, which replaces whatever
//! the widget showed before.

use crate::error::SyncError;
use crate::id::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product line of the cart as the server reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    #[serde(rename = "final_price")]
    pub unit_price: Decimal,
    #[serde(rename = "total_price")]
    pub line_total: Decimal,
}

/// The complete cart as last confirmed by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartSnapshot {
    pub cart_count: u32,
    pub items: Vec<CartLine>,
    pub total_price: Decimal,
}

impl CartSnapshot {
    /// Quantity currently shown for a product, if it has a line.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|line| line.id == product_id)
            .map(|line| line.quantity)
    }
}

/// Raw response of the cart endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CartEnvelope {
    pub success: bool,
    #[serde(default)]
    pub cart_count: u32,
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total_price: Decimal,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful cart response.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    pub snapshot: CartSnapshot,
    pub message: Option<String>,
}

impl CartEnvelope {
    pub fn from_json(body: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Split into the new snapshot, or the server's rejection.
    pub fn into_update(self) -> Result<CartUpdate, SyncError> {
        if !self.success {
            return Err(SyncError::Rejected(self.error));
        }
        Ok(CartUpdate {
            snapshot: CartSnapshot {
                cart_count: self.cart_count,
                items: self.items,
                total_price: self.total_price,
            },
            message: self.message,
        })
    }
}

/// Response of `/order/cart/count/`; carries no lines.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CartCount {
    #[serde(default)]
    pub cart_count: u32,
    #[serde(default)]
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProductRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuantityRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Direction of a quantity control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityStep {
    Increment,
    Decrement,
}

impl QuantityStep {
    /// New quantity after the step, or `None` when it would drop below 1.
    pub fn apply(self, shown: u32) -> Option<u32> {
        let next = match self {
            QuantityStep::Increment => shown.checked_add(1)?,
            QuantityStep::Decrement => shown.checked_sub(1)?,
        };
        (next >= 1).then_some(next)
    }
}

/// Read a quantity from markup, falling back to 1.
///
/// Leading digits are used (`"3 pcs"` reads as 3); anything that yields no
/// digits or zero becomes 1.
pub fn parse_quantity(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(n) => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = r#"{"success":true,"cart_count":2,"items":[{"id":7,"name":"X","quantity":2,"final_price":1000,"total_price":2000,"image":"/x.png"}],"total_price":2000}"#;

    #[test]
    fn test_summary_decodes() {
        let update = CartEnvelope::from_json(SUMMARY).unwrap().into_update().unwrap();
        assert_eq!(update.snapshot.cart_count, 2);
        assert_eq!(update.snapshot.items.len(), 1);
        let line = &update.snapshot.items[0];
        assert_eq!(line.id, ProductId::new(7));
        assert_eq!(line.unit_price, Decimal::from(1000));
        assert_eq!(line.line_total, Decimal::from(2000));
        assert_eq!(update.snapshot.total_price, Decimal::from(2000));
        assert_eq!(update.message, None);
    }

    #[test]
    fn test_missing_fields_default_to_empty_cart() {
        let update = CartEnvelope::from_json(r#"{"success":true,"message":"ok"}"#)
            .unwrap()
            .into_update()
            .unwrap();
        assert_eq!(update.snapshot, CartSnapshot::default());
        assert_eq!(update.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_rejection_keeps_error_text() {
        let err = CartEnvelope::from_json(r#"{"success":false,"error":"محصول یافت نشد"}"#)
            .unwrap()
            .into_update()
            .unwrap_err();
        assert_eq!(err, SyncError::Rejected(Some("محصول یافت نشد".to_string())));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = CartEnvelope::from_json("<html>500</html>").unwrap_err();
        assert!(matches!(err, SyncError::Malformed(_)));
    }

    #[test]
    fn test_quantity_step() {
        assert_eq!(QuantityStep::Increment.apply(1), Some(2));
        assert_eq!(QuantityStep::Decrement.apply(2), Some(1));
        assert_eq!(QuantityStep::Decrement.apply(1), None);
        assert_eq!(QuantityStep::Decrement.apply(0), None);
    }

    #[test]
    fn test_parse_quantity_fallback() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 4 pcs"), 4);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity("0"), 1);
    }

    #[test]
    fn test_quantity_of() {
        let update = CartEnvelope::from_json(SUMMARY).unwrap().into_update().unwrap();
        assert_eq!(update.snapshot.quantity_of(ProductId::new(7)), Some(2));
        assert_eq!(update.snapshot.quantity_of(ProductId::new(8)), None);
    }
}
