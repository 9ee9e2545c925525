//! Price formatting for the cart widget.
//!
//! Prices are shown rounded to whole units with thousands grouping, the way
//! the storefront prints Toman amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency suffix appended to totals.
pub const CURRENCY_SUFFIX: &str = "تومان";

/// Digit set and group separator used when printing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberLocale {
    /// ASCII digits, `,` separator: `2,000`
    #[default]
    Latin,
    /// Extended Arabic-Indic digits, `٬` separator: `۲٬۰۰۰`
    Persian,
}

impl NumberLocale {
    fn separator(self) -> char {
        match self {
            NumberLocale::Latin => ',',
            NumberLocale::Persian => '\u{066C}',
        }
    }

    fn digit(self, d: char) -> char {
        match self {
            NumberLocale::Latin => d,
            NumberLocale::Persian => d
                .to_digit(10)
                .and_then(|v| char::from_u32(0x06F0 + v))
                .unwrap_or(d),
        }
    }
}

/// Format an amount with thousands grouping and no decimal places.
pub fn format_price(amount: Decimal, locale: NumberLocale) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let whole = digits.split('.').next().unwrap_or("0");

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, d) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(locale.separator());
        }
        grouped.push(locale.digit(d));
    }
    format!("{}{}", sign, grouped)
}

/// `format_price` followed by the currency suffix.
pub fn format_toman(amount: Decimal, locale: NumberLocale) -> String {
    format!("{} {}", format_price(amount, locale), CURRENCY_SUFFIX)
}
