//! `cart` subcommand.

use crate::console::ConsoleView;
use crate::{finish, CartAction};
use log::info;
use storefront_core::cart::QuantityStep;
use storefront_core::client::HttpClient;
use storefront_core::config::WidgetConfig;
use storefront_core::price::format_toman;
use storefront_core::sync::{CartSync, SyncOutcome};
use storefront_core::ProductId;

pub async fn run_cart(
    client: HttpClient,
    config: &WidgetConfig,
    action: CartAction,
) -> anyhow::Result<()> {
    let cart = CartSync::new(client, ConsoleView, config.number_locale);
    let outcome = match action {
        CartAction::Count => {
            let count = cart.backend().cart_count().await?;
            println!(
                "{} items, {}",
                count.cart_count,
                format_toman(count.total_price, config.number_locale)
            );
            return Ok(());
        }
        CartAction::Show => cart.load().await,
        CartAction::Add {
            product_id,
            quantity,
        } => {
            info!("Adding {} x{}", product_id, quantity);
            cart.add(product_id, quantity).await
        }
        CartAction::Remove { product_id } => cart.remove(product_id).await,
        CartAction::Increment { product_id } => {
            step(&cart, product_id, QuantityStep::Increment).await?
        }
        CartAction::Decrement { product_id } => {
            step(&cart, product_id, QuantityStep::Decrement).await?
        }
        CartAction::Clear => cart.clear().await,
    };
    finish(outcome)
}

/// Quantity steps are relative to the server's current line.
async fn step(
    cart: &CartSync<HttpClient, ConsoleView>,
    product_id: ProductId,
    step: QuantityStep,
) -> anyhow::Result<SyncOutcome> {
    finish(cart.load().await)?;
    if cart.snapshot().quantity_of(product_id).is_none() {
        anyhow::bail!("Product {} is not in the cart", product_id);
    }
    Ok(cart.update_quantity(product_id, step).await)
}
