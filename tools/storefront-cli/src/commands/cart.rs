//! Backend cart commands.

use anyhow::{anyhow, Result};
use storefront_checkout::{CartError, CartSession};
use storefront_commerce::cart::{CouponBook, SelectionMode};
use storefront_commerce::checkout::ShipmentOption;
use storefront_commerce::ids::SkuId;
use storefront_data::HttpBackend;

use super::price::{print_totals, shipment_option};
use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = ctx.output.spinner("Loading cart...");
    let loaded = CartSession::load(backend, CouponBook::standard()).await;
    spinner.finish_and_clear();
    let mut session = loaded.map_err(cart_error)?;

    let shipping = match args.command {
        CartCommand::Show { ref shipping } => shipment_option(ctx, shipping.as_deref())?,
        _ => None,
    };

    let spinner = ctx.output.spinner("Updating cart...");
    let (result, done) = match args.command {
        CartCommand::Show { .. } => (Ok(()), None),
        CartCommand::Set { sku, quantity } => {
            let sku = SkuId::new(sku);
            let message = if quantity <= 0 {
                format!("Removed {}", sku)
            } else {
                format!("Set {} to {}", sku, quantity)
            };
            (session.set_quantity(&sku, quantity).await, Some(message))
        }
        CartCommand::Add { sku, delta } => {
            let sku = SkuId::new(sku);
            let message = format!("Updated {}", sku);
            (session.adjust_quantity(&sku, delta).await, Some(message))
        }
        CartCommand::Remove { sku } => {
            let sku = SkuId::new(sku);
            let message = format!("Removed {}", sku);
            (session.remove(&sku).await, Some(message))
        }
        CartCommand::Clear => (session.clear().await, Some("Cart cleared".to_string())),
    };
    spinner.finish_and_clear();
    result.map_err(cart_error)?;

    if let Some(message) = done {
        ctx.output.success(&message);
    }
    show(&session, shipping.as_ref(), ctx)
}

fn cart_error(error: CartError) -> anyhow::Error {
    anyhow!(error.user_message())
}

fn show(
    session: &CartSession<HttpBackend>,
    shipping: Option<&ShipmentOption>,
    ctx: &Context,
) -> Result<()> {
    let totals = session.totals(SelectionMode::All, shipping)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": session.cart().items,
            "totals": totals,
        }));
        return Ok(());
    }

    ctx.output
        .kv("items", &session.cart().item_count().to_string());
    print_totals(&ctx.output, &totals, None);
    Ok(())
}
