//! Order placement.

use anyhow::{anyhow, bail, Result};
use storefront_checkout::CheckoutGuard;
use storefront_commerce::cart::{LineItem, SelectionMode};
use storefront_commerce::checkout::{CheckoutSelection, NextStep};
use storefront_commerce::ids::{PaymentOptionId, ShipmentOptionId, SkuId};

use super::price::{print_totals, shipment_option};
use super::quote::{apply_coupon, load_cart, reconciled, request_quote};
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let mut cart = load_cart(&backend, ctx).await?;
    apply_coupon(&mut cart, args.coupon.as_deref(), ctx);

    let mode = match args.select {
        Some(ref skus) => {
            cart.select_all(false);
            for sku in skus.iter().filter(|s| !s.is_empty()) {
                cart.toggle_selected(&SkuId::new(sku.as_str()))?;
            }
            SelectionMode::Selected
        }
        None => SelectionMode::All,
    };

    let mut selection = CheckoutSelection {
        address: args.address.to_address(),
        shipment_option: args.shipping.as_deref().map(ShipmentOptionId::new),
        payment_option: args.payment.as_deref().map(PaymentOptionId::new),
        buy_now: args.buy_now,
        ..CheckoutSelection::default()
    };
    for note in &args.notes {
        let Some((sku, text)) = note.split_once('=') else {
            bail!("Invalid note '{}', expected SKU=TEXT", note);
        };
        selection.set_note(SkuId::new(sku.trim()), text.trim());
    }

    let shipping = shipment_option(ctx, args.shipping.as_deref())?;
    let items: Vec<LineItem> = cart.items_for(mode).into_iter().cloned().collect();
    let totals = cart.totals(mode, shipping.as_ref())?;

    let display = if args.no_quote {
        None
    } else {
        let view = request_quote(backend.clone(), selection.quote_inputs(items.clone()), ctx).await;
        reconciled(&totals, &view)?
    };
    if !ctx.output.is_json() {
        print_totals(&ctx.output, &totals, display.as_ref());
    }

    let guard = CheckoutGuard::new(backend);
    let spinner = ctx.output.spinner("Placing order...");
    let placed = guard.submit(&selection, &items).await;
    spinner.finish_and_clear();
    let confirmation = placed.map_err(|e| anyhow!(e.to_string()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order": confirmation,
            "display": display,
        }));
        return Ok(());
    }

    ctx.output
        .success(&format!("Order {} placed", confirmation.id));
    match confirmation.next_step() {
        NextStep::Redirect(url) => ctx.output.info(&format!("Continue at {}", url)),
        NextStep::Confirmation(id) => ctx
            .output
            .kv("confirmation", &format!("order {}", id)),
    }
    Ok(())
}
