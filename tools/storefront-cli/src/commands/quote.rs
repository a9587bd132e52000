//! One-shot shipping quote for the backend cart.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use storefront_checkout::{QuoteCoordinator, QuoteStatus, QuoteView};
use storefront_commerce::cart::{Cart, CartTotals, CouponBook, SelectionMode};
use storefront_commerce::checkout::{QuoteInputs, ReconciledTotals};
use storefront_data::{HttpBackend, StorefrontBackend};

use super::price::{print_totals, shipment_option};
use super::QuoteArgs;
use crate::context::Context;
use crate::output::quote_badge;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let mut cart = load_cart(&backend, ctx).await?;
    apply_coupon(&mut cart, args.coupon.as_deref(), ctx);

    let shipping = shipment_option(ctx, args.shipping.as_deref())?;
    let totals = cart.totals(SelectionMode::All, shipping.as_ref())?;

    let view = request_quote(
        backend,
        QuoteInputs {
            address: args.address.to_address(),
            items: cart.items.clone(),
            shipment_option: shipping.map(|option| option.id),
        },
        ctx,
    )
    .await;

    report(&totals, &view, ctx)
}

/// Fetch the backend cart.
pub async fn load_cart(backend: &Arc<HttpBackend>, ctx: &Context) -> Result<Cart> {
    let spinner = ctx.output.spinner("Loading cart...");
    let items = backend.fetch_cart().await;
    spinner.finish_and_clear();
    let items = items.map_err(|e| anyhow!(e.user_message()))?;
    Ok(Cart::from_items(items))
}

/// Apply a coupon, warning instead of failing on an unknown code.
pub fn apply_coupon(cart: &mut Cart, code: Option<&str>, ctx: &Context) {
    if let Some(code) = code {
        match cart.apply_coupon(&CouponBook::standard(), code) {
            Ok(coupon) => ctx
                .output
                .debug(&format!("Applied {} ({}% off)", coupon.code, coupon.percent_off)),
            Err(e) => ctx.output.warn(&e.to_string()),
        }
    }
}

/// Run the inputs through a coordinator and wait for the outcome.
pub async fn request_quote(
    backend: Arc<HttpBackend>,
    inputs: QuoteInputs,
    ctx: &Context,
) -> QuoteView {
    let coordinator = QuoteCoordinator::spawn(backend, ctx.config.quote);
    coordinator.update(inputs);

    let spinner = ctx.output.spinner("Requesting shipping quote...");
    let view = coordinator.settled().await;
    spinner.finish_and_clear();

    match view.status {
        QuoteStatus::Idle => ctx
            .output
            .warn("Enter an address and a shipping option to get a quote"),
        QuoteStatus::Failed => ctx.output.warn(&format!(
            "Shipping quote unavailable: {}",
            view.error.as_deref().unwrap_or("unknown error")
        )),
        _ => {}
    }
    view
}

/// Figures to display for `totals` given the quote outcome.
pub fn reconciled(totals: &CartTotals, view: &QuoteView) -> Result<Option<ReconciledTotals>> {
    Ok(totals
        .priced()
        .map(|aggregate| view.reconcile(aggregate))
        .transpose()?)
}

fn report(totals: &CartTotals, view: &QuoteView, ctx: &Context) -> Result<()> {
    let reconciled = reconciled(totals, view)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": totals,
            "quote": view,
            "display": reconciled,
        }));
        return Ok(());
    }

    print_totals(&ctx.output, totals, reconciled.as_ref());
    ctx.output.kv("quote", &quote_badge(view.status));
    Ok(())
}
