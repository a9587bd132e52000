//! Offline cart pricing.

use anyhow::{Context as _, Result};
use storefront_commerce::cart::{Aggregator, CartAggregate, CartTotals, CouponBook, LineItem};
use storefront_commerce::checkout::{ReconciledTotals, ShipmentOption};
use storefront_commerce::ids::SkuId;
use storefront_data::CartLineDto;

use super::PriceArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the price command.
pub async fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read cart file: {}", path.display()))?;
    let lines: Vec<CartLineDto> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse cart file: {}", path.display()))?;
    let items: Vec<LineItem> = lines
        .into_iter()
        .map(|line| line.into_line_item(ctx.config.currency))
        .collect();

    let coupons = CouponBook::standard();
    let coupon = match args.coupon.as_deref() {
        Some(code) => {
            let found = coupons.lookup(code);
            if found.is_none() {
                ctx.output.warn(&format!("Invalid coupon code: {}", code));
            }
            found
        }
        None => None,
    };
    let shipping = shipment_option(ctx, args.shipping.as_deref())?;
    let selection: Option<Vec<SkuId>> = args
        .select
        .map(|skus| skus.into_iter().filter(|s| !s.is_empty()).map(SkuId::new).collect());

    let totals = Aggregator::new()
        .with_coupon(coupon)
        .with_shipping(shipping.as_ref())
        .aggregate(&items, selection.as_deref())?;

    if ctx.output.is_json() {
        ctx.output.json(&totals);
        return Ok(());
    }

    print_totals(&ctx.output, &totals, None);
    Ok(())
}

/// Look up a configured shipping option by id.
pub fn shipment_option(ctx: &Context, id: Option<&str>) -> Result<Option<ShipmentOption>> {
    match id {
        Some(id) => ctx
            .config
            .shipment_option(id)
            .map(Some)
            .with_context(|| format!("Unknown shipping option: {}", id)),
        None => Ok(None),
    }
}

/// Print a priced cart, or why there is nothing to price.
pub fn print_totals(output: &Output, totals: &CartTotals, reconciled: Option<&ReconciledTotals>) {
    match totals {
        CartTotals::Empty => output.info("The cart is empty"),
        CartTotals::NothingSelected => output.info("No items selected"),
        CartTotals::Priced(aggregate) => {
            print_lines(output, aggregate);
            output.header("Totals");
            match reconciled {
                Some(reconciled) => output.totals(reconciled),
                None => output.totals(&ReconciledTotals::from_estimate(aggregate)),
            }
            if let Some(ref coupon) = aggregate.coupon {
                output.kv("coupon", &format!("{} ({}% off)", coupon.code, coupon.percent_off));
            }
        }
    }
}

/// Per-line breakdown table.
pub fn print_lines(output: &Output, aggregate: &CartAggregate) {
    const WIDTHS: [usize; 5] = [16, 6, 10, 10, 12];

    output.header("Items");
    output.table_row(&["SKU", "QTY", "UNIT", "PRICE", "TOTAL"], &WIDTHS);
    for line in &aggregate.lines {
        let price = if line.has_bulk_savings() {
            format!("{}*", line.effective_price.display())
        } else {
            line.effective_price.display()
        };
        output.table_row(
            &[
                line.sku_id.as_str(),
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &price,
                &line.total.display(),
            ],
            &WIDTHS,
        );
    }
}
