//! Output formatting for the CLI.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_checkout::QuoteStatus;
use storefront_commerce::checkout::{ReconciledTotals, TotalsSource};
use storefront_commerce::money::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a right-aligned amount line.
    pub fn amount(&self, label: &str, amount: &Money) {
        if self.json {
            return;
        }
        println!("  {:<18}{:>12}", label, amount.display());
    }

    /// Print the figures a checkout page would show.
    pub fn totals(&self, totals: &ReconciledTotals) {
        if self.json {
            return;
        }
        self.amount("Items", &totals.items_total);
        if !totals.bulk_savings.is_zero() {
            self.amount("Bulk savings", &totals.bulk_savings);
        }
        if !totals.coupon_discount.is_zero() {
            self.amount("Coupon", &totals.coupon_discount.saturating_mul(-1));
        }
        self.amount("Shipping", &totals.shipping);
        println!(
            "  {:<18}{:>12}  {}",
            style("Total").bold(),
            style(totals.total.display()).bold(),
            source_badge(totals.source)
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Where the displayed total came from.
pub fn source_badge(source: TotalsSource) -> String {
    match source {
        TotalsSource::Quote => style("quoted").green().to_string(),
        TotalsSource::Estimate => style("estimate").yellow().to_string(),
    }
}

/// Status badge for the shipping quote.
pub fn quote_badge(status: QuoteStatus) -> String {
    match status {
        QuoteStatus::Ready => style("ready").green().to_string(),
        QuoteStatus::Debouncing | QuoteStatus::Requesting => style("pending").yellow().to_string(),
        QuoteStatus::Failed => style("failed").red().to_string(),
        QuoteStatus::Idle => style("idle").dim().to_string(),
    }
}
