//! Console Report
//!
//! Renders a `PriceReport` as the fixed-format text block shown by the CLI.
//! Display is all-or-nothing: if either quote is missing, only the failure
//! message is printed.

use crate::{price_fetcher::PriceFetcher, types::PriceReport};
use chrono::Local;
use rust_decimal::{Decimal, RoundingStrategy};

const RULE_WIDTH: usize = 50;

/// Fetch both prices and print the report to stdout
pub async fn print_report(fetcher: &PriceFetcher) {
    let report = fetcher.fetch_report().await;
    print!("{}", render_report(&report));
}

/// Build the full report block, including the trailing newline
pub fn render_report(report: &PriceReport) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    let mut lines = vec![
        heavy.clone(),
        "🚀 CRYPTOCURRENCY PRICE TRACKER 🚀".to_string(),
        heavy.clone(),
    ];

    match (&report.eth, &report.btc) {
        (Some(eth), Some(btc)) => {
            let as_of = report.timestamp.with_timezone(&Local).format("%Y-%m-%dT%H:%M:%S");

            lines.push(format!("📈 Current Prices (as of {})", as_of));
            lines.push(light.clone());
            lines.push(format!("💎 Ethereum (ETH): {} {}", format_usd(eth.price), report.currency));
            lines.push(format!("₿  Bitcoin (BTC):  {} {}", format_usd(btc.price), report.currency));
            lines.push(light);

            if let Some(ratio) = report.btc_eth_ratio() {
                lines.push(format!("📊 BTC/ETH Ratio: {}", round_2dp(ratio)));
            }

            lines.push("✅ Data fetched successfully from Binance API".to_string());
        }
        _ => {
            lines.push("❌ Failed to fetch cryptocurrency prices".to_string());
            lines.push("Please check your internet connection and try again".to_string());
        }
    }

    lines.push(heavy);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Format as `$1,234.57`: two fraction digits, comma-grouped thousands
pub fn format_usd(value: Decimal) -> String {
    let rounded = round_2dp(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let digits = rounded.abs().to_string();

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

fn round_2dp(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}
