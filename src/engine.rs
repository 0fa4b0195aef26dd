//! Profit computation engine.
//!
//! The `engine` module wires the three calculators together.  A
//! caller hands in an [`OrderInput`] and gets back a [`ProfitReport`]
//! holding the fee breakdown, the profit figures and the break-even
//! price.  Batches are evaluated with [`rayon`] across all CPU cores;
//! the calculators are pure, so orders never contend with each other.

use crate::breakeven::compute_breakeven;
use crate::fees::compute_fees;
use crate::models::{OrderInput, PortfolioSummary, ProfitReport};
use crate::profit::{compute_profit, round_to_cents};
use crate::rates::RateTable;
use rayon::prelude::*;
use tracing::debug;

/// Price a single order.
pub fn evaluate(input: &OrderInput, rates: &RateTable) -> ProfitReport {
    let input = input.sanitized();
    let fees = compute_fees(&input, rates);
    let profit = compute_profit(input.selling_price, input.cost_price, &fees);
    let breakeven = compute_breakeven(&input, rates);
    debug!(
        selling_price = input.selling_price,
        category = %input.category,
        total_fees = fees.total_fees,
        net_profit = profit.net_profit,
        "evaluated order"
    );
    ProfitReport {
        input,
        fees,
        profit,
        breakeven,
    }
}

/// Price many orders in parallel.  Results keep the input order.
pub fn evaluate_batch(inputs: &[OrderInput], rates: &RateTable) -> Vec<ProfitReport> {
    inputs
        .par_iter()
        .map(|input| evaluate(input, rates))
        .collect()
}

/// Totals across `reports`, with the overall margin weighted by revenue.
pub fn summarize(reports: &[ProfitReport]) -> PortfolioSummary {
    let mut summary = reports
        .iter()
        .fold(PortfolioSummary::default(), |mut acc, report| {
            acc.orders += 1;
            acc.selling_price += report.input.selling_price;
            acc.cost_price += report.input.cost_price;
            acc.payment_fee += report.fees.payment_fee;
            acc.category_fee += report.fees.category_fee;
            acc.program_fee += report.fees.program_fee;
            acc.tax += report.fees.tax;
            acc.total_fees += report.fees.total_fees;
            acc.net_profit += report.profit.net_profit;
            acc
        });
    summary.overall_margin = if summary.selling_price > 0.0 {
        round_to_cents(summary.net_profit / summary.selling_price * 100.0)
    } else {
        0.0
    };
    summary
}
