//! Marketplace fee calculation.
//!
//! Each percentage-based fee is rounded to a whole currency unit as it
//! is computed, so the total is the sum of the rounded parts exactly as
//! a seller sees them itemised.

use crate::models::{FeeBreakdown, OrderInput};
use crate::rates::RateTable;

/// Itemise the fees charged on `input` under `rates`.
///
/// Never fails: non-finite amounts count as 0 and an unknown category
/// is charged at its tier's default rate.
pub fn compute_fees(input: &OrderInput, rates: &RateTable) -> FeeBreakdown {
    let input = input.sanitized();
    let price = input.selling_price;
    let programs = &rates.programs;

    let payment_fee = (price * programs.payment_rate).round();

    let category_rate = rates.category_rate(input.seller_tier, &input.category);
    let category_fee = (price * category_rate).round();

    // Each program is capped on its own before the two are added.
    let mut program_fee = 0.0;
    if input.free_ship_program {
        program_fee += programs.free_ship.fee(price);
    }
    if input.voucher_program {
        program_fee += programs.voucher.fee(price);
    }

    let logistics_fee = if input.logistics_program {
        programs.logistics_fee
    } else {
        0.0
    };

    let tax = (price * input.tax_rate_percent / 100.0).round();

    let packaging_cost = input.packaging_cost;
    let marketing_cost = input.marketing_cost;

    let total_fees = payment_fee
        + category_fee
        + program_fee
        + logistics_fee
        + tax
        + packaging_cost
        + marketing_cost;

    FeeBreakdown {
        payment_fee,
        category_fee,
        program_fee,
        logistics_fee,
        tax,
        packaging_cost,
        marketing_cost,
        total_fees,
    }
}
