//! Break-even pricing.
//!
//! Solves `net_profit(P) = 0` for the selling price `P`:
//!
//! ```text
//! P = fixed_costs / (1 - variable_rate)
//! ```
//!
//! where `fixed_costs` is the cost price plus the logistics, packaging
//! and marketing amounts, and `variable_rate` is the sum of every
//! percentage charged on the selling price.
//!
//! Program caps are ignored here: both programs are assumed to stay
//! under their caps.  Above a cap the real fee is lower than this
//! formula assumes, so the returned price is then an upper bound rather
//! than the exact break-even point.

use crate::models::{Breakeven, OrderInput};
use crate::rates::RateTable;
use tracing::warn;

/// Minimum selling price at which `input` stops losing money, rounded
/// up to a whole currency unit.
///
/// `input.selling_price` is ignored.  Returns [`Breakeven::Unreachable`]
/// when the percentage fees add up to 100% or more of the price.
pub fn compute_breakeven(input: &OrderInput, rates: &RateTable) -> Breakeven {
    let input = input.sanitized();
    let programs = &rates.programs;

    let mut variable_rate =
        programs.payment_rate + rates.category_rate(input.seller_tier, &input.category);
    if input.free_ship_program {
        variable_rate += programs.free_ship.rate;
    }
    if input.voucher_program {
        variable_rate += programs.voucher.rate;
    }
    variable_rate += input.tax_rate_percent / 100.0;

    let logistics_fee = if input.logistics_program {
        programs.logistics_fee
    } else {
        0.0
    };
    let fixed_costs = input.cost_price + logistics_fee + input.packaging_cost + input.marketing_cost;

    let margin_left = 1.0 - variable_rate;
    if margin_left <= 0.0 {
        warn!(
            variable_rate,
            category = %input.category,
            "percentage fees consume the whole price, no break-even exists"
        );
        return Breakeven::Unreachable;
    }

    let price = (fixed_costs / margin_left).ceil();
    if !price.is_finite() {
        warn!(
            fixed_costs,
            margin_left,
            "break-even price overflows, no finite price exists"
        );
        return Breakeven::Unreachable;
    }
    Breakeven::Price(price)
}
