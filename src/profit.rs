//! Net profit and margin.

use crate::models::{finite_or_zero, FeeBreakdown, ProfitResult};

/// Net profit and margin of selling at `selling_price` something that
/// cost `cost_price`, after `fees`.
///
/// The margin is `None` when the selling price is zero; a negative net
/// profit is a valid answer, not an error.
pub fn compute_profit(selling_price: f64, cost_price: f64, fees: &FeeBreakdown) -> ProfitResult {
    let selling_price = finite_or_zero(selling_price);
    let cost_price = finite_or_zero(cost_price);

    let net_profit = selling_price - cost_price - fees.total_fees;
    let profit_margin = if selling_price == 0.0 {
        None
    } else {
        Some(round_to_cents(net_profit / selling_price * 100.0))
    };

    ProfitResult {
        net_profit,
        profit_margin,
    }
}

/// Round to two decimal places, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fees_totalling(total_fees: f64) -> FeeBreakdown {
        FeeBreakdown {
            total_fees,
            ..Default::default()
        }
    }

    #[test]
    fn profit_and_margin() {
        let result = compute_profit(100000.0, 50000.0, &fees_totalling(28030.0));
        assert_eq!(result.net_profit, 21970.0);
        assert_eq!(result.profit_margin, Some(21.97));
    }

    #[test]
    fn loss_is_reported_as_negative_profit() {
        let result = compute_profit(1000.0, 1500.0, &fees_totalling(100.0));
        assert_eq!(result.net_profit, -600.0);
        assert_eq!(result.profit_margin, Some(-60.0));
    }

    #[test]
    fn zero_selling_price_has_no_margin() {
        let result = compute_profit(0.0, 500.0, &fees_totalling(0.0));
        assert_eq!(result.net_profit, -500.0);
        assert_eq!(result.profit_margin, None);
    }

    #[test]
    fn margin_never_exceeds_one_hundred_for_non_negative_costs() {
        for (price, cost, fees) in [(1.0, 0.0, 0.0), (999.0, 0.0, 3.0), (123456.0, 1.0, 0.0)] {
            let margin = compute_profit(price, cost, &fees_totalling(fees))
                .profit_margin
                .unwrap();
            assert!(margin <= 100.0, "{margin}");
        }
    }

    #[test]
    fn cents_rounding() {
        assert_eq!(round_to_cents(33.333), 33.33);
        assert_eq!(round_to_cents(-12.345_6), -12.35);
        assert_eq!(round_to_cents(7.0), 7.0);
    }
}
