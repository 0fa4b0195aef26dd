//! Data models for the Seller Profit Engine.
//!
//! The `models` module defines the serialisable value types that flow
//! through the calculators: the order being priced, the itemised fee
//! breakdown, the profit figures and the break-even result.  None of
//! them carry identity; they are produced and consumed within a single
//! computation and may be freely cloned or sent across threads.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which commission table applies to the seller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerTier {
    /// A regular marketplace shop.
    #[default]
    Standard,
    /// A managed or "mall" shop with its own negotiated commissions.
    Premium,
}

/// Input to the calculators.
///
/// Every field is defaulted so that a partially filled form can still
/// be priced: missing amounts are 0, missing program flags are off,
/// the category falls back to `"default"` and the tier to
/// [`SellerTier::Standard`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderInput {
    /// Price the buyer pays for the item.
    #[serde(deserialize_with = "lenient_amount")]
    pub selling_price: f64,
    /// What the seller paid for the item.
    #[serde(deserialize_with = "lenient_amount")]
    pub cost_price: f64,
    /// Key into the tier's commission table.
    pub category: String,
    /// Selects which commission table `category` is looked up in.
    pub seller_tier: SellerTier,
    /// Free-shipping subsidy program.
    pub free_ship_program: bool,
    /// Voucher subsidy program.
    pub voucher_program: bool,
    /// Flat per-order fulfilment program.
    pub logistics_program: bool,
    /// Tax rate in natural units, e.g. `8.0` for 8%.
    #[serde(deserialize_with = "lenient_amount")]
    pub tax_rate_percent: f64,
    /// Seller-declared packaging cost per order.
    #[serde(deserialize_with = "lenient_amount")]
    pub packaging_cost: f64,
    /// Seller-declared marketing cost per order.
    #[serde(deserialize_with = "lenient_amount")]
    pub marketing_cost: f64,
}

impl Default for OrderInput {
    fn default() -> Self {
        Self {
            selling_price: 0.0,
            cost_price: 0.0,
            category: DEFAULT_CATEGORY.to_string(),
            seller_tier: SellerTier::Standard,
            free_ship_program: false,
            voucher_program: false,
            logistics_program: false,
            tax_rate_percent: 0.0,
            packaging_cost: 0.0,
            marketing_cost: 0.0,
        }
    }
}

/// Category key every tier of a rate table must define.
pub const DEFAULT_CATEGORY: &str = "default";

impl OrderInput {
    /// Returns a copy with every non-finite amount replaced by 0.
    ///
    /// Negative amounts are left alone; they simply propagate into a
    /// negative profit.
    pub fn sanitized(&self) -> Self {
        Self {
            selling_price: finite_or_zero(self.selling_price),
            cost_price: finite_or_zero(self.cost_price),
            category: self.category.clone(),
            seller_tier: self.seller_tier,
            free_ship_program: self.free_ship_program,
            voucher_program: self.voucher_program,
            logistics_program: self.logistics_program,
            tax_rate_percent: finite_or_zero(self.tax_rate_percent),
            packaging_cost: finite_or_zero(self.packaging_cost),
            marketing_cost: finite_or_zero(self.marketing_cost),
        }
    }
}

/// Reads a number the way a half-filled form sends it: `null`, empty or
/// unparseable strings and booleans all become 0.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(finite_or_zero(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(v.trim().parse().map(finite_or_zero).unwrap_or(0.0))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
            deserializer.deserialize_any(AmountVisitor)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Itemised marketplace fees for one order.
///
/// `total_fees` is always the plain sum of the other seven fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Payment processing fee, charged on every order.
    pub payment_fee: f64,
    /// Commission for the order's category and seller tier.
    pub category_fee: f64,
    /// Free-shipping plus voucher contributions, each capped on its own.
    pub program_fee: f64,
    /// Flat charge of the logistics program, or 0 when not enrolled.
    pub logistics_fee: f64,
    /// Tax on the selling price, treated as a deduction from revenue.
    pub tax: f64,
    /// Seller-declared packaging cost, passed through unchanged.
    pub packaging_cost: f64,
    /// Seller-declared marketing cost, passed through unchanged.
    pub marketing_cost: f64,
    /// Sum of every field above.
    pub total_fees: f64,
}

/// Net profit and margin for one order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitResult {
    /// Selling price minus cost minus total fees.  Negative means a loss.
    pub net_profit: f64,
    /// Net profit as a percentage of the selling price, rounded to two
    /// decimals.  `None` when the selling price is zero.
    pub profit_margin: Option<f64>,
}

/// Minimum selling price at which net profit reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "price", rename_all = "snake_case")]
pub enum Breakeven {
    /// Break-even price rounded up to a whole currency unit.
    Price(f64),
    /// Percentage fees consume the whole selling price; no finite price
    /// can break even.
    Unreachable,
}

impl Breakeven {
    /// The break-even price, if one exists.
    pub fn price(&self) -> Option<f64> {
        match self {
            Breakeven::Price(p) => Some(*p),
            Breakeven::Unreachable => None,
        }
    }
}

/// Everything computed for one order, bundled for a presentation layer
/// to render or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitReport {
    /// The order as priced, after non-finite amounts were zeroed.
    pub input: OrderInput,
    /// Itemised fees at the order's selling price.
    pub fees: FeeBreakdown,
    /// Net profit and margin at the order's selling price.
    pub profit: ProfitResult,
    /// Selling price needed to stop losing money on this order.
    pub breakeven: Breakeven,
}

/// Totals across a list of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of reports summed.
    pub orders: usize,
    /// Total revenue across all orders.
    pub selling_price: f64,
    /// Total cost of goods across all orders.
    pub cost_price: f64,
    /// Total payment processing fees.
    pub payment_fee: f64,
    /// Total category commissions.
    pub category_fee: f64,
    /// Total free-shipping and voucher program fees.
    pub program_fee: f64,
    /// Total tax withheld.
    pub tax: f64,
    /// Total of every fee and add-on cost, including logistics,
    /// packaging and marketing.
    pub total_fees: f64,
    /// Total net profit.  Negative when the list loses money overall.
    pub net_profit: f64,
    /// Total net profit over total selling price, as a percentage.  Zero
    /// when there is no revenue.
    pub overall_margin: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_input_is_defaulted() {
        let input: OrderInput = serde_json::from_value(json!({"selling_price": 1000.0})).unwrap();
        assert_eq!(input.selling_price, 1000.0);
        assert_eq!(input.cost_price, 0.0);
        assert_eq!(input.category, "default");
        assert_eq!(input.seller_tier, SellerTier::Standard);
        assert!(!input.logistics_program);
    }

    #[test]
    fn blank_and_null_amounts_read_as_zero() {
        let input: OrderInput = serde_json::from_value(json!({
            "selling_price": null,
            "cost_price": "",
            "tax_rate_percent": "8",
            "packaging_cost": " 1500.5 ",
            "marketing_cost": "abc"
        }))
        .unwrap();
        assert_eq!(input.selling_price, 0.0);
        assert_eq!(input.cost_price, 0.0);
        assert_eq!(input.tax_rate_percent, 8.0);
        assert_eq!(input.packaging_cost, 1500.5);
        assert_eq!(input.marketing_cost, 0.0);

        let input: OrderInput =
            serde_json::from_value(json!({"selling_price": 250000, "cost_price": -3})).unwrap();
        assert_eq!(input.selling_price, 250000.0);
        assert_eq!(input.cost_price, -3.0);
    }

    #[test]
    fn sanitized_zeroes_non_finite_amounts() {
        let input = OrderInput {
            selling_price: f64::NAN,
            cost_price: -5.0,
            tax_rate_percent: f64::INFINITY,
            ..Default::default()
        };
        let clean = input.sanitized();
        assert_eq!(clean.selling_price, 0.0);
        assert_eq!(clean.cost_price, -5.0);
        assert_eq!(clean.tax_rate_percent, 0.0);
    }

    #[test]
    fn breakeven_serialises_with_status_tag() {
        assert_eq!(
            serde_json::to_value(Breakeven::Price(120.0)).unwrap(),
            json!({"status": "price", "price": 120.0})
        );
        assert_eq!(
            serde_json::to_value(Breakeven::Unreachable).unwrap(),
            json!({"status": "unreachable"})
        );
    }

    #[test]
    fn missing_margin_serialises_as_null() {
        let result = ProfitResult { net_profit: -10.0, profit_margin: None };
        let value = serde_json::to_value(result).unwrap();
        assert!(value["profit_margin"].is_null());
    }
}
