//! Marketplace rate tables.
//!
//! The `rates` module holds the commission schedule and program terms
//! the calculators price against.  A [`RateTable`] is loaded once at
//! process start, either from the built-in schedule or from a JSON
//! file, and is never mutated afterwards; callers share it by
//! reference (or behind an `Arc`) across every computation.

use crate::error::{EngineError, Result};
use crate::models::{SellerTier, DEFAULT_CATEGORY};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Commission rates keyed by category for one seller tier.
///
/// Construction guarantees a `default` entry exists and that every
/// rate is a fraction in `[0, 1)`, so [`CommissionTable::rate_for`]
/// cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct CommissionTable {
    default: f64,
    categories: HashMap<String, f64>,
}

impl CommissionTable {
    /// Commission rate for `category`, falling back to the `default`
    /// entry when the key is unknown or empty.
    pub fn rate_for(&self, category: &str) -> f64 {
        match self.categories.get(category) {
            Some(rate) => *rate,
            None => {
                if category != DEFAULT_CATEGORY {
                    debug!(category, rate = self.default, "unknown category, using default rate");
                }
                self.default
            }
        }
    }
}

impl TryFrom<HashMap<String, f64>> for CommissionTable {
    type Error = EngineError;

    fn try_from(mut entries: HashMap<String, f64>) -> Result<Self> {
        for (key, value) in &entries {
            check_fraction(key, *value)?;
        }
        let default = entries
            .remove(DEFAULT_CATEGORY)
            .ok_or(EngineError::MissingDefault)?;
        Ok(Self {
            default,
            categories: entries,
        })
    }
}

impl From<CommissionTable> for HashMap<String, f64> {
    fn from(table: CommissionTable) -> Self {
        let mut entries = table.categories;
        entries.insert(DEFAULT_CATEGORY.to_string(), table.default);
        entries
    }
}

/// Rate and per-order cap of an opt-in promotional program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramTerm {
    pub rate: f64,
    pub cap: f64,
}

impl ProgramTerm {
    /// Fee charged on `selling_price`, capped and rounded to a whole unit.
    pub fn fee(&self, selling_price: f64) -> f64 {
        (selling_price * self.rate).min(self.cap).round()
    }
}

/// Fees that apply regardless of category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramTerms {
    /// Payment processing rate charged on every order.
    pub payment_rate: f64,
    /// Flat per-order charge of the logistics program.
    pub logistics_fee: f64,
    pub free_ship: ProgramTerm,
    pub voucher: ProgramTerm,
}

impl Default for ProgramTerms {
    fn default() -> Self {
        Self {
            payment_rate: 0.0491,
            logistics_fee: 1620.0,
            free_ship: ProgramTerm {
                rate: 0.06,
                cap: 20000.0,
            },
            voucher: ProgramTerm {
                rate: 0.04,
                cap: 20000.0,
            },
        }
    }
}

impl ProgramTerms {
    fn validate(&self) -> Result<()> {
        check_fraction("payment_rate", self.payment_rate)?;
        check_fraction("free_ship.rate", self.free_ship.rate)?;
        check_fraction("voucher.rate", self.voucher.rate)?;
        check_amount("logistics_fee", self.logistics_fee)?;
        check_amount("free_ship.cap", self.free_ship.cap)?;
        check_amount("voucher.cap", self.voucher.cap)?;
        Ok(())
    }
}

/// The full fee schedule: one commission table per seller tier plus
/// the category-independent program terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub standard: CommissionTable,
    pub premium: CommissionTable,
    #[serde(default)]
    pub programs: ProgramTerms,
}

const STANDARD_RATES: &[(&str, f64)] = &[
    ("fashion", 0.135),
    ("beauty_skincare", 0.14),
    ("health_supplements", 0.14),
    ("phones_accessories", 0.12),
    ("audio_cameras", 0.10),
    ("computers_components", 0.075),
    ("electronics_tv", 0.08),
    ("large_appliances", 0.075),
    ("kitchen_home", 0.10),
    ("food_beverage", 0.11),
    ("pet_care", 0.13),
    ("auto_parts", 0.13),
    ("voucher_services", 0.11),
    ("devices_premium", 0.02),
];

const PREMIUM_RATES: &[(&str, f64)] = &[("fashion", 0.12), ("electronics", 0.06)];

impl Default for RateTable {
    /// The marketplace's published 2026 schedule.
    fn default() -> Self {
        let table = |rates: &[(&str, f64)], default: f64| CommissionTable {
            default,
            categories: rates.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        };
        Self {
            standard: table(STANDARD_RATES, 0.10),
            premium: table(PREMIUM_RATES, 0.10),
            programs: ProgramTerms::default(),
        }
    }
}

impl RateTable {
    pub fn tier(&self, tier: SellerTier) -> &CommissionTable {
        match tier {
            SellerTier::Standard => &self.standard,
            SellerTier::Premium => &self.premium,
        }
    }

    /// Commission rate for `category` in the table selected by `tier`.
    pub fn category_rate(&self, tier: SellerTier, category: &str) -> f64 {
        self.tier(tier).rate_for(category)
    }

    /// Parse and validate a rate table from JSON text.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let table: RateTable = serde_json::from_str(data)?;
        table.programs.validate()?;
        Ok(table)
    }
}

/// Load a rate table from a JSON file.
///
/// The file must define `standard` and `premium` commission maps, each
/// with a `default` entry.  `programs` may be omitted, in which case the
/// built-in program terms apply.
pub fn load_rate_table(path: &Path) -> Result<RateTable> {
    let data = std::fs::read_to_string(path)?;
    let table = RateTable::from_json_str(&data)?;
    info!(
        path = %path.display(),
        standard_categories = table.standard.categories.len(),
        premium_categories = table.premium.categories.len(),
        "loaded rate table"
    );
    Ok(table)
}

fn check_fraction(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidRate {
            key: key.to_string(),
            value,
        })
    }
}

fn check_amount(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidAmount {
            key: key.to_string(),
            value,
        })
    }
}
