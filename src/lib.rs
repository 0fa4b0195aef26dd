//! Seller Profit Engine library crate.
//!
//! This crate computes a marketplace seller's fee breakdown, net
//! profit, margin and break-even price for an order.  Applications may
//! call the calculators in `fees`, `profit` and `breakeven` directly,
//! use `engine::evaluate` to run all three at once, or embed the HTTP
//! surface via `api::build_router`.

pub mod api;
pub mod breakeven;
pub mod config;
pub mod engine;
pub mod error;
pub mod fees;
pub mod logging;
pub mod models;
pub mod profit;
pub mod rates;

pub use engine::{evaluate, evaluate_batch, summarize};
pub use error::{EngineError, Result};
pub use models::{Breakeven, FeeBreakdown, OrderInput, ProfitReport, ProfitResult, SellerTier};
pub use rates::RateTable;
