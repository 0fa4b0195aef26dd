//! Entry point for the Seller Profit Engine binary.
//!
//! Running this binary starts an HTTP server that exposes the profit
//! calculators.  See [`seller_profit_engine::config`] for the
//! environment variables it reads.

use seller_profit_engine::{api, config::Config, logging};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init_logging(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %config.bind_addr,
        "seller-profit-engine starting"
    );

    let rates = config.load_rates()?;
    if let Err(err) = api::serve(config.bind_addr, rates).await {
        error!(error = %err, "server stopped");
        return Err(err);
    }
    Ok(())
}
