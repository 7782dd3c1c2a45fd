//! Bazaar Runner - command-line front end for the market simulation
//!
//! - **Config**: Argument parsing, JSON config files and defaulting
//! - **Report**: Final price and per-agent balances/inventories
//! - **Logging**: `env_logger` set up from `--verbose` / `RUST_LOG`

pub mod config;
pub mod error;
pub mod report;

pub use config::{Command, HELP, RunOptions, parse_args};
pub use error::{ConfigError, Result, RunnerError};
pub use report::FinalReport;

use bazaar_abm::MarketCoordinator;
use std::io::Write;

/// Filter used when `RUST_LOG` is unset: quiet unless `--verbose`
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Initialise logging. `--verbose` shows every agent decision.
pub fn init_logging(verbose: bool) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(verbose)),
    )
        .format_timestamp(None)
        .init();
}

/// Run the simulation described by `options`, writing any report to `out`.
///
/// Returns the finished market so callers can inspect it.
pub fn execute<W: Write>(options: &RunOptions, out: &mut W) -> Result<MarketCoordinator> {
    let mut market = MarketCoordinator::new(options.market.clone());
    if let Some((agent_id, iterations)) = options.history {
        market.agent_history(agent_id, iterations)?;
    }

    market.run();

    if options.report {
        let report = FinalReport::from_market(&market);
        if options.json {
            writeln!(out, "{}", report.to_json()?)?;
        } else {
            write!(out, "{}", report)?;
        }
    }

    Ok(market)
}
