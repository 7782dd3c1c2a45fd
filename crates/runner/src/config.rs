//! Configuration loading for the market runner
//!
//! Settings come from three layers, later ones winning:
//! - Built-in defaults
//! - An optional JSON file (`--config`)
//! - Command-line flags
//!
//! Any count, price, balance or rate left non-positive falls back to its
//! default.

use crate::error::ConfigError;
use bazaar_abm::{AgentId, MarketConfig};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

pub const HELP: &str = r#"bazaar - agent-based market price formation simulator

USAGE:
    bazaar [OPTIONS]

OPTIONS:
    -aa,  --random-agents <N>       Number of random agents (default: 51)
    -at,  --trend-agents <N>        Number of trend-following agents (default: 24)
    -aat, --contrarian-agents <N>   Number of contrarian agents (default: 24)
    -ao,  --optimizer-agents <N>    Number of optimizer agents (default: 1)
    -nt,  --stock <N>               Total units of free stock (default: 100000)
    -it,  --iterations <N>          Iterations to simulate (default: 1000)
    -ppt, --price <PRICE>           Initial unit price (default: 200.00)
    -b,   --balance <AMOUNT>        Initial balance per agent (default: 1000.00)
    -cp,  --price-change <RATE>     Fractional price move per buy/sell, e.g. 0.001 = 0.1% (default: 0.0005)
    -s,   --seed <SEED>             Random seed for a reproducible run
    -c,   --config <PATH>           Load market configuration from a JSON file
    -i,   --report                  Print the final market report (balance and inventory per agent)
          --json                    Print the final report as JSON
    -v,   --verbose                 Print every agent decision in every iteration
          --history <ID> <N>        Per-agent history over N iterations (not supported)
    -h,   --help                    Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                        Log level filter (overrides --verbose)
"#;

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunOptions),
    Help,
}

/// Fully resolved options for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub market: MarketConfig,
    pub report: bool,
    pub json: bool,
    pub verbose: bool,
    pub history: Option<(AgentId, u64)>,
}

/// Values given explicitly on the command line
#[derive(Debug, Default)]
struct Overrides {
    random_agents: Option<i64>,
    trend_agents: Option<i64>,
    contrarian_agents: Option<i64>,
    optimizer_agents: Option<i64>,
    total_stock: Option<i64>,
    iterations: Option<i64>,
    initial_price: Option<Decimal>,
    initial_balance: Option<Decimal>,
    price_change_rate: Option<Decimal>,
    seed: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut MarketConfig) {
        let count = |v: i64| v.max(0) as u64;

        if let Some(v) = self.random_agents {
            config.random_agents = count(v);
        }
        if let Some(v) = self.trend_agents {
            config.trend_agents = count(v);
        }
        if let Some(v) = self.contrarian_agents {
            config.contrarian_agents = count(v);
        }
        if let Some(v) = self.optimizer_agents {
            config.optimizer_agents = count(v);
        }
        if let Some(v) = self.total_stock {
            config.total_stock = count(v);
        }
        if let Some(v) = self.iterations {
            config.iterations = count(v);
        }
        if let Some(v) = self.initial_price {
            config.initial_price = v;
        }
        if let Some(v) = self.initial_balance {
            config.initial_balance = v;
        }
        if let Some(v) = self.price_change_rate {
            config.price_change_rate = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

/// Parse command-line arguments (without the program name)
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut overrides = Overrides::default();
    let mut config_path: Option<String> = None;
    let mut report = false;
    let mut json = false;
    let mut verbose = false;
    let mut history = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => return Ok(Command::Help),
            "--random-agents" | "-aa" => {
                overrides.random_agents = Some(flag_value(&args, &mut i, flag)?)
            }
            "--trend-agents" | "-at" => {
                overrides.trend_agents = Some(flag_value(&args, &mut i, flag)?)
            }
            "--contrarian-agents" | "-aat" => {
                overrides.contrarian_agents = Some(flag_value(&args, &mut i, flag)?)
            }
            "--optimizer-agents" | "-ao" => {
                overrides.optimizer_agents = Some(flag_value(&args, &mut i, flag)?)
            }
            "--stock" | "-nt" => overrides.total_stock = Some(flag_value(&args, &mut i, flag)?),
            "--iterations" | "-it" => overrides.iterations = Some(flag_value(&args, &mut i, flag)?),
            "--price" | "-ppt" => overrides.initial_price = Some(flag_value(&args, &mut i, flag)?),
            "--balance" | "-b" => {
                overrides.initial_balance = Some(flag_value(&args, &mut i, flag)?)
            }
            "--price-change" | "-cp" => {
                overrides.price_change_rate = Some(flag_value(&args, &mut i, flag)?)
            }
            "--seed" | "-s" => overrides.seed = Some(flag_value(&args, &mut i, flag)?),
            "--config" | "-c" => config_path = Some(next_value(&args, &mut i, flag)?.to_string()),
            "--report" | "-i" => report = true,
            "--json" => json = true,
            "--verbose" | "-v" => verbose = true,
            "--history" => {
                let agent: u64 = flag_value(&args, &mut i, flag)?;
                let iterations: u64 = flag_value(&args, &mut i, flag)?;
                history = Some((AgentId::new(agent), iterations));
            }
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
        i += 1;
    }

    let mut market = match config_path {
        Some(path) => load_config_file(path)?,
        None => MarketConfig::default(),
    };
    overrides.apply(&mut market);

    Ok(Command::Run(RunOptions {
        market: with_defaults(market),
        report: report || json,
        json,
        verbose,
        history,
    }))
}

/// Load a market configuration from a JSON file
pub fn load_config_file(path: impl AsRef<Path>) -> Result<MarketConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
        path: path.as_ref().display().to_string(),
        error: e.to_string(),
    })?;
    log::info!("Loading configuration from: {}", path.as_ref().display());

    parse_config_json(&content)
}

/// Parse a market configuration from a JSON string
pub fn parse_config_json(json: &str) -> Result<MarketConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Replace every non-positive setting with its default
pub fn with_defaults(mut config: MarketConfig) -> MarketConfig {
    let defaults = MarketConfig::default();

    let counts = [
        (&mut config.random_agents, defaults.random_agents),
        (&mut config.trend_agents, defaults.trend_agents),
        (&mut config.contrarian_agents, defaults.contrarian_agents),
        (&mut config.optimizer_agents, defaults.optimizer_agents),
        (&mut config.total_stock, defaults.total_stock),
        (&mut config.iterations, defaults.iterations),
    ];
    for (value, default) in counts {
        if *value == 0 {
            *value = default;
        }
    }

    let amounts = [
        (&mut config.initial_price, defaults.initial_price),
        (&mut config.initial_balance, defaults.initial_balance),
        (&mut config.price_change_rate, defaults.price_change_rate),
    ];
    for (value, default) in amounts {
        if *value <= Decimal::ZERO {
            *value = default;
        }
    }

    config
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, ConfigError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn flag_value<T: FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, ConfigError> {
    let value = next_value(args, i, flag)?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_options(list: &[&str]) -> RunOptions {
        match parse_args(args(list)).unwrap() {
            Command::Run(options) => options,
            Command::Help => panic!("expected run options"),
        }
    }

    #[test]
    fn test_no_args_gives_defaults() {
        let options = run_options(&[]);
        assert_eq!(options.market, MarketConfig::default());
        assert!(!options.report);
        assert!(!options.verbose);
        assert!(options.history.is_none());
    }

    #[test]
    fn test_short_and_long_flags() {
        let options = run_options(&[
            "-aa", "10", "--trend-agents", "5", "-aat", "3", "-ao", "2", "-nt", "500", "-it",
            "50", "-ppt", "150.50", "-b", "2000", "-cp", "0.001", "-s", "9", "-i", "-v",
        ]);

        let m = &options.market;
        assert_eq!(m.random_agents, 10);
        assert_eq!(m.trend_agents, 5);
        assert_eq!(m.contrarian_agents, 3);
        assert_eq!(m.optimizer_agents, 2);
        assert_eq!(m.total_stock, 500);
        assert_eq!(m.iterations, 50);
        assert_eq!(m.initial_price, dec!(150.50));
        assert_eq!(m.initial_balance, dec!(2000));
        assert_eq!(m.price_change_rate, dec!(0.001));
        assert_eq!(m.seed, Some(9));
        assert!(options.report);
        assert!(options.verbose);
    }

    #[test]
    fn test_non_positive_values_default() {
        let options = run_options(&["-aa", "0", "-at", "-4", "-ppt", "-1.0", "-cp", "0", "-it", "0"]);

        assert_eq!(options.market.random_agents, 51);
        assert_eq!(options.market.trend_agents, 24);
        assert_eq!(options.market.initial_price, dec!(200.00));
        assert_eq!(options.market.price_change_rate, dec!(0.0005));
        assert_eq!(options.market.iterations, 1000);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(args(&["-v", "--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_history_takes_two_values() {
        let options = run_options(&["--history", "3", "25"]);
        assert_eq!(options.history, Some((AgentId::new(3), 25)));
    }

    #[test]
    fn test_json_implies_report() {
        let options = run_options(&["--json"]);
        assert!(options.report);
        assert!(options.json);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_args(args(&["--bogus"])),
            Err(ConfigError::UnknownArgument(_))
        ));
        assert!(matches!(
            parse_args(args(&["--iterations"])),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            parse_args(args(&["--price", "cheap"])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_args(args(&["--history", "1"])),
            Err(ConfigError::MissingValue(_))
        ));
    }

    #[test]
    fn test_config_json_partial() {
        let config = parse_config_json(
            r#"{
                "random_agents": 5,
                "initial_price": "50.25",
                "seed": 7,
                "policies": { "trend": { "buy_probability": 0.9 } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.random_agents, 5);
        assert_eq!(config.trend_agents, 24);
        assert_eq!(config.initial_price, dec!(50.25));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.policies.trend.buy_probability, 0.9);
        assert_eq!(config.policies.trend.sell_probability, 0.20);
    }

    #[test]
    fn test_config_json_invalid() {
        assert!(matches!(
            parse_config_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            load_config_file("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
