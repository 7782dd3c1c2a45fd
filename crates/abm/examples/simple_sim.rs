//! Simple simulation example with a small mixed population

use bazaar_abm::{MarketConfig, MarketCoordinator, PolicyKind};
use rust_decimal_macros::dec;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Market Simulation Test ===\n");

    let config = MarketConfig {
        random_agents: 10,
        trend_agents: 5,
        contrarian_agents: 5,
        optimizer_agents: 1,
        total_stock: 500,
        iterations: 500,
        initial_price: dec!(200.00),
        initial_balance: dec!(1000.00),
        price_change_rate: dec!(0.0005),
        seed: Some(42),
        ..Default::default()
    };

    println!("Agents:");
    for kind in PolicyKind::ALL {
        println!("  - {}: {}", kind, config.agents_of(kind));
    }

    println!("\nRunning simulation for {} iterations...\n", config.iterations);

    let mut coordinator = MarketCoordinator::new(config);
    let metrics = coordinator.run();

    println!("=== Results ===");
    println!("Iterations:   {}", metrics.iterations_run);
    println!("Final price:  {:.2}", metrics.final_price);
    println!("Price range:  {:.2} - {:.2}", metrics.min_price, metrics.max_price);
    println!("Free stock:   {}", coordinator.state().free_stock());

    println!("\nDecisions by policy:");
    for (kind, tally) in &metrics.decisions_by_kind {
        println!(
            "  {}: {} buys, {} sells, {} skips",
            kind, tally.buys, tally.sells, tally.skips
        );
    }

    println!("\nSimulation completed successfully!");
}
