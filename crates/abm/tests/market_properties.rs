//! Behavioral tests for the market coordinator
//!
//! These tests drive full runs and check the invariants and scenarios the
//! engine guarantees: non-negative holdings and stock, positive price,
//! reproducibility under a seed, and the net-flow pricing law.

use bazaar_abm::{
    Decision, DecisionPolicy, Holdings, MarketConfig, MarketCoordinator, MarketView, PolicyKind,
    SimulationPhase,
};
use rand::RngCore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SEED: u64 = 42;

/// Policy that always intends the same decision
struct Always(Decision);

impl DecisionPolicy for Always {
    fn decide(
        &mut self,
        _view: &MarketView,
        _holdings: &Holdings,
        _rng: &mut dyn RngCore,
    ) -> Decision {
        self.0
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }
}

/// Empty market with the given iteration count, ready for hand-built agents
fn bare_market(iterations: u64) -> MarketConfig {
    MarketConfig {
        iterations,
        seed: Some(SEED),
        ..Default::default()
    }
    .without_agents()
}

#[test]
fn test_invariants_hold_every_iteration() {
    for rate in [dec!(0.0005), dec!(0.01), dec!(0.3), dec!(0.9)] {
        let mut coordinator = MarketCoordinator::new(MarketConfig {
            random_agents: 4,
            trend_agents: 3,
            contrarian_agents: 2,
            optimizer_agents: 1,
            total_stock: 150,
            iterations: 200,
            price_change_rate: rate,
            seed: Some(SEED),
            ..Default::default()
        });

        while let Some(report) = coordinator.step() {
            assert!(
                coordinator.price() > Decimal::ZERO,
                "price not positive at iteration {} with rate {}",
                report.iteration,
                rate
            );
            for agent in coordinator.agents() {
                assert!(agent.balance() >= Decimal::ZERO);
            }
        }

        // Stock only falls by executed buys, floored at zero
        let buys = coordinator.metrics().decisions.buys;
        assert_eq!(coordinator.state().free_stock(), 150u64.saturating_sub(buys));
    }
}

#[test]
fn test_deterministic_under_seed() {
    let config = MarketConfig {
        iterations: 300,
        seed: Some(2024),
        ..Default::default()
    };

    let mut run1 = MarketCoordinator::new(config.clone());
    let mut run2 = MarketCoordinator::new(config);
    let metrics1 = run1.run();
    let metrics2 = run2.run();

    assert_eq!(run1.price(), run2.price());
    assert_eq!(run1.snapshots(), run2.snapshots());
    assert_eq!(metrics1, metrics2);
}

#[test]
fn test_different_seeds_diverge() {
    let make = |seed| {
        let mut coordinator = MarketCoordinator::new(MarketConfig {
            iterations: 200,
            seed: Some(seed),
            ..Default::default()
        });
        coordinator.run();
        coordinator.snapshots()
    };

    assert_ne!(make(1), make(2));
}

#[test]
fn test_aggregation_law() {
    let mut coordinator = MarketCoordinator::new(MarketConfig {
        iterations: 100,
        seed: Some(SEED),
        ..Default::default()
    });
    let rate = coordinator.state().price_change_rate();

    while let Some(report) = coordinator.step() {
        let buys = report
            .decisions
            .iter()
            .filter(|(_, d)| *d == Decision::Buy)
            .count() as i64;
        let sells = report
            .decisions
            .iter()
            .filter(|(_, d)| *d == Decision::Sell)
            .count() as i64;

        let delta = Decimal::from(buys - sells) * rate;
        assert_eq!(report.price_delta, delta);
        assert_eq!(
            report.price_after,
            (report.price_before * (Decimal::ONE + delta)).round_dp(12)
        );
        assert_eq!(coordinator.state().last_delta(), delta);
    }
}

#[test]
fn test_single_forced_buy() {
    let mut coordinator = MarketCoordinator::new(bare_market(1));
    let id = coordinator.spawn_agent(Box::new(Always(Decision::Buy)));

    let report = coordinator.step().unwrap();

    let agent = coordinator.agent(id).unwrap();
    assert_eq!(report.decisions, vec![(id, Decision::Buy)]);
    assert_eq!(agent.balance(), dec!(800.00));
    assert_eq!(agent.inventory(), 1);
    assert_eq!(coordinator.price(), dec!(200.10));
    assert_eq!(coordinator.state().free_stock(), 99_999);
    assert_eq!(coordinator.phase(), SimulationPhase::Finished);
}

#[test]
fn test_unaffordable_buy_recorded_as_skip() {
    let mut coordinator = MarketCoordinator::new(MarketConfig {
        initial_balance: dec!(150.00),
        ..bare_market(1)
    });
    let id = coordinator.spawn_agent(Box::new(Always(Decision::Buy)));

    let report = coordinator.step().unwrap();

    let agent = coordinator.agent(id).unwrap();
    assert_eq!(report.decisions, vec![(id, Decision::Skip)]);
    assert_eq!(agent.balance(), dec!(150.00));
    assert_eq!(agent.inventory(), 0);
    assert_eq!(coordinator.price(), dec!(200.00));
}

#[test]
fn test_empty_sell_recorded_as_skip() {
    let mut coordinator = MarketCoordinator::new(bare_market(5));
    let id = coordinator.spawn_agent(Box::new(Always(Decision::Sell)));

    while let Some(report) = coordinator.step() {
        assert_eq!(report.decisions, vec![(id, Decision::Skip)]);
    }

    let agent = coordinator.agent(id).unwrap();
    assert_eq!(agent.balance(), dec!(1000.00));
    assert_eq!(agent.inventory(), 0);
    assert_eq!(coordinator.price(), dec!(200.00));
}

#[test]
fn test_stock_runs_out_mid_iteration() {
    let mut coordinator = MarketCoordinator::new(MarketConfig {
        total_stock: 3,
        ..bare_market(2)
    });
    for _ in 0..5 {
        coordinator.spawn_agent(Box::new(Always(Decision::Buy)));
    }

    let report = coordinator.step().unwrap();

    // Earlier agents in the shuffled order take the last units
    let outcomes: Vec<Decision> = report.decisions.iter().map(|(_, d)| *d).collect();
    assert_eq!(
        outcomes,
        vec![
            Decision::Buy,
            Decision::Buy,
            Decision::Buy,
            Decision::Skip,
            Decision::Skip
        ]
    );
    assert_eq!(report.free_stock, 0);

    // Price still settles on the three executed buys
    assert_eq!(report.price_delta, dec!(0.0015));

    let second = coordinator.step().unwrap();
    assert_eq!(second.tally.buys, 0);
    assert_eq!(second.price_delta, Decimal::ZERO);
}

#[test]
fn test_zero_agents_price_unchanged() {
    let mut coordinator = MarketCoordinator::new(bare_market(250));
    let metrics = coordinator.run();

    assert_eq!(metrics.iterations_run, 250);
    assert_eq!(coordinator.price(), dec!(200.00));
    assert_eq!(metrics.min_price, dec!(200.00));
    assert_eq!(metrics.max_price, dec!(200.00));
}

#[test]
fn test_optimizer_finishes_flat() {
    for seed in [1, 2, 3] {
        let mut coordinator = MarketCoordinator::new(MarketConfig {
            iterations: 300,
            seed: Some(seed),
            ..Default::default()
        });
        coordinator.run();

        for agent in coordinator.agents() {
            if agent.kind() == PolicyKind::Optimizer {
                assert_eq!(agent.inventory(), 0, "optimizer {} left holding", agent.id());
            }
        }
    }
}

#[test]
fn test_report_sorted_by_id() {
    let mut coordinator = MarketCoordinator::new(MarketConfig {
        iterations: 20,
        seed: Some(SEED),
        ..Default::default()
    });
    coordinator.run();

    let snapshots = coordinator.snapshots();
    assert_eq!(snapshots.len(), 100);
    assert!(snapshots.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(snapshots[0].kind, PolicyKind::Random);
    assert_eq!(snapshots[99].kind, PolicyKind::Optimizer);
}
