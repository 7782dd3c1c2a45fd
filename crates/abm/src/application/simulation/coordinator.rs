//! Market Coordinator
//!
//! The iteration loop: shuffle the agents, let each act against a price
//! frozen for the iteration, then fold every decision into one settlement.

use super::{DecisionTally, MarketConfig, SimulationMetrics};
use crate::application::agents::{Agent, AgentId, AgentSnapshot, DecisionPolicy, MarketView};
use crate::domain::{Decision, MarketState, PolicyKind, aggregate_delta};
use crate::error::{Result, SimError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Nothing has run yet
    Idle,
    /// Iteration `iteration` is the next to run
    Running { iteration: u64 },
    /// All configured iterations have run
    Finished,
}

/// Result of a single iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// Zero-based iteration index
    pub iteration: u64,
    /// Price every agent saw during the iteration
    pub price_before: Decimal,
    /// Price after settlement
    pub price_after: Decimal,
    /// Realized fractional change, `(buys - sells) * rate`
    pub price_delta: Decimal,
    /// Counts of executed decisions
    pub tally: DecisionTally,
    /// Free stock left after the pass
    pub free_stock: u64,
    /// Agents in the order they were activated
    pub activation_order: Vec<AgentId>,
    /// Executed decision of every agent, in activation order
    pub decisions: Vec<(AgentId, Decision)>,
}

/// Owns the agents and the market state and runs the iteration loop
pub struct MarketCoordinator {
    config: MarketConfig,
    agents: Vec<Agent>,
    state: MarketState,
    rng: StdRng,
    phase: SimulationPhase,
    metrics: SimulationMetrics,
}

impl MarketCoordinator {
    /// Create a coordinator and its agent population, seeding the generator
    /// from `config.seed` (entropy when unset).
    pub fn new(config: MarketConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a coordinator driven by the given generator; `config.seed` is ignored.
    ///
    /// Ids are assigned contiguously in creation order: random agents first,
    /// then trend followers, contrarians and optimizers.
    pub fn with_rng(config: MarketConfig, rng: StdRng) -> Self {
        let state = MarketState::new(
            config.initial_price,
            config.total_stock,
            config.price_change_rate,
        );

        let mut coordinator = Self {
            agents: Vec::with_capacity(config.total_agents() as usize),
            metrics: SimulationMetrics::starting_at(config.initial_price),
            phase: SimulationPhase::Idle,
            config,
            state,
            rng,
        };

        for kind in PolicyKind::ALL {
            for _ in 0..coordinator.config.agents_of(kind) {
                let policy = coordinator.config.policies.build(kind);
                coordinator.spawn_agent(policy);
            }
        }

        log::info!(
            "market created: {} agents, {} units of stock, price {:.2}",
            coordinator.agents.len(),
            coordinator.state.free_stock(),
            coordinator.state.price()
        );
        coordinator
    }

    /// Add an agent with the configured starting balance; returns its id
    pub fn spawn_agent(&mut self, policy: Box<dyn DecisionPolicy>) -> AgentId {
        let id = AgentId::new(self.agents.len() as u64);
        self.agents
            .push(Agent::new(id, self.config.initial_balance, policy));
        id
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn state(&self) -> &MarketState {
        &self.state
    }

    pub fn price(&self) -> Decimal {
        self.state.price()
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    /// Agents in storage order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        // ids are storage indices
        usize::try_from(id.0).ok().and_then(|idx| self.agents.get(idx))
    }

    /// Agents sorted by id ascending
    pub fn agents_by_id(&self) -> Vec<&Agent> {
        let mut agents: Vec<&Agent> = self.agents.iter().collect();
        agents.sort_by_key(|a| a.id());
        agents
    }

    /// Snapshots of every agent, sorted by id ascending
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents_by_id().into_iter().map(Agent::snapshot).collect()
    }

    /// Per-iteration balance/inventory series for one agent.
    ///
    /// Not supported: always returns [`SimError::Unsupported`].
    pub fn agent_history(
        &self,
        agent_id: AgentId,
        iterations: u64,
    ) -> Result<Vec<AgentSnapshot>> {
        Err(SimError::Unsupported(format!(
            "historical view of agent {} over {} iterations",
            agent_id, iterations
        )))
    }

    /// Run every remaining iteration
    pub fn run(&mut self) -> SimulationMetrics {
        while self.step().is_some() {}

        log::info!(
            "simulation finished after {} iterations: price {:.2} (min {:.2}, max {:.2}), {} buys, {} sells",
            self.metrics.iterations_run,
            self.metrics.final_price,
            self.metrics.min_price,
            self.metrics.max_price,
            self.metrics.decisions.buys,
            self.metrics.decisions.sells
        );
        self.metrics.clone()
    }

    /// Run a single iteration; `None` once the run is finished
    pub fn step(&mut self) -> Option<IterationReport> {
        let iteration = self.begin_iteration()?;

        // 1. Price and trend are frozen for the whole pass
        let price = self.state.price();
        let price_delta = self.state.last_delta();

        // 2. Fresh activation order
        let order = self.shuffled_order();

        // 3. Each agent acts; stock availability is re-read per agent
        let mut decisions = Vec::with_capacity(order.len());
        let mut tally = DecisionTally::default();

        for &idx in &order {
            let view = MarketView {
                price,
                price_delta,
                stock_available: self.state.stock_available(),
                iteration,
                total_iterations: self.config.iterations,
            };

            let agent = &mut self.agents[idx];
            let decision = agent.act(&view, &mut self.rng);
            if decision == Decision::Buy {
                self.state.take_stock();
            }

            tally.record(decision);
            self.metrics.record_decision(agent.kind(), decision);
            decisions.push((agent.id(), decision));
        }

        // 4-5. Aggregate and settle once
        let delta = aggregate_delta(
            decisions.iter().map(|(_, d)| d),
            self.state.price_change_rate(),
        );
        let price_after = self.state.settle(delta);
        self.metrics.record_settlement(price_after);

        log::trace!(
            "iteration {}: {} buys, {} sells, {} skips, price {:.4} -> {:.4}, stock {}",
            iteration,
            tally.buys,
            tally.sells,
            tally.skips,
            price,
            price_after,
            self.state.free_stock()
        );

        // 6. Advance
        self.phase = if iteration + 1 >= self.config.iterations {
            SimulationPhase::Finished
        } else {
            SimulationPhase::Running {
                iteration: iteration + 1,
            }
        };

        Some(IterationReport {
            iteration,
            price_before: price,
            price_after,
            price_delta: delta,
            tally,
            free_stock: self.state.free_stock(),
            activation_order: order.iter().map(|&i| self.agents[i].id()).collect(),
            decisions,
        })
    }

    fn begin_iteration(&mut self) -> Option<u64> {
        match self.phase {
            SimulationPhase::Idle if self.config.iterations == 0 => {
                self.phase = SimulationPhase::Finished;
                None
            }
            SimulationPhase::Idle => Some(0),
            SimulationPhase::Running { iteration } => Some(iteration),
            SimulationPhase::Finished => None,
        }
    }

    fn shuffled_order(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.agents.len()).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

impl std::fmt::Debug for MarketCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketCoordinator")
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("agents", &self.agents.len())
            .finish()
    }
}
