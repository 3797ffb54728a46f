//! # monty_hall_sim
//!
//! An interactive Monty Hall simulator engine.
//!
//! Three doors, one prize. The player picks a door, the host opens a door with
//! no prize behind it, and the player either switches to the last closed door
//! or stays. This crate models that game two ways:
//!
//! - **By hand**: [`MontyHallGame`] walks one round at a time through
//!   `Initial → DoorSelected → GameOver` and keeps the player's running
//!   statistics.
//! - **In bulk**: [`BatchEngine`] plays N trials on a tokio task, scoring the
//!   "always switch" and "always stay" strategies side by side and emitting a
//!   [`ProgressEvent`] after every trial so charts can fill up live.
//!
//! Both are driven by the same trial generator and an injected [`DoorRng`], so
//! any sequence of draws can be replayed in tests.
//!
//! ## Key features
//!
//! - **Deterministic**: set `rng_seed: Some(u64)` on [`SimulatorConfig`] to
//!   replay the exact same rounds and batches.
//! - **Animated pacing**: [`PacingPolicy::Animated`] slows the first trials
//!   down so the audience can watch, then speeds up; `Immediate` skips it.
//! - **Two profiles**: `classic` keeps cumulative player stats; `minimal`
//!   keeps none and deals a fresh round after every batch.
//! - **Chart-ready output**: [`dashboard`] turns snapshots into JSON series.
//!
//! ## Quick start
//!
//! ```rust
//! use monty_hall_sim::{MontyHallSimulator, SimulatorConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> monty_hall_sim::Result<()> {
//! let mut sim = MontyHallSimulator::new(SimulatorConfig::headless().with_seed(42))?;
//!
//! // Play a round by hand.
//! let opened = sim.select_door(0).expect("round is waiting for a pick");
//! println!("The host opened {opened}");
//! let result = sim.decide(true).expect("a door was picked");
//! println!("{}", result.message());
//!
//! // Run a batch and read the final tallies.
//! let progress = sim.request_batch(1_000)?;
//! let last = progress.finish().await.expect("at least one trial");
//! println!("switch wins {}%", last.counters.switch_win_rate());
//! # Ok(())
//! # }
//! ```

pub mod dashboard;
pub mod simulation_engine;

// Convenience re-exports so callers can use `monty_hall_sim::MontyHallGame`
// directly without reaching into `simulation_engine::`.
pub use simulation_engine::{
    calculate_percentage, generate_trial, generate_trial_with, parse_trial_count, BatchEngine,
    Door, DoorRng, DoorSet, MontyHallGame, MontyHallSimulator, PacingPolicy, Phase, PlayerStats,
    ProgressEvent, ProgressStream, Result, RevealPolicy, RoundResult, RoundState, RoundView,
    RunStatus, ScriptedRng, SimulationRun, SimulatorConfig, SimulatorError, SimulatorSnapshot,
    Strategy, StrategyCounters, TrialOutcome,
};
