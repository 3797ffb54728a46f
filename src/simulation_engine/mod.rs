//! Core simulation engine: trial generation, the manual game, and batch runs.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | All shared types: doors, rounds, trials, counters, runs |
//! | `rng`       | Injected randomness: `DoorRng` plus a scripted replay source |
//! | `trial`     | One Monty Hall trial: prize, pick, host reveal, switch door |
//! | `game`      | Round-by-round state machine driven by the player |
//! | `pacing`    | Delay policy between batch trials |
//! | `batch`     | Async batch runner with progress events and cancellation |
//! | `stats`     | Win percentages shared by both statistics panels |
//! | `config`    | `SimulatorConfig` and its stock profiles |
//! | `error`     | `SimulatorError` |
//! | `simulator` | Facade taking UI intents and producing snapshots |

pub mod batch;
pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod pacing;
pub mod rng;
pub mod simulator;
pub mod stats;
pub mod trial;

pub use batch::{BatchEngine, ProgressStream};
pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use game::MontyHallGame;
pub use models::{
    Door, DoorSet, DoorView, Phase, PlayerStats, ProgressEvent, RoundResult, RoundState,
    RoundView, RunStatus, SimulationRun, Strategy, StrategyCounters, TrialOutcome, DOOR_COUNT,
};
pub use pacing::PacingPolicy;
pub use rng::{DoorRng, ScriptedRng};
pub use simulator::{parse_trial_count, MontyHallSimulator, SimulatorSnapshot};
pub use stats::{calculate_percentage, win_rate};
pub use trial::{generate_trial, generate_trial_with, reveal_door, switch_door, RevealPolicy};
