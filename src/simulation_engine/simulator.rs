//! The simulator as the UI sees it: player intents in, read-only snapshots out.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::simulation_engine::{
    batch::{BatchEngine, ProgressStream},
    config::SimulatorConfig,
    error::{Result, SimulatorError},
    game::MontyHallGame,
    models::{Door, PlayerStats, RoundResult, RoundView, RunStatus, SimulationRun},
};

/// Parse the free-text trial count from the batch input box.
///
/// Anything that isn't a positive whole number is rejected before it can
/// reach the run loop.
pub fn parse_trial_count(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SimulatorError::InvalidTrialCount { raw: raw.to_string() }),
    }
}

/// Everything a view needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorSnapshot {
    pub round: RoundView,
    pub player_stats: PlayerStats,
    pub player_switch_win_rate: String,
    pub player_stay_win_rate: String,
    pub batch: SimulationRun,
    pub batch_switch_win_rate: String,
    pub batch_stay_win_rate: String,
    pub is_simulating: bool,
    pub progress_percent: f64,
    /// Pre-filled value for the batch input box.
    pub default_trial_count: u64,
}

/// Manual game and batch engine side by side. They share no state; each
/// draws from its own RNG stream.
pub struct MontyHallSimulator {
    config: SimulatorConfig,
    seeder: StdRng,
    game: MontyHallGame<StdRng>,
    batch: BatchEngine,
    /// Last run whose completion has already reset the game.
    settled_run: u64,
}

impl MontyHallSimulator {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let mut seeder = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let game = MontyHallGame::new(StdRng::seed_from_u64(seeder.next_u64()))
            .with_stats_tracking(config.track_player_stats)
            .with_reveal_policy(config.game_reveal_policy);
        let batch = BatchEngine::new(config.pacing, config.batch_reveal_policy);

        Ok(MontyHallSimulator { config, seeder, game, batch, settled_run: 0 })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn game(&self) -> &MontyHallGame<StdRng> {
        &self.game
    }

    pub fn batch(&self) -> &BatchEngine {
        &self.batch
    }

    /// Out-of-range indices are ignored like any other misplaced click.
    pub fn select_door(&mut self, index: usize) -> Option<Door> {
        self.settle_batch();
        match Door::new(index) {
            Ok(door) => self.game.select_door(door),
            Err(e) => {
                debug!(error = %e, "door selection ignored");
                None
            }
        }
    }

    pub fn decide(&mut self, switch_requested: bool) -> Option<RoundResult> {
        self.settle_batch();
        self.game.decide(switch_requested)
    }

    pub fn reset_game(&mut self) {
        self.settle_batch();
        self.game.reset();
    }

    pub fn reset_player_stats(&mut self) {
        self.game.reset_stats();
    }

    /// Start a batch of `count` trials, clamped to `max_trial_count`.
    pub fn request_batch(&mut self, count: u64) -> Result<ProgressStream> {
        self.settle_batch();
        if count == 0 {
            return Err(SimulatorError::InvalidTrialCount { raw: count.to_string() });
        }
        let count = if count > self.config.max_trial_count {
            warn!(requested = count, max = self.config.max_trial_count, "trial count clamped");
            self.config.max_trial_count
        } else {
            count
        };
        let rng = StdRng::seed_from_u64(self.seeder.next_u64());
        self.batch.start(count, rng)
    }

    /// [`request_batch`](Self::request_batch) with the configured
    /// `default_trial_count`, the value the batch input box starts out with.
    pub fn request_default_batch(&mut self) -> Result<ProgressStream> {
        self.request_batch(self.config.default_trial_count)
    }

    /// [`request_batch`](Self::request_batch) from the raw input text.
    pub fn request_batch_raw(&mut self, raw: &str) -> Result<ProgressStream> {
        let count = parse_trial_count(raw)?;
        self.request_batch(count)
    }

    pub fn cancel_batch(&mut self) -> bool {
        self.batch.cancel()
    }

    /// Wait for the running batch (if any) and apply its completion.
    pub async fn wait_for_batch(&mut self) -> SimulationRun {
        let run = self.batch.wait().await;
        self.settle_batch();
        run
    }

    pub fn reset_batch_counters(&mut self) -> Result<()> {
        self.settle_batch();
        self.batch.reset_counters()
    }

    pub fn is_simulating(&self) -> bool {
        self.batch.is_simulating()
    }

    pub fn snapshot(&mut self) -> SimulatorSnapshot {
        self.settle_batch();
        let stats = *self.game.stats();
        let batch = self.batch.snapshot();
        SimulatorSnapshot {
            round: self.game.view(),
            player_stats: stats,
            player_switch_win_rate: stats.switch_win_rate(),
            player_stay_win_rate: stats.stay_win_rate(),
            batch_switch_win_rate: batch.counters.switch_win_rate(),
            batch_stay_win_rate: batch.counters.stay_win_rate(),
            is_simulating: batch.status == RunStatus::Running,
            progress_percent: batch.progress_percent(),
            default_trial_count: self.config.default_trial_count,
            batch,
        }
    }

    /// Deal a fresh round once per completed batch, if configured to.
    fn settle_batch(&mut self) {
        if !self.config.reset_game_after_batch {
            return;
        }
        let run = self.batch.snapshot();
        if run.status == RunStatus::Completed && run.run_id != self.settled_run {
            self.settled_run = run.run_id;
            self.game.reset();
            debug!(run_id = run.run_id, "game reset after batch run");
        }
    }
}
