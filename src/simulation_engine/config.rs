//! Simulator configuration and the two stock profiles.
//!
//! `classic` keeps a running tally of hand-played rounds and leaves the game
//! alone when a batch finishes. `minimal` keeps no player tally and deals a
//! fresh round once a batch completes.

use serde::{Deserialize, Serialize};

use crate::simulation_engine::{
    error::{Result, SimulatorError},
    pacing::PacingPolicy,
    trial::RevealPolicy,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Record hand-played rounds in the player statistics.
    pub track_player_stats: bool,
    /// Deal a fresh round when a batch run completes.
    pub reset_game_after_batch: bool,
    /// Trial count pre-filled in the batch input.
    pub default_trial_count: u64,
    /// Larger requests are clamped to this.
    pub max_trial_count: u64,
    pub pacing: PacingPolicy,
    /// Host behaviour in the manual game.
    pub game_reveal_policy: RevealPolicy,
    /// Host behaviour in batch trials.
    pub batch_reveal_policy: RevealPolicy,
    /// `Some(seed)` makes every round and batch reproducible.
    pub rng_seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig::classic()
    }
}

impl SimulatorConfig {
    pub fn classic() -> Self {
        SimulatorConfig {
            track_player_stats: true,
            reset_game_after_batch: false,
            default_trial_count: 1000,
            max_trial_count: 1_000_000,
            pacing: PacingPolicy::default(),
            game_reveal_policy: RevealPolicy::Uniform,
            batch_reveal_policy: RevealPolicy::FirstEligible,
            rng_seed: None,
        }
    }

    pub fn minimal() -> Self {
        SimulatorConfig {
            track_player_stats: false,
            reset_game_after_batch: true,
            ..SimulatorConfig::classic()
        }
    }

    /// Classic behaviour with no animation delay, for tests and CLIs.
    pub fn headless() -> Self {
        SimulatorConfig {
            pacing: PacingPolicy::Immediate,
            ..SimulatorConfig::classic()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Parse a JSON config; missing fields fall back to `classic`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_trial_count == 0 {
            return Err(SimulatorError::InvalidConfig {
                reason: "max_trial_count must be at least 1".into(),
            });
        }
        if self.default_trial_count == 0 || self.default_trial_count > self.max_trial_count {
            return Err(SimulatorError::InvalidConfig {
                reason: format!(
                    "default_trial_count ({}) must be between 1 and max_trial_count ({})",
                    self.default_trial_count, self.max_trial_count
                ),
            });
        }
        self.pacing
            .validate()
            .map_err(|reason| SimulatorError::InvalidConfig { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_differ_only_where_expected() {
        let classic = SimulatorConfig::classic();
        let minimal = SimulatorConfig::minimal();
        assert!(classic.track_player_stats && !classic.reset_game_after_batch);
        assert!(!minimal.track_player_stats && minimal.reset_game_after_batch);
        assert_eq!(classic.pacing, minimal.pacing);
        assert_eq!(SimulatorConfig::headless().pacing, PacingPolicy::Immediate);
    }

    #[test]
    fn empty_json_is_classic() {
        let config = SimulatorConfig::from_json("{}").expect("empty object parses");
        assert_eq!(config, SimulatorConfig::classic());
    }

    #[test]
    fn json_overrides_selected_fields() {
        let config = SimulatorConfig::from_json(
            r#"{ "rng_seed": 42, "pacing": { "mode": "immediate" }, "batch_reveal_policy": "uniform" }"#,
        )
        .expect("valid config");
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.pacing, PacingPolicy::Immediate);
        assert_eq!(config.batch_reveal_policy, RevealPolicy::Uniform);
        assert!(config.track_player_stats);
    }

    #[test]
    fn rejects_malformed_or_inconsistent_json() {
        assert!(matches!(
            SimulatorConfig::from_json("{ not json"),
            Err(SimulatorError::InvalidConfig { .. })
        ));
        assert!(matches!(
            SimulatorConfig::from_json(r#"{ "max_trial_count": 0 }"#),
            Err(SimulatorError::InvalidConfig { .. })
        ));
        assert!(matches!(
            SimulatorConfig::from_json(
                r#"{ "pacing": { "mode": "animated", "max_delay_ms": 1, "min_delay_ms": 9, "hold_trials": 0, "decay_until": 5 } }"#
            ),
            Err(SimulatorError::InvalidConfig { .. })
        ));
    }
}
