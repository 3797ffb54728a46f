//! Manual play: one round at a time, driven by the player's clicks.

use tracing::debug;

use crate::simulation_engine::{
    models::{Door, Phase, PlayerStats, RoundResult, RoundState, RoundView, Strategy},
    rng::DoorRng,
    trial::{random_doors, reveal_door, switch_door, RevealPolicy},
};

/// Round state plus the player's running statistics.
///
/// Calls that don't fit the current phase are ignored: `select_door` and
/// `decide` return `None` and leave the state untouched.
pub struct MontyHallGame<R> {
    rng: R,
    round: RoundState,
    stats: PlayerStats,
    track_stats: bool,
    reveal_policy: RevealPolicy,
}

impl<R: DoorRng> MontyHallGame<R> {
    /// New game in `Initial` with a freshly placed prize.
    pub fn new(mut rng: R) -> Self {
        let round = RoundState::fresh(random_doors(&mut rng));
        MontyHallGame {
            rng,
            round,
            stats: PlayerStats::default(),
            track_stats: true,
            reveal_policy: RevealPolicy::Uniform,
        }
    }

    /// When disabled, decided rounds leave [`PlayerStats`] untouched.
    pub fn with_stats_tracking(mut self, enabled: bool) -> Self {
        self.track_stats = enabled;
        self
    }

    pub fn with_reveal_policy(mut self, policy: RevealPolicy) -> Self {
        self.reveal_policy = policy;
        self
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Masked view for rendering.
    pub fn view(&self) -> RoundView {
        RoundView::from(&self.round)
    }

    /// Start over with a new prize location. Allowed from any phase.
    pub fn reset(&mut self) {
        self.round = RoundState::fresh(random_doors(&mut self.rng));
    }

    /// Pick a door and let the host open a goat door.
    ///
    /// Returns the revealed door, or `None` outside `Initial`.
    pub fn select_door(&mut self, door: Door) -> Option<Door> {
        if self.round.phase != Phase::Initial {
            debug!(%door, phase = ?self.round.phase, "door selection ignored");
            return None;
        }
        let revealed = reveal_door(&self.round.doors, door, self.reveal_policy, &mut self.rng);
        self.round.selected_door = Some(door);
        self.round.revealed_door = Some(revealed);
        self.round.phase = Phase::DoorSelected;
        Some(revealed)
    }

    /// Switch or stay, and settle the round.
    ///
    /// Returns the result, or `None` outside `DoorSelected`.
    pub fn decide(&mut self, switch_requested: bool) -> Option<RoundResult> {
        let (selected, revealed) = match (self.round.phase, self.round.selected_door, self.round.revealed_door) {
            (Phase::DoorSelected, Some(s), Some(r)) => (s, r),
            _ => {
                debug!(switch_requested, phase = ?self.round.phase, "decision ignored");
                return None;
            }
        };

        let strategy = Strategy::from_switch_requested(switch_requested);
        let final_door = match strategy {
            Strategy::Switch => switch_door(selected, revealed),
            Strategy::Stay   => selected,
        };
        let result = RoundResult {
            strategy,
            final_door,
            prize_door: self.round.doors.prize_door(),
            won: self.round.doors.has_prize(final_door),
        };

        self.round.final_door = Some(final_door);
        self.round.result = Some(result);
        self.round.phase = Phase::GameOver;
        if self.track_stats {
            self.stats.record(&result);
        }
        debug!(%strategy, %final_door, won = result.won, "round decided");
        Some(result)
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}
