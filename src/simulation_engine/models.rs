use std::fmt;
use serde::{Deserialize, Serialize};

use crate::simulation_engine::{
    error::{Result, SimulatorError},
    stats::{calculate_percentage, win_rate},
};

/// Number of doors on stage. The whole engine models exactly this variant.
pub const DOOR_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Door primitives
// ---------------------------------------------------------------------------

/// A door index in `0..DOOR_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Door(u8);

impl Door {
    pub const ALL: [Door; DOOR_COUNT] = [Door(0), Door(1), Door(2)];

    pub fn new(index: usize) -> Result<Self> {
        if index < DOOR_COUNT {
            Ok(Door(index as u8))
        } else {
            Err(SimulatorError::InvalidDoor { index })
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based label used on the doors themselves.
    pub fn number(self) -> u8 {
        self.0 + 1
    }

    /// The only door that is neither `a` nor `b`.
    ///
    /// Indices sum to 3, so the third door falls out by subtraction.
    pub(crate) fn third(a: Door, b: Door) -> Door {
        debug_assert_ne!(a, b, "third door needs two distinct doors");
        Door(3 - a.0 - b.0)
    }
}

impl TryFrom<usize> for Door {
    type Error = SimulatorError;

    fn try_from(index: usize) -> Result<Self> {
        Door::new(index)
    }
}

impl From<Door> for usize {
    fn from(door: Door) -> usize {
        door.index()
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Door {}", self.number())
    }
}

/// Three doors, exactly one of which hides the prize.
///
/// Only the prize location is stored, so exactly one slot is ever true. A set
/// never moves its prize once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSet {
    prize: Door,
}

impl DoorSet {
    pub fn with_prize(prize: Door) -> Self {
        DoorSet { prize }
    }

    pub fn prize_door(&self) -> Door {
        self.prize
    }

    pub fn has_prize(&self, door: Door) -> bool {
        door == self.prize
    }

    /// Per-slot prize flags in door order.
    pub fn slots(&self) -> [bool; DOOR_COUNT] {
        Door::ALL.map(|d| self.has_prize(d))
    }
}

// ---------------------------------------------------------------------------
// Single round
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Switch,
    Stay,
}

impl Strategy {
    pub fn from_switch_requested(switch: bool) -> Self {
        if switch { Strategy::Switch } else { Strategy::Stay }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Switch => write!(f, "Switch"),
            Strategy::Stay   => write!(f, "Stay"),
        }
    }
}

/// Round lifecycle: `Initial → DoorSelected → GameOver`, back to `Initial`
/// only through a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Initial,
    DoorSelected,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initial      => write!(f, "Pick a door"),
            Phase::DoorSelected => write!(f, "The host opened a door with no prize. Switch?"),
            Phase::GameOver     => write!(f, "Game over"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub doors: DoorSet,
    pub selected_door: Option<Door>,
    pub revealed_door: Option<Door>,
    pub phase: Phase,
    /// Door the player ended on; set when the round is decided.
    pub final_door: Option<Door>,
    pub result: Option<RoundResult>,
}

impl RoundState {
    pub fn fresh(doors: DoorSet) -> Self {
        RoundState {
            doors,
            selected_door: None,
            revealed_door: None,
            phase: Phase::Initial,
            final_door: None,
            result: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub strategy: Strategy,
    pub final_door: Door,
    pub prize_door: Door,
    pub won: bool,
}

impl RoundResult {
    pub fn message(&self) -> &'static str {
        if self.won { "You won!" } else { "You lost." }
    }
}

/// What a door looks like from the audience's seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorView {
    pub number: u8,
    pub is_selected: bool,
    pub is_revealed: bool,
    /// `None` while the door is still closed.
    pub has_prize: Option<bool>,
}

/// Read-only projection of a [`RoundState`] with the prize hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub doors: [DoorView; DOOR_COUNT],
    pub selected_door: Option<Door>,
    pub revealed_door: Option<Door>,
    pub phase: Phase,
    pub prompt: String,
    pub result_text: Option<String>,
}

impl From<&RoundState> for RoundView {
    fn from(round: &RoundState) -> Self {
        let over = round.phase == Phase::GameOver;
        // After the decision the highlight follows the final door.
        let highlighted = if over { round.final_door } else { round.selected_door };
        let doors = Door::ALL.map(|door| {
            let is_revealed = over || round.revealed_door == Some(door);
            DoorView {
                number: door.number(),
                is_selected: highlighted == Some(door),
                is_revealed,
                has_prize: is_revealed.then(|| round.doors.has_prize(door)),
            }
        });
        RoundView {
            doors,
            selected_door: round.selected_door,
            revealed_door: round.revealed_door,
            phase: round.phase,
            prompt: round.phase.to_string(),
            result_text: round.result.map(|r| r.message().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Trials and counters
// ---------------------------------------------------------------------------

/// One simulated trial with both strategies evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub prize_door: Door,
    pub initial_choice: Door,
    pub revealed_door: Door,
    pub switch_choice: Door,
    pub switch_won: bool,
    pub stay_won: bool,
}

/// Win/loss tallies for both strategies over a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCounters {
    pub switch_wins: u64,
    pub switch_losses: u64,
    pub stay_wins: u64,
    pub stay_losses: u64,
}

impl StrategyCounters {
    pub fn record(&mut self, outcome: &TrialOutcome) {
        if outcome.switch_won {
            self.switch_wins += 1;
        } else {
            self.switch_losses += 1;
        }
        if outcome.stay_won {
            self.stay_wins += 1;
        } else {
            self.stay_losses += 1;
        }
    }

    pub fn switch_total(&self) -> u64 {
        self.switch_wins + self.switch_losses
    }

    pub fn stay_total(&self) -> u64 {
        self.stay_wins + self.stay_losses
    }

    pub fn switch_win_rate(&self) -> String {
        win_rate(self.switch_wins, self.switch_losses)
    }

    pub fn stay_win_rate(&self) -> String {
        win_rate(self.stay_wins, self.stay_losses)
    }

    pub fn reset(&mut self) {
        *self = StrategyCounters::default();
    }
}

/// Cumulative results of rounds played by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub switch_wins: u64,
    pub stay_wins: u64,
    pub losses: u64,
    pub switch_games: u64,
    pub stay_games: u64,
}

impl PlayerStats {
    pub fn record(&mut self, result: &RoundResult) {
        match (result.strategy, result.won) {
            (Strategy::Switch, true) => self.switch_wins += 1,
            (Strategy::Stay, true)   => self.stay_wins += 1,
            (_, false)               => self.losses += 1,
        }
        match result.strategy {
            Strategy::Switch => self.switch_games += 1,
            Strategy::Stay   => self.stay_games += 1,
        }
    }

    pub fn wins(&self) -> u64 {
        self.switch_wins + self.stay_wins
    }

    pub fn games(&self) -> u64 {
        self.switch_games + self.stay_games
    }

    pub fn switch_losses(&self) -> u64 {
        self.switch_games.saturating_sub(self.switch_wins)
    }

    pub fn stay_losses(&self) -> u64 {
        self.stay_games.saturating_sub(self.stay_wins)
    }

    pub fn switch_win_rate(&self) -> String {
        calculate_percentage(self.switch_wins, self.switch_games)
    }

    pub fn stay_win_rate(&self) -> String {
        calculate_percentage(self.stay_wins, self.stay_games)
    }

    pub fn reset(&mut self) {
        *self = PlayerStats::default();
    }
}

// ---------------------------------------------------------------------------
// Batch runs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub run_id: u64,
    pub requested_count: u64,
    pub completed_count: u64,
    pub counters: StrategyCounters,
    pub last_outcome: Option<TrialOutcome>,
    pub status: RunStatus,
}

impl SimulationRun {
    /// Zeroed run with nothing requested yet.
    pub fn idle(run_id: u64) -> Self {
        SimulationRun {
            run_id,
            requested_count: 0,
            completed_count: 0,
            counters: StrategyCounters::default(),
            last_outcome: None,
            status: RunStatus::Idle,
        }
    }

    pub fn started(run_id: u64, requested_count: u64) -> Self {
        SimulationRun {
            requested_count,
            status: RunStatus::Running,
            ..SimulationRun::idle(run_id)
        }
    }

    pub(crate) fn record(&mut self, outcome: TrialOutcome) {
        self.counters.record(&outcome);
        self.completed_count += 1;
        self.last_outcome = Some(outcome);
    }

    /// Completed fraction in percent, for progress bars.
    pub fn progress_percent(&self) -> f64 {
        if self.requested_count == 0 {
            return 0.0;
        }
        self.completed_count as f64 / self.requested_count as f64 * 100.0
    }
}

/// Emitted once per finished trial, strictly in trial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub run_id: u64,
    pub completed: u64,
    pub requested: u64,
    pub counters: StrategyCounters,
    pub outcome: TrialOutcome,
}

impl ProgressEvent {
    pub fn is_last(&self) -> bool {
        self.completed == self.requested
    }
}
