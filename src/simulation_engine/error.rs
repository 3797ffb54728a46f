/// Errors surfaced to callers of the simulator.
///
/// Invalid state transitions (picking a door after the round is over, and so
/// on) are not errors; those calls are no-ops.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("door index {index} is out of range (expected 0, 1 or 2)")]
    InvalidDoor { index: usize },

    #[error("invalid trial count {raw:?}: expected a positive whole number")]
    InvalidTrialCount { raw: String },

    #[error("a batch run is already in progress")]
    RunInProgress,

    #[error("no async runtime available to drive the batch run")]
    NoRuntime,

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, SimulatorError>;

impl From<serde_json::Error> for SimulatorError {
    fn from(e: serde_json::Error) -> Self {
        SimulatorError::InvalidConfig { reason: e.to_string() }
    }
}
