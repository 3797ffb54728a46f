use rand::RngCore;

use crate::simulation_engine::models::{Door, DOOR_COUNT};

/// Source of uniform door draws.
///
/// Every random decision in the engine goes through this trait, so tests can
/// swap in a [`ScriptedRng`] and replay an exact sequence of draws.
pub trait DoorRng {
    /// Uniform index in `0..upper`. `upper` is always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Uniform door.
    fn next_door(&mut self) -> Door {
        Door::ALL[self.next_index(DOOR_COUNT) % DOOR_COUNT]
    }
}

impl<R: RngCore + ?Sized> DoorRng for R {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::Rng::gen_range(self, 0..upper)
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// Each scripted value is reduced modulo the requested range, so a script
/// written for door indices stays valid when the engine asks for a smaller
/// range (e.g. picking between two eligible doors).
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    /// `None` if `draws` is empty.
    pub fn new(draws: impl Into<Vec<usize>>) -> Option<Self> {
        let draws = draws.into();
        if draws.is_empty() {
            return None;
        }
        Some(ScriptedRng { draws, cursor: 0 })
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl DoorRng for ScriptedRng {
    fn next_index(&mut self, upper: usize) -> usize {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value % upper
    }
}
