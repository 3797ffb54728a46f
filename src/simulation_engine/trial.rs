//! The trial generator: one Monty Hall trial from a handful of door draws.
//!
//! The host's reveal is computed directly from the eligible set (every door
//! minus the player's pick minus the prize) instead of redrawing until a legal
//! door turns up, so the cost of a trial is bounded.

use serde::{Deserialize, Serialize};

use crate::simulation_engine::{
    models::{Door, DoorSet, TrialOutcome},
    rng::DoorRng,
};

/// How the host picks among two goat doors when the player is on the prize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Uniform draw among eligible doors.
    #[default]
    Uniform,
    /// Lowest eligible index; consumes no randomness.
    FirstEligible,
}

/// Fresh door set with the prize drawn uniformly.
pub fn random_doors<R: DoorRng + ?Sized>(rng: &mut R) -> DoorSet {
    DoorSet::with_prize(rng.next_door())
}

/// Door the host opens: never the player's pick, never the prize.
///
/// With one eligible door no draw is consumed.
pub fn reveal_door<R: DoorRng + ?Sized>(
    doors: &DoorSet,
    selected: Door,
    policy: RevealPolicy,
    rng: &mut R,
) -> Door {
    let mut eligible = [selected; 2];
    let mut count = 0;
    for door in Door::ALL {
        if door != selected && !doors.has_prize(door) {
            eligible[count] = door;
            count += 1;
        }
    }
    // One prize among three doors leaves one or two goats besides `selected`.
    debug_assert!(count >= 1);

    match (count, policy) {
        (2, RevealPolicy::Uniform) => eligible[rng.next_index(2)],
        _ => eligible[0],
    }
}

/// The door a switching player ends on.
pub fn switch_door(initial: Door, revealed: Door) -> Door {
    Door::third(initial, revealed)
}

/// One complete trial with a uniform host reveal.
pub fn generate_trial<R: DoorRng + ?Sized>(rng: &mut R) -> TrialOutcome {
    generate_trial_with(rng, RevealPolicy::Uniform)
}

/// One complete trial. Draw order: prize, initial choice, then the reveal
/// tie-break when there is one.
pub fn generate_trial_with<R: DoorRng + ?Sized>(rng: &mut R, policy: RevealPolicy) -> TrialOutcome {
    let doors = random_doors(rng);
    let initial_choice = rng.next_door();
    let revealed_door = reveal_door(&doors, initial_choice, policy, rng);
    let switch_choice = switch_door(initial_choice, revealed_door);

    TrialOutcome {
        prize_door: doors.prize_door(),
        initial_choice,
        revealed_door,
        switch_choice,
        switch_won: doors.has_prize(switch_choice),
        stay_won: doors.has_prize(initial_choice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation_engine::rng::ScriptedRng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn door(i: usize) -> Door {
        Door::ALL[i]
    }

    #[test]
    fn prize_one_pick_zero_reveals_two() {
        let mut rng = ScriptedRng::new(vec![1, 0]).expect("non-empty script");
        let t = generate_trial(&mut rng);
        assert_eq!(t.prize_door, door(1));
        assert_eq!(t.initial_choice, door(0));
        assert_eq!(t.revealed_door, door(2));
        assert_eq!(t.switch_choice, door(1));
        assert!(t.switch_won);
        assert!(!t.stay_won);
        // Single eligible door: no tie-break draw.
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn pick_on_prize_draws_between_both_goats() {
        let doors = DoorSet::with_prize(door(0));
        let mut first = ScriptedRng::new(vec![0]).expect("non-empty script");
        let mut second = ScriptedRng::new(vec![1]).expect("non-empty script");
        assert_eq!(reveal_door(&doors, door(0), RevealPolicy::Uniform, &mut first), door(1));
        assert_eq!(reveal_door(&doors, door(0), RevealPolicy::Uniform, &mut second), door(2));
        assert_eq!(first.consumed(), 1);
    }

    #[test]
    fn first_eligible_never_draws() {
        let doors = DoorSet::with_prize(door(2));
        let mut rng = ScriptedRng::new(vec![1]).expect("non-empty script");
        assert_eq!(reveal_door(&doors, door(2), RevealPolicy::FirstEligible, &mut rng), door(0));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn switch_door_is_the_remaining_door() {
        for a in Door::ALL {
            for b in Door::ALL.into_iter().filter(|&b| b != a) {
                let c = switch_door(a, b);
                assert!(c != a && c != b, "{a} {b} -> {c}");
            }
        }
    }

    #[test]
    fn uniform_reveal_uses_both_goats() {
        let doors = DoorSet::with_prize(door(1));
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [0u32; 3];
        for _ in 0..200 {
            seen[reveal_door(&doors, door(1), RevealPolicy::Uniform, &mut rng).index()] += 1;
        }
        assert_eq!(seen[1], 0);
        assert!(seen[0] > 50 && seen[2] > 50, "lopsided reveals: {seen:?}");
    }
}
