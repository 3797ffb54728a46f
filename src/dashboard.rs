//! JSON series for the chart widgets.
//!
//! Charts only ever read: every builder takes a snapshot type and returns a
//! `serde_json::Value` in the `{ name, value }` / `{ name, wins, losses }`
//! shapes the pie and bar components bind to.

use serde_json::{json, Value};

use crate::simulation_engine::{
    models::{PlayerStats, StrategyCounters},
    simulator::SimulatorSnapshot,
};

/// One pie slice per `(label, value)` pair, in order.
fn pie(slices: &[(&str, u64)]) -> Value {
    Value::Array(
        slices
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect(),
    )
}

/// Wins against losses over every hand-played round.
pub fn player_win_loss_chart(stats: &PlayerStats) -> Value {
    pie(&[("Won", stats.wins()), ("Lost", stats.losses)])
}

/// Hand-played rounds where the player switched.
pub fn switch_strategy_chart(stats: &PlayerStats) -> Value {
    pie(&[("Won", stats.switch_wins), ("Lost", stats.switch_losses())])
}

/// Hand-played rounds where the player stayed.
pub fn stay_strategy_chart(stats: &PlayerStats) -> Value {
    pie(&[("Won", stats.stay_wins), ("Lost", stats.stay_losses())])
}

/// Grouped bars: one group per strategy, wins next to losses.
pub fn simulation_bar_chart(counters: &StrategyCounters) -> Value {
    json!([
        { "name": "Switch", "wins": counters.switch_wins, "losses": counters.switch_losses },
        { "name": "Stay",   "wins": counters.stay_wins,   "losses": counters.stay_losses },
    ])
}

pub fn simulation_switch_pie(counters: &StrategyCounters) -> Value {
    pie(&[("Switch won", counters.switch_wins), ("Switch lost", counters.switch_losses)])
}

pub fn simulation_stay_pie(counters: &StrategyCounters) -> Value {
    pie(&[("Stay won", counters.stay_wins), ("Stay lost", counters.stay_losses)])
}

/// Everything the dashboard renders, in one object.
pub fn to_dashboard_json(snapshot: &SimulatorSnapshot) -> Value {
    let stats = &snapshot.player_stats;
    let run = &snapshot.batch;
    let counters = &run.counters;

    json!({
        "round": snapshot.round,
        "player": {
            "switch_wins": stats.switch_wins,
            "stay_wins":   stats.stay_wins,
            "losses":      stats.losses,
            "switch_win_rate": snapshot.player_switch_win_rate,
            "stay_win_rate":   snapshot.player_stay_win_rate,
            "charts": {
                "win_loss": player_win_loss_chart(stats),
                "switch":   switch_strategy_chart(stats),
                "stay":     stay_strategy_chart(stats),
            }
        },
        "simulation": {
            "is_simulating": snapshot.is_simulating,
            "status":        run.status,
            "completed":     run.completed_count,
            "requested":     run.requested_count,
            "default_trial_count": snapshot.default_trial_count,
            "progress_percent": snapshot.progress_percent,
            "switch_wins": counters.switch_wins,
            "stay_wins":   counters.stay_wins,
            "switch_win_rate": snapshot.batch_switch_win_rate,
            "stay_win_rate":   snapshot.batch_stay_win_rate,
            "charts": {
                "bar":         simulation_bar_chart(counters),
                "switch_pie":  simulation_switch_pie(counters),
                "stay_pie":    simulation_stay_pie(counters),
            }
        }
    })
}
