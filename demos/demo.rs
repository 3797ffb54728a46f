//! Console walk-through of the simulator.
//!
//! Run with: `cargo run --example demo` (add `RUST_LOG=monty_hall_sim=debug`
//! to see the engine's own logging).
//!
//! 1. **Manual rounds**: five seeded rounds, alternating switch and stay,
//!    printing the doors as the audience sees them after each step.
//! 2. **Batch run**: an animated batch of the default 200 trials, polled once
//!    per frame for a live progress line, followed by the dashboard JSON the
//!    charts would consume.

use std::io::Write;
use std::time::Duration;

use monty_hall_sim::{
    dashboard, MontyHallSimulator, PacingPolicy, RoundView, SimulatorConfig,
};
use tracing_subscriber::EnvFilter;

/// One line per door: number, and what's behind it if open.
fn print_doors(view: &RoundView) {
    let doors: Vec<String> = view
        .doors
        .iter()
        .map(|d| {
            let marker = if d.is_selected { "*" } else { " " };
            let content = match d.has_prize {
                None        => "closed",
                Some(true)  => "PRIZE",
                Some(false) => "goat",
            };
            format!("{marker}[{}: {content}]", d.number)
        })
        .collect();
    println!("  {}", doors.join("  "));
}

#[tokio::main]
async fn main() -> monty_hall_sim::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimulatorConfig {
        pacing: PacingPolicy::Animated {
            max_delay_ms: 40,
            min_delay_ms: 1,
            hold_trials: 20,
            decay_until: 100,
        },
        default_trial_count: 200,
        ..SimulatorConfig::classic().with_seed(2024)
    };
    let mut sim = MontyHallSimulator::new(config)?;

    // ── Manual rounds ──────────────────────────────────────────────────────
    println!();
    println!("══ Manual rounds ══");
    for round in 0..5 {
        sim.reset_game();
        let pick = round % 3;
        let switch = round % 2 == 0;

        println!();
        println!("Round {}: {}", round + 1, sim.snapshot().round.prompt);
        if let Some(opened) = sim.select_door(pick) {
            println!("  You picked Door {}, the host opens {opened}.", pick + 1);
        }
        print_doors(&sim.snapshot().round);
        if let Some(result) = sim.decide(switch) {
            println!("  You {} and end on {}: {}", if switch { "switch" } else { "stay" },
                result.final_door, result.message());
        }
        print_doors(&sim.snapshot().round);
    }

    let stats = sim.snapshot();
    println!();
    println!("  Switch win rate: {}%", stats.player_switch_win_rate);
    println!("  Stay win rate:   {}%", stats.player_stay_win_rate);

    // ── Batch run ──────────────────────────────────────────────────────────
    println!();
    println!("══ Batch run ══");
    let mut progress = sim.request_default_batch()?;
    let mut frame = tokio::time::interval(Duration::from_millis(50));
    loop {
        frame.tick().await;
        let ready = progress.drain_ready();
        let Some(event) = ready.last() else {
            if sim.is_simulating() {
                continue;
            }
            break;
        };
        print!(
            "\r  {:>3}/{}  switch {:>6}%  stay {:>6}%",
            event.completed,
            event.requested,
            event.counters.switch_win_rate(),
            event.counters.stay_win_rate(),
        );
        let _ = std::io::stdout().flush();
        if event.is_last() {
            break;
        }
    }
    println!();

    sim.wait_for_batch().await;
    let json = dashboard::to_dashboard_json(&sim.snapshot());
    println!();
    println!("{}", serde_json::to_string_pretty(&json["simulation"]).unwrap_or_default());

    Ok(())
}
