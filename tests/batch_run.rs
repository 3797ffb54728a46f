use monty_hall_sim::{
    BatchEngine, MontyHallSimulator, PacingPolicy, Phase, ProgressEvent, RevealPolicy, RunStatus,
    SimulatorConfig, SimulatorError, StrategyCounters,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn immediate_engine() -> BatchEngine {
    BatchEngine::new(PacingPolicy::Immediate, RevealPolicy::Uniform)
}

fn assert_balanced(counters: &StrategyCounters, trials: u64) {
    assert_eq!(counters.switch_wins + counters.switch_losses, trials);
    assert_eq!(counters.stay_wins + counters.stay_losses, trials);
    // Each trial is won by exactly one strategy.
    assert_eq!(counters.switch_wins, counters.stay_losses);
    assert_eq!(counters.stay_wins, counters.switch_losses);
}

#[tokio::test]
async fn emits_one_event_per_trial_in_order() {
    let mut engine = immediate_engine();
    let mut stream = engine.start(250, StdRng::seed_from_u64(1)).expect("run starts");

    let mut events: Vec<ProgressEvent> = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event);
    }

    assert_eq!(events.len(), 250);
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.completed, i as u64 + 1);
        assert_eq!(event.requested, 250);
        assert_balanced(&event.counters, event.completed);
    }
    for pair in events.windows(2) {
        assert!(pair[1].counters.switch_wins >= pair[0].counters.switch_wins);
        assert!(pair[1].counters.stay_wins >= pair[0].counters.stay_wins);
    }
    let last = events.last().expect("events");
    assert!(last.is_last());

    let run = engine.wait().await;
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.completed_count, 250);
    assert_eq!(run.counters, last.counters);
    assert_eq!(run.last_outcome, Some(last.outcome));
    assert!(!engine.is_simulating());
}

#[tokio::test(start_paused = true)]
async fn animated_run_takes_the_paced_time() {
    let pacing = PacingPolicy::default();
    let mut engine = BatchEngine::new(pacing, RevealPolicy::FirstEligible);
    let started = tokio::time::Instant::now();

    let stream = engine.start(120, StdRng::seed_from_u64(2)).expect("run starts");
    let last = stream.finish().await.expect("at least one event");

    assert_eq!(last.completed, 120);
    assert!(started.elapsed() >= pacing.total_delay(120));
    assert_eq!(engine.wait().await.status, RunStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn second_run_and_reset_are_refused_while_running() {
    let mut engine = BatchEngine::new(PacingPolicy::default(), RevealPolicy::Uniform);
    let mut stream = engine.start(1_000, StdRng::seed_from_u64(3)).expect("run starts");
    for _ in 0..5 {
        stream.next().await.expect("run still going");
    }

    assert!(engine.is_simulating());
    assert!(matches!(
        engine.start(10, StdRng::seed_from_u64(4)),
        Err(SimulatorError::RunInProgress)
    ));
    assert!(matches!(engine.reset_counters(), Err(SimulatorError::RunInProgress)));

    assert!(engine.cancel());
    let run = engine.snapshot();
    assert_eq!(run.status, RunStatus::Cancelled);
    assert!(run.completed_count >= 5 && run.completed_count < 1_000);
    assert_balanced(&run.counters, run.completed_count);
    assert!(!engine.cancel(), "nothing left to cancel");

    // The aborted task drops its sender, so the stream ends.
    while stream.next().await.is_some() {}

    engine.reset_counters().expect("reset after cancel");
    assert!(engine.start(10, StdRng::seed_from_u64(5)).is_ok());
}

#[tokio::test]
async fn reset_zeroes_counters_and_completed_count() {
    let mut engine = immediate_engine();
    engine.start(40, StdRng::seed_from_u64(6)).expect("run starts");
    let run = engine.wait().await;
    assert_eq!(run.completed_count, 40);

    engine.reset_counters().expect("idle engine can reset");
    let run = engine.snapshot();
    assert_eq!(run.completed_count, 0);
    assert_eq!(run.counters, StrategyCounters::default());
    assert_eq!(run.status, RunStatus::Idle);
    assert_eq!(run.last_outcome, None);
}

#[tokio::test]
async fn dropped_stream_does_not_stop_the_run() {
    let mut engine = immediate_engine();
    drop(engine.start(300, StdRng::seed_from_u64(7)).expect("run starts"));
    let run = engine.wait().await;
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.completed_count, 300);
    assert_balanced(&run.counters, 300);
}

#[tokio::test]
async fn drain_ready_returns_buffered_events_without_waiting() {
    let mut engine = immediate_engine();
    let mut stream = engine.start(60, StdRng::seed_from_u64(15)).expect("run starts");
    engine.wait().await;

    let ready = stream.drain_ready();
    assert_eq!(ready.len(), 60);
    assert!(ready.iter().enumerate().all(|(i, e)| e.completed == i as u64 + 1));
    assert!(ready.last().expect("events").is_last());
    assert!(stream.drain_ready().is_empty());
}

#[tokio::test]
async fn next_run_starts_from_zero() {
    let mut engine = immediate_engine();
    engine.start(100, StdRng::seed_from_u64(8)).expect("first run");
    let first = engine.wait().await;

    let last = engine
        .start(50, StdRng::seed_from_u64(9))
        .expect("second run")
        .finish()
        .await
        .expect("events");
    assert_balanced(&last.counters, 50);
    assert!(last.run_id > first.run_id);
}

#[tokio::test]
async fn batch_converges_to_two_thirds() {
    let mut engine = immediate_engine();
    engine.start(10_000, StdRng::seed_from_u64(10)).expect("run starts");
    let counters = engine.wait().await.counters;

    let switch = counters.switch_wins as f64 / 10_000.0;
    assert!((switch - 2.0 / 3.0).abs() < 0.02, "switch rate {switch}");
    let stay: f64 = counters.stay_win_rate().parse().expect("formatted percentage");
    assert!((stay - 100.0 / 3.0).abs() < 2.0, "stay rate {stay}");
}

// ── facade ───────────────────────────────────────────────────────────────────

fn immediate(config: SimulatorConfig) -> SimulatorConfig {
    SimulatorConfig { pacing: PacingPolicy::Immediate, ..config }
}

#[tokio::test]
async fn minimal_profile_deals_a_new_round_after_a_batch() {
    let mut sim = MontyHallSimulator::new(immediate(SimulatorConfig::minimal()).with_seed(11))
        .expect("valid config");
    sim.select_door(0);
    assert_eq!(sim.snapshot().round.phase, Phase::DoorSelected);

    sim.request_batch(50).expect("run starts");
    let run = sim.wait_for_batch().await;
    assert_eq!(run.completed_count, 50);
    assert_eq!(sim.snapshot().round.phase, Phase::Initial);

    // Only once per run.
    sim.select_door(1);
    assert_eq!(sim.snapshot().round.phase, Phase::DoorSelected);
}

#[tokio::test]
async fn classic_profile_leaves_the_round_alone() {
    let mut sim = MontyHallSimulator::new(SimulatorConfig::headless().with_seed(12))
        .expect("valid config");
    sim.select_door(2);
    sim.request_batch(50).expect("run starts");
    sim.wait_for_batch().await;

    let snap = sim.snapshot();
    assert_eq!(snap.round.phase, Phase::DoorSelected);
    assert_eq!(snap.batch.completed_count, 50);
    assert_eq!(snap.progress_percent, 100.0);
}

#[tokio::test]
async fn oversized_requests_are_clamped() {
    let config = SimulatorConfig {
        max_trial_count: 100,
        default_trial_count: 100,
        ..SimulatorConfig::headless()
    };
    let mut sim = MontyHallSimulator::new(config.with_seed(13)).expect("valid config");
    sim.request_batch_raw("10000").expect("clamped, not rejected");
    let run = sim.wait_for_batch().await;
    assert_eq!(run.requested_count, 100);
    assert_eq!(run.completed_count, 100);

    sim.reset_batch_counters().expect("idle");
    assert_eq!(sim.snapshot().batch.completed_count, 0);
}

#[tokio::test]
async fn default_batch_uses_the_configured_count() {
    let config = SimulatorConfig { default_trial_count: 25, ..SimulatorConfig::headless() };
    let mut sim = MontyHallSimulator::new(config.with_seed(16)).expect("valid config");
    assert_eq!(sim.snapshot().default_trial_count, 25);

    let last = sim.request_default_batch().expect("run starts").finish().await.expect("events");
    assert_eq!(last.requested, 25);
    let run = sim.wait_for_batch().await;
    assert_eq!(run.completed_count, 25);
    assert_balanced(&run.counters, 25);
}

#[tokio::test]
async fn dashboard_reflects_the_batch() {
    let mut sim = MontyHallSimulator::new(SimulatorConfig::headless().with_seed(14))
        .expect("valid config");
    sim.request_batch(30).expect("run starts");
    sim.wait_for_batch().await;

    let json = monty_hall_sim::dashboard::to_dashboard_json(&sim.snapshot());
    assert_eq!(json["simulation"]["completed"], 30);
    assert_eq!(json["simulation"]["status"], "completed");
    assert_eq!(json["simulation"]["default_trial_count"], 1000);
    let bars = &json["simulation"]["charts"]["bar"];
    let total = bars[0]["wins"].as_u64().unwrap() + bars[0]["losses"].as_u64().unwrap();
    assert_eq!(total, 30);
}
