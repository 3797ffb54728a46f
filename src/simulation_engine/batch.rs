//! Batch simulation: N trials played out without the player, one at a time.
//!
//! A run is a tokio task that owns its counters outright. Each trial is
//! followed by a suspension point (see [`PacingPolicy`]), after which the task
//! publishes the updated [`SimulationRun`] on a watch channel and pushes a
//! [`ProgressEvent`] down an unbounded channel. A slow progress display never
//! holds the run back, and a dropped one doesn't stop it.

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, trace, warn};

use crate::simulation_engine::{
    error::{Result, SimulatorError},
    models::{ProgressEvent, RunStatus, SimulationRun},
    pacing::PacingPolicy,
    rng::DoorRng,
    trial::{generate_trial_with, RevealPolicy},
};

/// Progress events of one run, in trial order.
pub struct ProgressStream {
    events: mpsc::UnboundedReceiver<ProgressEvent>,
}

impl ProgressStream {
    /// Next event; `None` once the run has finished or been cancelled and
    /// everything it sent has been read.
    pub async fn next(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }

    /// Events already delivered, without waiting. Handy for a render loop
    /// that polls once per frame.
    pub fn drain_ready(&mut self) -> Vec<ProgressEvent> {
        let mut ready = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            ready.push(event);
        }
        ready
    }

    /// Read until the run ends, returning the last event seen.
    pub async fn finish(mut self) -> Option<ProgressEvent> {
        let mut last = None;
        while let Some(event) = self.next().await {
            last = Some(event);
        }
        last
    }
}

/// Owns the batch counters and at most one in-flight run.
pub struct BatchEngine {
    pacing: PacingPolicy,
    reveal_policy: RevealPolicy,
    state: watch::Receiver<SimulationRun>,
    task: Option<JoinHandle<()>>,
    next_run_id: u64,
}

impl BatchEngine {
    pub fn new(pacing: PacingPolicy, reveal_policy: RevealPolicy) -> Self {
        BatchEngine {
            pacing,
            reveal_policy,
            state: detached(SimulationRun::idle(0)),
            task: None,
            next_run_id: 1,
        }
    }

    /// Latest published state of the current (or last) run.
    pub fn snapshot(&self) -> SimulationRun {
        self.state.borrow().clone()
    }

    pub fn is_simulating(&self) -> bool {
        self.state.borrow().status == RunStatus::Running
    }

    /// Start a run of `count` trials on the current tokio runtime.
    ///
    /// Counters start from zero. Fails with `RunInProgress` while another run
    /// is going, and with `NoRuntime` outside a runtime.
    pub fn start<R>(&mut self, count: u64, rng: R) -> Result<ProgressStream>
    where
        R: DoorRng + Send + 'static,
    {
        if self.is_simulating() {
            return Err(SimulatorError::RunInProgress);
        }
        if count == 0 {
            return Err(SimulatorError::InvalidTrialCount { raw: count.to_string() });
        }
        let handle = Handle::try_current().map_err(|_| SimulatorError::NoRuntime)?;

        let run_id = self.next_run_id;
        self.next_run_id += 1;

        let run = SimulationRun::started(run_id, count);
        let (state_tx, state_rx) = watch::channel(run.clone());
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let task = handle.spawn(drive(rng, run, self.pacing, self.reveal_policy, state_tx, event_tx));
        self.state = state_rx;
        self.task = Some(task);

        info!(run_id, count, pacing = ?self.pacing, "batch run started");
        Ok(ProgressStream { events: event_rx })
    }

    /// Abandon the running batch at its next suspension point.
    ///
    /// Counts gathered so far are kept and the run is marked `Cancelled`.
    /// Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        if !self.is_simulating() {
            return false;
        }
        task.abort();

        // Stop listening to the aborted task; it may still publish once more
        // before it reaches its next await.
        let mut run = self.snapshot();
        run.status = RunStatus::Cancelled;
        info!(run_id = run.run_id, completed = run.completed_count, "batch run cancelled");
        self.state = detached(run);
        true
    }

    /// Wait for the current run to end and return its final state.
    pub async fn wait(&mut self) -> SimulationRun {
        if let Some(task) = self.task.as_mut() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    warn!(error = %e, "batch task panicked");
                }
            }
            self.task = None;
        }
        self.snapshot()
    }

    /// Zero the counters and completed count.
    ///
    /// Refused with `RunInProgress` while a run is going; cancel it first.
    pub fn reset_counters(&mut self) -> Result<()> {
        if self.is_simulating() {
            return Err(SimulatorError::RunInProgress);
        }
        self.task = None;
        let run_id = self.state.borrow().run_id;
        self.state = detached(SimulationRun::idle(run_id));
        Ok(())
    }
}

impl Drop for BatchEngine {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Receiver holding a fixed value, with no task behind it.
fn detached(run: SimulationRun) -> watch::Receiver<SimulationRun> {
    watch::channel(run).1
}

async fn drive<R: DoorRng>(
    mut rng: R,
    mut run: SimulationRun,
    pacing: PacingPolicy,
    reveal_policy: RevealPolicy,
    state: watch::Sender<SimulationRun>,
    events: mpsc::UnboundedSender<ProgressEvent>,
) {
    for index in 0..run.requested_count {
        let outcome = generate_trial_with(&mut rng, reveal_policy);
        pacing.pause(index).await;

        run.record(outcome);
        if run.completed_count == run.requested_count {
            run.status = RunStatus::Completed;
        }
        trace!(run_id = run.run_id, completed = run.completed_count, switch_won = outcome.switch_won, "trial");

        state.send_replace(run.clone());
        // A closed receiver only means nobody is watching.
        let _ = events.send(ProgressEvent {
            run_id: run.run_id,
            completed: run.completed_count,
            requested: run.requested_count,
            counters: run.counters,
            outcome,
        });
    }

    info!(
        run_id = run.run_id,
        trials = run.completed_count,
        switch_win_rate = %run.counters.switch_win_rate(),
        stay_win_rate = %run.counters.stay_win_rate(),
        "batch run completed"
    );
}
