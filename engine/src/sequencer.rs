//! Emission sequencer.
//!
//! A validated emit scores the intent immediately, then reveals the outcome
//! in stages on fixed delays:
//!
//! ```text
//! Idle -> Validating -> Emitting -(reveal_score)-> Scored -(reveal_result)-> Scored
//!      -(end_emitting)-> Settled -(settle)-> Idle
//! ```
//!
//! All state changes go through [`EmissionState::apply`]. Each emission gets a
//! fresh [`Epoch`]; delayed stages carry the epoch they were scheduled under
//! and are dropped if a reset or a newer emission has advanced it. Pending
//! timers are also aborted on reset and re-emit, so a stale stage can only
//! reach the reducer if it was already queued in the channel.

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;
use tracing::debug;

use nebula_config::EmissionTimings;
use nebula_core::compute_intent;
use nebula_types::{
    EmissionPhase, Epoch, IntentMetrics, IntentResult, IntentScore, ScoreResult, WalletAddress,
    WalletWarning,
};

/// Delayed stages of an emission, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStage {
    /// Publish the score and metrics.
    Score,
    /// Publish the composed result object.
    Result,
    /// Leave the emitting visual state.
    EndEmitting,
    /// Drop the active glow and return to idle.
    Settle,
}

/// A stage firing for a particular emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub epoch: Epoch,
    pub stage: RevealStage,
}

/// Inputs to the emission reducer.
#[derive(Debug, Clone)]
pub enum Transition {
    /// Emit requested; wallet shape is being checked.
    Validate,
    /// Wallet check failed.
    Rejected(WalletWarning),
    /// Wallet check passed and the intent was scored.
    Begin(ScoreResult),
    Reveal(TimerEvent),
    Reset,
}

/// Emission-facing state read by the panels.
#[derive(Debug, Clone)]
pub struct EmissionState {
    phase: EmissionPhase,
    /// Phase to return to if validation fails.
    resume_phase: EmissionPhase,
    is_emitting: bool,
    intent_active: bool,
    wave_score: Option<IntentScore>,
    intent_result: Option<IntentResult>,
    intent_score: IntentScore,
    metrics: IntentMetrics,
    warning: Option<WalletWarning>,
    epoch: Epoch,
    /// Scored but not yet fully revealed.
    pending: Option<ScoreResult>,
}

impl Default for EmissionState {
    fn default() -> Self {
        Self {
            phase: EmissionPhase::Idle,
            resume_phase: EmissionPhase::Idle,
            is_emitting: false,
            intent_active: false,
            wave_score: None,
            intent_result: None,
            intent_score: IntentScore::BASELINE,
            metrics: IntentMetrics::baseline(),
            warning: None,
            epoch: Epoch::default(),
            pending: None,
        }
    }
}

impl EmissionState {
    /// Apply one transition. Returns `false` if it was dropped as stale or
    /// out of place.
    pub fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Validate => {
                self.resume_phase = self.phase;
                self.phase = EmissionPhase::Validating;
            }
            Transition::Rejected(warning) => {
                self.warning = Some(warning);
                self.phase = self.resume_phase;
            }
            Transition::Begin(result) => {
                self.epoch = self.epoch.next();
                self.warning = None;
                self.wave_score = None;
                self.intent_result = None;
                self.is_emitting = true;
                self.intent_active = true;
                self.pending = Some(result);
                self.phase = EmissionPhase::Emitting;
            }
            Transition::Reveal(event) => return self.reveal(event),
            Transition::Reset => {
                self.epoch = self.epoch.next();
                self.warning = None;
                self.wave_score = None;
                self.intent_result = None;
                self.is_emitting = false;
                self.intent_active = false;
                self.pending = None;
                self.phase = EmissionPhase::Idle;
            }
        }
        true
    }

    fn reveal(&mut self, event: TimerEvent) -> bool {
        if event.epoch != self.epoch {
            debug!(
                stale = event.epoch.get(),
                current = self.epoch.get(),
                stage = ?event.stage,
                "Dropping stale emission stage"
            );
            return false;
        }
        match event.stage {
            RevealStage::Score => {
                let Some(pending) = self.pending.as_ref() else {
                    return false;
                };
                self.wave_score = Some(pending.score);
                self.intent_score = pending.score;
                self.metrics = pending.metrics.clone();
                self.phase = EmissionPhase::Scored;
            }
            RevealStage::Result => {
                let Some(pending) = self.pending.as_ref() else {
                    return false;
                };
                self.intent_result = Some(IntentResult::synchronized(pending.score));
            }
            // Later stages may share a deadline and arrive in any order.
            RevealStage::EndEmitting => {
                if !self.is_emitting {
                    return false;
                }
                self.is_emitting = false;
                self.phase = EmissionPhase::Settled;
            }
            RevealStage::Settle => {
                if !self.intent_active {
                    return false;
                }
                self.is_emitting = false;
                self.intent_active = false;
                self.phase = EmissionPhase::Idle;
            }
        }
        debug!(epoch = self.epoch.get(), stage = ?event.stage, "Emission stage applied");
        true
    }

    #[must_use]
    pub fn phase(&self) -> EmissionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_emitting(&self) -> bool {
        self.is_emitting
    }

    #[must_use]
    pub fn intent_active(&self) -> bool {
        self.intent_active
    }

    #[must_use]
    pub fn wave_score(&self) -> Option<IntentScore> {
        self.wave_score
    }

    #[must_use]
    pub fn intent_result(&self) -> Option<&IntentResult> {
        self.intent_result.as_ref()
    }

    #[must_use]
    pub fn intent_score(&self) -> IntentScore {
        self.intent_score
    }

    #[must_use]
    pub fn metrics(&self) -> &IntentMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn warning(&self) -> Option<WalletWarning> {
        self.warning
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}

/// Abort handles for the timers of the current emission.
#[derive(Debug, Default)]
struct TimerSet {
    handles: Vec<AbortHandle>,
}

impl TimerSet {
    fn schedule(
        &mut self,
        delay: std::time::Duration,
        event: TimerEvent,
        tx: mpsc::UnboundedSender<TimerEvent>,
    ) {
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let sleep = Abortable::new(tokio::time::sleep(delay), abort_registration);
        tokio::spawn(async move {
            if sleep.await.is_ok() {
                let _ = tx.send(event);
            }
        });
        self.handles.push(abort_handle);
    }

    fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    fn clear(&mut self) {
        self.handles.clear();
    }

    fn len(&self) -> usize {
        self.handles.len()
    }
}

/// Owns the emission state and the timers that drive it.
///
/// [`Sequencer::emit`] spawns timer tasks and must be called from within a
/// tokio runtime. Fired stages queue up until [`Sequencer::poll`] drains them.
#[derive(Debug)]
pub struct Sequencer {
    state: EmissionState,
    timings: EmissionTimings,
    timers: TimerSet,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
    events_rx: mpsc::UnboundedReceiver<TimerEvent>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(EmissionTimings::default())
    }
}

impl Sequencer {
    #[must_use]
    pub fn new(timings: EmissionTimings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: EmissionState::default(),
            timings,
            timers: TimerSet::default(),
            events_tx,
            events_rx,
        }
    }

    #[must_use]
    pub fn state(&self) -> &EmissionState {
        &self.state
    }

    /// Timers scheduled for the current emission that have not been
    /// cancelled or retired.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Validate the wallet, score the intent and schedule the reveals.
    ///
    /// A rejected wallet leaves every score, metric and result untouched and
    /// never reaches the scorer.
    pub fn emit(&mut self, wallet: &str, narrative: &str) -> Result<IntentScore, WalletWarning> {
        self.state.apply(Transition::Validate);
        let address = match WalletAddress::parse(wallet) {
            Ok(address) => address,
            Err(warning) => {
                debug!(%warning, "Emit rejected");
                self.state.apply(Transition::Rejected(warning));
                return Err(warning);
            }
        };

        let result = compute_intent(address.as_str(), narrative);
        let score = result.score;

        self.timers.cancel_all();
        self.state.apply(Transition::Begin(result));
        let epoch = self.state.epoch();

        let stages = [
            (self.timings.reveal_score, RevealStage::Score),
            (self.timings.reveal_result, RevealStage::Result),
            (self.timings.end_emitting, RevealStage::EndEmitting),
            (self.timings.settled_at(), RevealStage::Settle),
        ];
        for (delay, stage) in stages {
            self.timers
                .schedule(delay, TimerEvent { epoch, stage }, self.events_tx.clone());
        }

        debug!(epoch = epoch.get(), score = score.get(), "Emission started");
        Ok(score)
    }

    /// Clear all emission output and cancel outstanding timers.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.state.apply(Transition::Reset);
        debug!(epoch = self.state.epoch().get(), "Emission reset");
    }

    /// Apply every stage that has fired since the last poll. Returns how many
    /// were applied (stale stages are not counted).
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            if self.state.apply(Transition::Reveal(event)) {
                applied += 1;
                if event.stage == RevealStage::Settle {
                    self.timers.clear();
                }
            }
        }
        applied
    }
}
