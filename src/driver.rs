//! Frame driver: fixed timestep accumulator and input queue
//!
//! Hosts with a variable display rate feed real elapsed time into
//! [`FixedStep`], which runs the 60 Hz simulation the right number of
//! times. Input may arrive on any thread through an [`InputSender`]; it is
//! applied on the simulation thread right before the next tick.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::GameSession;

/// Longest frame gap credited to the accumulator (seconds)
const MAX_FRAME_TIME: f32 = 0.25;

/// Logical player inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Jump, starting the run if idle
    StartOrJump,
    /// Restart after game over
    Restart,
    /// Single-button binding (restart when over, else jump)
    Primary,
}

impl GameSession {
    /// Apply one logical input
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::StartOrJump => self.start_or_jump(),
            Action::Restart => self.restart(),
            Action::Primary => self.primary_action(),
        }
    }
}

/// Cloneable, `Send` handle for pushing inputs from callbacks or threads
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<Action>,
}

impl InputSender {
    /// Queue an action. Returns false if the queue was dropped.
    pub fn send(&self, action: Action) -> bool {
        self.tx.send(action).is_ok()
    }
}

/// Inputs waiting to be applied on the simulation thread
#[derive(Debug)]
pub struct InputQueue {
    tx: Sender<Action>,
    rx: Receiver<Action>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Apply every queued action in arrival order; returns how many ran
    pub fn drain_into(&self, session: &mut GameSession) -> usize {
        let mut applied = 0;
        for action in self.rx.try_iter() {
            session.apply(action);
            applied += 1;
        }
        applied
    }
}

/// Fixed-rate accumulator decoupling simulation ticks from display frames
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Run the simulation for `elapsed` seconds of wall time
    ///
    /// Queued input is applied first. Long stalls are capped at
    /// `MAX_SUBSTEPS` ticks and the leftover time is dropped. Returns the
    /// number of ticks run.
    pub fn advance(
        &mut self,
        session: &mut GameSession,
        inputs: &InputQueue,
        elapsed: f32,
    ) -> u32 {
        inputs.drain_into(session);

        // NaN or infinite frame times from the host count as no time passing
        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            session.tick();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
