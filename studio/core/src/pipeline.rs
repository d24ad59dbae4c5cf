//! Pipeline Animator
//!
//! Plays the fixed four-stage "agents at work" progression that the surface
//! shows while a generation is in flight. The animation is deliberately
//! decoupled from real backend latency: it always takes at least
//! `stages × dwell` before the studio is allowed to reveal results, and it
//! snaps straight to done the moment real data arrives, even if its own
//! clock hasn't visually finished. It is a perceived-latency smoothing
//! layer, not a progress indicator.
//!
//! Stage display state is monotonic within one attempt:
//! pending → active → done, never backwards except through [`Pipeline::reset`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::messages::StudioMessage;

/// Default hold on each stage while animating
pub const DEFAULT_STAGE_DWELL: Duration = Duration::from_millis(700);

/// One phase of the simulated multi-agent generation process
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    /// Copywriting agent
    Creative,
    /// Visual design agent
    Design,
    /// A/B variation agent
    Variation,
    /// Platform adaptation agent
    Platform,
}

impl StageKind {
    /// The fixed playback order
    pub const ALL: [StageKind; 4] = [
        StageKind::Creative,
        StageKind::Design,
        StageKind::Variation,
        StageKind::Platform,
    ];

    /// Position in the playback order
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Creative => 0,
            Self::Design => 1,
            Self::Variation => 2,
            Self::Platform => 3,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Creative => "Creative Agent",
            Self::Design => "Design Agent",
            Self::Variation => "Variation Agent",
            Self::Platform => "Platform Agent",
        }
    }
}

/// Display state of a single stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    /// Not started yet
    #[default]
    Pending,
    /// Currently "working"
    Active,
    /// Finished
    Done,
}

/// The four-stage animator
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Display state per stage, indexed by [`StageKind::index`]
    stages: [StageState; 4],
    /// How long each stage holds Active during playback
    dwell: Duration,
}

impl Pipeline {
    /// Create an animator with the given per-stage dwell
    #[must_use]
    pub fn new(dwell: Duration) -> Self {
        Self {
            stages: [StageState::Pending; 4],
            dwell,
        }
    }

    /// Current state of one stage
    #[must_use]
    pub fn stage(&self, kind: StageKind) -> StageState {
        self.stages[kind.index()]
    }

    /// Whether every stage is done
    #[must_use]
    pub fn is_all_done(&self) -> bool {
        self.stages.iter().all(|s| *s == StageState::Done)
    }

    /// Set every stage back to pending
    ///
    /// Idempotent; the only way a stage state may move backwards.
    pub fn reset(&mut self) {
        self.stages = [StageState::Pending; 4];
    }

    /// Walk the stages in order, marking each active and dwelling on it
    ///
    /// Suspends the caller for the full `stages × dwell` duration. Emits a
    /// [`StudioMessage::StageActive`] per stage so the surface can animate.
    /// Does not mark any stage done; that is [`Pipeline::complete`]'s job,
    /// once real data exists.
    pub async fn play(&mut self, tx: &mpsc::Sender<StudioMessage>) {
        for kind in StageKind::ALL {
            self.advance(kind, StageState::Active);
            if tx
                .send(StudioMessage::StageActive { stage: kind })
                .await
                .is_err()
            {
                tracing::warn!(stage = ?kind, "failed to send stage update to surface");
            }
            tokio::time::sleep(self.dwell).await;
        }
    }

    /// Snap every stage to done in one step
    ///
    /// Called when the real result arrives, overriding wherever the
    /// animation clock reached.
    pub fn complete(&mut self) {
        for kind in StageKind::ALL {
            self.advance(kind, StageState::Done);
        }
    }

    /// Monotonic state setter: ignores anything that would move a stage
    /// backwards (pending ← active ← done)
    fn advance(&mut self, kind: StageKind, state: StageState) {
        let current = self.stages[kind.index()];
        if state >= current {
            self.stages[kind.index()] = state;
        } else {
            tracing::warn!(stage = ?kind, from = ?current, to = ?state, "ignoring stage regression");
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_DWELL)
    }
}
