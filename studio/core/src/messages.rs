//! Studio Messages
//!
//! Messages sent from the studio to UI surfaces. These represent all the
//! ways the orchestration layer can drive any connected UI (web page, TUI,
//! headless test harness).
//!
//! # Design Philosophy
//!
//! The studio is the "brain" that owns the brief, the generation lifecycle,
//! and the refinement conversation. Surfaces are pure renderers: they
//! display what they're told and report user actions back as
//! [`crate::events::SurfaceEvent`]s. Keeping business logic out of the
//! surface is what makes the whole flow testable without a page.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatTurn, TurnId};
use crate::creative::AdCopy;
use crate::pipeline::StageKind;
use crate::render::{RenderPlan, VariationPane};

/// Messages from the studio to a UI surface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum StudioMessage {
    // ============================================
    // Lifecycle
    // ============================================
    /// Studio state change
    State {
        /// The new state
        state: StudioState,
    },

    /// Enable or disable the submit affordance (the generate button)
    SubmitEnabled {
        /// Whether submission is currently allowed
        enabled: bool,
    },

    /// Show or hide one of the major page panels
    PanelVisibility {
        /// Which panel
        panel: Panel,
        /// Whether it should be visible
        visible: bool,
    },

    // ============================================
    // Pipeline animation
    // ============================================
    /// All pipeline stages back to pending
    PipelineReset,

    /// A stage has started "working"
    StageActive {
        /// The stage that became active
        stage: StageKind,
    },

    /// All pipeline stages done, in one step
    PipelineComplete,

    // ============================================
    // Results
    // ============================================
    /// A complete result projection; the surface reveals the copy block,
    /// gallery, variation tabs, and platform tabs together
    ResultRendered {
        /// The full display plan
        plan: RenderPlan,
    },

    /// Primary copy replaced by a refinement
    CopyUpdated {
        /// The new copy block
        copy: AdCopy,
    },

    /// Variation list replaced wholesale by a refinement; selection resets
    VariationsReplaced {
        /// The new variation pane
        pane: VariationPane,
    },

    /// The active variation tab changed
    VariationTabChanged {
        /// Newly active index
        index: usize,
    },

    /// The active platform tab changed
    PlatformTabChanged {
        /// Newly active index
        index: usize,
    },

    /// A download URL is ready for the surface to trigger
    DownloadReady {
        /// Same-origin proxy URL
        url: String,
        /// Suggested filename
        filename: String,
    },

    // ============================================
    // Refinement chat
    // ============================================
    /// A durable chat turn was appended
    ChatTurnAdded {
        /// The appended turn
        turn: ChatTurn,
    },

    /// Show a typing indicator
    TypingStarted {
        /// Identity of the indicator, for later removal
        id: TurnId,
    },

    /// Remove the typing indicator with this identity
    TypingCleared {
        /// Identity of the indicator to remove
        id: TurnId,
    },

    // ============================================
    // System
    // ============================================
    /// User-facing notification
    Notify {
        /// Severity
        level: NotifyLevel,
        /// Message content
        message: String,
    },

    /// Acknowledgment of a received surface event
    Ack {
        /// Event ID being acknowledged
        event_id: EventId,
    },

    /// Request the surface to quit
    Quit,
}

/// Event identifier (for acks)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// The major page panels a surface shows or hides on studio command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    /// The animated agent pipeline
    Pipeline,
    /// Primary copy + image gallery + variation tabs
    Results,
    /// Platform preview tabs
    Platforms,
    /// Refinement chat
    Chat,
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}

/// Generation workflow states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudioState {
    /// Waiting for a submission
    #[default]
    Idle,
    /// Checking the brief form
    Validating,
    /// Playing the agent pipeline animation
    Animating,
    /// Animation floor met; waiting on the generation service
    AwaitingResponse,
    /// A result is rendered
    Success,
    /// The last attempt failed
    Failed,
}

impl StudioState {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Validating => "Checking brief...",
            Self::Animating => "Agents working...",
            Self::AwaitingResponse => "Generating creatives...",
            Self::Success => "Done",
            Self::Failed => "Generation failed",
        }
    }

    /// Whether a submission is currently being processed
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Animating | Self::AwaitingResponse)
    }
}
