//! Surface Events
//!
//! Events sent from UI surfaces to the studio. Surfaces are "dumb"
//! renderers: they report what the user did and let the studio decide how
//! to respond with [`crate::messages::StudioMessage`]s.

use serde::{Deserialize, Serialize};

use crate::brief::{BriefForm, Tone};
use crate::messages::EventId;

/// Events from a UI surface to the studio
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// User submitted the brief form
    FormSubmitted {
        /// Event ID for acknowledgment
        event_id: EventId,
        /// Raw form fields as collected
        form: BriefForm,
    },

    /// User picked a tone button (mutually exclusive)
    ToneSelected {
        /// The chosen tone
        tone: Tone,
    },

    /// User clicked a variation tab
    VariationSelected {
        /// 0-based tab index
        index: usize,
    },

    /// User clicked a platform tab
    PlatformSelected {
        /// 0-based tab index
        index: usize,
    },

    /// User submitted a refinement message
    ChatSubmitted {
        /// Event ID for acknowledgment
        event_id: EventId,
        /// The message as typed
        message: String,
    },

    /// User asked to download a gallery image
    DownloadRequested {
        /// 0-based gallery index
        index: usize,
    },

    /// User requested quit
    QuitRequested {
        /// Event ID for acknowledgment
        event_id: EventId,
    },
}

impl SurfaceEvent {
    /// Generate a new event ID for this event
    #[must_use]
    pub fn new_event_id() -> EventId {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        EventId(format!("evt_{id}"))
    }

    /// Get the event ID if this event carries one
    #[must_use]
    pub fn event_id(&self) -> Option<&EventId> {
        match self {
            Self::FormSubmitted { event_id, .. }
            | Self::ChatSubmitted { event_id, .. }
            | Self::QuitRequested { event_id } => Some(event_id),
            Self::ToneSelected { .. }
            | Self::VariationSelected { .. }
            | Self::PlatformSelected { .. }
            | Self::DownloadRequested { .. } => None,
        }
    }
}
