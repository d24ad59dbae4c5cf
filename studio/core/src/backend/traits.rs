//! Generation Backend Trait
//!
//! Trait definition for the generation/refinement service. The studio is
//! generic over this trait, so orchestration logic never knows whether it
//! is talking to the real HTTP service or a test double.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::brief::Brief;
use crate::creative::{AdCopy, GenerationResult, Variation};

/// Payload for a refinement turn
///
/// Carries the current brief and a snapshot of the copy being refined, so
/// the service has full context without any server-side session state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefineRequest {
    /// The user's natural-language instruction
    pub message: String,
    /// The brief the creatives were generated from
    pub brief: Brief,
    /// Snapshot of the copy at send time
    pub current_copy: AdCopy,
}

/// Response to a refinement turn
///
/// An absent `copy` means the service could not produce a refinement; the
/// studio treats that as a soft failure and keeps the current creatives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RefineResponse {
    /// Revised copy, when the service produced one
    #[serde(default)]
    pub copy: Option<AdCopy>,
    /// Replacement variation list, when the service produced one
    #[serde(default)]
    pub variations: Option<Vec<Variation>>,
    /// Natural-language explanation for the chat thread
    #[serde(default)]
    pub message: String,
    /// Short summary of what was changed (e.g. "Tone adjusted to 'urgent'")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinement_applied: Option<String>,
}

impl RefineResponse {
    /// Whether the service actually produced a refinement
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.copy.is_some()
    }
}

/// Generation service trait
///
/// Implement this to add another service transport (or a test double).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Get the backend name (for logs)
    fn name(&self) -> &str;

    /// Check if the service is healthy and reachable
    async fn health_check(&self) -> bool;

    /// Run the full generation workflow for a brief
    ///
    /// # Errors
    ///
    /// Fails on transport errors or any non-2xx service response; the error
    /// message carries the service-provided reason when one is available.
    async fn generate(&self, brief: &Brief) -> anyhow::Result<GenerationResult>;

    /// Run one conversational refinement turn
    ///
    /// # Errors
    ///
    /// Fails on transport errors or any non-2xx service response. A 2xx
    /// response without a `copy` field is NOT an error; it comes back as a
    /// [`RefineResponse`] with `copy: None`.
    async fn refine(&self, request: &RefineRequest) -> anyhow::Result<RefineResponse>;
}
