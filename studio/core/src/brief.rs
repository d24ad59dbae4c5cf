//! Campaign Brief
//!
//! The brief is the user-specified set of campaign parameters that drives
//! generation: what the product is, who it is for, what voice to use, and
//! which platforms to target. Briefs are immutable once built; a new
//! submission produces a new brief rather than mutating the old one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Voice/tone for the generated creative
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Formal, B2B-leaning copy
    #[default]
    Professional,
    /// Relaxed, conversational copy
    Casual,
    /// Premium, aspirational copy
    Luxury,
    /// Light, humorous copy
    Playful,
    /// Scarcity-driven, time-pressured copy
    Urgent,
    /// Heartfelt, story-driven copy
    Emotional,
}

impl Tone {
    /// All tones, in display order
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Luxury,
        Tone::Playful,
        Tone::Urgent,
        Tone::Emotional,
    ];

    /// Lowercase wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Luxury => "luxury",
            Self::Playful => "playful",
            Self::Urgent => "urgent",
            Self::Emotional => "emotional",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Self::Professional),
            "casual" => Ok(Self::Casual),
            "luxury" => Ok(Self::Luxury),
            "playful" => Ok(Self::Playful),
            "urgent" => Ok(Self::Urgent),
            "emotional" => Ok(Self::Emotional),
            other => Err(format!("unknown tone: {other}")),
        }
    }
}

/// A validated campaign brief
///
/// Created only through [`BriefForm::build`], so every `Brief` in the system
/// satisfies the submission invariants: non-blank text fields and at least
/// one target platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brief {
    /// Product or campaign name
    pub product_name: String,
    /// What the product is and does
    pub description: String,
    /// Who the campaign targets
    pub audience: String,
    /// Selected voice for the primary creative
    pub tone: Tone,
    /// Target platform keys (e.g. "instagram"); never empty
    pub platforms: Vec<String>,
}

/// Raw, unvalidated form input as collected by a surface
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BriefForm {
    /// Product name field, as typed
    pub product_name: String,
    /// Description field, as typed
    pub description: String,
    /// Audience field, as typed
    pub audience: String,
    /// Checked platform keys
    pub platforms: Vec<String>,
}

impl BriefForm {
    /// Create an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and assemble a [`Brief`] with the given tone
    ///
    /// Text fields are trimmed before the emptiness check. A missing text
    /// field aborts the submission *silently* — no user-facing notification
    /// is produced for it. That matches the shipped behavior, but it is a
    /// likely UX defect (the user gets no feedback at all); flagged for
    /// product review rather than being quietly load-bearing.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingRequiredField`] if any of the three text
    ///   fields is blank after trimming.
    /// - [`ValidationError::NoPlatformSelected`] if no platform is checked;
    ///   this one must be surfaced to the user as a warning.
    pub fn build(&self, tone: Tone) -> Result<Brief, ValidationError> {
        let product_name = self.product_name.trim();
        let description = self.description.trim();
        let audience = self.audience.trim();

        for (field, value) in [
            ("product_name", product_name),
            ("description", description),
            ("audience", audience),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingRequiredField { field });
            }
        }

        if self.platforms.is_empty() {
            return Err(ValidationError::NoPlatformSelected);
        }

        Ok(Brief {
            product_name: product_name.to_string(),
            description: description.to_string(),
            audience: audience.to_string(),
            tone,
            platforms: self.platforms.clone(),
        })
    }
}

/// Why a brief submission was rejected before reaching the network
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is blank; the submission aborts silently
    #[error("required field is empty: {field}")]
    MissingRequiredField {
        /// Name of the offending field
        field: &'static str,
    },

    /// No target platform was checked; the user must be warned
    #[error("no platform selected")]
    NoPlatformSelected,
}

impl ValidationError {
    /// Whether this failure is swallowed without any user-facing notice
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::MissingRequiredField { .. })
    }
}
