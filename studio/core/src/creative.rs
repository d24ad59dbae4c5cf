//! Creative Wire Types
//!
//! The data the generation service returns: ad copy, image references,
//! tone variations, and platform-adapted previews. These types mirror the
//! service's JSON exactly; fields the service may omit are optional so a
//! minimal response still parses.
//!
//! Ownership rules: a [`GenerationResult`] is owned exclusively by the
//! studio until generation completes; afterwards the refinement loop may
//! replace `copy` and `variations` wholesale, never field-by-field.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brief::Brief;

/// The core ad copy: headline, body, call to action
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    /// Attention-grabbing first line
    pub headline: String,
    /// Supporting body copy
    pub body: String,
    /// Call to action
    pub cta: String,
}

/// A generated ad visual
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdImage {
    /// Source URL of the image
    pub url: String,
}

/// Typical performance characteristics for a variation's tone
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceHint {
    /// Emoji badge shown on the variation tab
    pub icon: String,
    /// Channels/audiences this tone performs best on
    pub best_for: String,
    /// Average click-through rate, preformatted (e.g. "2.1%")
    pub avg_ctr: String,
    /// Qualitative conversion rating (e.g. "High")
    pub conversion: String,
}

/// An alternate tone rendition of the same ad concept
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Tone key for this rendition (wire string, not [`crate::brief::Tone`],
    /// since the service may introduce tones the client doesn't know)
    pub tone: String,
    /// Variation headline
    pub headline: String,
    /// Variation body copy
    pub body: String,
    /// Variation call to action
    pub cta: String,
    /// Whether this is the brief's own tone (listed first, starred)
    pub is_primary: bool,
    /// Performance insights for this tone
    pub performance_hint: PerformanceHint,
}

/// One ad format a platform supports
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFormat {
    /// Format name (e.g. "Feed Post")
    pub name: String,
    /// Display aspect ratio (e.g. "1:1")
    pub ratio: String,
    /// Pixel width, when the service provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when the service provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A platform-adapted rendering of the creative plus format metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPreview {
    /// Display name (e.g. "Instagram")
    pub name: String,
    /// Emoji badge for the platform tab
    pub icon: String,
    /// Audience size blurb (e.g. "2B+ users")
    pub audience_reach: String,
    /// Supported ad formats, in display order
    pub formats: Vec<PlatformFormat>,
    /// The format used for the mockup preview
    pub primary_format: PlatformFormat,
    /// Image URL for the mockup, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<String>,
    /// Platform-specific advice
    pub tips: String,
    /// Copy adapted to the platform's limits
    pub adapted_copy: AdCopy,
}

/// A complete generation response
///
/// `job_id` and `generated_at` are service-side echoes; they are optional
/// because the client never depends on them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Service-assigned job identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    /// Echo of the brief this result was generated from
    pub brief: Brief,
    /// Primary ad copy
    pub copy: AdCopy,
    /// Generated visuals, in display order
    pub images: Vec<AdImage>,
    /// Tone variations, primary first
    pub variations: Vec<Variation>,
    /// Platform previews keyed by platform key; tab order follows key order
    pub platforms: BTreeMap<String, PlatformPreview>,
    /// When the service produced this result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}
