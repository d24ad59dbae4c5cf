//! Result Projection
//!
//! Pure transformation of a [`GenerationResult`] into the display plan a
//! surface renders: the primary copy block, the downloadable image gallery,
//! and the variation/platform tab panes. No view binding happens here, so
//! every projection is testable without a UI surface.
//!
//! The whole plan is handed to the surface in a single message; the three
//! result panels become visible together, never partially.

use serde::{Deserialize, Serialize};

use crate::creative::{AdCopy, GenerationResult, PlatformPreview, Variation};

/// Fallback filename stem when the product name is blank
const FALLBACK_FILENAME_STEM: &str = "ad-visual";

/// Canned agent reply when refinement fails or yields nothing
pub const REFINE_APOLOGY: &str = "Sorry, I had trouble processing that. Please try again.";

/// One downloadable gallery card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCard {
    /// Source URL of the visual
    pub url: String,
    /// Suggested download filename
    pub filename: String,
    /// Proxy URL that triggers a same-origin download
    pub download_url: String,
}

/// A variation tab header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationTab {
    /// Display label, e.g. "💼 Professional ★"
    pub label: String,
    /// Tone key of the variation
    pub tone: String,
}

/// The variation tabs plus their card contents
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationPane {
    /// Tab headers, one per variation
    pub tabs: Vec<VariationTab>,
    /// Full variation cards, same order as `tabs`
    pub cards: Vec<Variation>,
}

impl VariationPane {
    /// Project a variation list into tabs + cards
    #[must_use]
    pub fn project(variations: &[Variation]) -> Self {
        let tabs = variations
            .iter()
            .map(|v| VariationTab {
                label: format!(
                    "{} {}{}",
                    v.performance_hint.icon,
                    capitalize(&v.tone),
                    if v.is_primary { " ★" } else { "" }
                ),
                tone: v.tone.clone(),
            })
            .collect();

        Self {
            tabs,
            cards: variations.to_vec(),
        }
    }
}

/// A platform tab header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTab {
    /// Platform key (e.g. "instagram")
    pub key: String,
    /// Display label, e.g. "📸 Instagram"
    pub label: String,
}

/// The platform tabs plus their preview contents
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPane {
    /// Tab headers, one per platform
    pub tabs: Vec<PlatformTab>,
    /// Full previews, same order as `tabs`
    pub previews: Vec<PlatformPreview>,
}

/// Everything a surface needs to render a generation result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Primary copy block
    pub copy: AdCopy,
    /// Downloadable gallery cards, in image order
    pub gallery: Vec<ImageCard>,
    /// Variation tabs and cards
    pub variations: VariationPane,
    /// Platform tabs and previews
    pub platforms: PlatformPane,
}

impl RenderPlan {
    /// Project a generation result into a display plan
    #[must_use]
    pub fn project(result: &GenerationResult) -> Self {
        let gallery = result
            .images
            .iter()
            .enumerate()
            .map(|(i, image)| {
                let filename = download_filename(&result.brief.product_name, i);
                ImageCard {
                    url: image.url.clone(),
                    download_url: download_proxy_url(&image.url, &filename),
                    filename,
                }
            })
            .collect();

        let platform_tabs = result
            .platforms
            .iter()
            .map(|(key, preview)| PlatformTab {
                key: key.clone(),
                label: format!("{} {}", preview.icon, preview.name),
            })
            .collect();

        Self {
            copy: result.copy.clone(),
            gallery,
            variations: VariationPane::project(&result.variations),
            platforms: PlatformPane {
                tabs: platform_tabs,
                previews: result.platforms.values().cloned().collect(),
            },
        }
    }
}

/// Deterministic download filename for the image at `index` (0-based)
///
/// Lower-cased product name with whitespace collapsed to hyphens, a 1-based
/// ordinal, and a `.jpg` suffix. Purely cosmetic, not content-negotiated.
#[must_use]
pub fn download_filename(product_name: &str, index: usize) -> String {
    let stem = product_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let stem = if stem.is_empty() {
        FALLBACK_FILENAME_STEM.to_string()
    } else {
        stem
    };
    format!("{}-{}.jpg", stem, index + 1)
}

/// Build the same-origin download proxy URL for a cross-origin image
#[must_use]
pub fn download_proxy_url(url: &str, filename: &str) -> String {
    format!(
        "/api/download-image?url={}&filename={}",
        urlencoding::encode(url),
        urlencoding::encode(filename)
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
