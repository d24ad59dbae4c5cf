//! Studio Core - Headless Orchestration for AdGenius
//!
//! This crate provides the client-side orchestration logic for the AdGenius
//! ad-creative generator, completely independent of any UI framework. It
//! can drive a web page, a TUI, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                              │
//! │     ┌─────────┐      ┌─────────┐      ┌───────────────────┐     │
//! │     │   Web   │      │   CLI   │      │ Headless (tests)  │     │
//! │     └────┬────┘      └────┬────┘      └─────────┬─────────┘     │
//! │          └────────────────┴─────────────────────┘               │
//! │                           │                                     │
//! │                    SurfaceEvent (up)                            │
//! │                   StudioMessage (down)                          │
//! │                           │                                     │
//! └───────────────────────────┼─────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼─────────────────────────────────────┐
//! │                      STUDIO CORE                                │
//! │  ┌────────────────────────┴───────────────────────────────────┐ │
//! │  │                        Studio                              │ │
//! │  │  ┌─────────┐ ┌──────────┐ ┌───────────┐ ┌───────────────┐  │ │
//! │  │  │  Brief  │ │ Pipeline │ │   Chat    │ │    Backend    │  │ │
//! │  │  │ Builder │ │ Animator │ │  Thread   │ │  (generate /  │  │ │
//! │  │  │         │ │          │ │           │ │    refine)    │  │ │
//! │  │  └─────────┘ └──────────┘ └───────────┘ └───────────────┘  │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Studio`]: the orchestrator owning the brief, result, and both
//!   asynchronous flows (generation and refinement)
//! - [`StudioMessage`]: messages sent from the studio to UI surfaces
//! - [`SurfaceEvent`]: events sent from UI surfaces to the studio
//! - [`Brief`] / [`BriefForm`]: validated campaign input
//! - [`GenerationResult`]: the creatives shared with the refinement loop
//! - [`Pipeline`]: the fixed four-stage "agents working" animation
//! - [`TabSelection`]: single-active-of-N state for variation/platform tabs
//!
//! # Quick Start
//!
//! ```ignore
//! use studio_core::{
//!     backend::HttpBackend,
//!     BriefForm, StudioConfig, Studio, SurfaceEvent,
//! };
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let config = StudioConfig::from_env();
//!     let backend = HttpBackend::from_config(&config)?;
//!     let mut studio = Studio::new(backend, config, tx);
//!
//!     // Submit a brief collected from the user
//!     studio.handle_event(SurfaceEvent::FormSubmitted {
//!         event_id: SurfaceEvent::new_event_id(),
//!         form: BriefForm { /* ... */ },
//!     }).await?;
//!
//!     // Main loop: render studio messages, poll refinement outcomes
//!     loop {
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message to the surface
//!         }
//!         studio.poll_refinements().await;
//!         // Handle user input, send as SurfaceEvents
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`brief`]: campaign brief model and form validation
//! - [`creative`]: wire types returned by the generation service
//! - [`pipeline`]: the four-stage pipeline animator
//! - [`selection`]: generic tab exclusivity state
//! - [`chat`]: append-only refinement conversation
//! - [`render`]: pure projection of results into display plans
//! - [`backend`]: generation service abstraction (HTTP client + trait)
//! - [`events`] / [`messages`]: the surface protocol
//! - [`config`]: env/TOML configuration
//! - [`studio`]: the orchestrator itself
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on any UI framework. It's pure
//! workflow logic that can be exercised entirely through channels.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod brief;
pub mod chat;
pub mod config;
pub mod creative;
pub mod events;
pub mod messages;
pub mod pipeline;
pub mod render;
pub mod selection;
pub mod studio;

// Re-exports for convenience
pub use backend::{GenerationBackend, HttpBackend, RefineRequest, RefineResponse};
pub use brief::{Brief, BriefForm, Tone, ValidationError};
pub use chat::{ChatRole, ChatThread, ChatTurn, TurnId};
pub use config::{default_config_path, load_config, ConfigError, StudioConfig, StudioToml};
pub use creative::{
    AdCopy, AdImage, GenerationResult, PerformanceHint, PlatformFormat, PlatformPreview, Variation,
};
pub use events::SurfaceEvent;
pub use messages::{EventId, NotifyLevel, Panel, StudioMessage, StudioState};
pub use pipeline::{Pipeline, StageKind, StageState, DEFAULT_STAGE_DWELL};
pub use render::{
    download_filename, download_proxy_url, ImageCard, PlatformPane, PlatformTab, RenderPlan,
    VariationPane, VariationTab, REFINE_APOLOGY,
};
pub use selection::TabSelection;
pub use studio::Studio;
