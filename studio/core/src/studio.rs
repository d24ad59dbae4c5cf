//! Studio - The Orchestration Core
//!
//! The studio owns the full client-side generation workflow:
//! - brief validation and the submission state machine
//! - the agent pipeline animation and its minimum-latency floor
//! - the `/generate` round trip and result projection
//! - the conversational refinement loop layered on the shared result
//! - the mutually-exclusive tone / variation-tab / platform-tab selections
//!
//! # Design Philosophy
//!
//! The studio is UI-agnostic. It talks to whatever surface is connected
//! through [`StudioMessage`]s and reacts to [`SurfaceEvent`]s; it never
//! touches a view directly. All state that used to live at page scope
//! (current brief, current result, selected tone) is owned here, so the
//! whole workflow runs headless under test.
//!
//! # Concurrency
//!
//! Two asynchronous flows progress independently: `submit` and `refine`.
//! `submit` holds `&mut self` for its full duration, so overlapping
//! submissions are structurally impossible on top of the explicit
//! in-flight rejection. Refinement requests are fire-and-forget: each
//! spawned task reports back through an internal outcome channel, stamped
//! with the generation counter it was issued under. [`Studio::poll_refinements`]
//! drains that channel and discards any outcome whose stamp no longer
//! matches the current generation, which is what keeps a slow response for
//! an old brief from corrupting a new brief's result.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::backend::{GenerationBackend, RefineRequest, RefineResponse};
use crate::brief::{Brief, BriefForm, Tone};
use crate::chat::{ChatThread, TurnId};
use crate::config::StudioConfig;
use crate::creative::GenerationResult;
use crate::events::SurfaceEvent;
use crate::messages::{EventId, NotifyLevel, Panel, StudioMessage, StudioState};
use crate::pipeline::Pipeline;
use crate::render::{self, RenderPlan, VariationPane, REFINE_APOLOGY};
use crate::selection::TabSelection;

/// Outcome of one spawned refinement request
struct RefineOutcome {
    /// Generation counter the request was issued under
    generation: u64,
    /// Typing indicator this request put up
    typing_id: TurnId,
    /// What the service said
    response: anyhow::Result<RefineResponse>,
}

/// The studio - headless orchestration core
pub struct Studio<B: GenerationBackend> {
    /// Configuration
    config: StudioConfig,
    /// Generation service
    backend: Arc<B>,
    /// Current workflow state
    state: StudioState,
    /// Mutually-exclusive tone selection (defaults to professional)
    selected_tone: Tone,
    /// The current brief, if one has been submitted
    brief: Option<Brief>,
    /// The current generation result, if any
    result: Option<GenerationResult>,
    /// Monotonically increasing submission counter; stamps refinements
    generation: u64,
    /// Whether a submission is currently being processed
    in_flight: bool,
    /// The pipeline animator
    pipeline: Pipeline,
    /// The refinement conversation
    chat: ChatThread,
    /// Variation tab exclusivity state
    variation_tabs: TabSelection,
    /// Platform tab exclusivity state
    platform_tabs: TabSelection,
    /// Channel to the connected surface
    tx: mpsc::Sender<StudioMessage>,
    /// Producer side of the refinement outcome channel (cloned into tasks)
    refine_tx: mpsc::Sender<RefineOutcome>,
    /// Consumer side of the refinement outcome channel
    refine_rx: mpsc::Receiver<RefineOutcome>,
}

impl<B: GenerationBackend + 'static> Studio<B> {
    /// Create a new studio with the given backend
    pub fn new(backend: B, config: StudioConfig, tx: mpsc::Sender<StudioMessage>) -> Self {
        let pipeline = Pipeline::new(config.stage_dwell);
        let (refine_tx, refine_rx) = mpsc::channel(16);

        Self {
            config,
            backend: Arc::new(backend),
            state: StudioState::Idle,
            selected_tone: Tone::default(),
            brief: None,
            result: None,
            generation: 0,
            in_flight: false,
            pipeline,
            chat: ChatThread::new(),
            variation_tabs: TabSelection::new(0),
            platform_tabs: TabSelection::new(0),
            tx,
            refine_tx,
            refine_rx,
        }
    }

    /// Current workflow state
    pub fn state(&self) -> StudioState {
        self.state
    }

    /// Currently selected tone
    pub fn selected_tone(&self) -> Tone {
        self.selected_tone
    }

    /// The current brief, if one has been submitted
    pub fn brief(&self) -> Option<&Brief> {
        self.brief.as_ref()
    }

    /// The current generation result, if any
    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// The refinement conversation
    pub fn chat(&self) -> &ChatThread {
        &self.chat
    }

    /// Variation tab selection state
    pub fn variation_tabs(&self) -> &TabSelection {
        &self.variation_tabs
    }

    /// Platform tab selection state
    pub fn platform_tabs(&self) -> &TabSelection {
        &self.platform_tabs
    }

    /// The pipeline animator state
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// The configuration this studio was built with
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Handle an event from the UI surface
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps the surface loop's call
    /// shape stable if event handling ever grows failure modes.
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::FormSubmitted { event_id, form } => {
                self.ack(event_id).await;
                self.submit(form).await;
            }

            SurfaceEvent::ToneSelected { tone } => {
                self.selected_tone = tone;
            }

            SurfaceEvent::VariationSelected { index } => {
                if self.variation_tabs.select(index) {
                    self.send(StudioMessage::VariationTabChanged { index }).await;
                }
            }

            SurfaceEvent::PlatformSelected { index } => {
                if self.platform_tabs.select(index) {
                    self.send(StudioMessage::PlatformTabChanged { index }).await;
                }
            }

            SurfaceEvent::ChatSubmitted { event_id, message } => {
                self.ack(event_id).await;
                self.refine(&message).await;
            }

            SurfaceEvent::DownloadRequested { index } => {
                self.request_download(index).await;
            }

            SurfaceEvent::QuitRequested { event_id } => {
                self.ack(event_id).await;
                self.send(StudioMessage::Quit).await;
            }
        }

        Ok(())
    }

    /// Run one submission through the full workflow
    ///
    /// Validates the form, plays the pipeline animation while the request
    /// is in flight, and reveals results only after both the animation
    /// floor and the response have arrived. The submit affordance is
    /// re-enabled on every exit path.
    pub async fn submit(&mut self, form: BriefForm) {
        if self.in_flight {
            tracing::warn!("rejecting submission while one is already in flight");
            self.notify(NotifyLevel::Warning, "A generation is already running.")
                .await;
            return;
        }

        self.set_state(StudioState::Validating).await;
        let brief = match form.build(self.selected_tone) {
            Ok(brief) => brief,
            Err(err) if err.is_silent() => {
                tracing::debug!(error = %err, "submission aborted silently");
                self.set_state(StudioState::Idle).await;
                return;
            }
            Err(err) => {
                tracing::debug!(error = %err, "submission aborted");
                self.notify(NotifyLevel::Warning, "Please select at least one platform.")
                    .await;
                self.set_state(StudioState::Idle).await;
                return;
            }
        };

        self.in_flight = true;
        self.generation += 1;
        self.brief = Some(brief.clone());
        self.result = None;
        self.variation_tabs.replace(0);
        self.platform_tabs.replace(0);

        self.send(StudioMessage::SubmitEnabled { enabled: false })
            .await;
        self.set_panel(Panel::Pipeline, true).await;
        self.set_panel(Panel::Results, false).await;
        self.set_panel(Panel::Platforms, false).await;
        self.set_panel(Panel::Chat, false).await;

        self.pipeline.reset();
        self.send(StudioMessage::PipelineReset).await;

        // Issue the request up front; revelation is still gated on the
        // animation floor below.
        let backend = Arc::clone(&self.backend);
        let request_brief = brief;
        let request = tokio::spawn(async move { backend.generate(&request_brief).await });

        self.set_state(StudioState::Animating).await;
        self.pipeline.play(&self.tx).await;

        self.set_state(StudioState::AwaitingResponse).await;
        let outcome = match request.await {
            Ok(result) => result,
            Err(join_err) => Err(anyhow::anyhow!("generation task aborted: {join_err}")),
        };

        match outcome {
            Ok(result) => {
                self.pipeline.complete();
                self.send(StudioMessage::PipelineComplete).await;

                let plan = RenderPlan::project(&result);
                self.variation_tabs.replace(result.variations.len());
                self.platform_tabs.replace(result.platforms.len());
                self.result = Some(result);

                self.send(StudioMessage::ResultRendered { plan }).await;
                self.set_panel(Panel::Results, true).await;
                self.set_panel(Panel::Platforms, true).await;
                self.set_panel(Panel::Chat, true).await;
                self.set_state(StudioState::Success).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "generation request failed");
                self.notify(NotifyLevel::Error, &format!("Generation failed: {err}"))
                    .await;
                self.pipeline.reset();
                self.send(StudioMessage::PipelineReset).await;
                self.set_panel(Panel::Pipeline, false).await;
                self.set_state(StudioState::Failed).await;
            }
        }

        self.send(StudioMessage::SubmitEnabled { enabled: true })
            .await;
        self.set_state(StudioState::Idle).await;
        self.in_flight = false;
    }

    /// Send one refinement turn
    ///
    /// No-op for blank messages or when no brief exists. The user turn and
    /// typing indicator appear immediately; the request itself runs in a
    /// spawned task stamped with the current generation, and its outcome is
    /// applied (or discarded as stale) by [`Studio::poll_refinements`].
    pub async fn refine(&mut self, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }
        let Some(brief) = self.brief.clone() else {
            return;
        };

        let turn = self.chat.add_user_turn(message);
        self.send(StudioMessage::ChatTurnAdded { turn }).await;

        let typing_id = self.chat.start_typing();
        self.send(StudioMessage::TypingStarted {
            id: typing_id.clone(),
        })
        .await;

        let request = RefineRequest {
            message: message.to_string(),
            brief,
            current_copy: self
                .result
                .as_ref()
                .map(|r| r.copy.clone())
                .unwrap_or_default(),
        };

        let backend = Arc::clone(&self.backend);
        let outcome_tx = self.refine_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let response = backend.refine(&request).await;
            let outcome = RefineOutcome {
                generation,
                typing_id,
                response,
            };
            if outcome_tx.send(outcome).await.is_err() {
                tracing::warn!("studio dropped before refinement outcome was delivered");
            }
        });
    }

    /// Drain pending refinement outcomes
    ///
    /// Call this regularly from the surface loop. Returns `true` if any
    /// outcome was processed.
    pub async fn poll_refinements(&mut self) -> bool {
        let mut activity = false;
        while let Ok(outcome) = self.refine_rx.try_recv() {
            activity = true;
            self.apply_refinement(outcome).await;
        }
        activity
    }

    /// Apply (or discard) one refinement outcome
    async fn apply_refinement(&mut self, outcome: RefineOutcome) {
        self.chat.clear_typing(&outcome.typing_id);
        self.send(StudioMessage::TypingCleared {
            id: outcome.typing_id.clone(),
        })
        .await;

        if outcome.generation != self.generation {
            tracing::warn!(
                issued_under = outcome.generation,
                current = self.generation,
                "discarding refinement response for a superseded brief"
            );
            return;
        }

        match outcome.response {
            Ok(RefineResponse {
                copy: Some(copy),
                variations,
                message,
                ..
            }) => {
                if let Some(result) = self.result.as_mut() {
                    result.copy = copy.clone();
                    if let Some(ref vars) = variations {
                        result.variations = vars.clone();
                    }
                }

                self.send(StudioMessage::CopyUpdated { copy }).await;

                if let Some(vars) = variations {
                    self.variation_tabs.replace(vars.len());
                    self.send(StudioMessage::VariationsReplaced {
                        pane: VariationPane::project(&vars),
                    })
                    .await;
                }

                let turn = self.chat.add_agent_turn(message);
                self.send(StudioMessage::ChatTurnAdded { turn }).await;
            }
            Ok(_) => {
                // 2xx without a copy: the service couldn't refine. Degrade
                // to a conversational apology, never a hard error.
                let turn = self.chat.add_agent_turn(REFINE_APOLOGY);
                self.send(StudioMessage::ChatTurnAdded { turn }).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "refinement request failed");
                let turn = self.chat.add_agent_turn(REFINE_APOLOGY);
                self.send(StudioMessage::ChatTurnAdded { turn }).await;
            }
        }
    }

    /// Build and announce the download URL for a gallery image
    async fn request_download(&mut self, index: usize) {
        let Some(result) = self.result.as_ref() else {
            return;
        };
        let Some(image) = result.images.get(index) else {
            return;
        };

        let filename = render::download_filename(&result.brief.product_name, index);
        let url = render::download_proxy_url(&image.url, &filename);
        self.send(StudioMessage::DownloadReady { url, filename })
            .await;
    }

    /// Set state and notify the surface
    async fn set_state(&mut self, state: StudioState) {
        self.state = state;
        self.send(StudioMessage::State { state }).await;
    }

    /// Show or hide a panel
    async fn set_panel(&self, panel: Panel, visible: bool) {
        self.send(StudioMessage::PanelVisibility { panel, visible })
            .await;
    }

    /// Send acknowledgment
    async fn ack(&self, event_id: EventId) {
        self.send(StudioMessage::Ack { event_id }).await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(StudioMessage::Notify {
            level,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: StudioMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("failed to send message to surface: {}", e);
        }
    }
}
