//! Integration tests for the studio workflow
//!
//! These tests drive the full orchestration loop headless, the way a
//! surface would: submit briefs, watch the message stream, poke tabs, and
//! run refinement turns against a scripted backend that records every call.
//! Tests cover:
//! - validation gating (no network call for invalid briefs)
//! - pipeline animation ordering and the all-done snap
//! - tab selection resets across generations and refinements
//! - the stale-refinement race between two briefs
//! - the end-to-end scenarios from the product flow

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use studio_core::{
    AdCopy, AdImage, Brief, BriefForm, GenerationBackend, GenerationResult, NotifyLevel, Panel,
    PerformanceHint, PlatformFormat, PlatformPreview, RefineRequest, RefineResponse, StageKind,
    Studio, StudioConfig, StudioMessage, StudioState, SurfaceEvent, Tone, Variation,
    REFINE_APOLOGY,
};

// =============================================================================
// Scripted backend
// =============================================================================

/// Test backend that fabricates results from the submitted brief and
/// records every call for later assertions. Clone-able so the test keeps a
/// handle after the studio takes ownership.
#[derive(Clone)]
struct ScriptedBackend {
    inner: Arc<ScriptedInner>,
}

struct ScriptedInner {
    generate_calls: Mutex<Vec<Brief>>,
    refine_calls: Mutex<Vec<RefineRequest>>,
    refine_script: Mutex<VecDeque<anyhow::Result<RefineResponse>>>,
    refine_delay: Mutex<Duration>,
    variation_count: Mutex<usize>,
    image_count: Mutex<usize>,
    fail_generate: AtomicBool,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self {
            inner: Arc::new(ScriptedInner {
                generate_calls: Mutex::new(Vec::new()),
                refine_calls: Mutex::new(Vec::new()),
                refine_script: Mutex::new(VecDeque::new()),
                refine_delay: Mutex::new(Duration::ZERO),
                variation_count: Mutex::new(4),
                image_count: Mutex::new(3),
                fail_generate: AtomicBool::new(false),
            }),
        }
    }

    fn generate_call_count(&self) -> usize {
        self.inner.generate_calls.lock().unwrap().len()
    }

    fn refine_call_count(&self) -> usize {
        self.inner.refine_calls.lock().unwrap().len()
    }

    fn set_variation_count(&self, n: usize) {
        *self.inner.variation_count.lock().unwrap() = n;
    }

    fn set_image_count(&self, n: usize) {
        *self.inner.image_count.lock().unwrap() = n;
    }

    fn set_refine_delay(&self, delay: Duration) {
        *self.inner.refine_delay.lock().unwrap() = delay;
    }

    fn push_refine_response(&self, response: anyhow::Result<RefineResponse>) {
        self.inner.refine_script.lock().unwrap().push_back(response);
    }

    fn fail_next_generate(&self) {
        self.inner.fail_generate.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn generate(&self, brief: &Brief) -> anyhow::Result<GenerationResult> {
        self.inner.generate_calls.lock().unwrap().push(brief.clone());

        if self.inner.fail_generate.swap(false, Ordering::SeqCst) {
            anyhow::bail!("demo outage");
        }

        let variations = *self.inner.variation_count.lock().unwrap();
        let images = *self.inner.image_count.lock().unwrap();
        Ok(result_for(brief, variations, images))
    }

    async fn refine(&self, request: &RefineRequest) -> anyhow::Result<RefineResponse> {
        self.inner.refine_calls.lock().unwrap().push(request.clone());

        let delay = *self.inner.refine_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match self.inner.refine_script.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(RefineResponse {
                copy: Some(AdCopy {
                    headline: "Refined".to_string(),
                    body: "Refined body".to_string(),
                    cta: "Go".to_string(),
                }),
                variations: Some(variations_of(2)),
                message: "Updated!".to_string(),
                refinement_applied: None,
            }),
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn variations_of(n: usize) -> Vec<Variation> {
    let tones = ["professional", "playful", "urgent", "emotional", "luxury", "casual"];
    (0..n)
        .map(|i| Variation {
            tone: tones[i % tones.len()].to_string(),
            headline: format!("Headline {i}"),
            body: format!("Body {i}"),
            cta: format!("CTA {i}"),
            is_primary: i == 0,
            performance_hint: PerformanceHint {
                icon: "📊".to_string(),
                best_for: "Everyone".to_string(),
                avg_ctr: "2.0%".to_string(),
                conversion: "High".to_string(),
            },
        })
        .collect()
}

fn result_for(brief: &Brief, variation_count: usize, image_count: usize) -> GenerationResult {
    let copy = AdCopy {
        headline: format!("{} headline", brief.product_name),
        body: format!("{} body", brief.product_name),
        cta: "Shop Now".to_string(),
    };
    let format = PlatformFormat {
        name: "Feed Post".to_string(),
        ratio: "1:1".to_string(),
        width: None,
        height: None,
    };

    let platforms: BTreeMap<String, PlatformPreview> = brief
        .platforms
        .iter()
        .map(|key| {
            (
                key.clone(),
                PlatformPreview {
                    name: key.clone(),
                    icon: "📣".to_string(),
                    audience_reach: "1B+ users".to_string(),
                    formats: vec![format.clone()],
                    primary_format: format.clone(),
                    primary_image: None,
                    tips: "Keep it short.".to_string(),
                    adapted_copy: copy.clone(),
                },
            )
        })
        .collect();

    GenerationResult {
        job_id: None,
        brief: brief.clone(),
        copy,
        images: (0..image_count)
            .map(|i| AdImage {
                url: format!("https://img.example/{i}.jpg"),
            })
            .collect(),
        variations: variations_of(variation_count),
        platforms,
        generated_at: None,
    }
}

fn aqua_form() -> BriefForm {
    BriefForm {
        product_name: "Aqua".to_string(),
        description: "eco water bottle".to_string(),
        audience: "outdoor enthusiasts".to_string(),
        platforms: vec!["instagram".to_string(), "facebook".to_string()],
    }
}

fn fast_config() -> StudioConfig {
    StudioConfig {
        stage_dwell: Duration::from_millis(1),
        ..StudioConfig::default()
    }
}

fn new_studio(
    backend: &ScriptedBackend,
) -> (
    Studio<ScriptedBackend>,
    mpsc::Receiver<StudioMessage>,
) {
    let (tx, rx) = mpsc::channel(256);
    (Studio::new(backend.clone(), fast_config(), tx), rx)
}

fn drain(rx: &mut mpsc::Receiver<StudioMessage>) -> Vec<StudioMessage> {
    let mut messages = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        messages.push(msg);
    }
    messages
}

/// Poll until the outstanding refinement outcome lands
async fn wait_for_refinement(studio: &mut Studio<ScriptedBackend>) {
    for _ in 0..400 {
        if studio.poll_refinements().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("refinement outcome never arrived");
}

// =============================================================================
// Submission gating
// =============================================================================

#[tokio::test]
async fn valid_brief_reaches_the_backend_exactly_once() {
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    studio
        .handle_event(SurfaceEvent::ToneSelected {
            tone: Tone::Playful,
        })
        .await
        .unwrap();
    studio.submit(aqua_form()).await;

    assert_eq!(backend.generate_call_count(), 1);
    let sent = backend.inner.generate_calls.lock().unwrap()[0].clone();
    assert_eq!(sent.product_name, "Aqua");
    assert_eq!(sent.tone, Tone::Playful);
    assert_eq!(studio.state(), StudioState::Idle);

    // The affordance was disabled and restored
    let messages = drain(&mut rx);
    let toggles: Vec<bool> = messages
        .iter()
        .filter_map(|m| match m {
            StudioMessage::SubmitEnabled { enabled } => Some(*enabled),
            _ => None,
        })
        .collect();
    assert_eq!(toggles, vec![false, true]);
}

#[tokio::test]
async fn missing_field_aborts_silently_without_network() {
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    let mut form = aqua_form();
    form.audience = "   ".to_string();
    studio.submit(form).await;

    assert_eq!(backend.generate_call_count(), 0);
    assert_eq!(studio.state(), StudioState::Idle);

    // Silent means silent: no Notify of any level
    let messages = drain(&mut rx);
    assert!(!messages
        .iter()
        .any(|m| matches!(m, StudioMessage::Notify { .. })));
}

#[tokio::test]
async fn no_platform_warns_visibly_without_network() {
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    let mut form = aqua_form();
    form.platforms.clear();
    studio.submit(form).await;

    assert_eq!(backend.generate_call_count(), 0);

    let messages = drain(&mut rx);
    let warning = messages.iter().find_map(|m| match m {
        StudioMessage::Notify { level, message } => Some((*level, message.clone())),
        _ => None,
    });
    let (level, message) = warning.expect("expected a visible warning");
    assert_eq!(level, NotifyLevel::Warning);
    assert!(message.contains("platform"));
}

#[tokio::test]
async fn generation_failure_resets_pipeline_and_restores_button() {
    let backend = ScriptedBackend::new();
    backend.fail_next_generate();
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;

    assert!(studio.result().is_none());
    assert_eq!(studio.state(), StudioState::Idle);
    assert_eq!(
        studio.pipeline().stage(StageKind::Creative),
        studio_core::StageState::Pending
    );

    let messages = drain(&mut rx);
    let error = messages.iter().find_map(|m| match m {
        StudioMessage::Notify {
            level: NotifyLevel::Error,
            message,
        } => Some(message.clone()),
        _ => None,
    });
    assert!(error.expect("expected an error notification").contains("demo outage"));

    // Failed state was reported, then the studio settled back to Idle
    assert!(messages.iter().any(|m| matches!(
        m,
        StudioMessage::State {
            state: StudioState::Failed
        }
    )));
    assert!(matches!(
        messages.last(),
        Some(StudioMessage::State {
            state: StudioState::Idle
        })
    ));
}

// =============================================================================
// Pipeline animation ordering
// =============================================================================

#[tokio::test]
async fn pipeline_plays_in_order_then_snaps_complete() {
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    let messages = drain(&mut rx);

    let pipeline_events: Vec<String> = messages
        .iter()
        .filter_map(|m| match m {
            StudioMessage::PipelineReset => Some("reset".to_string()),
            StudioMessage::StageActive { stage } => Some(format!("{stage:?}")),
            StudioMessage::PipelineComplete => Some("complete".to_string()),
            _ => None,
        })
        .collect();

    assert_eq!(
        pipeline_events,
        vec!["reset", "Creative", "Design", "Variation", "Platform", "complete"]
    );
    assert!(studio.pipeline().is_all_done());
}

#[tokio::test]
async fn results_reveal_after_animation_and_response() {
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    let messages = drain(&mut rx);

    let complete_at = messages
        .iter()
        .position(|m| matches!(m, StudioMessage::PipelineComplete))
        .unwrap();
    let rendered_at = messages
        .iter()
        .position(|m| matches!(m, StudioMessage::ResultRendered { .. }))
        .unwrap();
    let results_shown_at = messages
        .iter()
        .position(|m| {
            matches!(
                m,
                StudioMessage::PanelVisibility {
                    panel: Panel::Results,
                    visible: true
                }
            )
        })
        .unwrap();

    assert!(complete_at < rendered_at);
    assert!(rendered_at < results_shown_at);
}

// =============================================================================
// Tab selection
// =============================================================================

#[tokio::test]
async fn tabs_start_at_zero_for_any_collection_size() {
    for (variations, platforms) in [(1usize, 1usize), (3, 2), (4, 4)] {
        let backend = ScriptedBackend::new();
        backend.set_variation_count(variations);
        let (mut studio, _rx) = new_studio(&backend);

        let mut form = aqua_form();
        form.platforms = (0..platforms).map(|i| format!("platform{i}")).collect();
        studio.submit(form).await;

        assert_eq!(studio.variation_tabs().active(), Some(0));
        assert_eq!(studio.variation_tabs().len(), variations);
        assert_eq!(studio.platform_tabs().active(), Some(0));
        assert_eq!(studio.platform_tabs().len(), platforms);
    }
}

#[tokio::test]
async fn out_of_range_tab_selection_is_ignored() {
    let backend = ScriptedBackend::new();
    backend.set_variation_count(3);
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    drain(&mut rx);

    studio
        .handle_event(SurfaceEvent::VariationSelected { index: 1 })
        .await
        .unwrap();
    studio
        .handle_event(SurfaceEvent::VariationSelected { index: 99 })
        .await
        .unwrap();
    studio
        .handle_event(SurfaceEvent::PlatformSelected { index: 7 })
        .await
        .unwrap();

    assert_eq!(studio.variation_tabs().active(), Some(1));
    assert_eq!(studio.platform_tabs().active(), Some(0));

    // Only the valid selection produced a message
    let messages = drain(&mut rx);
    let changes: Vec<usize> = messages
        .iter()
        .filter_map(|m| match m {
            StudioMessage::VariationTabChanged { index } => Some(*index),
            StudioMessage::PlatformTabChanged { index } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![1]);
}

// =============================================================================
// Refinement loop
// =============================================================================

#[tokio::test]
async fn blank_refinement_produces_no_turn_and_no_call() {
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    drain(&mut rx);

    studio.refine("   \t  ").await;

    assert_eq!(backend.refine_call_count(), 0);
    assert!(studio.chat().is_empty());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn refinement_replaces_copy_and_resets_variation_tabs() {
    let backend = ScriptedBackend::new();
    backend.push_refine_response(Ok(RefineResponse {
        copy: Some(AdCopy {
            headline: "Act Now".to_string(),
            body: "Limited time.".to_string(),
            cta: "Buy".to_string(),
        }),
        variations: Some(variations_of(3)),
        message: "Done!".to_string(),
        refinement_applied: None,
    }));
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    drain(&mut rx);
    // Move off index 0 so the reset is observable
    studio
        .handle_event(SurfaceEvent::VariationSelected { index: 2 })
        .await
        .unwrap();

    studio.refine("make it more urgent").await;
    wait_for_refinement(&mut studio).await;

    let request = backend.inner.refine_calls.lock().unwrap()[0].clone();
    assert_eq!(request.message, "make it more urgent");
    assert_eq!(request.brief.product_name, "Aqua");
    assert_eq!(request.current_copy.headline, "Aqua headline");

    let result = studio.result().unwrap();
    assert_eq!(result.copy.headline, "Act Now");
    assert_eq!(result.variations.len(), 3);
    assert_eq!(studio.variation_tabs().active(), Some(0));
    assert_eq!(studio.variation_tabs().len(), 3);

    // One user turn, one agent turn, no typing indicator left behind
    assert_eq!(studio.chat().len(), 2);
    assert_eq!(studio.chat().turns()[1].text, "Done!");
    assert!(!studio.chat().is_typing());

    let messages = drain(&mut rx);
    assert!(messages
        .iter()
        .any(|m| matches!(m, StudioMessage::CopyUpdated { .. })));
    assert!(messages
        .iter()
        .any(|m| matches!(m, StudioMessage::TypingCleared { .. })));
}

#[tokio::test]
async fn refinement_without_copy_degrades_to_apology() {
    let backend = ScriptedBackend::new();
    backend.push_refine_response(Ok(RefineResponse {
        copy: None,
        variations: None,
        message: "error".to_string(),
        refinement_applied: None,
    }));
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    drain(&mut rx);

    studio.refine("do something impossible").await;
    wait_for_refinement(&mut studio).await;

    let result = studio.result().unwrap();
    assert_eq!(result.copy.headline, "Aqua headline");

    assert_eq!(studio.chat().len(), 2);
    assert_eq!(studio.chat().turns()[1].text, REFINE_APOLOGY);
    assert!(!studio.chat().is_typing());

    // Never surfaced as a hard error
    let messages = drain(&mut rx);
    assert!(!messages.iter().any(|m| matches!(
        m,
        StudioMessage::Notify {
            level: NotifyLevel::Error,
            ..
        }
    )));
}

#[tokio::test]
async fn transport_failure_degrades_to_apology() {
    let backend = ScriptedBackend::new();
    backend.push_refine_response(Err(anyhow::anyhow!("connection reset")));
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    drain(&mut rx);

    studio.refine("tighten the body copy").await;
    wait_for_refinement(&mut studio).await;

    assert_eq!(studio.chat().turns().last().unwrap().text, REFINE_APOLOGY);
    assert_eq!(studio.result().unwrap().copy.headline, "Aqua headline");
}

#[tokio::test]
async fn stale_refinement_for_superseded_brief_is_discarded() {
    let backend = ScriptedBackend::new();
    backend.set_refine_delay(Duration::from_millis(150));
    let (mut studio, mut rx) = new_studio(&backend);

    // Brief 1 generates, then a slow refinement goes out against it
    studio.submit(aqua_form()).await;
    drain(&mut rx);
    studio.refine("make it more urgent").await;

    // Brief 2 supersedes brief 1 while that refinement is still in flight
    let mut form2 = aqua_form();
    form2.product_name = "Terra".to_string();
    studio.submit(form2).await;
    assert_eq!(studio.result().unwrap().copy.headline, "Terra headline");

    // The late response for brief 1 arrives and must be dropped
    wait_for_refinement(&mut studio).await;

    let result = studio.result().unwrap();
    assert_eq!(result.copy.headline, "Terra headline");
    assert_eq!(result.brief.product_name, "Terra");

    // No agent turn was appended for the discarded response; only the
    // optimistic user turn exists, and the typing indicator is gone
    assert_eq!(studio.chat().len(), 1);
    assert!(!studio.chat().is_typing());
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[tokio::test]
async fn scenario_full_generation_renders_every_surface() {
    let backend = ScriptedBackend::new();
    backend.set_variation_count(2);
    backend.set_image_count(3);
    let (mut studio, mut rx) = new_studio(&backend);

    studio
        .handle_event(SurfaceEvent::ToneSelected {
            tone: Tone::Playful,
        })
        .await
        .unwrap();
    studio
        .handle_event(SurfaceEvent::FormSubmitted {
            event_id: SurfaceEvent::new_event_id(),
            form: aqua_form(),
        })
        .await
        .unwrap();

    assert_eq!(studio.variation_tabs().active(), Some(0));
    assert_eq!(studio.platform_tabs().active(), Some(0));
    assert_eq!(studio.platform_tabs().len(), 2);

    let messages = drain(&mut rx);
    let plan = messages
        .iter()
        .find_map(|m| match m {
            StudioMessage::ResultRendered { plan } => Some(plan.clone()),
            _ => None,
        })
        .expect("expected a rendered result");

    assert_eq!(plan.gallery.len(), studio.result().unwrap().images.len());
    assert_eq!(plan.gallery[0].filename, "aqua-1.jpg");
    assert_eq!(plan.variations.tabs.len(), 2);
    assert_eq!(plan.platforms.tabs.len(), 2);
}

#[tokio::test]
async fn scenario_download_request_builds_proxy_url() {
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    drain(&mut rx);

    studio
        .handle_event(SurfaceEvent::DownloadRequested { index: 1 })
        .await
        .unwrap();

    let messages = drain(&mut rx);
    let (url, filename) = messages
        .iter()
        .find_map(|m| match m {
            StudioMessage::DownloadReady { url, filename } => {
                Some((url.clone(), filename.clone()))
            }
            _ => None,
        })
        .expect("expected a download");

    assert_eq!(filename, "aqua-2.jpg");
    assert!(url.starts_with("/api/download-image?url="));
    assert!(url.contains("filename=aqua-2.jpg"));

    // Out-of-range requests stay silent
    studio
        .handle_event(SurfaceEvent::DownloadRequested { index: 42 })
        .await
        .unwrap();
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn sequential_submissions_each_run_cleanly() {
    // Overlap is structurally impossible from one surface loop: submit()
    // holds the studio exclusively until it finishes. Back-to-back
    // submissions must each get the full disable/restore cycle.
    let backend = ScriptedBackend::new();
    let (mut studio, mut rx) = new_studio(&backend);

    studio.submit(aqua_form()).await;
    studio.submit(aqua_form()).await;
    assert_eq!(backend.generate_call_count(), 2);

    // Both runs completed cleanly; button restored after each
    let messages = drain(&mut rx);
    let toggles: Vec<bool> = messages
        .iter()
        .filter_map(|m| match m {
            StudioMessage::SubmitEnabled { enabled } => Some(*enabled),
            _ => None,
        })
        .collect();
    assert_eq!(toggles, vec![false, true, false, true]);
}
