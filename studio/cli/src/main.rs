//! AdGenius CLI - Headless Terminal Surface
//!
//! A thin surface over `studio-core`: collects a campaign brief from
//! command-line flags, runs one generation against a live service, renders
//! progress and results to stdout, then serves an interactive refinement
//! prompt on stdin.
//!
//! # Usage
//!
//! ```bash
//! # Generate creatives for a brief
//! adgenius --product "Aqua" \
//!          --description "eco water bottle" \
//!          --audience "outdoor enthusiasts" \
//!          --tone playful \
//!          --platform instagram --platform facebook
//!
//! # Against a non-default service
//! adgenius --backend-url http://ads.example:5000 ...
//!
//! # Verbose logging
//! RUST_LOG=debug adgenius ...
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use studio_core::{
    load_config, BriefForm, GenerationBackend, HttpBackend, Studio, StudioMessage, SurfaceEvent,
    Tone,
};

/// AdGenius - multi-agent ad creative generation from the terminal
#[derive(Parser, Debug)]
#[command(name = "adgenius")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation service base URL
    #[arg(long, env = "ADGENIUS_BACKEND_URL", value_name = "URL")]
    backend_url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "ADGENIUS_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "ADGENIUS_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Product or campaign name
    #[arg(long)]
    product: String,

    /// What the product is and does
    #[arg(long)]
    description: String,

    /// Who the campaign targets
    #[arg(long)]
    audience: String,

    /// Creative tone (professional, casual, luxury, playful, urgent, emotional)
    #[arg(long, default_value = "professional")]
    tone: String,

    /// Target platform key; repeat for multiple platforms
    #[arg(long = "platform", value_name = "KEY")]
    platforms: Vec<String>,

    /// Exit after generation instead of prompting for refinements
    #[arg(long)]
    no_chat: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(url) = args.backend_url.clone() {
        config.backend_base_url = url;
    }

    let tone: Tone = args
        .tone
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("parsing --tone")?;

    let backend = HttpBackend::from_config(&config).context("building HTTP backend")?;
    if !backend.health_check().await {
        warn!(url = %config.backend_base_url, "generation service not reachable; first request may fail");
    }

    let (tx, mut rx) = mpsc::channel(256);
    let mut studio = Studio::new(backend, config, tx);

    studio
        .handle_event(SurfaceEvent::ToneSelected { tone })
        .await?;
    studio
        .handle_event(SurfaceEvent::FormSubmitted {
            event_id: SurfaceEvent::new_event_id(),
            form: BriefForm {
                product_name: args.product,
                description: args.description,
                audience: args.audience,
                platforms: args.platforms,
            },
        })
        .await?;

    render_pending(&mut rx);

    if studio.result().is_none() {
        // Validation or generation failed; the message stream already said so
        anyhow::bail!("no creatives were generated");
    }

    if args.no_chat {
        return Ok(());
    }

    refinement_repl(&mut studio, &mut rx).await
}

/// Interactive refinement loop: one stdin line per turn
async fn refinement_repl(
    studio: &mut Studio<HttpBackend>,
    rx: &mut mpsc::Receiver<StudioMessage>,
) -> Result<()> {
    println!();
    println!("Refine your creatives (empty line or Ctrl-D to quit):");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim().to_string();
        if message.is_empty() || message == "quit" {
            break;
        }

        studio
            .handle_event(SurfaceEvent::ChatSubmitted {
                event_id: SurfaceEvent::new_event_id(),
                message,
            })
            .await?;
        render_pending(rx);

        // The request runs in the background; wait for its outcome
        while !studio.poll_refinements().await {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        render_pending(rx);
    }

    studio
        .handle_event(SurfaceEvent::QuitRequested {
            event_id: SurfaceEvent::new_event_id(),
        })
        .await?;
    render_pending(rx);
    Ok(())
}

fn print_prompt() {
    use std::io::Write;
    print!("refine> ");
    let _ = std::io::stdout().flush();
}

/// Drain and render everything the studio has said so far
fn render_pending(rx: &mut mpsc::Receiver<StudioMessage>) {
    while let Ok(msg) = rx.try_recv() {
        render(&msg);
    }
}

fn render(msg: &StudioMessage) {
    match msg {
        StudioMessage::StageActive { stage } => {
            println!("  ⚙️  {}...", stage.label());
        }
        StudioMessage::PipelineComplete => {
            println!("  ✅ All agents done.");
        }
        StudioMessage::ResultRendered { plan } => {
            println!();
            println!("━━━ Generated Creative ━━━");
            println!("Headline : {}", plan.copy.headline);
            println!("Body     : {}", plan.copy.body);
            println!("CTA      : {}", plan.copy.cta);

            if !plan.gallery.is_empty() {
                println!();
                println!("Visuals:");
                for card in &plan.gallery {
                    println!("  {} -> {}", card.filename, card.url);
                }
            }

            if !plan.variations.tabs.is_empty() {
                println!();
                println!("Variations:");
                for (tab, card) in plan.variations.tabs.iter().zip(&plan.variations.cards) {
                    println!("  {}", tab.label);
                    println!("    {}", card.headline);
                }
            }

            if !plan.platforms.tabs.is_empty() {
                println!();
                println!("Platforms:");
                for (tab, preview) in plan.platforms.tabs.iter().zip(&plan.platforms.previews) {
                    println!("  {} ({})", tab.label, preview.audience_reach);
                    println!("    💡 {}", preview.tips);
                }
            }
        }
        StudioMessage::CopyUpdated { copy } => {
            println!();
            println!("━━━ Updated Copy ━━━");
            println!("Headline : {}", copy.headline);
            println!("Body     : {}", copy.body);
            println!("CTA      : {}", copy.cta);
        }
        StudioMessage::VariationsReplaced { pane } => {
            println!("Variations refreshed ({}):", pane.tabs.len());
            for tab in &pane.tabs {
                println!("  {}", tab.label);
            }
        }
        StudioMessage::ChatTurnAdded { turn } => {
            let speaker = match turn.role {
                studio_core::ChatRole::User => "👤",
                studio_core::ChatRole::Agent => "⚡",
            };
            println!("{speaker} {}", turn.text);
        }
        StudioMessage::TypingStarted { .. } => {
            println!("✍️  Refining your creatives...");
        }
        StudioMessage::DownloadReady { url, filename } => {
            println!("⬇ {filename}: {url}");
        }
        StudioMessage::Notify { level, message } => {
            eprintln!("[{level:?}] {message}");
        }
        StudioMessage::Quit => {
            println!("Bye!");
        }
        StudioMessage::State { state } => {
            debug!(state = ?state, "studio state");
        }
        // Visibility toggles, acks, and tab changes don't print anything
        // in a scrolling terminal surface
        StudioMessage::PanelVisibility { .. }
        | StudioMessage::PipelineReset
        | StudioMessage::SubmitEnabled { .. }
        | StudioMessage::VariationTabChanged { .. }
        | StudioMessage::PlatformTabChanged { .. }
        | StudioMessage::TypingCleared { .. }
        | StudioMessage::Ack { .. } => {}
    }
}
