//! Touch Gestures - trace replay tool
//!
//! Replays a recorded touch trace through the gesture engine and prints the
//! recognized events.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use touch_gestures::trace::{ReplayedEvent, Trace};
use touch_gestures::{AppConfig, GestureEngine, GestureEvent, GestureKind};

/// Touch Gestures - replay touch traces through the gesture engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, env = "GESTURES_CONFIG")]
    config: Option<String>,

    /// Touch trace to replay (.yaml, .yml or .json)
    #[arg(short, long)]
    trace: Option<String>,

    /// Gesture mode, overriding the configuration file
    #[arg(short, long)]
    mode: Option<GestureKind>,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Validate the configuration and exit
    #[arg(long)]
    check_config: bool,

    /// List available gesture modes
    #[arg(long)]
    list_modes: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level)?;

    if args.list_modes {
        list_modes();
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => {
            info!("Configuration file: {}", path);
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    let mut engine = GestureEngine::from_app_config(&config).context("Invalid gesture configuration")?;

    if args.check_config {
        println!("{} configuration valid ({} mode)", "✓".green(), engine.mode());
        return Ok(());
    }

    let Some(trace_path) = args.trace.as_deref() else {
        anyhow::bail!("No trace given; pass --trace <FILE> (or --list-modes / --check-config)");
    };
    let trace = Trace::load(trace_path)?;

    let events = trace.replay(&mut engine);
    if args.json {
        print_json(&events)?;
    } else {
        print_events(trace_path, engine.mode(), &events);
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

fn list_modes() {
    println!("{}", "Gesture modes:".bold());
    for kind in GestureKind::ALL {
        println!("  {}", kind.to_string().cyan());
    }
}

fn print_json(events: &[ReplayedEvent]) -> Result<()> {
    for event in events {
        println!("{}", serde_json::to_string(event).context("Failed to serialize event")?);
    }
    Ok(())
}

fn print_events(trace_path: &str, mode: GestureKind, events: &[ReplayedEvent]) {
    println!(
        "{} {} ({} mode)",
        "=== Replay:".bold().cyan(),
        trace_path.bold(),
        mode.to_string().yellow()
    );

    if events.is_empty() {
        println!("  {}", "no gestures recognized".dimmed());
        return;
    }

    for replayed in events {
        let label = match replayed.event {
            GestureEvent::Swipe { .. } => replayed.event.to_string().magenta(),
            GestureEvent::Tap | GestureEvent::LongPress => replayed.event.to_string().green(),
            GestureEvent::DragStart { .. } | GestureEvent::DragEnd { .. } => {
                replayed.event.to_string().blue()
            }
            _ => replayed.event.to_string().normal(),
        };
        println!("  {:>8.3}s  {}", replayed.time, label);
    }

    println!("  {} events", events.len().to_string().green());
}
