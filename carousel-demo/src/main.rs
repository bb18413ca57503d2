//! # Saorsa Carousel Demo
//!
//! Headless carousel host: ticks the engine and prints item poses.

use carousel_demo::{CliArgs, DemoApp, DemoConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing on stderr; stdout carries the frames.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("carousel_demo=info,carousel_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Saorsa Carousel Demo v{}", carousel_core::VERSION);

    let args = CliArgs::parse();
    let config = DemoConfig::from(args);

    tracing::info!(
        "Container {}x{}, {} items, {} frames",
        config.width,
        config.height,
        config.items,
        config.frames
    );

    let mut app = DemoApp::new(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = app.run(&mut out)?;

    tracing::info!(
        notifications = summary.notifications,
        rejected = summary.rejected,
        rotating = summary.rotating,
        "Finished {} frames on slot {}",
        summary.frames,
        summary.final_slot
    );
    Ok(())
}
