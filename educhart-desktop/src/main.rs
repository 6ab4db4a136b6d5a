//! # EduChart Desktop
//!
//! Native desktop application for EduChart.

use clap::Parser;
use educhart_desktop::{CliArgs, DesktopConfig, EduChartApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "educhart_desktop=debug,educhart_renderer=debug,educhart_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EduChart Desktop v{}", educhart_core::VERSION);

    let args = CliArgs::parse();
    let config = DesktopConfig::from(args);

    tracing::info!(
        "Window config: {}x{} \"{}\", exporting to {}",
        config.width,
        config.height,
        config.title,
        config.export_dir.display()
    );

    #[allow(clippy::cast_precision_loss)] // Window dimensions fit in f32
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32, config.height as f32])
            .with_min_inner_size([960.0, 600.0])
            .with_title(&config.title),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(EduChartApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Event loop failed: {e}"))?;

    tracing::info!("EduChart Desktop exited");
    Ok(())
}
