mod app;
mod renderer;

use std::fs;

use anyhow::{Context, Result};
use magnitude_core::ViewerConfig;
use tracing_subscriber::EnvFilter;

use crate::app::MagnitudeApp;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next().unwrap_or_else(|| "data.txt".to_string());
    let config = match args.next() {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))?
        }
        None => ViewerConfig::default(),
    };

    let source = fs::read_to_string(&scene_path)
        .with_context(|| format!("reading scene description {scene_path}"))?;
    tracing::info!(scene = %scene_path, "starting viewer");

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "magnitude",
        options,
        Box::new(move |cc| {
            let app = MagnitudeApp::new(cc, &source, &config)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start viewer: {e}"))
}
