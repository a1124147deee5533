mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::CyberNewsApp;
use eframe::egui;

/// Feed file read when no path is given on the command line.
const DEFAULT_DATA_FILE: &str = "cyber_security_news_live.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let source_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cyber Threat Intelligence Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CyberNewsApp::new(source_path)))),
    )
}
