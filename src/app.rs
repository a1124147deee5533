use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

/// The operator's calendar date, used when the dataset gives no range.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CyberNewsApp {
    pub state: AppState,
}

impl CyberNewsApp {
    /// Create the app and load `source_path` if it exists.
    pub fn new(source_path: PathBuf) -> Self {
        let mut state = AppState::new(source_path.clone());
        if source_path.exists() {
            state.load_path(&source_path, today());
        } else {
            log::warn!("{} not found, starting empty", source_path.display());
            state.status_message = Some(format!(
                "{} not found. Use File → Open… to load a feed.",
                source_path.display()
            ));
        }
        Self { state }
    }
}

impl eframe::App for CyberNewsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let today = today();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, today);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, today);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &self.state);
        });
    }
}
