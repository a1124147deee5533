use chrono::NaiveDate;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::aggregate::CRITICAL_KEYWORDS;
use crate::data::error::View;
use crate::data::filter::SortOrder;
use crate::state::AppState;
use crate::ui::{plot, table};

const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 40);

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, today: NaiveDate) {
    ui.heading("Filter Options");
    ui.separator();

    let sources = match &state.dataset {
        Some(ds) => ds.sources.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Date range");
            let (mut start, mut end) = match state.config.date_range.as_slice() {
                [start, end] => (*start, *end),
                _ => (
                    state.views.start.unwrap_or(today),
                    state.views.end.unwrap_or(today),
                ),
            };
            let mut range_changed = false;
            egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
                ui.label("From");
                range_changed |= ui
                    .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                    .changed();
                ui.end_row();
                ui.label("To");
                range_changed |= ui
                    .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                    .changed();
                ui.end_row();
            });
            if range_changed {
                state.set_date_range(start, end, today);
            }
            ui.separator();

            // ---- Keyword ----
            ui.strong("Search by keyword");
            let mut keyword = state.config.keyword.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut keyword).hint_text("e.g. ransomware"))
                .changed()
            {
                state.set_keyword(&keyword, today);
            }
            ui.separator();

            // ---- Sources ----
            let header_text = format!(
                "News sources  ({}/{})",
                state.config.sources.len(),
                sources.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("sources")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_sources(today);
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_sources(today);
                        }
                    });

                    for source in &sources {
                        let mut checked = state.config.sources.contains(source);
                        let label = if source.is_empty() { "<none>" } else { source.as_str() };
                        let text = RichText::new(label).color(state.color_map.color_for(source));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_source(source, today);
                        }
                    }
                });
            ui.separator();

            // ---- Sort ----
            ui.strong("Sort news by");
            let mut order = state.config.sort_order;
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut order, SortOrder::Latest, "Latest");
                ui.radio_value(&mut order, SortOrder::Oldest, "Oldest");
            });
            if order != state.config.sort_order {
                state.set_sort_order(order, today);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, today: NaiveDate) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, today);
                ui.close_menu();
            }
        });

        if ui.button("🔄 Refresh Data").clicked() {
            state.refresh(today);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} news items loaded, {} visible, {} critical",
                ds.len(),
                state.views.filtered.len(),
                state.views.critical.len()
            ));
            if ds.excluded > 0 {
                ui.label(
                    RichText::new(format!("{} rows skipped (bad date)", ds.excluded))
                        .color(WARNING_COLOR),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – tables and charts
// ---------------------------------------------------------------------------

/// Render the dashboard sections for the current views.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a news feed to begin  (File → Open…)");
        });
        return;
    };
    let views = &state.views;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(RichText::new("Real-Time Cyber Threat Intelligence Dashboard").strong());
            });
            for warning in views.config_warnings() {
                ui.label(RichText::new(format!("⚠ {warning}")).color(WARNING_COLOR));
            }

            section(ui, "Latest Cyber Security News");
            if views.is_empty(View::Filtered) {
                no_data(ui, "No data available for the selected filters!");
            } else {
                table::news_table(
                    ui,
                    "filtered_table",
                    dataset,
                    &views.filtered,
                    &state.color_map,
                    450.0,
                );
            }

            section(ui, "Most Critical Cyber Security News");
            ui.weak(format!("Titles mentioning {}", CRITICAL_KEYWORDS.join(", ")));
            if views.is_empty(View::Critical) {
                no_data(ui, "No critical news found!");
            } else {
                table::news_table(
                    ui,
                    "critical_table",
                    dataset,
                    &views.critical,
                    &state.color_map,
                    300.0,
                );
            }

            section(ui, "News Source Distribution");
            if views.is_empty(View::SourceDistribution) {
                no_data(ui, "No data available!");
            } else {
                plot::source_distribution_chart(ui, views, &state.color_map);
            }

            section(ui, "Cyber Threat Trends Over Time");
            if views.is_empty(View::DailyTrend) {
                no_data(ui, "No data available!");
            } else {
                plot::daily_trend_chart(ui, views);
            }
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.heading(title);
    ui.separator();
}

fn no_data(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(format!("⚠ {message}")).color(WARNING_COLOR));
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, today: NaiveDate) {
    let file = rfd::FileDialog::new()
        .set_title("Open news feed")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path, today);
    }
}
