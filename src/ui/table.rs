use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMap;
use crate::data::model::Dataset;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// News table
// ---------------------------------------------------------------------------

/// Render `indices` of `dataset` as a scrollable Title / Source / Published
/// table, in the given order.
pub fn news_table(
    ui: &mut Ui,
    id: &str,
    dataset: &Dataset,
    indices: &[usize],
    color_map: &ColorMap,
    max_height: f32,
) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .column(Column::initial(520.0).at_least(200.0).clip(true))
            .column(Column::initial(180.0).at_least(100.0).clip(true))
            .column(Column::remainder().at_least(140.0))
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("Title");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Source");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Published Date");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                    let item = &dataset.items[indices[row.index()]];
                    row.col(|ui: &mut Ui| {
                        ui.label(item.title.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(
                            RichText::new(item.source.as_str())
                                .color(color_map.color_for(&item.source)),
                        );
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(item.published_at.format("%Y-%m-%d %H:%M UTC").to_string());
                    });
                });
            });
    });
}
