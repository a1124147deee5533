use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::pipeline::DerivedViews;

const CHART_HEIGHT: f32 = 300.0;

/// Plot x coordinate for a calendar date.
fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_to_x`]; only whole-day ticks get a label.
fn x_to_date(x: f64) -> Option<NaiveDate> {
    let day = x.round();
    if (x - day).abs() > 1e-6 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(day as i32)
}

// ---------------------------------------------------------------------------
// Source distribution (bar chart, one bar per source)
// ---------------------------------------------------------------------------

pub fn source_distribution_chart(ui: &mut Ui, views: &DerivedViews, color_map: &ColorMap) {
    let total: usize = views.source_distribution.values().sum();
    let labels: Vec<String> = views.source_distribution.keys().cloned().collect();

    let bars: Vec<Bar> = views
        .source_distribution
        .iter()
        .enumerate()
        .map(|(i, (source, &count))| {
            let share = 100.0 * count as f64 / total.max(1) as f64;
            Bar::new(i as f64, count as f64)
                .name(format!("{source}: {count} ({share:.1}%)"))
                .fill(color_map.color_for(source))
                .width(0.7)
        })
        .collect();

    Plot::new("source_distribution")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Articles")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Distribution of News Sources"));
        });
}

// ---------------------------------------------------------------------------
// Daily trend (line chart over calendar dates)
// ---------------------------------------------------------------------------

pub fn daily_trend_chart(ui: &mut Ui, views: &DerivedViews) {
    let coords: Vec<[f64; 2]> = views
        .daily_trend
        .iter()
        .map(|&(date, count)| [date_to_x(date), count as f64])
        .collect();

    Plot::new("daily_trend")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Published Date")
        .y_axis_label("Count")
        .x_axis_formatter(|mark, _range| {
            x_to_date(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|_name, value| match x_to_date(value.x) {
            Some(d) => format!("{d}\n{} articles", value.y.round()),
            None => String::new(),
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Daily Cyber News Trend")
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}
