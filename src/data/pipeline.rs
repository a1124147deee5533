use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::aggregate::{critical_indices, daily_trend, source_distribution};
use super::error::{PipelineWarning, View};
use super::filter::{FilterConfig, filtered_indices, resolve_date_range};
use super::model::Dataset;

/// All views derived from one dataset + configuration. Rebuilt from scratch
/// on every configuration change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedViews {
    /// Effective date bounds after range resolution.
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Indices into the dataset, in table order.
    pub filtered: Vec<usize>,
    /// Subsequence of `filtered` with a critical keyword in the title.
    pub critical: Vec<usize>,
    pub source_distribution: BTreeMap<String, usize>,
    /// `(date, count)` ascending by date.
    pub daily_trend: Vec<(NaiveDate, usize)>,
    pub warnings: Vec<PipelineWarning>,
}

impl DerivedViews {
    /// Whether `view` is empty, i.e. the UI should show "no data".
    pub fn is_empty(&self, view: View) -> bool {
        match view {
            View::Filtered => self.filtered.is_empty(),
            View::Critical => self.critical.is_empty(),
            View::SourceDistribution => self.source_distribution.is_empty(),
            View::DailyTrend => self.daily_trend.is_empty(),
        }
    }

    /// Warnings other than per-view empty results.
    pub fn config_warnings(&self) -> impl Iterator<Item = &PipelineWarning> {
        self.warnings
            .iter()
            .filter(|w| !matches!(w, PipelineWarning::EmptyResult(_)))
    }
}

/// Run the full pipeline: resolve the date range, filter, sort and aggregate.
pub fn run(dataset: &Dataset, config: &FilterConfig, today: NaiveDate) -> DerivedViews {
    let range = resolve_date_range(dataset, &config.date_range, today);

    let filtered = filtered_indices(dataset, config, range.start, range.end);
    let critical = critical_indices(dataset, &filtered);
    let source_distribution = source_distribution(dataset, &filtered);
    let daily_trend = daily_trend(dataset, &filtered);

    let mut views = DerivedViews {
        start: Some(range.start),
        end: Some(range.end),
        filtered,
        critical,
        source_distribution,
        daily_trend,
        warnings: range.warning.into_iter().collect(),
    };

    for view in [
        View::Filtered,
        View::Critical,
        View::SourceDistribution,
        View::DailyTrend,
    ] {
        if views.is_empty(view) {
            views.warnings.push(PipelineWarning::EmptyResult(view));
        }
    }

    log::debug!(
        "Pipeline: {} of {} items visible, {} critical, {} days",
        views.filtered.len(),
        dataset.len(),
        views.critical.len(),
        views.daily_trend.len()
    );

    views
}
