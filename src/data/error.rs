use std::fmt;

use thiserror::Error;

/// Why a raw row was dropped at load time. Never fatal: the row is excluded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("empty timestamp")]
    EmptyTimestamp,
    #[error("unparseable timestamp '{raw}'")]
    InvalidTimestamp { raw: String },
}

/// The derived views, named for empty-result reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Filtered,
    Critical,
    SourceDistribution,
    DailyTrend,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Filtered => "filtered news",
            View::Critical => "critical news",
            View::SourceDistribution => "source distribution",
            View::DailyTrend => "daily trend",
        };
        f.write_str(name)
    }
}

/// Non-fatal conditions reported alongside the derived views.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineWarning {
    #[error("dataset is empty, showing today's date")]
    EmptyDataset,
    #[error("invalid date range ({bounds} bounds), using the full dataset span")]
    InvalidDateRange { bounds: usize },
    #[error("no data available for {0}")]
    EmptyResult(View),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_render_for_display() {
        assert_eq!(
            PipelineWarning::InvalidDateRange { bounds: 1 }.to_string(),
            "invalid date range (1 bounds), using the full dataset span"
        );
        assert_eq!(
            PipelineWarning::EmptyResult(View::Critical).to_string(),
            "no data available for critical news"
        );
    }
}
