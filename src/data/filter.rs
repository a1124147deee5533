use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::error::PipelineWarning;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter configuration
// ---------------------------------------------------------------------------

/// Table ordering by publication time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
}

/// User-chosen filter and sort parameters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Inclusive `[start, end]`. Anything but exactly two bounds is malformed.
    pub date_range: Vec<NaiveDate>,
    /// Case-insensitive title substring. Empty means no keyword filter.
    pub keyword: String,
    /// Sources to include. Empty selects nothing.
    pub sources: BTreeSet<String>,
    pub sort_order: SortOrder,
}

impl FilterConfig {
    /// The starting configuration for a freshly loaded dataset: full date
    /// span, every source selected, newest first.
    pub fn for_dataset(dataset: &Dataset, today: NaiveDate) -> Self {
        let (start, end) = dataset.date_span().unwrap_or((today, today));
        FilterConfig {
            date_range: vec![start, end],
            keyword: String::new(),
            sources: dataset.sources.iter().cloned().collect(),
            sort_order: SortOrder::Latest,
        }
    }
}

// ---------------------------------------------------------------------------
// Date range resolution
// ---------------------------------------------------------------------------

/// The effective date bounds plus the warning raised while resolving them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeResolution {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub warning: Option<PipelineWarning>,
}

/// Decide which bounds the filter applies.
///
/// * empty dataset → `(today, today)` with [`PipelineWarning::EmptyDataset`]
/// * not exactly two bounds → full dataset span with
///   [`PipelineWarning::InvalidDateRange`]
/// * otherwise the requested bounds verbatim, even when inverted
pub fn resolve_date_range(
    dataset: &Dataset,
    requested: &[NaiveDate],
    today: NaiveDate,
) -> DateRangeResolution {
    let Some((min_date, max_date)) = dataset.date_span() else {
        return DateRangeResolution {
            start: today,
            end: today,
            warning: Some(PipelineWarning::EmptyDataset),
        };
    };

    match requested {
        [start, end] => DateRangeResolution {
            start: *start,
            end: *end,
            warning: None,
        },
        _ => {
            log::warn!(
                "Invalid date range with {} bounds, falling back to {min_date}..={max_date}",
                requested.len()
            );
            DateRangeResolution {
                start: min_date,
                end: max_date,
                warning: Some(PipelineWarning::InvalidDateRange {
                    bounds: requested.len(),
                }),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Case-insensitive substring test. An empty haystack never contains a
/// non-empty needle.
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Return indices of items that pass every filter, sorted per `sort_order`.
///
/// An item passes when:
/// * its publication date lies in `start..=end`
/// * its source is in `config.sources`
/// * the keyword is empty, or the title contains it (case-insensitive)
///
/// The sort is stable, so items with equal timestamps keep dataset order.
pub fn filtered_indices(
    dataset: &Dataset,
    config: &FilterConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<usize> {
    let keyword = config.keyword.to_lowercase();

    let mut indices: Vec<usize> = dataset
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            let date = item.published_date();
            if date < start || date > end {
                return false;
            }
            if !config.sources.contains(&item.source) {
                return false;
            }
            keyword.is_empty() || contains_ignore_case(&item.title, &keyword)
        })
        .map(|(i, _)| i)
        .collect();

    let items = &dataset.items;
    match config.sort_order {
        SortOrder::Oldest => {
            indices.sort_by(|&a, &b| items[a].published_at.cmp(&items[b].published_at))
        }
        SortOrder::Latest => {
            indices.sort_by(|&a, &b| items[b].published_at.cmp(&items[a].published_at))
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::data::model::NewsItem;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(title: &str, source: &str, d: u32, h: u32) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            source: source.to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap(),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_items(
            vec![
                item("Malware campaign spreads", "Wired", 1, 9),
                item("Patch Tuesday roundup", "TheRecord", 2, 9),
                item("", "Wired", 2, 9),
                item("New MALWARE loader", "TheRecord", 3, 18),
                item("Conference recap", "Wired", 5, 7),
            ],
            0,
        )
    }

    fn all_sources(ds: &Dataset) -> BTreeSet<String> {
        ds.sources.iter().cloned().collect()
    }

    #[test]
    fn default_config_spans_dataset() {
        let ds = sample();
        let cfg = FilterConfig::for_dataset(&ds, date(2030, 1, 1));
        assert_eq!(cfg.date_range, vec![date(2024, 1, 1), date(2024, 1, 5)]);
        assert_eq!(cfg.sources.len(), 2);
        assert_eq!(cfg.sort_order, SortOrder::Latest);
        assert!(cfg.keyword.is_empty());
    }

    #[test]
    fn resolve_passes_two_bounds_through_even_inverted() {
        let ds = sample();
        let r = resolve_date_range(&ds, &[date(2024, 1, 4), date(2024, 1, 2)], date(2030, 1, 1));
        assert_eq!((r.start, r.end), (date(2024, 1, 4), date(2024, 1, 2)));
        assert_eq!(r.warning, None);
    }

    #[test]
    fn resolve_falls_back_on_malformed_range() {
        let ds = sample();
        for requested in [
            vec![],
            vec![date(2024, 1, 2)],
            vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)],
        ] {
            let r = resolve_date_range(&ds, &requested, date(2030, 1, 1));
            assert_eq!((r.start, r.end), (date(2024, 1, 1), date(2024, 1, 5)));
            assert_eq!(
                r.warning,
                Some(PipelineWarning::InvalidDateRange {
                    bounds: requested.len()
                })
            );
        }
    }

    #[test]
    fn resolve_on_empty_dataset_uses_today() {
        let today = date(2026, 10, 18);
        let r = resolve_date_range(&Dataset::default(), &[date(2024, 1, 1)], today);
        assert_eq!((r.start, r.end), (today, today));
        assert_eq!(r.warning, Some(PipelineWarning::EmptyDataset));
    }

    #[test]
    fn every_filtered_item_satisfies_all_predicates() {
        let ds = sample();
        let mut cfg = FilterConfig::for_dataset(&ds, date(2030, 1, 1));
        cfg.keyword = "malware".to_string();
        cfg.sources = ["TheRecord".to_string()].into_iter().collect();
        let (start, end) = (date(2024, 1, 2), date(2024, 1, 4));

        let idx = filtered_indices(&ds, &cfg, start, end);
        assert_eq!(idx, vec![3]);
        for &i in &idx {
            let it = &ds.items[i];
            assert!(it.published_date() >= start && it.published_date() <= end);
            assert!(cfg.sources.contains(&it.source));
            assert!(it.title.to_lowercase().contains("malware"));
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = sample();
        let cfg = FilterConfig {
            sources: all_sources(&ds),
            sort_order: SortOrder::Oldest,
            ..Default::default()
        };
        let idx = filtered_indices(&ds, &cfg, date(2024, 1, 1), date(2024, 1, 2));
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let ds = sample();
        let cfg = FilterConfig {
            sources: all_sources(&ds),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &cfg, date(2024, 1, 5), date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn empty_source_selection_yields_nothing() {
        let ds = sample();
        let cfg = FilterConfig::default();
        assert!(filtered_indices(&ds, &cfg, date(2024, 1, 1), date(2024, 1, 5)).is_empty());
    }

    #[test]
    fn source_match_is_case_sensitive() {
        let ds = sample();
        let cfg = FilterConfig {
            sources: ["wired".to_string()].into_iter().collect(),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &cfg, date(2024, 1, 1), date(2024, 1, 5)).is_empty());
    }

    #[test]
    fn empty_title_only_survives_without_keyword() {
        let ds = sample();
        let mut cfg = FilterConfig {
            sources: all_sources(&ds),
            ..Default::default()
        };
        let (start, end) = (date(2024, 1, 1), date(2024, 1, 5));
        assert!(filtered_indices(&ds, &cfg, start, end).contains(&2));

        cfg.keyword = "a".to_string();
        assert!(!filtered_indices(&ds, &cfg, start, end).contains(&2));
    }

    #[test]
    fn sort_is_stable_on_timestamp_ties() {
        let ds = sample();
        let (start, end) = (date(2024, 1, 1), date(2024, 1, 5));
        let mut cfg = FilterConfig {
            sources: all_sources(&ds),
            ..Default::default()
        };

        // Items 1 and 2 share a timestamp.
        let latest = filtered_indices(&ds, &cfg, start, end);
        assert_eq!(latest, vec![4, 3, 1, 2, 0]);

        cfg.sort_order = SortOrder::Oldest;
        let oldest = filtered_indices(&ds, &cfg, start, end);
        assert_eq!(oldest, vec![0, 1, 2, 3, 4]);
    }
}
