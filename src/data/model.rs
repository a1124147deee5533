use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// RawRow – one unparsed record of the source table
// ---------------------------------------------------------------------------

/// A record as it appears on disk, before timestamp parsing.
/// Field names follow the feed's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Source", default)]
    pub source: String,
    #[serde(rename = "Published Date", default)]
    pub published: String,
}

#[cfg(test)]
impl RawRow {
    pub fn new(title: &str, source: &str, published: &str) -> Self {
        RawRow {
            title: title.to_string(),
            source: source.to_string(),
            published: published.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// NewsItem – one row of the working dataset
// ---------------------------------------------------------------------------

/// A news entry with a valid, UTC-normalised publication timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline. Empty when the feed had no title.
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
}

impl NewsItem {
    /// Calendar date of `published_at` in the stored (UTC) timezone.
    pub fn published_date(&self) -> NaiveDate {
        self.published_at.date_naive()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded feed
// ---------------------------------------------------------------------------

/// The loaded feed. Immutable once built; every view is derived from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Items in load order.
    pub items: Vec<NewsItem>,
    /// Unique source names in order of first appearance.
    pub sources: Vec<String>,
    /// Rows dropped at load time because their timestamp did not parse.
    pub excluded: usize,
}

impl Dataset {
    /// Build the source index from the loaded items.
    pub fn from_items(items: Vec<NewsItem>, excluded: usize) -> Self {
        let mut sources: Vec<String> = Vec::new();
        for item in &items {
            if !sources.iter().any(|s| *s == item.source) {
                sources.push(item.source.clone());
            }
        }
        Dataset {
            items,
            sources,
            excluded,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Earliest and latest publication date, or `None` for an empty dataset.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.items.first()?.published_date();
        Some(self.items.iter().fold((first, first), |(lo, hi), item| {
            let d = item.published_date();
            (lo.min(d), hi.max(d))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(title: &str, source: &str, y: i32, m: u32, d: u32) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            source: source.to_string(),
            published_at: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn sources_keep_first_appearance_order() {
        let ds = Dataset::from_items(
            vec![
                item("a", "Wired", 2024, 1, 1),
                item("b", "BleepingComputer", 2024, 1, 2),
                item("c", "Wired", 2024, 1, 3),
                item("d", "wired", 2024, 1, 3),
            ],
            0,
        );
        assert_eq!(ds.sources, vec!["Wired", "BleepingComputer", "wired"]);
    }

    #[test]
    fn date_span_covers_unsorted_items() {
        let ds = Dataset::from_items(
            vec![
                item("a", "S", 2024, 3, 5),
                item("b", "S", 2024, 1, 9),
                item("c", "S", 2024, 2, 1),
            ],
            0,
        );
        assert_eq!(
            ds.date_span(),
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
            ))
        );
    }

    #[test]
    fn empty_dataset_has_no_span() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.date_span(), None);
    }
}
