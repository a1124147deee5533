use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::Dataset;

/// Title keywords that flag an item as critical.
pub const CRITICAL_KEYWORDS: [&str; 7] = [
    "Breach",
    "Ransomware",
    "Zero-Day",
    "Hack",
    "Exploit",
    "Malware",
    "APT",
];

/// Whether a title mentions any critical keyword, ignoring case.
pub fn is_critical(title: &str) -> bool {
    let title = title.to_lowercase();
    CRITICAL_KEYWORDS
        .iter()
        .any(|kw| title.contains(&kw.to_lowercase()))
}

/// The critical subsequence of `filtered`, order preserved.
pub fn critical_indices(dataset: &Dataset, filtered: &[usize]) -> Vec<usize> {
    filtered
        .iter()
        .copied()
        .filter(|&i| is_critical(&dataset.items[i].title))
        .collect()
}

/// Count of filtered items per exact source name.
pub fn source_distribution(dataset: &Dataset, filtered: &[usize]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for &i in filtered {
        *counts.entry(dataset.items[i].source.clone()).or_default() += 1;
    }
    counts
}

/// Count of filtered items per UTC publication date, oldest date first.
pub fn daily_trend(dataset: &Dataset, filtered: &[usize]) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for &i in filtered {
        *counts.entry(dataset.items[i].published_date()).or_default() += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::data::model::NewsItem;

    fn item(title: &str, source: &str, d: u32, h: u32) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            source: source.to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap(),
        }
    }

    #[test]
    fn critical_matching_ignores_case_and_is_substring() {
        assert!(is_critical("Massive data BREACH at retailer"));
        assert!(is_critical("zero-day in browser"));
        assert!(is_critical("Hackers target hospitals"));
        assert!(is_critical("apt29 returns"));
        assert!(!is_critical("Quarterly earnings call"));
        assert!(!is_critical(""));
    }

    #[test]
    fn critical_preserves_filtered_order() {
        let ds = Dataset::from_items(
            vec![
                item("Exploit kit", "A", 1, 0),
                item("Weather", "A", 1, 0),
                item("Malware", "B", 2, 0),
            ],
            0,
        );
        let crit = critical_indices(&ds, &[2, 1, 0]);
        assert_eq!(crit, vec![2, 0]);
        assert!(crit.iter().all(|i| [2, 1, 0].contains(i)));
    }

    #[test]
    fn source_groups_are_case_sensitive() {
        let ds = Dataset::from_items(
            vec![
                item("a", "CNN", 1, 0),
                item("b", "cnn", 1, 0),
                item("c", "CNN", 1, 0),
            ],
            0,
        );
        let dist = source_distribution(&ds, &[0, 1, 2]);
        assert_eq!(dist.get("CNN"), Some(&2));
        assert_eq!(dist.get("cnn"), Some(&1));
    }

    #[test]
    fn trend_is_chronological_for_any_input_order() {
        let ds = Dataset::from_items(
            vec![
                item("a", "A", 3, 23),
                item("b", "A", 1, 1),
                item("c", "A", 3, 0),
                item("d", "A", 2, 12),
            ],
            0,
        );
        let trend = daily_trend(&ds, &[0, 1, 2, 3]);
        let dates: Vec<u32> = trend.iter().map(|(d, _)| chrono::Datelike::day(d)).collect();
        assert_eq!(dates, vec![1, 2, 3]);
        assert!(trend.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(trend.iter().map(|(_, n)| n).sum::<usize>(), 4);
        assert_eq!(trend[2].1, 2);
    }

    #[test]
    fn aggregates_of_nothing_are_empty() {
        let ds = Dataset::default();
        assert!(critical_indices(&ds, &[]).is_empty());
        assert!(source_distribution(&ds, &[]).is_empty());
        assert!(daily_trend(&ds, &[]).is_empty());
    }
}
