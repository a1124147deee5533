use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, TimeZone, Utc};
use parquet::arrow::ArrowWriter;

const SOURCES: [&str; 5] = [
    "The Hacker News",
    "BleepingComputer",
    "Dark Reading",
    "SecurityWeek",
    "Krebs on Security",
];

const SUBJECTS: [&str; 8] = [
    "Hospital network",
    "Major retailer",
    "Cloud provider",
    "City government",
    "Crypto exchange",
    "Telecom operator",
    "University",
    "Logistics firm",
];

const CRITICAL_TEMPLATES: [&str; 7] = [
    "{} hit by ransomware attack",
    "Zero-Day flaw exploited against {}",
    "{} discloses data breach affecting millions",
    "APT group targets {} with new backdoor",
    "Malware campaign spreads through {}",
    "Hackers leak files stolen from {}",
    "Exploit released for bug patched by {}",
];

const ROUTINE_TEMPLATES: [&str; 5] = [
    "{} publishes annual security report",
    "{} rolls out multi-factor authentication",
    "Patch Tuesday: what {} admins should know",
    "{} hires new chief information security officer",
    "Conference recap: lessons from {}",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

fn main() -> anyhow::Result<()> {
    let n_items: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 200,
    };

    let mut rng = SimpleRng::new(42);
    let newest = Utc.with_ymd_and_hms(2025, 3, 31, 23, 0, 0).unwrap();

    let mut titles = Vec::with_capacity(n_items);
    let mut sources = Vec::with_capacity(n_items);
    let mut published = Vec::with_capacity(n_items);

    for i in 0..n_items {
        let template = if rng.below(3) == 0 {
            rng.pick(&CRITICAL_TEMPLATES)
        } else {
            rng.pick(&ROUTINE_TEMPLATES)
        };
        titles.push(template.replace("{}", rng.pick(&SUBJECTS)));
        sources.push(rng.pick(&SOURCES).to_string());

        // Every 37th row carries a date the dashboard must skip.
        if i % 37 == 36 {
            published.push("unknown".to_string());
        } else {
            let minutes_back = rng.below(30 * 24 * 60) as i64;
            let ts = newest - Duration::minutes(minutes_back);
            published.push(ts.format("%Y-%m-%d %H:%M:%S%:z").to_string());
        }
    }

    // CSV, the dashboard's default input
    let csv_path = "cyber_security_news_live.csv";
    let mut writer = csv::Writer::from_path(csv_path)?;
    writer.write_record(["Title", "Source", "Published Date"])?;
    for ((title, source), date) in titles.iter().zip(&sources).zip(&published) {
        writer.write_record([title, source, date])?;
    }
    writer.flush()?;

    // Parquet with the same columns
    let schema = Arc::new(Schema::new(vec![
        Field::new("Title", DataType::Utf8, false),
        Field::new("Source", DataType::Utf8, false),
        Field::new("Published Date", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(titles)),
            Arc::new(StringArray::from(sources)),
            Arc::new(StringArray::from(published)),
        ],
    )?;
    let parquet_path = "cyber_security_news_live.parquet";
    let file = std::fs::File::create(parquet_path)?;
    let mut parquet_writer = ArrowWriter::try_new(file, schema, None)?;
    parquet_writer.write(&batch)?;
    parquet_writer.close()?;

    println!("Wrote {n_items} news items to {csv_path} and {parquet_path}");
    Ok(())
}
