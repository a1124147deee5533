use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{
    ArrowTimestampType, DataType, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType,
};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Dataset, NewsItem, RawRow};

/// Header names of the feed table.
pub const TITLE_COLUMN: &str = "Title";
pub const SOURCE_COLUMN: &str = "Source";
pub const PUBLISHED_COLUMN: &str = "Published Date";

const REQUIRED_COLUMNS: [&str; 3] = [TITLE_COLUMN, SOURCE_COLUMN, PUBLISHED_COLUMN];

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a feed timestamp and normalise it to UTC.
///
/// Offset-less values (or a trailing ` UTC` / ` GMT`) are taken as UTC;
/// a bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, LoadError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(LoadError::EmptyTimestamp);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    let naive = s
        .strip_suffix(" UTC")
        .or_else(|| s.strip_suffix(" GMT"))
        .unwrap_or(s);
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Ok(dt.and_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(LoadError::InvalidTimestamp { raw: s.to_string() })
}

// ---------------------------------------------------------------------------
// Raw rows → Dataset
// ---------------------------------------------------------------------------

/// Build a [`Dataset`] from raw rows, dropping rows whose timestamp does not
/// parse. The number of dropped rows is kept in [`Dataset::excluded`].
pub fn load<I>(raw_rows: I) -> Dataset
where
    I: IntoIterator<Item = RawRow>,
{
    let mut items = Vec::new();
    let mut excluded = 0usize;

    for (row_no, row) in raw_rows.into_iter().enumerate() {
        match parse_timestamp(&row.published) {
            Ok(published_at) => items.push(NewsItem {
                title: row.title,
                source: row.source,
                published_at,
            }),
            Err(e) => {
                log::debug!("Row {row_no}: excluded ({e})");
                excluded += 1;
            }
        }
    }

    if excluded > 0 {
        log::warn!("Excluded {excluded} rows with invalid '{PUBLISHED_COLUMN}' values");
    }

    Dataset::from_items(items, excluded)
}

// ---------------------------------------------------------------------------
// Public file entry-point
// ---------------------------------------------------------------------------

/// Load a news dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Title`, `Source`, `Published Date`
/// * `.json`    – `[{ "Title": ..., "Source": ..., "Published Date": ... }, ...]`
/// * `.parquet` – the same three columns, strings or Arrow timestamps
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            load_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a delimited feed. Extra columns are ignored, column order is free.
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let rows = reader
        .deserialize::<RawRow>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect::<Result<Vec<RawRow>>>()?;

    Ok(load(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// A numeric `Published Date` is epoch milliseconds (pandas' default
/// `date_format='epoch'`). Other non-string values (including `null`) are
/// read as empty text.
pub fn load_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let text_of = |key: &str| {
            obj.get(key)
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        rows.push(RawRow {
            title: text_of(TITLE_COLUMN),
            source: text_of(SOURCE_COLUMN),
            published: match obj.get(PUBLISHED_COLUMN) {
                Some(JsonValue::Number(n)) => n
                    .as_i64()
                    .and_then(DateTime::from_timestamp_millis)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_default(),
                _ => text_of(PUBLISHED_COLUMN),
            },
        });
    }

    Ok(load(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the feed columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Timestamp columns are read as UTC
/// instants whatever timezone name they carry, then rendered to RFC 3339
/// and parsed like any other feed value.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let mut titles = text_column(&batch, TITLE_COLUMN)?;
        let mut sources = text_column(&batch, SOURCE_COLUMN)?;
        let mut published = text_column(&batch, PUBLISHED_COLUMN)?;

        for row in 0..batch.num_rows() {
            rows.push(RawRow {
                title: std::mem::take(&mut titles[row]),
                source: std::mem::take(&mut sources[row]),
                published: std::mem::take(&mut published[row]),
            });
        }
    }

    Ok(load(rows))
}

/// Fetch a column by name as one string per row; nulls become empty text.
fn text_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
    let col = batch.column(idx);

    // Stored values are UTC epochs; the timezone name is display metadata.
    if let DataType::Timestamp(unit, _) = col.data_type() {
        return Ok(match unit {
            TimeUnit::Second => timestamps_as_text::<TimestampSecondType>(col),
            TimeUnit::Millisecond => timestamps_as_text::<TimestampMillisecondType>(col),
            TimeUnit::Microsecond => timestamps_as_text::<TimestampMicrosecondType>(col),
            TimeUnit::Nanosecond => timestamps_as_text::<TimestampNanosecondType>(col),
        });
    }

    let casted = cast(col, &DataType::Utf8).with_context(|| format!("reading '{name}' as text"))?;
    let arr = casted.as_string::<i32>();
    Ok((0..arr.len()).map(|row| text_at(arr, row)).collect())
}

fn timestamps_as_text<T: ArrowTimestampType>(col: &ArrayRef) -> Vec<String> {
    let arr = col.as_primitive::<T>();
    (0..arr.len())
        .map(|row| {
            if arr.is_null(row) {
                return String::new();
            }
            arr.value_as_datetime(row)
                .map(|dt| dt.and_utc().to_rfc3339())
                .unwrap_or_default()
        })
        .collect()
}

fn text_at(arr: &StringArray, row: usize) -> String {
    if arr.is_null(row) {
        String::new()
    } else {
        arr.value(row).to_string()
    }
}
