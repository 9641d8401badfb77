use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use super::error::DataLoadError;
use super::model::{ArtistIndex, DataRow, Dataset, RawTable};

/// Field separator of the streams file.
pub const DELIMITER: u8 = b';';

/// Date-only layouts tried in order. Month-first wins over day-first for
/// slashed dates; day-first is only accepted in the dotted form.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a streams file and derive the typed [`Dataset`] from it.
///
/// Layout:
/// * row 0 – artist name per column (column 0 ignored)
/// * row 1 – song title per column
/// * row 2 – separator, ignored
/// * rows ≥ 3 – date in column 0, stream counts after it
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = read_raw_table(file)?;
    let dataset = build_dataset(raw);

    match dataset.date_bounds() {
        Some((first, last)) => log::info!(
            "Loaded {} rows, {} artists from {} ({first} .. {last}, {} undated)",
            dataset.len(),
            dataset.index.len(),
            path.display(),
            dataset.undated_rows()
        ),
        None => log::warn!(
            "Loaded {} rows from {} but no date column value could be parsed",
            dataset.len(),
            path.display()
        ),
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Load & reshape
// ---------------------------------------------------------------------------

/// Split the semicolon-delimited text into header rows and data rows.
///
/// Blank lines are skipped before rows are counted. Every remaining row,
/// the separator included, must have as many columns as the artist row.
pub fn read_raw_table<R: Read>(input: R) -> Result<RawTable, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = reader.records();

    let artists = records
        .next()
        .ok_or(DataLoadError::MissingHeaderRow { row: 0 })??;
    let width = artists.len();
    if width < 2 {
        return Err(DataLoadError::NoArtistColumns);
    }

    let songs = records
        .next()
        .ok_or(DataLoadError::MissingHeaderRow { row: 1 })??;
    check_width(&songs, width)?;

    let mut rows = Vec::new();
    for (i, result) in records.enumerate() {
        let record = result?;
        check_width(&record, width)?;
        if i == 0 {
            // separator row
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable {
        artists: to_strings(&artists),
        songs: to_strings(&songs),
        rows,
    })
}

fn check_width(record: &StringRecord, expected: usize) -> Result<(), DataLoadError> {
    if record.len() == expected {
        return Ok(());
    }
    Err(DataLoadError::RaggedRow {
        line: record.position().map_or(0, |p| p.line() as usize),
        expected,
        found: record.len(),
    })
}

fn to_strings(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

/// Coerce every data cell and build the artist index.
pub fn build_dataset(raw: RawTable) -> Dataset {
    let index = ArtistIndex::from_header(&raw.artists);

    let rows = raw
        .rows
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            let raw_date = cells.next().unwrap_or_default();
            DataRow {
                date: parse_date(&raw_date),
                counts: cells.map(|c| coerce_count(&c)).collect(),
                raw_date,
            }
        })
        .collect();

    Dataset {
        index,
        songs: raw.songs,
        rows,
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Parse a date cell. Unrecognised text yields `None`, never an error.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| parse_month(text))
}

/// Month-granularity cells (`2020-01`, `Jan 2020`) map to the first of the month.
fn parse_month(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("01 {text}"), "%d %b %Y"))
        .ok()
}

/// Parse a stream-count cell. Blank, non-numeric and non-finite text is missing;
/// `inf` and `NaN` cells therefore count as 0 rather than poisoning a sum.
pub fn coerce_count(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
