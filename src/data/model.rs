use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// RawTable – the file as text, header rows split off
// ---------------------------------------------------------------------------

/// The semicolon-delimited file exactly as read, with the two header rows
/// split from the data rows. Every row has the same number of columns.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Row 0: artist name per column (column 0 is the date column).
    pub artists: Vec<String>,
    /// Row 1: song title per column.
    pub songs: Vec<String>,
    /// Rows ≥ 3: date string in column 0, stream counts after it.
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// DataRow – one coerced sample
// ---------------------------------------------------------------------------

/// A data row after coercion. Failures are kept as `None` here; the
/// zero-fallback for counts is applied at summation time.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    /// Original text of the date cell.
    pub raw_date: String,
    /// Parsed date, `None` when the text matched no known format.
    pub date: Option<NaiveDate>,
    /// Stream counts for columns 1.., `None` when a cell is not numeric.
    pub counts: Vec<Option<f64>>,
}

impl DataRow {
    /// Count at a raw column position (1-based relative to the date column).
    pub fn count(&self, column: usize) -> Option<f64> {
        let idx = column.checked_sub(1)?;
        self.counts.get(idx).copied().flatten()
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}

// ---------------------------------------------------------------------------
// ArtistIndex – artist name → column positions
// ---------------------------------------------------------------------------

/// Groups column positions by trimmed artist name.
///
/// Matching is exact after trimming (case-sensitive). Columns keep their
/// original order within an artist; the map itself iterates names sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistIndex {
    columns: BTreeMap<String, Vec<usize>>,
}

impl ArtistIndex {
    /// Build from header row 0, skipping the date column.
    pub fn from_header(artist_row: &[String]) -> Self {
        let mut columns: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (pos, name) in artist_row.iter().enumerate().skip(1) {
            columns.entry(name.trim().to_string()).or_default().push(pos);
        }
        ArtistIndex { columns }
    }

    /// Distinct artist names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Column positions of an artist, in file order.
    pub fn columns(&self, artist: &str) -> Option<&[usize]> {
        self.columns.get(artist).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

// ---------------------------------------------------------------------------
// YearRange
// ---------------------------------------------------------------------------

/// Inclusive calendar-year interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    pub fn new(low: i32, high: i32) -> Self {
        YearRange { low, high }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.low <= year && year <= self.high
    }

    /// Clamp both ends into `bounds`, keeping `low <= high`.
    pub fn clamp_to(self, bounds: YearRange) -> Self {
        let low = self.low.clamp(bounds.low, bounds.high);
        let high = self.high.clamp(low, bounds.high);
        YearRange { low, high }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the cached, immutable result of a load
// ---------------------------------------------------------------------------

/// Everything derived once per file load. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub index: ArtistIndex,
    /// Song title per raw column position (index 0 is the date column).
    pub songs: Vec<String>,
    pub rows: Vec<DataRow>,
}

impl Dataset {
    /// Number of data rows, dated or not.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct artist names.
    pub fn artist_names(&self) -> Vec<String> {
        self.index.names().map(str::to_string).collect()
    }

    /// Song titles of an artist, in column order.
    pub fn songs_of(&self, artist: &str) -> Vec<&str> {
        self.index
            .columns(artist)
            .unwrap_or_default()
            .iter()
            .filter_map(|&c| self.songs.get(c))
            .map(|s| s.trim())
            .collect()
    }

    /// Min and max calendar year over rows with a valid date.
    pub fn year_bounds(&self) -> Option<YearRange> {
        let mut years = self.rows.iter().filter_map(DataRow::year);
        let first = years.next()?;
        let (low, high) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(YearRange { low, high })
    }

    /// Date span over rows with a valid date.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.rows.iter().filter_map(|r| r.date);
        let min = dates.clone().min()?;
        let max = dates.max()?;
        Some((min, max))
    }

    pub fn undated_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.date.is_none()).count()
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// How combined stream values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    #[default]
    Raw,
    /// Per-artist min-max rescale onto 0–100.
    Indexed,
}

impl Normalization {
    pub const ALL: [Normalization; 2] = [Normalization::Raw, Normalization::Indexed];

    pub fn label(self) -> &'static str {
        match self {
            Normalization::Raw => "Raw Streams",
            Normalization::Indexed => "Indexed (0-100 per artist)",
        }
    }
}

// ---------------------------------------------------------------------------
// TidyRecord – the pipeline's output row
// ---------------------------------------------------------------------------

/// One (Date, Artist, Streams) observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Streams")]
    pub streams: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(date: Option<(i32, u32, u32)>) -> DataRow {
        DataRow {
            raw_date: String::new(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            counts: vec![],
        }
    }

    #[test]
    fn duplicate_artist_columns_are_merged_in_order() {
        let idx = ArtistIndex::from_header(&header(&["", "A", "B", " A "]));
        assert_eq!(idx.columns("A"), Some(&[1, 3][..]));
        assert_eq!(idx.columns("B"), Some(&[2][..]));
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn artist_names_are_trimmed_unique_and_sorted() {
        let raw = header(&["Date", "Zedd", " Avicii", "Zedd ", "avicii", "Kygo"]);
        let idx = ArtistIndex::from_header(&raw);

        let expected: BTreeSet<String> = raw[1..].iter().map(|s| s.trim().to_string()).collect();
        let names: Vec<&str> = idx.names().collect();
        assert_eq!(names, vec!["Avicii", "Kygo", "Zedd", "avicii"]);
        assert_eq!(
            names.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            expected
        );
    }

    #[test]
    fn date_column_is_never_an_artist() {
        let idx = ArtistIndex::from_header(&header(&["A", "B"]));
        assert!(idx.columns("A").is_none());
        assert_eq!(idx.columns("B"), Some(&[1][..]));
    }

    #[test]
    fn count_is_offset_by_the_date_column() {
        let r = DataRow {
            raw_date: "2020-01-01".into(),
            date: None,
            counts: vec![Some(10.0), None, Some(3.0)],
        };
        assert_eq!(r.count(0), None);
        assert_eq!(r.count(1), Some(10.0));
        assert_eq!(r.count(2), None);
        assert_eq!(r.count(3), Some(3.0));
        assert_eq!(r.count(4), None);
    }

    #[test]
    fn year_bounds_skip_undated_rows() {
        let ds = Dataset {
            index: ArtistIndex::default(),
            songs: vec![],
            rows: vec![row(Some((2021, 5, 1))), row(None), row(Some((2019, 1, 1)))],
        };
        assert_eq!(ds.year_bounds(), Some(YearRange::new(2019, 2021)));
        assert_eq!(ds.undated_rows(), 1);

        let undated = Dataset {
            index: ArtistIndex::default(),
            songs: vec![],
            rows: vec![row(None)],
        };
        assert_eq!(undated.year_bounds(), None);
        assert_eq!(undated.date_bounds(), None);
    }

    #[test]
    fn songs_follow_column_order() {
        let artists = header(&["", "A", "B", "A"]);
        let ds = Dataset {
            index: ArtistIndex::from_header(&artists),
            songs: header(&["", "Levels", "Clarity", " Wake Me Up "]),
            rows: vec![],
        };
        assert_eq!(ds.songs_of("A"), vec!["Levels", "Wake Me Up"]);
        assert!(ds.songs_of("nobody").is_empty());
    }

    #[test]
    fn year_range_clamps_into_bounds() {
        let bounds = YearRange::new(2019, 2023);
        assert_eq!(YearRange::new(2010, 2030).clamp_to(bounds), bounds);
        assert_eq!(
            YearRange::new(2021, 2022).clamp_to(bounds),
            YearRange::new(2021, 2022)
        );
        assert_eq!(
            YearRange::new(2025, 2026).clamp_to(bounds),
            YearRange::new(2023, 2023)
        );
        assert!(bounds.contains(2019));
        assert!(bounds.contains(2023));
        assert!(!bounds.contains(2024));
    }
}
