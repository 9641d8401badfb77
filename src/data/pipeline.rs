use chrono::Datelike;

use super::model::{Dataset, Normalization, TidyRecord, YearRange};

// ---------------------------------------------------------------------------
// Selection – the user inputs the pipeline depends on
// ---------------------------------------------------------------------------

/// Everything the UI supplies to a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected artists, in selection order.
    pub artists: Vec<String>,
    pub years: YearRange,
    pub mode: Normalization,
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Per-row sum of an artist's columns, one value per data row.
///
/// Missing counts contribute 0. Returns `None` for an unknown artist.
pub fn combined_series(dataset: &Dataset, artist: &str) -> Option<Vec<f64>> {
    let columns = dataset.index.columns(artist)?;
    let series = dataset
        .rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&c| row.count(c).unwrap_or(0.0))
                .sum::<f64>()
        })
        .collect();
    Some(series)
}

/// Apply the display mode to one artist's full series.
///
/// `Indexed` rescales so the series' own minimum maps to 0 and its maximum
/// to 100. A flat series (max == min) maps to all zeros.
pub fn normalize(series: Vec<f64>, mode: Normalization) -> Vec<f64> {
    match mode {
        Normalization::Raw => series,
        Normalization::Indexed => {
            let min = series.iter().copied().fold(f64::INFINITY, f64::min);
            let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if max > min {
                let range = max - min;
                series.iter().map(|&v| (v - min) / range * 100.0).collect()
            } else {
                vec![0.0; series.len()]
            }
        }
    }
}

/// Run the full transform: combine, normalize, filter by year, tidy.
///
/// Output is grouped by artist in selection order, then by row order. Rows
/// without a valid date are dropped at the year filter. Normalization sees
/// every row, before filtering.
pub fn tidy_records(dataset: &Dataset, selection: &Selection) -> Vec<TidyRecord> {
    let mut records = Vec::new();

    for artist in &selection.artists {
        let Some(series) = combined_series(dataset, artist) else {
            log::warn!("Selected artist {artist:?} not present in dataset, skipping");
            continue;
        };
        let values = normalize(series, selection.mode);

        for (row, streams) in dataset.rows.iter().zip(values) {
            let Some(date) = row.date else {
                continue;
            };
            if !selection.years.contains(date.year()) {
                continue;
            }
            records.push(TidyRecord {
                date,
                artist: artist.clone(),
                streams,
            });
        }
    }

    log::debug!(
        "Pipeline produced {} records for {} artist(s), years {}, {:?}",
        records.len(),
        selection.artists.len(),
        selection.years,
        selection.mode
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{build_dataset, read_raw_table};

    fn dataset(text: &str) -> Dataset {
        build_dataset(read_raw_table(text.as_bytes()).unwrap())
    }

    fn select(artists: &[&str], low: i32, high: i32, mode: Normalization) -> Selection {
        Selection {
            artists: artists.iter().map(|s| s.to_string()).collect(),
            years: YearRange::new(low, high),
            mode,
        }
    }

    fn streams(records: &[TidyRecord], artist: &str) -> Vec<f64> {
        records
            .iter()
            .filter(|r| r.artist == artist)
            .map(|r| r.streams)
            .collect()
    }

    const THREE_ROWS: &str = "\
;A;B
;a1;b1
;;
2020-01-01;10;5
2020-01-02;20;5
2020-01-03;30;5
";

    #[test]
    fn same_named_columns_are_summed() {
        let ds = dataset(";A;A;B\n;s1;s2;s3\n;;;\n2020-01-01;10;5;100\n");
        assert_eq!(combined_series(&ds, "A"), Some(vec![15.0]));
        assert_eq!(combined_series(&ds, "B"), Some(vec![100.0]));
        assert_eq!(combined_series(&ds, "C"), None);
    }

    #[test]
    fn non_numeric_cells_count_as_zero() {
        let ds = dataset(";A;A;A\n;s1;s2;s3\n;;;\n2020-01-01;7;oops;\n2020-01-02;;;\n");
        assert_eq!(combined_series(&ds, "A"), Some(vec![7.0, 0.0]));
    }

    #[test]
    fn raw_mode_leaves_values_untouched() {
        let series = vec![3.5, 1.0, 1e9];
        assert_eq!(normalize(series.clone(), Normalization::Raw), series);
    }

    #[test]
    fn indexed_mode_rescales_to_0_100() {
        assert_eq!(
            normalize(vec![10.0, 20.0, 30.0], Normalization::Indexed),
            vec![0.0, 50.0, 100.0]
        );
    }

    #[test]
    fn flat_series_indexes_to_zero() {
        assert_eq!(
            normalize(vec![5.0, 5.0, 5.0], Normalization::Indexed),
            vec![0.0, 0.0, 0.0]
        );
        assert_eq!(normalize(vec![42.0], Normalization::Indexed), vec![0.0]);
        assert!(normalize(vec![], Normalization::Indexed).is_empty());
    }

    #[test]
    fn indexing_is_per_artist() {
        let ds = dataset(THREE_ROWS);
        let out = tidy_records(&ds, &select(&["A", "B"], 2020, 2020, Normalization::Indexed));
        assert_eq!(streams(&out, "A"), vec![0.0, 50.0, 100.0]);
        assert_eq!(streams(&out, "B"), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn output_is_artist_major_in_selection_order() {
        let ds = dataset(THREE_ROWS);
        let out = tidy_records(&ds, &select(&["B", "A"], 2000, 2100, Normalization::Raw));

        let order: Vec<(&str, u32)> = out
            .iter()
            .map(|r| (r.artist.as_str(), r.date.day()))
            .collect();
        assert_eq!(
            order,
            vec![("B", 1), ("B", 2), ("B", 3), ("A", 1), ("A", 2), ("A", 3)]
        );
        assert_eq!(streams(&out, "A"), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn year_filter_is_inclusive() {
        let ds = dataset(
            ";A\n;s\n;\n\
             2019-06-01;1\n2020-06-01;2\n2021-06-01;3\n2022-06-01;4\n2023-06-01;5\n",
        );
        let out = tidy_records(&ds, &select(&["A"], 2021, 2022, Normalization::Raw));
        let years: Vec<i32> = out.iter().map(|r| r.date.year()).collect();
        assert_eq!(years, vec![2021, 2022]);
        assert_eq!(streams(&out, "A"), vec![3.0, 4.0]);
    }

    #[test]
    fn undated_rows_are_dropped_but_still_scale() {
        let ds = dataset(";A\n;s\n;\nbad;100\n2020-01-01;0\n2020-01-02;50\n");
        let out = tidy_records(&ds, &select(&["A"], 1900, 2100, Normalization::Indexed));
        assert_eq!(out.len(), 2);
        // max comes from the undated row
        assert_eq!(streams(&out, "A"), vec![0.0, 50.0]);
    }

    #[test]
    fn indexed_extremes_span_the_unfiltered_series() {
        let ds = dataset(
            ";A\n;s\n;\n2019-01-01;400\n2020-01-01;250\n2021-01-01;100\n",
        );
        let all = tidy_records(&ds, &select(&["A"], 2019, 2021, Normalization::Indexed));
        let v = streams(&all, "A");
        assert_eq!(v.iter().copied().fold(f64::INFINITY, f64::min), 0.0);
        assert_eq!(v.iter().copied().fold(f64::NEG_INFINITY, f64::max), 100.0);

        let narrowed = tidy_records(&ds, &select(&["A"], 2020, 2020, Normalization::Indexed));
        assert_eq!(streams(&narrowed, "A"), vec![50.0]);
    }

    #[test]
    fn monthly_dates_produce_records() {
        let ds = dataset(";A\n;s\n;\n2020-01;1\n2020-02;2\nMar 2021;3\n");
        let out = tidy_records(&ds, &select(&["A"], 2020, 2021, Normalization::Raw));
        let months: Vec<(i32, u32)> = out.iter().map(|r| (r.date.year(), r.date.month())).collect();
        assert_eq!(months, vec![(2020, 1), (2020, 2), (2021, 3)]);
        assert_eq!(streams(&out, "A"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn unknown_artists_are_skipped() {
        let ds = dataset(THREE_ROWS);
        let out = tidy_records(&ds, &select(&["Nobody", "A"], 2020, 2020, Normalization::Raw));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|r| r.artist == "A"));
    }

    #[test]
    fn empty_selection_emits_nothing() {
        let ds = dataset(THREE_ROWS);
        assert!(tidy_records(&ds, &select(&[], 2020, 2020, Normalization::Raw)).is_empty());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let ds = dataset(THREE_ROWS);
        let sel = select(&["A", "B"], 2020, 2020, Normalization::Indexed);
        assert_eq!(tidy_records(&ds, &sel), tidy_records(&ds, &sel));
    }
}
