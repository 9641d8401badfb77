use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::loader::DELIMITER;
use super::model::TidyRecord;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write tidy records to a file.  Dispatch by extension.
///
/// * `.csv`  – `Date;Artist;Streams`, one record per line
/// * `.json` – `[{ "Date": "2020-01-01", "Artist": "...", "Streams": 1.0 }, ...]`
pub fn export_file(path: &Path, records: &[TidyRecord]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = || {
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))
    };

    match ext.as_str() {
        "csv" => write_csv(file()?, records),
        "json" => write_json(file()?, records),
        other => bail!("Unsupported export extension: .{other}"),
    }?;

    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Semicolon-delimited, matching the input file's separator.
pub fn write_csv<W: Write>(out: W, records: &[TidyRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(out);
    for record in records {
        writer.serialize(record).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

pub fn write_json<W: Write>(out: W, records: &[TidyRecord]) -> Result<()> {
    serde_json::to_writer_pretty(out, records).context("writing JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::Value as JsonValue;

    fn records() -> Vec<TidyRecord> {
        vec![
            TidyRecord {
                date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                artist: "Avicii".into(),
                streams: 1500.0,
            },
            TidyRecord {
                date: NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
                artist: "Avicii".into(),
                streams: 12.5,
            },
        ]
    }

    #[test]
    fn csv_has_header_and_iso_dates() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date;Artist;Streams");
        assert_eq!(lines[1], "2021-01-01;Avicii;1500.0");
        assert_eq!(lines[2], "2021-01-02;Avicii;12.5");
    }

    #[test]
    fn json_uses_column_names() {
        let mut buf = Vec::new();
        write_json(&mut buf, &records()).unwrap();
        let parsed: JsonValue = serde_json::from_slice(&buf).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Date"], "2021-01-01");
        assert_eq!(rows[0]["Artist"], "Avicii");
        assert_eq!(rows[1]["Streams"], 12.5);
    }

    #[test]
    fn export_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("out.CSV");
        export_file(&csv_path, &records()).unwrap();
        assert!(std::fs::read_to_string(&csv_path).unwrap().starts_with("Date;"));

        let json_path = dir.path().join("out.json");
        export_file(&json_path, &records()).unwrap();
        assert!(std::fs::read_to_string(&json_path).unwrap().starts_with('['));

        let err = export_file(&dir.path().join("out.xlsx"), &records()).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
        assert!(!dir.path().join("out.xlsx").exists());
    }
}
