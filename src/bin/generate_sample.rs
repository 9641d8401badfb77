use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// (artist, song, base daily streams, yearly growth)
const SONGS: &[(&str, &str, f64, f64)] = &[
    ("Avicii", "Levels", 90_000.0, -0.10),
    ("Avicii", "Wake Me Up", 140_000.0, -0.05),
    ("Kygo", "Firestone", 60_000.0, 0.02),
    ("Martin Garrix", "Animals", 80_000.0, -0.15),
    ("Martin Garrix", "In The Name Of Love", 70_000.0, 0.05),
    ("Zedd", "Clarity", 50_000.0, 0.00),
    ("Calvin Harris", "Summer", 75_000.0, 0.08),
];

const DAYS: i64 = 5 * 365;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Streams for one song on day `day`: trend, weekly cycle, noise.
fn daily_streams(base: f64, growth: f64, day: i64, rng: &mut SimpleRng) -> f64 {
    let years = day as f64 / 365.0;
    let trend = base * (1.0 + growth).powf(years);
    let weekday = (day % 7) as f64;
    let weekly = 1.0 + 0.08 * (2.0 * std::f64::consts::PI * weekday / 7.0).sin();
    (trend * weekly + rng.gauss(0.0, base * 0.03)).max(0.0).round()
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/edm_streams_daily.csv"));

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).context("start date")?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    // Header rows: artists, songs, blank separator.
    let artists: Vec<&str> = std::iter::once("").chain(SONGS.iter().map(|s| s.0)).collect();
    let songs: Vec<&str> = std::iter::once("Date").chain(SONGS.iter().map(|s| s.1)).collect();
    writer.write_record(&artists)?;
    writer.write_record(&songs)?;
    writer.write_record(vec![""; SONGS.len() + 1])?;

    for day in 0..DAYS {
        let date = start + Duration::days(day);
        let mut row = Vec::with_capacity(SONGS.len() + 1);

        // One malformed date to exercise the tolerant parser.
        row.push(if day == 100 {
            "not-a-date".to_string()
        } else {
            date.format("%Y-%m-%d").to_string()
        });

        for &(_, _, base, growth) in SONGS {
            // Roughly 1% missing cells.
            if rng.next_f64() < 0.01 {
                row.push(String::new());
            } else {
                row.push(format!("{}", daily_streams(base, growth, day, &mut rng)));
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;

    println!(
        "Wrote {DAYS} days x {} songs to {}",
        SONGS.len(),
        output_path.display()
    );
    Ok(())
}
