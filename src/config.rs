use std::path::PathBuf;

use clap::Parser;

use crate::data::model::Normalization;

/// Compare combined streaming trends across artists.
#[derive(Debug, Clone, Parser)]
#[command(name = "edm-streams", version, about)]
pub struct Config {
    /// Semicolon-delimited streams file to open on start-up.
    #[arg(env = "EDM_STREAMS_DATA", default_value = "data/edm_streams.csv")]
    pub data: PathBuf,

    /// Number of artists (in sorted order) selected after a load.
    #[arg(long, env = "EDM_STREAMS_DEFAULT_ARTISTS", default_value_t = 2)]
    pub default_artists: usize,

    /// Start in indexed (0-100 per artist) mode.
    #[arg(long)]
    pub indexed: bool,
}

impl Config {
    pub fn initial_mode(&self) -> Normalization {
        if self.indexed {
            Normalization::Indexed
        } else {
            Normalization::Raw
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: PathBuf::from("data/edm_streams.csv"),
            default_artists: 2,
            indexed: false,
        }
    }
}
