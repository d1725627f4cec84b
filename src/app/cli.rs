use crate::playback::BackendKind;
use clap::Parser;

/// Airwave - A terminal web radio player for AzuraCast stations 📻
#[derive(Parser, Debug, Default)]
#[command(name = "airwave", version, about)]
pub struct Args {
    /// AzuraCast base URL (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Station short name (overrides config)
    #[arg(long, short = 's')]
    pub station: Option<String>,

    /// Direct stream URL (overrides config)
    #[arg(long)]
    pub stream_url: Option<String>,

    /// Playback backend: external (mpv) or native
    #[arg(long, short = 'b')]
    pub backend: Option<BackendKind>,

    /// Start playing right away
    #[arg(long, short = 'p')]
    pub autoplay: bool,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    /// Fold command line overrides into the loaded config.
    pub fn apply(&self, config: &mut super::config::UserConfig) {
        if let Some(url) = &self.base_url {
            config.station.base_url = url.clone();
        }
        if let Some(station) = &self.station {
            config.station.station_id = station.clone();
        }
        if let Some(url) = &self.stream_url {
            config.station.stream_url = url.clone();
        }
        if let Some(backend) = self.backend {
            config.playback.backend = backend;
        }
        if self.autoplay {
            config.playback.autoplay = true;
        }
    }
}
