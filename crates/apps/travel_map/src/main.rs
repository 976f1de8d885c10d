use std::env;
use std::io;
use std::path::PathBuf;

use catalog::{DEFAULT_BOUNDARY_BASE_URL, capitals};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use travel_map::{HttpFetcher, MapComposer, MapConfig, OfflineFetcher, output_path, program_dir};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the Asian capitals travel map to a static HTML page")]
struct Args {
    /// Directory for "Travel Map.html" (default: next to this executable)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Per-country GeoJSON URL; `{}` is replaced by the ISO alpha-3 code
    #[arg(long)]
    boundary_base_url: Option<String>,

    /// Do not download boundaries; only inline outlines are drawn
    #[arg(long)]
    offline: bool,
}

const OUT_DIR_ENV: &str = "TRAVEL_MAP_OUT_DIR";
const BOUNDARY_BASE_URL_ENV: &str = "BOUNDARY_BASE_URL";

impl Args {
    /// Flags win over environment variables, which win over built-in defaults.
    /// `lookup` reads one environment variable.
    fn into_config(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> io::Result<(MapConfig, PathBuf)> {
        let boundary_base_url = self.boundary_base_url.unwrap_or_else(|| {
            lookup(BOUNDARY_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BOUNDARY_BASE_URL.to_string())
        });
        let out_dir = match self
            .out_dir
            .or_else(|| lookup(OUT_DIR_ENV).map(PathBuf::from))
        {
            Some(dir) => dir,
            None => program_dir()?,
        };

        let config = MapConfig {
            boundary_base_url,
            offline: self.offline,
            ..MapConfig::default()
        };
        Ok((config, out_dir))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config, out_dir) = Args::parse().into_config(|key| env::var(key).ok())?;
    let output = output_path(&out_dir);
    info!(
        "composing map around ({}, {}) -> {}",
        config.reference.lat_deg,
        config.reference.lon_deg,
        output.display()
    );

    let composition = if config.offline {
        MapComposer::new(&config, &OfflineFetcher).compose(capitals())
    } else {
        let http = HttpFetcher::new()?;
        MapComposer::new(&config, &http).compose(capitals())
    };

    let counts = composition.counts();
    info!(
        "{} layers: {} markers, {} boundaries, {} circle, {} line, {} label, {} control",
        counts.total(),
        counts.markers,
        counts.boundaries,
        counts.circles,
        counts.lines,
        counts.labels,
        counts.controls
    );
    if !composition.failures.is_empty() {
        let codes: Vec<&str> = composition
            .failures
            .iter()
            .map(|f| f.country_code.as_str())
            .collect();
        info!("skipped boundaries: {}", codes.join(", "));
    }

    let bytes = composition.canvas.save(&output)?;
    info!("wrote {} ({bytes} bytes)", output.display());
    Ok(())
}
