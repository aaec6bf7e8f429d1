use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Download Iranian administrative boundaries from the Overpass API and write
/// them as GeoJSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to an optional YAML config file.
    #[arg(short, long)]
    pub config_filepath: Option<PathBuf>,
}

impl Args {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        Config::load(self.config_filepath.as_deref())
    }
}

/// Log to standard output, at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
}

/// Run `try_main` and exit with status 1 if it fails.
pub fn run(try_main: fn() -> anyhow::Result<()>) {
    init_logging();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
