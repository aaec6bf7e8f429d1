use clap::Parser;
use iran_boundaries::batch::provinces::run_provinces;
use iran_boundaries::cli::{run, Args};
use iran_boundaries::osm::download::OverpassClient;

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = args.load_config()?;
    let client = OverpassClient::new(&config.overpass_url, &config.user_agent)?;

    run_provinces(&client, &config)?;
    Ok(())
}

fn main() {
    run(try_main)
}
