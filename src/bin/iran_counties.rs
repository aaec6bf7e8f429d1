use clap::Parser;
use iran_boundaries::batch::counties::{province_codes, run_counties};
use iran_boundaries::cli::{run, Args};
use iran_boundaries::osm::download::OverpassClient;

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = args.load_config()?;
    let client = OverpassClient::new(&config.overpass_url, &config.user_agent)?;

    let report = run_counties(&client, &province_codes(&config.country_prefix), &config);
    // Failed provinces are reported, they do not change the exit status.
    report.log_summary();
    Ok(())
}

fn main() {
    run(try_main)
}
