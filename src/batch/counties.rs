use indicatif::{ProgressBar, ProgressStyle};

use super::report::{RunReport, UnitSummary};
use crate::config::Config;
use crate::error::PipelineError;
use crate::geofile::geojson::{write_collection_variants, OutputVariant};
use crate::osm::conversion::overpass_json_to_geojson;
use crate::osm::download::{county_query, BoundarySource};

/// Provinces are numbered `00` through `30` in ISO 3166-2:IR.
pub const PROVINCE_NUMBERS: std::ops::RangeInclusive<u8> = 0..=30;

/// `IR-00` … `IR-30` for the `IR` prefix.
pub fn province_codes(country_prefix: &str) -> Vec<String> {
    PROVINCE_NUMBERS
        .map(|number| format!("{country_prefix}-{number:02}"))
        .collect()
}

/// Fetch, convert and write the counties of a single province.
pub fn process_province_counties(
    source: &impl BoundarySource,
    province_code: &str,
    config: &Config,
) -> Result<UnitSummary, PipelineError> {
    let data = source.fetch(&county_query(province_code, config.county_admin_level))?;
    let collection = overpass_json_to_geojson(data)?;
    let output_dir = config.counties_dir().join(province_code);
    let written =
        write_collection_variants(&collection, &output_dir, province_code, OutputVariant::All)?;
    Ok(UnitSummary {
        feature_count: collection.len(),
        written,
    })
}

/// Process the given provinces one after another. A failing province is
/// recorded in the report and the loop moves on.
pub fn run_counties(
    source: &impl BoundarySource,
    province_codes: &[String],
    config: &Config,
) -> RunReport {
    log::info!("Downloading counties data from Overpass API...");
    let bar = ProgressBar::new(province_codes.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        bar.set_style(style);
    }

    let mut report = RunReport::default();
    for province_code in province_codes {
        bar.set_message(province_code.clone());
        log::info!("Downloading {}...", province_code);
        let result = process_province_counties(source, province_code, config);
        match &result {
            Ok(summary) => log::info!(
                "Completed {} ({} counties)",
                province_code,
                summary.feature_count
            ),
            Err(err) => log::error!("Error processing {}: {}", province_code, err),
        }
        report.record(province_code, result);
        bar.inc(1);
    }
    bar.finish_and_clear();
    log::info!("All counties processing completed!");
    report
}
