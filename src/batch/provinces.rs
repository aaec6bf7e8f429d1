use std::path::PathBuf;

use crate::config::Config;
use crate::error::PipelineError;
use crate::geofile::geojson::{write_collection_variants, OutputVariant};
use crate::names::cleaner::NameCleaner;
use crate::names::projection::{
    project_collection, ProjectedCollections, ENGLISH_NAME_KEY, PERSIAN_NAME_KEY,
};
use crate::osm::conversion::overpass_json_to_geojson;
use crate::osm::download::{province_query, BoundarySource};
use crate::osm::elements::Tags;

pub const PROVINCES_STEM: &str = "provinces";

/// Number of provinces echoed to the log after a run.
const SAMPLE_SIZE: usize = 3;

#[derive(Debug)]
pub struct ProvinceRun {
    pub collections: ProjectedCollections,
    pub written: Vec<PathBuf>,
}

/// Fetch all provinces in one query, derive the all, cleaned and short
/// variants and write each of them pretty and minified. The first failure
/// aborts the run.
pub fn run_provinces(
    source: &impl BoundarySource,
    config: &Config,
) -> Result<ProvinceRun, PipelineError> {
    log::info!("Downloading provinces data from Overpass API...");
    let data = source.fetch(&province_query(
        &config.country_prefix,
        config.province_admin_level,
    ))?;
    let collection = overpass_json_to_geojson(data)?;

    let cleaner = NameCleaner::new();
    let collections = project_collection(&collection, &cleaner);

    let output_dir = config.provinces_dir();
    let mut written = Vec::new();
    for (variant, variant_collection) in [
        (OutputVariant::All, &collections.all),
        (OutputVariant::Cleaned, &collections.cleaned),
        (OutputVariant::Short, &collections.short),
    ] {
        written.extend(write_collection_variants(
            variant_collection,
            &output_dir,
            PROVINCES_STEM,
            variant,
        )?);
    }

    log::info!("Processed {} provinces", collections.cleaned.len());
    log_sample(&collections);
    Ok(ProvinceRun {
        collections,
        written,
    })
}

fn log_sample(collections: &ProjectedCollections) {
    log::info!("Sample processed provinces:");
    for (index, feature) in collections.cleaned.features.iter().take(SAMPLE_SIZE).enumerate() {
        let tags = feature.tags();
        log::info!(
            "{}. {} | Persian: {} | English: {}",
            index + 1,
            tag_or(tags, "ISO3166-2", "N/A"),
            tag_or(tags, PERSIAN_NAME_KEY, ""),
            tag_or(tags, ENGLISH_NAME_KEY, "")
        );
    }
}

fn tag_or<'a>(tags: &'a Tags, key: &str, default: &'a str) -> &'a str {
    tags.get(key).map(String::as_str).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use testdir::testdir;

    use super::run_provinces;
    use crate::batch::testing::CannedSource;
    use crate::config::Config;
    use crate::error::PipelineError;
    use crate::geofile::feature::BoundaryCollection;

    fn square(lon: f64, lat: f64) -> serde_json::Value {
        json!([
            {"lat": lat, "lon": lon},
            {"lat": lat, "lon": lon + 1.0},
            {"lat": lat + 1.0, "lon": lon + 1.0},
            {"lat": lat, "lon": lon}
        ])
    }

    fn provinces_response() -> serde_json::Value {
        json!({
            "elements": [
                {
                    "type": "relation",
                    "id": 1,
                    "members": [{"type": "way", "ref": 10, "role": "outer", "geometry": square(50.0, 35.0)}],
                    "tags": {
                        "type": "boundary",
                        "boundary": "administrative",
                        "admin_level": "4",
                        "ISO3166-2": "IR-07",
                        "name": "استان تهران",
                        "name:en": "Tehran Province",
                        "wikidata": "Q83301"
                    }
                },
                {
                    "type": "relation",
                    "id": 2,
                    "members": [{"type": "way", "ref": 20, "role": "outer", "geometry": square(52.0, 33.0)}],
                    "tags": {"type": "boundary", "admin_level": "4", "ISO3166-2": "IR-99"}
                },
                {
                    "type": "relation",
                    "id": 3,
                    "members": [{"type": "way", "ref": 30, "role": "outer", "geometry": square(50.0, 30.0)}],
                    "tags": {
                        "type": "boundary",
                        "admin_level": "4",
                        "ISO3166-2": "IR-17",
                        "name:fa": "استان کهگیلویه و بویر احمد",
                        "name:en": "Kohgiluyeh and Boyer-Ahmad Province"
                    }
                }
            ]
        })
    }

    fn read_collection(path: &std::path::Path) -> BoundaryCollection {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_run_provinces_writes_all_variants() {
        let config = Config {
            data_dir: testdir!(),
            ..Config::default()
        };
        let source = CannedSource::new(provinces_response());

        let run = run_provinces(&source, &config).unwrap();

        let output_dir = config.provinces_dir();
        let expected_files = [
            "provinces.all.geojson",
            "provinces.all.min.geojson",
            "provinces.cleaned.geojson",
            "provinces.cleaned.min.geojson",
            "provinces.short.geojson",
            "provinces.short.min.geojson",
        ];
        assert_eq!(
            run.written,
            expected_files
                .iter()
                .map(|name| output_dir.join(name))
                .collect::<Vec<_>>()
        );

        let all = read_collection(&output_dir.join("provinces.all.min.geojson"));
        assert_eq!(all.len(), 3);
        assert_eq!(all.features[0].tags()["name"], "استان تهران");
        assert_eq!(all.features[0].tags()["wikidata"], "Q83301");

        let short = read_collection(&output_dir.join("provinces.short.geojson"));
        let ids: Vec<i64> = short.features.iter().map(|f| f.properties.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(short.features[0].tags()["name:fa"], "تهران");
        assert_eq!(short.features[0].tags()["name:en"], "Tehran");
        assert!(!short.features[0].tags().contains_key("wikidata"));
        assert_eq!(short.features[1].tags()["name:fa"], "کهگیلویه و بویراحمد");
        assert_eq!(short.features[1].tags()["ISO3166-2"], "IR-17");
        assert_eq!(
            read_collection(&output_dir.join("provinces.short.min.geojson")),
            short
        );

        let cleaned = read_collection(&output_dir.join("provinces.cleaned.geojson"));
        assert_eq!(cleaned.len(), 2);
        assert_eq!(
            cleaned.features[1].tags()["name:en"],
            "Kohgiluyeh and Boyer-Ahmad"
        );
    }

    #[test]
    fn test_fetch_failure_aborts_without_writing() {
        let config = Config {
            data_dir: testdir!(),
            ..Config::default()
        };
        let source = CannedSource::new(provinces_response()).failing_on("admin_level");

        let result = run_provinces(&source, &config);

        assert!(matches!(result, Err(PipelineError::Fetch(_))));
        assert!(!config.provinces_dir().exists());
    }
}
