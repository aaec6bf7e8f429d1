use crate::geofile::feature::{BoundaryCollection, BoundaryFeature};
use crate::osm::elements::Tags;

use super::cleaner::NameCleaner;

/// Tags copied verbatim into the cleaned and short variants, in this order.
pub const STRUCTURAL_TAG_KEYS: &[&str] = &[
    "ISO3166-2",
    "admin_level",
    "boundary",
    "is_in:country",
    "is_in:country_code",
];

pub const NAME_KEY: &str = "name";
pub const PERSIAN_NAME_KEY: &str = "name:fa";
pub const ENGLISH_NAME_KEY: &str = "name:en";

/// Cleaned names of one feature, in both languages and both verbosity levels.
/// Empty strings mean "no valid name".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameVariants {
    pub persian_full: String,
    pub persian_short: String,
    pub english_full: String,
    pub english_short: String,
}

impl NameVariants {
    pub fn from_tags(tags: &Tags, cleaner: &NameCleaner) -> Self {
        let persian = tags
            .get(PERSIAN_NAME_KEY)
            .filter(|name| !name.is_empty())
            .or_else(|| tags.get(NAME_KEY))
            .map(String::as_str)
            .unwrap_or_default();
        let english = tags
            .get(ENGLISH_NAME_KEY)
            .map(String::as_str)
            .unwrap_or_default();

        let persian_full = cleaner.clean_persian_name(persian);
        let english_full = cleaner.clean_english_name(english);
        Self {
            persian_short: cleaner.create_short_name(&persian_full),
            english_short: cleaner.create_short_name(&english_full),
            persian_full,
            english_full,
        }
    }

    pub fn has_name(&self) -> bool {
        !self.persian_full.is_empty() || !self.english_full.is_empty()
    }
}

fn structural_tags(tags: &Tags) -> Tags {
    STRUCTURAL_TAG_KEYS
        .iter()
        .filter_map(|key| tags.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

fn named_tags(tags: &Tags, persian: &str, english: &str) -> Tags {
    let mut named = structural_tags(tags);
    if !persian.is_empty() {
        named.insert(NAME_KEY.to_string(), persian.to_string());
        named.insert(PERSIAN_NAME_KEY.to_string(), persian.to_string());
    }
    if !english.is_empty() {
        named.insert(ENGLISH_NAME_KEY.to_string(), english.to_string());
    }
    named
}

/// The variants derived from a single feature. `cleaned` and `short` are
/// `None` when the feature has no usable name in either language.
#[derive(Debug, Clone)]
pub struct FeatureProjection {
    pub names: NameVariants,
    pub all: BoundaryFeature,
    pub cleaned: Option<BoundaryFeature>,
    pub short: Option<BoundaryFeature>,
}

pub fn project_feature(feature: &BoundaryFeature, cleaner: &NameCleaner) -> FeatureProjection {
    let tags = feature.tags();
    let names = NameVariants::from_tags(tags, cleaner);
    let (cleaned, short) = if names.has_name() {
        (
            Some(feature.with_tags(named_tags(tags, &names.persian_full, &names.english_full))),
            Some(feature.with_tags(named_tags(tags, &names.persian_short, &names.english_short))),
        )
    } else {
        (None, None)
    };
    FeatureProjection {
        names,
        all: feature.clone(),
        cleaned,
        short,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectedCollections {
    pub all: BoundaryCollection,
    pub cleaned: BoundaryCollection,
    pub short: BoundaryCollection,
}

/// Project every feature of `collection`, keeping input order in all outputs.
pub fn project_collection(
    collection: &BoundaryCollection,
    cleaner: &NameCleaner,
) -> ProjectedCollections {
    let mut projected = ProjectedCollections::default();
    for feature in &collection.features {
        let projection = project_feature(feature, cleaner);
        match (projection.cleaned, projection.short) {
            (Some(cleaned), Some(short)) => {
                projected.cleaned.features.push(cleaned);
                projected.short.features.push(short);
            }
            _ => log::debug!(
                "Feature {} {} has no usable name, keeping it only in the full output",
                feature.properties.element_type,
                feature.properties.id
            ),
        }
        projected.all.features.push(projection.all);
    }
    projected
}
