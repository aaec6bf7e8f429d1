use serde::{Deserialize, Serialize};

use crate::osm::elements::{OsmId, Tags};

pub const FEATURE_TYPE: &str = "Feature";
pub const FEATURE_COLLECTION_TYPE: &str = "FeatureCollection";

fn feature_type() -> String {
    FEATURE_TYPE.to_string()
}

fn feature_collection_type() -> String {
    FEATURE_COLLECTION_TYPE.to_string()
}

/// Properties of a boundary feature: the OSM element kind, its id and tags.
/// Any further properties are carried through untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoundaryProperties {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: OsmId,
    #[serde(default)]
    pub tags: Tags,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One administrative unit as a GeoJSON feature.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    pub properties: BoundaryProperties,
    pub geometry: Option<geojson::Geometry>,
}

impl BoundaryFeature {
    pub fn new(
        element_type: &str,
        id: OsmId,
        tags: Tags,
        geometry: Option<geojson::Geometry>,
    ) -> Self {
        Self {
            kind: feature_type(),
            properties: BoundaryProperties {
                element_type: element_type.to_string(),
                id,
                tags,
                extra: serde_json::Map::new(),
            },
            geometry,
        }
    }

    pub fn tags(&self) -> &Tags {
        &self.properties.tags
    }

    /// Copy of this feature with the tags replaced. Everything else, including
    /// the geometry and identifying fields, stays the same.
    pub fn with_tags(&self, tags: Tags) -> Self {
        Self {
            kind: self.kind.clone(),
            properties: BoundaryProperties {
                tags,
                ..self.properties.clone()
            },
            geometry: self.geometry.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoundaryCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub kind: String,
    pub features: Vec<BoundaryFeature>,
}

impl BoundaryCollection {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        Self {
            kind: feature_collection_type(),
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for BoundaryCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<BoundaryFeature> for BoundaryCollection {
    fn from_iter<T: IntoIterator<Item = BoundaryFeature>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
