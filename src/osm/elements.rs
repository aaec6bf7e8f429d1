use indexmap::IndexMap;
use serde::Deserialize;

pub type OsmId = i64;

/// Ordered OSM tags, as they appear in the Overpass response.
pub type Tags = IndexMap<String, String>;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<LatLon> for geo::Coord {
    fn from(value: LatLon) -> Self {
        geo::Coord {
            x: value.lon,
            y: value.lat,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Node,
    Way,
    Relation,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Member {
    #[serde(rename = "type")]
    pub member_type: MemberType,
    #[serde(rename = "ref")]
    pub reference: OsmId,
    #[serde(default)]
    pub role: String,
    /// Inline way geometry, only present for `out geom` responses.
    #[serde(default)]
    pub geometry: Option<Vec<LatLon>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Node {
    pub id: OsmId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Way {
    pub id: OsmId,
    #[serde(default)]
    pub nodes: Vec<OsmId>,
    #[serde(default)]
    pub geometry: Option<Vec<LatLon>>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Relation {
    pub id: OsmId,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Node(_) => "node",
            Element::Way(_) => "way",
            Element::Relation(_) => "relation",
        }
    }
}

/// Body of an Overpass `[out:json]` response. Fields besides `elements`
/// (version, generator, osm3s) are ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Element, MemberType, OverpassResponse};

    #[test]
    fn test_decode_mixed_elements() {
        let response: OverpassResponse = serde_json::from_value(json!({
            "version": 0.6,
            "generator": "Overpass API",
            "elements": [
                {"type": "node", "id": 1, "lat": 35.7, "lon": 51.4},
                {"type": "way", "id": 10, "nodes": [1, 2, 3, 1]},
                {
                    "type": "relation",
                    "id": 100,
                    "members": [{"type": "way", "ref": 10, "role": "outer"}],
                    "tags": {"type": "boundary", "name": "تهران"}
                }
            ]
        }))
        .unwrap();

        assert_eq!(response.elements.len(), 3);
        match &response.elements[2] {
            Element::Relation(relation) => {
                assert_eq!(relation.members[0].member_type, MemberType::Way);
                assert_eq!(relation.members[0].reference, 10);
                assert_eq!(relation.tags["name"], "تهران");
            }
            other => panic!("Expected a relation, got {}", other.kind()),
        }
        match &response.elements[0] {
            Element::Node(node) => assert!(node.tags.is_empty()),
            other => panic!("Expected a node, got {}", other.kind()),
        }
    }
}
