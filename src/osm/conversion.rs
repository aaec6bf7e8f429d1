use std::collections::HashMap;

use geo::orient::{Direction, Orient};
use geo::Contains;
use thiserror::Error;

use super::elements::{Element, LatLon, MemberType, Node, OsmId, OverpassResponse, Relation, Way};
use crate::geofile::feature::{BoundaryCollection, BoundaryFeature};

/// Relation `type` tag values that describe areas.
const AREA_RELATION_TYPES: [&str; 2] = ["boundary", "multipolygon"];

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("malformed Overpass response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Convert a decoded Overpass JSON document into a GeoJSON feature collection.
///
/// Boundary and multipolygon relations become (Multi)Polygon features, other
/// tagged ways become Polygons or LineStrings and tagged nodes become Points.
/// Untagged elements, such as the skeleton nodes and ways fetched to resolve
/// relation members, are only used for geometry. Feature order follows element
/// order in the response.
pub fn overpass_json_to_geojson(data: serde_json::Value) -> Result<BoundaryCollection, ConvertError> {
    let response: OverpassResponse = serde_json::from_value(data)?;
    Ok(overpass_to_geojson(&response))
}

pub fn overpass_to_geojson(response: &OverpassResponse) -> BoundaryCollection {
    let index = ElementIndex::new(&response.elements);
    response
        .elements
        .iter()
        .filter_map(|element| match element {
            Element::Relation(relation) => relation_to_feature(relation, &index),
            Element::Way(way) => way_to_feature(way, &index),
            Element::Node(node) => node_to_feature(node),
        })
        .collect()
}

struct ElementIndex<'a> {
    nodes: HashMap<OsmId, &'a Node>,
    ways: HashMap<OsmId, &'a Way>,
}

impl<'a> ElementIndex<'a> {
    fn new(elements: &'a [Element]) -> Self {
        let mut nodes = HashMap::new();
        let mut ways = HashMap::new();
        for element in elements {
            match element {
                Element::Node(node) => {
                    nodes.insert(node.id, node);
                }
                Element::Way(way) => {
                    ways.insert(way.id, way);
                }
                Element::Relation(_) => {}
            }
        }
        Self { nodes, ways }
    }

    fn way_coords(&self, way: &Way) -> Option<Vec<geo::Coord>> {
        if let Some(geometry) = &way.geometry {
            return Some(latlons_to_coords(geometry));
        }
        way.nodes
            .iter()
            .map(|node_id| {
                self.nodes.get(node_id).map(|node| geo::Coord {
                    x: node.lon,
                    y: node.lat,
                })
            })
            .collect()
    }
}

fn latlons_to_coords(latlons: &[LatLon]) -> Vec<geo::Coord> {
    latlons.iter().map(|latlon| (*latlon).into()).collect()
}

fn to_geojson_geometry(geometry: &geo::Geometry) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(geometry))
}

fn is_area_relation(relation: &Relation) -> bool {
    relation
        .tags
        .get("type")
        .map_or(false, |kind| AREA_RELATION_TYPES.contains(&kind.as_str()))
}

fn relation_to_feature(relation: &Relation, index: &ElementIndex) -> Option<BoundaryFeature> {
    if relation.tags.is_empty() {
        return None;
    }
    if !is_area_relation(relation) {
        log::debug!("Skipping non-area relation {}", relation.id);
        return None;
    }

    let mut outer_segments = Vec::new();
    let mut inner_segments = Vec::new();
    for member in &relation.members {
        if member.member_type != MemberType::Way {
            continue;
        }
        let coords = match &member.geometry {
            Some(geometry) => Some(latlons_to_coords(geometry)),
            None => index
                .ways
                .get(&member.reference)
                .and_then(|way| index.way_coords(way)),
        };
        let Some(coords) = coords else {
            log::warn!(
                "Relation {} references way {} which could not be resolved",
                relation.id,
                member.reference
            );
            continue;
        };
        match member.role.as_str() {
            "inner" => inner_segments.push(coords),
            "outer" | "" => outer_segments.push(coords),
            _ => {}
        }
    }

    let outer_rings = stitch_rings(outer_segments);
    if outer_rings.is_empty() {
        log::warn!("Relation {} has no closed outer ring, skipping", relation.id);
        return None;
    }
    let inner_rings = stitch_rings(inner_segments);
    let geometry = assemble_polygons(outer_rings, inner_rings);

    Some(BoundaryFeature::new(
        "relation",
        relation.id,
        relation.tags.clone(),
        Some(to_geojson_geometry(&geometry)),
    ))
}

fn way_to_feature(way: &Way, index: &ElementIndex) -> Option<BoundaryFeature> {
    if way.tags.is_empty() {
        return None;
    }
    let Some(coords) = index.way_coords(way) else {
        log::warn!("Way {} has unresolved nodes, skipping", way.id);
        return None;
    };
    if coords.len() < 2 {
        return None;
    }
    let line = geo::LineString::new(coords);
    let geometry = if line.is_closed() && line.0.len() >= 4 {
        geo::Geometry::Polygon(geo::Polygon::new(line, vec![]).orient(Direction::Default))
    } else {
        geo::Geometry::LineString(line)
    };
    Some(BoundaryFeature::new(
        "way",
        way.id,
        way.tags.clone(),
        Some(to_geojson_geometry(&geometry)),
    ))
}

fn node_to_feature(node: &Node) -> Option<BoundaryFeature> {
    if node.tags.is_empty() {
        return None;
    }
    let point = geo::Geometry::Point(geo::Point::new(node.lon, node.lat));
    Some(BoundaryFeature::new(
        "node",
        node.id,
        node.tags.clone(),
        Some(to_geojson_geometry(&point)),
    ))
}

/// Join way segments end to end into closed rings. Segments may be reversed
/// relative to each other. Segments that cannot be closed are dropped.
pub fn stitch_rings(segments: Vec<Vec<geo::Coord>>) -> Vec<geo::LineString> {
    let mut rings = Vec::new();
    let mut open: Vec<Vec<geo::Coord>> = Vec::new();
    for segment in segments {
        if segment.len() < 2 {
            continue;
        }
        if segment.len() >= 4 && segment.first() == segment.last() {
            rings.push(geo::LineString::new(segment));
        } else {
            open.push(segment);
        }
    }

    while !open.is_empty() {
        let mut ring = open.remove(0);
        while ring.first() != ring.last() {
            let Some(&end) = ring.last() else {
                break;
            };
            let next = open.iter().position(|segment| {
                segment.first() == Some(&end) || segment.last() == Some(&end)
            });
            let Some(position) = next else {
                break;
            };
            let mut segment = open.remove(position);
            if segment.first() != Some(&end) {
                segment.reverse();
            }
            ring.extend(segment.into_iter().skip(1));
        }
        if ring.len() >= 4 && ring.first() == ring.last() {
            rings.push(geo::LineString::new(ring));
        } else {
            log::warn!("Dropping unclosed ring with {} coordinates", ring.len());
        }
    }
    rings
}

/// Build polygons from outer rings and put each inner ring into the first outer
/// ring that contains it.
fn assemble_polygons(
    outer_rings: Vec<geo::LineString>,
    inner_rings: Vec<geo::LineString>,
) -> geo::Geometry {
    let mut shells: Vec<(geo::Polygon, Vec<geo::LineString>)> = outer_rings
        .into_iter()
        .map(|ring| (geo::Polygon::new(ring, vec![]), Vec::new()))
        .collect();
    for inner in inner_rings {
        let Some(&probe) = inner.0.first() else {
            continue;
        };
        let probe = geo::Point::from(probe);
        match shells
            .iter_mut()
            .find(|(shell, _)| shell.contains(&probe))
        {
            Some((_, holes)) => holes.push(inner),
            None => log::warn!("Inner ring is not inside any outer ring, dropping it"),
        }
    }

    let mut polygons: Vec<geo::Polygon> = shells
        .into_iter()
        .map(|(shell, holes)| {
            let (exterior, _) = shell.into_inner();
            geo::Polygon::new(exterior, holes).orient(Direction::Default)
        })
        .collect();
    if polygons.len() == 1 {
        geo::Geometry::Polygon(polygons.remove(0))
    } else {
        geo::Geometry::MultiPolygon(geo::MultiPolygon::new(polygons))
    }
}
