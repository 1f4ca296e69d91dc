//! # Analysis Model Export
//!
//! Converts a [`Building`] into a neutral node/element graph in SI units,
//! the shape structural analysis packages import. Column end points that
//! coincide are merged into a single node so that stacked columns share
//! their connecting joint.
//!
//! ## Example
//!
//! ```rust
//! use blueprint_core::export::AnalysisModel;
//! use blueprint_core::templates::Example;
//! use blueprint_core::expansion::build;
//!
//! let blueprint = Example::Office.blueprint(4, 3000.0);
//! let building = build(&blueprint).unwrap();
//! let model = AnalysisModel::from_building(&building);
//!
//! assert_eq!(model.elements.len(), building.columns().len());
//! assert_eq!(model.levels.len(), 4);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::building::{Building, Point3, Storey};
use crate::units::{Metres, Millimetres};

/// Analysis node, metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Column,
}

/// Line element between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    /// Node ids, bottom then top
    pub nodes: [String; 2],
    /// Name of the storey the element rises from
    pub storey: String,
}

/// One storey level of the exported model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub elevation_m: f64,
    pub height_m: f64,
    /// Name of the master level, for similar levels
    pub similar_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisModel {
    pub levels: Vec<Level>,
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
}

impl AnalysisModel {
    pub fn from_building(building: &Building) -> Self {
        let levels = building
            .storeys()
            .iter()
            .map(|storey| Level {
                name: storey.name().to_string(),
                elevation_m: metres(storey.elevation().millimetres()),
                height_m: metres(storey.height().millimetres()),
                similar_to: match storey {
                    Storey::Master(_) => None,
                    Storey::Similar(s) => building.storey(s.similar_to).map(|m| m.name().to_string()),
                },
            })
            .collect();

        let mut registry = NodeRegistry::default();
        let elements = building
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let bottom = registry.node_for(&column.start);
                let top = registry.node_for(&column.end);
                Element {
                    id: format!("E{}", i + 1),
                    kind: ElementKind::Column,
                    nodes: [bottom, top],
                    storey: building
                        .storey(column.lower_storey)
                        .map(|s| s.name().to_string())
                        .unwrap_or_default(),
                }
            })
            .collect();

        AnalysisModel {
            levels,
            nodes: registry.nodes,
            elements,
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn metres(length: Millimetres) -> f64 {
    Metres::from(length).value()
}

/// Assigns one id per distinct position.
#[derive(Default)]
struct NodeRegistry {
    nodes: Vec<Node>,
    by_position: HashMap<[u64; 3], String>,
}

impl NodeRegistry {
    fn node_for(&mut self, point: &Point3) -> String {
        // -0.0 and 0.0 must land on the same node
        let key = [point.x, point.y, point.z].map(|c| (c + 0.0).to_bits());
        if let Some(id) = self.by_position.get(&key) {
            return id.clone();
        }
        let id = format!("N{}", self.nodes.len() + 1);
        self.nodes.push(Node {
            id: id.clone(),
            x: metres(Millimetres(point.x)),
            y: metres(Millimetres(point.y)),
            z: metres(Millimetres(point.z)),
        });
        self.by_position.insert(key, id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{BuildingBlueprint, IntegerRange, Point2, StoreyGroup};
    use crate::expansion::build;

    fn tower() -> Building {
        let group = |start, end, height| StoreyGroup {
            range: IntegerRange::new(start, end),
            typical_height_mm: height,
            slab_thickness_mm: 200.0,
            slab_vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(6000.0, 0.0),
                Point2::new(6000.0, 6000.0),
            ],
            column_coordinates: vec![Point2::new(0.0, 0.0), Point2::new(6000.0, 0.0)],
        };
        build(
            &BuildingBlueprint::new(0.0)
                .with_group(group(1, 3, 4000.0))
                .with_group(group(4, 5, 3000.0)),
        )
        .unwrap()
    }

    #[test]
    fn test_stacked_columns_share_nodes() {
        let model = AnalysisModel::from_building(&tower());
        // 4 transitions x 2 columns
        assert_eq!(model.elements.len(), 8);
        // 2 plan positions x 5 storey elevations
        assert_eq!(model.nodes.len(), 10);

        let first = &model.elements[0];
        let above = &model.elements[2];
        assert_eq!(first.nodes[1], above.nodes[0]);
    }

    #[test]
    fn test_levels_in_metres_with_master_names() {
        let model = AnalysisModel::from_building(&tower());
        assert_eq!(model.levels.len(), 5);
        assert_eq!(model.levels[0].similar_to, None);
        assert_eq!(model.levels[2].similar_to.as_deref(), Some("Storey 1"));
        assert_eq!(model.levels[4].similar_to.as_deref(), Some("Storey 4"));
        assert_eq!(model.levels[3].elevation_m, 12.0);
        assert_eq!(model.levels[3].height_m, 3.0);
    }

    #[test]
    fn test_node_coordinates_converted_to_metres() {
        let model = AnalysisModel::from_building(&tower());
        let element = &model.elements[1];
        let top = model.node(&element.nodes[1]).unwrap();
        assert_eq!((top.x, top.y, top.z), (6.0, 0.0, 4.0));
        assert_eq!(element.storey, "Storey 1");
    }
}
