//! Topology graphs of geological bodies and their projection onto a section.

use std::collections::BTreeMap;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};
use crate::grid::{Axis, RegularGrid};
use crate::slice::Direction;

/// A small undirected graph with one centroid per node.
///
/// Centroids are given in grid-cell units with 2 or 3 components.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopologyGraph {
    /// Node labels.
    pub nodes: Vec<u32>,
    /// Undirected edges between node labels.
    pub edges: Vec<(u32, u32)>,
    /// Centroid of each node.
    pub centroids: BTreeMap<u32, Vec<f64>>,
}

impl TopologyGraph {
    /// Loads a graph from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Maps graph centroids into section coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentroidProjection {
    horizontal: Axis,
    vertical: Axis,
    scale: DVec2,
    offset: DVec2,
}

impl CentroidProjection {
    /// Projection onto the plane of `direction` sections of `grid`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(grid: &RegularGrid, direction: Direction) -> Self {
        let (horizontal, vertical) = direction.free_axes();
        let e = &grid.extent;
        let scale = DVec2::new(
            e.span(horizontal) / grid.len(horizontal).max(1) as f64,
            e.span(vertical) / grid.len(vertical).max(1) as f64,
        );
        let offset = DVec2::new(e.min(horizontal), e.min(vertical));
        Self {
            horizontal,
            vertical,
            scale,
            offset,
        }
    }

    /// Section position of a centroid.
    ///
    /// 3-component centroids use the section's free axes; 2-component
    /// centroids are already planar and use components `(0, 1)`.
    pub fn project(&self, node: u32, centroid: &[f64]) -> Result<DVec2> {
        let (c1, c2) = match centroid.len() {
            2 => (0, 1),
            3 => (self.horizontal.index(), self.vertical.index()),
            len => return Err(SectionError::InvalidCentroid { node, len }),
        };
        Ok(DVec2::new(centroid[c1], centroid[c2]) * self.scale + self.offset)
    }

    /// Projects every node of `graph`, in node order.
    pub fn project_nodes(&self, graph: &TopologyGraph) -> Result<Vec<(u32, DVec2)>> {
        graph
            .nodes
            .iter()
            .map(|&node| {
                let c = graph
                    .centroids
                    .get(&node)
                    .ok_or(SectionError::MissingCentroid(node))?;
                Ok((node, self.project(node, c)?))
            })
            .collect()
    }

    /// Projects every edge of `graph` to a segment.
    pub fn project_edges(&self, graph: &TopologyGraph) -> Result<Vec<[DVec2; 2]>> {
        let point = |node: u32| -> Result<DVec2> {
            let c = graph
                .centroids
                .get(&node)
                .ok_or(SectionError::MissingCentroid(node))?;
            self.project(node, c)
        };
        graph
            .edges
            .iter()
            .map(|&(a, b)| Ok([point(a)?, point(b)?]))
            .collect()
    }
}
