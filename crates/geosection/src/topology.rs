//! Topology graphs drawn over the section plane.

use geosection_core::{CentroidProjection, Direction, GraphStyle, TopologyGraph};
use geosection_render::{Figure, Layer, Marker, MarkerShape, Paint};

use crate::error::Result;
use crate::section::Section2D;

impl Section2D<'_> {
    /// Plots `graph` projected onto the plane of `direction`.
    ///
    /// Edges are drawn first, then one marker and label per node. An empty
    /// graph gives a figure without layers.
    ///
    /// # Errors
    /// Fails if a node has no centroid or a centroid has neither 2 nor 3
    /// components.
    pub fn plot_topology(
        &self,
        graph: &TopologyGraph,
        direction: Direction,
        style: &GraphStyle,
    ) -> Result<Figure> {
        let slice = self.plane(direction)?;
        let mut figure = self.base_figure(&slice, 1.0);
        if graph.is_empty() {
            log::warn!("topology graph is empty");
            return Ok(figure);
        }

        let projection = CentroidProjection::new(&self.model().grid, direction);
        let edge_paint = Paint::solid(style.edge_color);
        for [a, b] in projection.project_edges(graph)? {
            figure.push(Layer::Polyline {
                points: vec![a, b],
                paint: edge_paint,
                width: style.edge_width,
                closed: false,
            });
        }

        let nodes = projection.project_nodes(graph)?;
        figure.push(Layer::Markers {
            markers: nodes
                .iter()
                .map(|&(_, position)| Marker {
                    position,
                    fill: Paint::with_alpha(style.node_color, style.node_alpha),
                })
                .collect(),
            shape: MarkerShape::Circle,
            size: style.node_size,
            edge: None,
        });
        for (node, position) in nodes {
            figure.push(Layer::Text {
                position,
                text: node.to_string(),
                paint: Paint::solid(style.label_color),
                size: style.label_size,
            });
        }
        log::debug!(
            "topology: {} nodes, {} edges across {direction}",
            graph.nodes.len(),
            graph.edges.len()
        );
        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::section::tests::model;
    use geosection_core::DVec2;

    fn graph() -> TopologyGraph {
        let mut centroids = BTreeMap::new();
        centroids.insert(1, vec![1.0, 1.0, 1.0]);
        centroids.insert(2, vec![3.0, 2.0, 3.0]);
        centroids.insert(3, vec![2.0, 0.0, 2.0]);
        TopologyGraph {
            nodes: vec![1, 2, 3],
            edges: vec![(1, 2), (2, 3)],
            centroids,
        }
    }

    #[test]
    fn test_nodes_drawn_once() {
        let model = model();
        let section = Section2D::new(&model);
        let fig = section
            .plot_topology(&graph(), Direction::Y, &GraphStyle::default())
            .unwrap();
        let edges = fig
            .layers
            .iter()
            .filter(|l| matches!(l, Layer::Polyline { .. }))
            .count();
        let labels: Vec<&str> = fig
            .layers
            .iter()
            .filter_map(|l| match l {
                Layer::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(edges, 2);
        assert_eq!(labels, vec!["1", "2", "3"]);
        match fig.layers.iter().find(|l| matches!(l, Layer::Markers { .. })) {
            Some(Layer::Markers { markers, .. }) => {
                assert_eq!(markers.len(), 3);
                // x: 1 * 400 / 4, z: 1 * 400 / 4 - 400
                assert_eq!(markers[0].position, DVec2::new(100.0, -300.0));
            }
            other => panic!("unexpected layer {other:?}"),
        }
    }

    #[test]
    fn test_empty_graph() {
        let model = model();
        let section = Section2D::new(&model);
        let fig = section
            .plot_topology(&TopologyGraph::default(), Direction::X, &GraphStyle::default())
            .unwrap();
        assert!(fig.is_empty());
    }

    #[test]
    fn test_missing_centroid() {
        let model = model();
        let section = Section2D::new(&model);
        let mut g = graph();
        g.edges.push((3, 4));
        assert!(section
            .plot_topology(&g, Direction::Z, &GraphStyle::default())
            .is_err());
    }
}
