use rand::Rng;

use super::edge::{Edge, EdgeKind, EdgeSet, NetworkEdge};
use super::node::{Node, NodeId};
use crate::config::TopologyConfig;

/// Derive the connection graph from node proximity.
///
/// Every node links to at most `max_neighbors` of its nearest nodes within
/// `neighbor_distance_factor * radius`; pairs already linked from the other
/// side are skipped. A handful of random long-range links are added on top
/// at reduced opacity. This is an all-pairs pass, run once per build.
pub fn build_edges(
    nodes: &[Node],
    radius: f32,
    config: &TopologyConfig,
    rng: &mut impl Rng,
) -> EdgeSet {
    let mut edges = EdgeSet::new();
    let max_distance = config.neighbor_distance_factor * radius;

    let mut candidates: Vec<(f32, NodeId)> = Vec::new();
    for node in nodes {
        candidates.clear();
        let origin = node.rest_position();

        candidates.extend(
            nodes
                .iter()
                .filter(|other| other.id != node.id)
                .map(|other| (origin.distance(other.rest_position()), other.id))
                .filter(|(distance, _)| *distance < max_distance),
        );
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        for &(distance, other) in candidates.iter().take(config.max_neighbors) {
            let edge = Edge::new(node.id, other);
            if edges.contains(&edge) {
                continue;
            }
            edges.add(NetworkEdge {
                edge,
                rest_length: distance,
                base_opacity: config.edge_base_opacity,
                kind: EdgeKind::Neighbor,
            });
        }
    }

    add_long_range_edges(&mut edges, nodes, radius, config, rng);

    log::debug!(
        "Built {} edges for {} nodes ({} nearest-neighbor, {} long-range)",
        edges.len(),
        nodes.len(),
        edges.count_kind(EdgeKind::Neighbor),
        edges.count_kind(EdgeKind::LongRange)
    );

    edges
}

fn add_long_range_edges(
    edges: &mut EdgeSet,
    nodes: &[Node],
    radius: f32,
    config: &TopologyConfig,
    rng: &mut impl Rng,
) {
    if nodes.len() < 2 {
        return;
    }

    let samples = (config.long_range_fraction * nodes.len() as f32).round() as usize;
    let max_distance = config.long_range_distance_factor * radius;

    for _ in 0..samples {
        let a = &nodes[rng.random_range(0..nodes.len())];
        let b = &nodes[rng.random_range(0..nodes.len())];
        if a.id == b.id {
            continue;
        }

        let distance = a.rest_position().distance(b.rest_position());
        if distance >= max_distance {
            continue;
        }

        edges.add(NetworkEdge {
            edge: Edge::new(a.id, b.id),
            rest_length: distance,
            base_opacity: config.edge_base_opacity * config.long_range_opacity_factor,
            kind: EdgeKind::LongRange,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeometryConfig, GlowConfig};
    use crate::graph::geometry::build_nodes;
    use crate::palette::Palette;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn network(count: usize) -> (Vec<Node>, EdgeSet) {
        let geometry = GeometryConfig {
            node_count: count,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let nodes = build_nodes(&geometry, &GlowConfig::default(), Palette::default(), 0.5, 0.0, &mut rng);
        let edges = build_edges(&nodes, geometry.sphere_radius, &TopologyConfig::default(), &mut rng);
        (nodes, edges)
    }

    #[test]
    fn test_no_loops_or_duplicates() {
        let (_, edges) = network(1000);
        let mut seen = HashSet::new();

        for e in edges.iter() {
            assert!(!e.edge.is_loop());
            assert!(e.edge.from < e.edge.to, "edge {:?} not canonical", e.edge);
            assert!(seen.insert((e.edge.from, e.edge.to)), "duplicate {:?}", e.edge);
            assert!(
                edges.contains(&Edge::new(e.edge.to, e.edge.from)),
                "membership must hold under endpoint swap"
            );
        }
    }

    #[test]
    fn test_neighbor_edges_respect_cutoff() {
        let (_, edges) = network(1000);
        let cutoff = 0.2 * 24.0;

        for e in edges.iter().filter(|e| e.kind == EdgeKind::Neighbor) {
            assert!(e.rest_length <= cutoff, "neighbor edge of length {}", e.rest_length);
            assert_eq!(e.base_opacity, 0.15);
        }
    }

    #[test]
    fn test_long_range_edges_are_sparse_and_faint() {
        let (_, edges) = network(1000);
        let long_range: Vec<_> = edges.iter().filter(|e| e.kind == EdgeKind::LongRange).collect();

        assert!(long_range.len() <= 30);
        for e in long_range {
            assert!(e.rest_length < 1.2 * 24.0);
            assert!((e.base_opacity - 0.075).abs() < 1e-6);
        }
    }

    #[test]
    fn test_edge_count_is_sparse() {
        let (nodes, edges) = network(1000);
        let neighbor_edges = edges.count_kind(EdgeKind::Neighbor);

        assert!(neighbor_edges > 0);
        assert!(neighbor_edges <= nodes.len() * 5);
        // Fibonacci spacing gives every node several neighbors within the cutoff
        assert!(neighbor_edges >= nodes.len());
    }

    #[test]
    fn test_rest_length_matches_endpoints() {
        let (nodes, edges) = network(500);
        for e in edges.iter() {
            let a = nodes[e.edge.from.index()].rest_position();
            let b = nodes[e.edge.to.index()].rest_position();
            assert!((a.distance(b) - e.rest_length).abs() < 1e-4);
        }
    }

    #[test]
    fn test_isolated_nodes_get_no_neighbor_edges() {
        // Two antipodal nodes are further apart than any cutoff
        let (_, edges) = network(2);
        assert_eq!(edges.count_kind(EdgeKind::Neighbor), 0);
        assert_eq!(edges.count_kind(EdgeKind::LongRange), 0);
    }
}
