use super::node::NodeId;

use std::collections::HashSet;

/// An edge between two nodes
/// Invariant: always stored in canonical form with from <= to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    /// Create a new edge, automatically ordering nodes
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Edge { from: a, to: b }
        } else {
            Edge { from: b, to: a }
        }
    }

    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// One of a node's nearest neighbors
    Neighbor,
    /// Sparse random connection across the sphere
    LongRange,
}

/// A connection in the network with its construction-time attributes
#[derive(Debug, Clone, Copy)]
pub struct NetworkEdge {
    pub edge: Edge,
    pub rest_length: f32,
    pub base_opacity: f32,
    pub kind: EdgeKind,
}

/// A set of edges with efficient lookup
/// Maintains both the set of edges and the list of edges in insertion order
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    /// Set for O(1) edge existence checks
    members: HashSet<Edge>,
    /// Edges in the order they were added (also the render order)
    edges: Vec<NetworkEdge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge to the set
    /// Returns true if the edge was newly inserted, false if it already existed or is a loop
    pub fn add(&mut self, edge: NetworkEdge) -> bool {
        if edge.edge.is_loop() {
            return false;
        }
        if self.members.insert(edge.edge) {
            self.edges.push(edge);
            true
        } else {
            false
        }
    }

    /// Check if an edge exists in the set
    pub fn contains(&self, edge: &Edge) -> bool {
        self.members.contains(edge)
    }

    /// Get the number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the edge set is empty
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkEdge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[NetworkEdge] {
        &self.edges
    }

    pub fn count_kind(&self, kind: EdgeKind) -> usize {
        self.edges.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(a: usize, b: usize) -> NetworkEdge {
        NetworkEdge {
            edge: Edge::new(NodeId(a), NodeId(b)),
            rest_length: 1.0,
            base_opacity: 0.15,
            kind: EdgeKind::Neighbor,
        }
    }

    #[test]
    fn test_edge_canonical_form() {
        let e1 = Edge::new(NodeId(1), NodeId(3));
        let e2 = Edge::new(NodeId(3), NodeId(1));

        assert_eq!(e1, e2, "Edges should be equal regardless of order");
        assert_eq!(e1.from, NodeId(1));
        assert_eq!(e1.to, NodeId(3));
    }

    #[test]
    fn test_edge_set_rejects_duplicates_and_loops() {
        let mut set = EdgeSet::new();

        assert!(set.add(neighbor(0, 1)));
        assert!(set.add(neighbor(1, 2)));
        assert!(!set.add(neighbor(1, 0)), "Swapped duplicate should be rejected");
        assert!(!set.add(neighbor(4, 4)), "Self-loop should be rejected");

        assert_eq!(set.len(), 2);
        assert!(set.contains(&Edge::new(NodeId(2), NodeId(1))));
    }

    #[test]
    fn test_edge_set_keeps_insertion_order() {
        let mut set = EdgeSet::new();
        set.add(neighbor(2, 3));
        set.add(neighbor(0, 1));

        let order: Vec<_> = set.iter().map(|e| e.edge).collect();
        assert_eq!(order, vec![Edge::new(NodeId(2), NodeId(3)), Edge::new(NodeId(0), NodeId(1))]);
    }
}
