//! Connectivity diagnostics for a built frame.

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::members::Beam;
use crate::registry::NodeRegistry;

/// How the drawn members tie the nodes together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TopologySummary {
    /// Number of separate pieces, counting lone nodes as pieces.
    pub components: usize,
    /// Nodes that no drawn member touches.
    pub isolated_nodes: usize,
}

impl TopologySummary {
    /// Summarise connectivity of `registry` as joined by `beams`.
    ///
    /// # Examples
    /// ```
    /// use framescene::{
    ///     build_beams, BeamStyle, MemberRecord, NodeRegistry, NodeRow, NodeValidation, TopologySummary,
    /// };
    ///
    /// let nodes = [
    ///     NodeRow::new("A", 0.0, 0.0, 0.0),
    ///     NodeRow::new("B", 1.0, 0.0, 0.0),
    ///     NodeRow::new("C", 9.0, 9.0, 9.0),
    /// ];
    /// let registry = NodeRegistry::build(&nodes, NodeValidation::Reject).expect("valid nodes");
    /// let built = build_beams(&[MemberRecord::new("A", "B")], &registry, &BeamStyle::default());
    ///
    /// let summary = TopologySummary::from_beams(&registry, &built.beams);
    /// assert_eq!(summary.components, 2);
    /// assert_eq!(summary.isolated_nodes, 1);
    /// ```
    #[must_use]
    pub fn from_beams(registry: &NodeRegistry, beams: &[Beam]) -> Self {
        let graph = connectivity_graph(registry, beams);
        let isolated_nodes = graph
            .node_indices()
            .filter(|&node| graph.neighbors(node).next().is_none())
            .count();
        Self {
            components: connected_components(&graph),
            isolated_nodes,
        }
    }

    /// True when every node belongs to one connected structure.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.components <= 1
    }
}

/// Undirected graph with one vertex per registry slot and one edge per beam.
fn connectivity_graph(registry: &NodeRegistry, beams: &[Beam]) -> UnGraph<(), ()> {
    let mut graph = UnGraph::with_capacity(registry.len(), beams.len());
    for _ in registry.iter() {
        graph.add_node(());
    }
    for beam in beams {
        if let (Some(start), Some(end)) = (
            registry.index_of(&beam.start_node),
            registry.index_of(&beam.end_node),
        ) {
            graph.add_edge(NodeIndex::new(start), NodeIndex::new(end), ());
        }
    }
    graph
}
