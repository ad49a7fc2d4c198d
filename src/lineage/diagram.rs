use crate::error::Result;
use crate::lineage::algebra;
use crate::types::SEPARATOR;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::debug;

/// Ancestor chain of one identifier as a directed graph.
///
/// One node per path prefix, labeled "Gen {i+1}: {prefix}", with a
/// directed edge from each prefix to its immediate extension. The
/// graph is a simple chain because each person has exactly one lineage
/// in the strict-tree model.
pub struct AncestorDiagram {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl AncestorDiagram {
    /// Build the ancestor diagram for one identifier. Propagates the
    /// parse error for an invalid identifier; an empty identifier
    /// yields an empty diagram.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        let path = algebra::parse_id(identifier)?;
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        let mut prefix = String::new();
        let mut previous: Option<NodeIndex> = None;
        for (generation, index) in path.indices().iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push(SEPARATOR);
            }
            prefix.push_str(&index.to_string());

            let node = graph.add_node(format!("Gen {}: {}", generation + 1, prefix));
            node_map.insert(prefix.clone(), node);

            if let Some(parent) = previous {
                graph.add_edge(parent, node, ());
            }
            previous = Some(node);
        }

        debug!(
            "Built ancestor diagram for '{}' with {} nodes",
            identifier,
            node_map.len()
        );

        Ok(Self { graph, node_map })
    }

    /// Get the number of nodes in the diagram
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the diagram
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node label for a given path prefix, if present
    pub fn label_for(&self, prefix: &str) -> Option<&str> {
        self.node_map
            .get(prefix)
            .and_then(|&node| self.graph.node_weight(node))
            .map(String::as_str)
    }

    /// Render the diagram as Graphviz DOT
    pub fn to_dot(&self) -> String {
        format!(
            "{:?}",
            Dot::with_config(&self.graph, &[Config::EdgeNoLabel])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_node_per_prefix() {
        let diagram = AncestorDiagram::from_identifier("1-1-4-6").unwrap();

        assert_eq!(diagram.node_count(), 4);
        assert_eq!(diagram.edge_count(), 3);
        assert_eq!(diagram.label_for("1"), Some("Gen 1: 1"));
        assert_eq!(diagram.label_for("1-1"), Some("Gen 2: 1-1"));
        assert_eq!(diagram.label_for("1-1-4"), Some("Gen 3: 1-1-4"));
        assert_eq!(diagram.label_for("1-1-4-6"), Some("Gen 4: 1-1-4-6"));
        assert_eq!(diagram.label_for("1-1-5"), None);
    }

    #[test]
    fn test_compact_identifier() {
        let diagram = AncestorDiagram::from_identifier("114").unwrap();
        assert_eq!(diagram.node_count(), 3);
        assert_eq!(diagram.label_for("1-1-4"), Some("Gen 3: 1-1-4"));
    }

    #[test]
    fn test_empty_identifier_is_empty_diagram() {
        let diagram = AncestorDiagram::from_identifier("").unwrap();
        assert_eq!(diagram.node_count(), 0);
        assert_eq!(diagram.edge_count(), 0);
    }

    #[test]
    fn test_invalid_identifier_propagates() {
        assert!(AncestorDiagram::from_identifier("1--4").is_err());
    }

    #[test]
    fn test_dot_output_contains_labels() {
        let diagram = AncestorDiagram::from_identifier("1-1-4").unwrap();
        let dot = diagram.to_dot();

        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("Gen 1: 1"));
        assert!(dot.contains("Gen 3: 1-1-4"));
    }
}
