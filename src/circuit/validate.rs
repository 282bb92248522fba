//! Graph consistency checks.

use super::{Connection, Graph};

/// Find connections whose source or destination id is not registered.
///
/// Removing a node never touches the connection list, so these accumulate
/// until the host prunes them or rewires the affected inputs.
pub fn find_dangling_connections(graph: &Graph) -> Vec<Connection> {
    graph
        .connections
        .iter()
        .filter(|c| !graph.contains(c.from) || !graph.contains(c.to))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Constant, Not};

    #[test]
    fn test_connected_graph_has_no_dangling_wires() {
        let mut graph = Graph::new();
        let a = graph.create_node(Constant::new(true));
        let b = graph.create_node(Not::new());
        graph.connect(a, 0, b, 0).unwrap();
        assert!(find_dangling_connections(&graph).is_empty());
    }

    #[test]
    fn test_either_endpoint_counts() {
        let mut graph = Graph::new();
        let a = graph.create_node(Constant::new(true));
        let b = graph.create_node(Not::new());
        let c = graph.create_node(Not::new());
        graph.connect(a, 0, b, 0).unwrap();
        graph.connect(b, 0, c, 0).unwrap();

        graph.remove_node(b).unwrap();
        let dangling = find_dangling_connections(&graph);
        assert_eq!(dangling.len(), 2);
        assert!(dangling.iter().all(|c| c.from == b || c.to == b));
    }
}
