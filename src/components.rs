use crate::errors::ComponentError;
use crate::graph::CoverGraph;
use fxhash::FxHashSet;

/// Precondition check before an exact search: optimal covers decompose
/// per component, so cross-component branching is wasted work. Callers
/// with pre-verified input may skip this.
///
/// `total_node_count` is the size of the external node list; nodes
/// without any incident edge never need covering and must be excluded
/// by the caller before building the graph input.
pub fn assert_single_component(
    graph: &CoverGraph,
    total_node_count: usize,
) -> Result<(), ComponentError> {
    if graph.order() < total_node_count {
        return Err(ComponentError::DisconnectedInput {
            covered: graph.order(),
            expected: total_node_count,
        });
    }
    let start = match graph.vertices().next() {
        Some(u) => u,
        None => return Ok(()),
    };
    // One traversal from an arbitrary node; a single unreached node
    // already confirms a second component, no need to explore it.
    let reached = graph.dfs(start).count();
    if reached < graph.order() {
        return Err(ComponentError::MultiComponent);
    }
    Ok(())
}

/// Node sets of all connected components, for callers that want to
/// partition a rejected input and search each part on its own.
pub fn connected_components(graph: &CoverGraph) -> Vec<Vec<usize>> {
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut seen = FxHashSet::default();
    for u in graph.vertices() {
        if seen.contains(&u) {
            continue;
        }
        let component: Vec<usize> = graph.dfs(u).collect();
        seen.extend(component.iter().copied());
        components.push(component);
    }
    components
}

#[cfg(test)]
mod tests {
    use super::{assert_single_component, connected_components};
    use crate::errors::ComponentError;
    use crate::preprocessing::GraphBuilder;

    #[test]
    fn connected_graph_passes() {
        let (graph, _) = GraphBuilder::build_unweighted(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert!(assert_single_component(&graph, 4).is_ok());
    }

    #[test]
    fn two_triangles_are_rejected() {
        let edges = vec![(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)];
        let (graph, _) = GraphBuilder::build_unweighted(6, &edges).unwrap();
        assert_eq!(
            assert_single_component(&graph, 6).unwrap_err(),
            ComponentError::MultiComponent
        );
    }

    #[test]
    fn isolated_node_is_rejected() {
        // node 3 appears in no edge
        let (graph, _) = GraphBuilder::build_unweighted(4, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        assert_eq!(
            assert_single_component(&graph, 4).unwrap_err(),
            ComponentError::DisconnectedInput {
                covered: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn components_partition_the_nodes() {
        let edges = vec![(0, 1), (1, 2), (0, 2), (3, 4)];
        let (graph, _) = GraphBuilder::build_unweighted(5, &edges).unwrap();
        let mut components = connected_components(&graph);
        for component in components.iter_mut() {
            component.sort_unstable();
        }
        components.sort();
        assert_eq!(components, vec![vec![0, 1, 2], vec![3, 4]]);
    }
}
