use crate::datastructures::BitSet;
use fxhash::FxHashMap;

/// Adjacency table of the part of the input graph that still carries
/// uncovered edges. Nodes without a remaining incident edge are absent,
/// so an empty graph means every edge is covered.
///
/// Values are immutable: every branch of a search owns its own snapshot
/// and [`CoverGraph::without_vertex`] produces the next one.
#[derive(Clone, Debug, Default)]
pub struct CoverGraph {
    data: FxHashMap<usize, Vec<usize>>,
}

impl CoverGraph {
    pub(crate) fn from_adjacency(data: FxHashMap<usize, Vec<usize>>) -> Self {
        Self { data }
    }

    pub fn order(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_vertex(&self, u: usize) -> bool {
        self.data.contains_key(&u)
    }

    pub fn degree(&self, u: usize) -> usize {
        self.data.get(&u).map(Vec::len).unwrap_or(0)
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.data
            .get(&u)
            .map(|nb| nb.contains(&v))
            .unwrap_or(false)
    }

    /// Neighbors of `u`, sorted by visitation rank.
    pub fn neighborhood(&self, u: usize) -> &[usize] {
        self.data.get(&u).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.data.keys().copied()
    }

    /// New graph with `u` and all its incident edges removed. Neighbors
    /// left without any edge are removed along with it.
    pub fn without_vertex(&self, u: usize) -> Self {
        let mut data = FxHashMap::default();
        data.reserve(self.data.len());
        for (node, neighbors) in self.data.iter() {
            if *node == u {
                continue;
            }
            let remaining: Vec<usize> = neighbors.iter().copied().filter(|v| *v != u).collect();
            if !remaining.is_empty() {
                data.insert(*node, remaining);
            }
        }
        Self { data }
    }

    /// Iterative depth-first traversal starting at `u`.
    pub fn dfs(&self, u: usize) -> CoverGraphDfs {
        assert!(self.data.contains_key(&u));
        let capacity = self.data.keys().copied().max().map(|m| m + 1).unwrap_or(0);
        let mut visited = BitSet::new(capacity);
        visited.set_bit(u);
        CoverGraphDfs {
            graph: self,
            stack: vec![u],
            visited,
        }
    }
}

pub struct CoverGraphDfs<'a> {
    graph: &'a CoverGraph,
    stack: Vec<usize>,
    visited: BitSet,
}

impl<'a> Iterator for CoverGraphDfs<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.stack.pop()?;
        for v in self.graph.neighborhood(u).iter().copied() {
            if !self.visited.set_bit(v) {
                self.stack.push(v);
            }
        }
        Some(u)
    }
}

#[cfg(test)]
mod tests {
    use super::CoverGraph;
    use fxhash::FxHashMap;

    fn triangle() -> CoverGraph {
        let mut data = FxHashMap::default();
        data.insert(0, vec![1, 2]);
        data.insert(1, vec![0, 2]);
        data.insert(2, vec![0, 1]);
        CoverGraph::from_adjacency(data)
    }

    #[test]
    fn without_vertex_drops_isolated_neighbors() {
        let graph = triangle();
        let smaller = graph.without_vertex(0);
        assert_eq!(smaller.order(), 2);
        assert!(smaller.has_edge(1, 2));

        // removing a second corner leaves no edges at all
        let empty = smaller.without_vertex(1);
        assert!(empty.is_empty());
        // the original snapshots are untouched
        assert_eq!(graph.order(), 3);
        assert_eq!(smaller.order(), 2);
    }

    #[test]
    fn dfs_reaches_all_of_a_connected_graph() {
        let graph = triangle();
        let mut reached: Vec<usize> = graph.dfs(0).collect();
        reached.sort_unstable();
        assert_eq!(reached, vec![0, 1, 2]);
    }
}
