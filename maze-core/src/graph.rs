use std::collections::BTreeSet;

use crate::types::NodeId;

/// Undirected set of open connections between cell nodes.
///
/// Edges are stored once with the smaller endpoint first, so `(a, b)` and
/// `(b, a)` are the same edge. Iteration is in ascending order of the
/// normalized pairs, which keeps serialized output stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MazeGraph {
    edges: BTreeSet<(NodeId, NodeId)>,
}

#[inline]
fn normalize(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl MazeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edges(edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.insert(a, b);
        }
        graph
    }

    /// Opens the connection between `a` and `b`.
    ///
    /// Returns `true` if the edge was not present. Self edges are ignored.
    pub fn insert(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        self.edges.insert(normalize(a, b))
    }

    /// Closes the connection between `a` and `b` in either orientation.
    pub fn remove(&mut self, a: NodeId, b: NodeId) -> bool {
        self.edges.remove(&normalize(a, b))
    }

    #[inline]
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains(&normalize(a, b))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.iter().copied()
    }

    /// Nodes connected to `node`.
    ///
    /// This is a linear scan; callers walking the whole graph should build
    /// an adjacency list instead.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter_map(move |&(a, b)| {
            if a == node {
                Some(b)
            } else if b == node {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Largest node id referenced by any edge.
    pub fn max_node(&self) -> Option<NodeId> {
        self.edges.iter().map(|&(_, b)| b).max()
    }

    /// Number of nodes reachable from `start` through open connections,
    /// `start` included.
    pub fn reachable_from(&self, start: NodeId, node_count: usize) -> usize {
        if start >= node_count {
            return 0;
        }
        let mut adjacency = vec![Vec::new(); node_count];
        for (a, b) in self.iter() {
            if a < node_count && b < node_count {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }

        let mut seen = vec![false; node_count];
        let mut stack = vec![start];
        seen[start] = true;
        let mut count = 0;
        while let Some(n) = stack.pop() {
            count += 1;
            for &m in &adjacency[n] {
                if !seen[m] {
                    seen[m] = true;
                    stack.push(m);
                }
            }
        }
        count
    }
}

impl FromIterator<(NodeId, NodeId)> for MazeGraph {
    fn from_iter<I: IntoIterator<Item = (NodeId, NodeId)>>(iter: I) -> Self {
        Self::with_edges(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_orientation_independent() {
        let mut graph = MazeGraph::new();
        assert!(graph.insert(3, 1));
        assert!(!graph.insert(1, 3));

        assert!(graph.contains(1, 3));
        assert!(graph.contains(3, 1));
        assert_eq!(graph.len(), 1);

        assert!(graph.remove(1, 3));
        assert!(graph.is_empty());
        assert!(!graph.remove(3, 1));
    }

    #[test]
    fn self_edges_are_ignored() {
        let mut graph = MazeGraph::new();
        assert!(!graph.insert(2, 2));
        assert!(graph.is_empty());
    }

    #[test]
    fn iteration_is_sorted() {
        let graph = MazeGraph::with_edges([(5, 4), (0, 1), (2, 0)]);
        let edges: Vec<_> = graph.iter().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (4, 5)]);
        assert_eq!(graph.max_node(), Some(5));
    }

    #[test]
    fn neighbors_and_reachability() {
        let graph = MazeGraph::with_edges([(0, 1), (1, 2), (4, 5)]);
        let mut n: Vec<_> = graph.neighbors(1).collect();
        n.sort();
        assert_eq!(n, vec![0, 2]);

        assert_eq!(graph.reachable_from(0, 6), 3);
        assert_eq!(graph.reachable_from(3, 6), 1);
        assert_eq!(graph.reachable_from(9, 6), 0);
    }
}
