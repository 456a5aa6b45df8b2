//! Randomized depth-first search ("recursive backtracker") generator.

use rand::{Rng, seq::SliceRandom};

use crate::{
    error::Result,
    graph::MazeGraph,
    grid::{RectangularMaze, Topology},
    types::NodeId,
};

/// Carves a spanning tree of `topology` starting at `start`.
///
/// Neighbours of every node are tried in shuffled order; moving to an
/// unvisited node opens the passage. The walk keeps its own stack, so
/// large mazes do not exhaust the call stack.
pub fn carve<T: Topology>(topology: &T, start: NodeId, rng: &mut impl Rng) -> MazeGraph {
    let mut graph = MazeGraph::new();
    let n = topology.node_count();
    if start >= n {
        return graph;
    }

    let mut visited = vec![false; n];
    visited[start] = true;

    let mut first = topology.neighbors(start);
    first.shuffle(rng);
    let mut stack: Vec<(NodeId, Vec<NodeId>)> = vec![(start, first)];

    while let Some(top) = stack.last_mut() {
        let node = top.0;
        let Some(next) = top.1.pop() else {
            stack.pop();
            continue;
        };
        if visited[next] {
            continue;
        }

        visited[next] = true;
        graph.insert(node, next);

        let mut pending = topology.neighbors(next);
        pending.shuffle(rng);
        stack.push((next, pending));
    }

    graph
}

pub fn random_start<T: Topology>(topology: &T, rng: &mut impl Rng) -> NodeId {
    rng.random_range(0..topology.node_count().max(1))
}

/// A `cols x rows` grid maze carved from a random start cell.
pub fn generate(cols: usize, rows: usize, rng: &mut impl Rng) -> Result<RectangularMaze> {
    let mut maze = RectangularMaze::new(cols, rows)?;
    let start = random_start(&maze, rng);
    maze.graph = carve(&maze, start, rng);
    log::debug!(
        "depth-first {cols}x{rows} from {start}: {} passages",
        maze.graph.len()
    );
    Ok(maze)
}
