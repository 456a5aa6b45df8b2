use std::collections::HashSet;

use crate::types::NodeId;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Point masses joined by springs.
///
/// `connections` is the maze path: each entry is a spring between two
/// nodes. `fixed` pins nodes to positions that integration cannot move.
#[derive(Clone, Debug, Default)]
pub struct SpringNetwork {
    pub nodes: Vec<Node>,
    pub connections: Vec<(NodeId, NodeId)>,
    pub fixed: Vec<(NodeId, Vec2)>,
}

impl Node {
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }
}

impl SpringNetwork {
    /// `count` nodes scattered uniformly in `[-spread, spread]^2`, each
    /// connected to the next one.
    ///
    /// The sign of `spread` is ignored; a non-finite spread puts every node
    /// at the origin.
    pub fn chain(count: usize, spread: f32, rng: &mut impl Rng) -> Self {
        let spread = if spread.is_finite() { spread.abs() } else { 0.0 };
        let nodes = (0..count)
            .map(|_| {
                let x = rng.random_range(-spread..=spread);
                let y = rng.random_range(-spread..=spread);
                Node::at_rest(Vec2::new(x, y))
            })
            .collect();
        let connections = (1..count).map(|i| (i - 1, i)).collect();

        Self {
            nodes,
            connections,
            fixed: Vec::new(),
        }
    }

    pub fn from_parts(positions: Vec<Vec2>, connections: Vec<(NodeId, NodeId)>) -> Self {
        Self {
            nodes: positions.into_iter().map(Node::at_rest).collect(),
            connections,
            fixed: Vec::new(),
        }
    }

    /// Pins node `id` at `pos`. Ids past the end are ignored.
    pub fn pin(&mut self, id: NodeId, pos: Vec2) {
        if id >= self.nodes.len() {
            log::warn!("cannot pin node {id}: only {} nodes", self.nodes.len());
            return;
        }
        self.fixed.retain(|&(n, _)| n != id);
        self.fixed.push((id, pos));
        self.nodes[id] = Node::at_rest(pos);
    }

    pub fn is_fixed(&self, id: NodeId) -> bool {
        self.fixed.iter().any(|&(n, _)| n == id)
    }

    /// Moves every pinned node back to its position.
    pub fn apply_fixed(&mut self) {
        for &(id, pos) in &self.fixed {
            self.nodes[id].pos = pos;
        }
    }

    /// Inserts a node in the middle of connection `index`.
    ///
    /// Connection `(a, b)` is replaced by `(new, a)` and `(new, b)`. The new
    /// node starts at rest. Returns its id.
    pub fn split_connection(&mut self, index: usize) -> NodeId {
        let (a, b) = self.connections.remove(index);
        let id = self.nodes.len();
        let mid = (self.nodes[a].pos + self.nodes[b].pos) * 0.5;
        self.nodes.push(Node::at_rest(mid));
        self.connections.push((id, a));
        self.connections.push((id, b));
        id
    }

    /// Connections as normalized pairs for constant-time lookups.
    pub fn connection_set(&self) -> HashSet<(NodeId, NodeId)> {
        self.connections
            .iter()
            .map(|&(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect()
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.nodes.iter().map(|n| n.pos).collect()
    }

    pub fn bounding_box(&self) -> Option<(Vec2, Vec2)> {
        crate::mesh::bounds(self.nodes.iter().map(|n| n.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn chain_connects_consecutive_nodes_inside_spread() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = SpringNetwork::chain(5, 1.5, &mut rng);

        assert_eq!(net.nodes.len(), 5);
        assert_eq!(net.connections, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
        for n in &net.nodes {
            assert!(n.pos.x.abs() <= 1.5 && n.pos.y.abs() <= 1.5);
            assert_eq!(n.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn chain_accepts_negative_and_non_finite_spread() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = SpringNetwork::chain(5, -1.0, &mut rng);
        assert!(net.nodes.iter().all(|n| n.pos.x.abs() <= 1.0 && n.pos.y.abs() <= 1.0));

        let net = SpringNetwork::chain(3, f32::NAN, &mut rng);
        assert!(net.nodes.iter().all(|n| n.pos == Vec2::ZERO));
    }

    #[test]
    fn split_connection_inserts_midpoint() {
        let mut net = SpringNetwork::from_parts(
            vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0)],
            vec![(0, 1)],
        );

        let id = net.split_connection(0);

        assert_eq!(id, 2);
        assert_eq!(net.nodes[2].pos, Vec2::new(1.0, 2.0));
        assert_eq!(net.connections, vec![(2, 0), (2, 1)]);
        assert!(net.connection_set().contains(&(0, 2)));
    }

    #[test]
    fn pin_overrides_and_apply_fixed_restores() {
        let mut net = SpringNetwork::from_parts(vec![Vec2::ZERO, Vec2::ONE], vec![(0, 1)]);
        net.pin(1, Vec2::new(3.0, 0.0));
        net.pin(1, Vec2::new(-3.0, 0.0));
        net.pin(7, Vec2::ZERO);

        assert_eq!(net.fixed.len(), 1);
        assert!(net.is_fixed(1));
        assert!(!net.is_fixed(0));

        net.nodes[1].pos = Vec2::new(9.0, 9.0);
        net.apply_fixed();
        assert_eq!(net.nodes[1].pos, Vec2::new(-3.0, 0.0));
    }
}
