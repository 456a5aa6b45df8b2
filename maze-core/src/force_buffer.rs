use crate::types::NodeId;
use glam::Vec2;

/// A scratch buffer that accumulates the net force on every node.
///
/// Each simulation phase adds its contribution with [`ForceBuffer::add`];
/// the integration phase then reads the total per node. Internally,
/// `force[i]` corresponds to node `i`.
#[derive(Debug)]
pub struct ForceBuffer {
    force: Vec<Vec2>,
}

impl ForceBuffer {
    /// Creates a new [`ForceBuffer`] holding `len` zero forces.
    ///
    /// ### Parameters
    /// - `len` - Number of nodes this buffer stores forces for.
    pub fn with_len(len: usize) -> Self {
        Self {
            force: vec![Vec2::ZERO; len],
        }
    }

    /// Resizes the buffer to `len` entries and clears every force.
    ///
    /// The network grows during simulation, so this runs at the start of
    /// every step. After this call all entries are `Vec2::ZERO`, even if
    /// the length was already correct.
    pub fn ensure_len(&mut self, len: usize) {
        if self.force.len() != len {
            self.force.resize(len, Vec2::ZERO);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        for f in &mut self.force {
            *f = Vec2::ZERO;
        }
    }

    /// Adds `f` to the net force of node `id`.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn add(&mut self, id: NodeId, f: Vec2) {
        self.force[id] += f;
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Vec2 {
        self.force[id]
    }

    pub fn len(&self) -> usize {
        self.force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.force.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_initializes_zero_forces() {
        let buf = ForceBuffer::with_len(3);
        assert_eq!(buf.len(), 3);
        assert!(buf.iter().all(|f| f == Vec2::ZERO));
    }

    #[test]
    fn add_accumulates_per_node() {
        let mut buf = ForceBuffer::with_len(2);
        buf.add(0, Vec2::new(1.0, 0.0));
        buf.add(0, Vec2::new(0.5, -1.0));

        assert_eq!(buf.get(0), Vec2::new(1.5, -1.0));
        assert_eq!(buf.get(1), Vec2::ZERO);
    }

    #[test]
    fn ensure_len_resizes_and_clears() {
        let mut buf = ForceBuffer::with_len(1);
        buf.add(0, Vec2::ONE);

        buf.ensure_len(4);
        assert_eq!(buf.len(), 4);
        assert!(buf.iter().all(|f| f == Vec2::ZERO));

        // Same length still clears.
        buf.add(3, Vec2::ONE);
        buf.ensure_len(4);
        assert_eq!(buf.get(3), Vec2::ZERO);
    }
}
