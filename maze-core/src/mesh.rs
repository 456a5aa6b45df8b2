//! Half-edge-like mesh used to decide which cell walls are open.
//!
//! A [`MazeMesh`] stores vertices, faces and, for each face, one [`Loop`]
//! per side. A loop is a directed edge `vertex -> next_vertex` owned by a
//! single face. The neighbouring face owns the reversed loop, its
//! *opposite*. A wall is open when the maze graph connects the two faces
//! on either side of it.

use std::collections::HashMap;
use std::ops::Range;

use glam::Vec2;

use crate::{
    error::{MazeError, Result},
    graph::MazeGraph,
    types::{FaceId, LoopId, VertexId},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub vertices: Vec<VertexId>,
    /// Loops of a face are stored contiguously starting here.
    pub first_loop: LoopId,
}

impl Face {
    pub fn loops(&self) -> Range<LoopId> {
        self.first_loop..self.first_loop + self.vertices.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loop {
    pub vertex: VertexId,
    pub next_vertex: VertexId,
    pub face: FaceId,
}

#[derive(Clone, Debug, Default)]
pub struct MazeMesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub loops: Vec<Loop>,
    /// `(vertex, next_vertex) -> loop`, used for opposite lookups.
    directed: HashMap<(VertexId, VertexId), LoopId>,
}

impl MazeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_vertex(&mut self, x: f32, y: f32) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex {
            pos: Vec2::new(x, y),
        });
        id
    }

    /// Adds a face over the given vertex cycle and creates its loops.
    ///
    /// Fails for fewer than three vertices, unknown vertex ids, or a
    /// directed side already owned by another face.
    pub fn new_face(&mut self, vertices: Vec<VertexId>) -> Result<FaceId> {
        if vertices.len() < 3 {
            return Err(MazeError::InvalidFace(format!(
                "a face needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(&bad) = vertices.iter().find(|&&v| v >= self.vertices.len()) {
            return Err(MazeError::InvalidFace(format!("unknown vertex {bad}")));
        }

        let n = vertices.len();
        let sides: Vec<(VertexId, VertexId)> =
            (0..n).map(|i| (vertices[i], vertices[(i + 1) % n])).collect();
        if let Some(side) = sides.iter().find(|s| self.directed.contains_key(s)) {
            return Err(MazeError::InvalidFace(format!(
                "side {} -> {} already belongs to another face",
                side.0, side.1
            )));
        }

        let face = self.faces.len();
        let first_loop = self.loops.len();
        for (vertex, next_vertex) in sides {
            self.directed.insert((vertex, next_vertex), self.loops.len());
            self.loops.push(Loop {
                vertex,
                next_vertex,
                face,
            });
        }
        self.faces.push(Face {
            vertices,
            first_loop,
        });
        Ok(face)
    }

    pub fn next_loop(&self, l: LoopId) -> LoopId {
        let range = self.faces[self.loops[l].face].loops();
        if l + 1 == range.end { range.start } else { l + 1 }
    }

    pub fn prev_loop(&self, l: LoopId) -> LoopId {
        let range = self.faces[self.loops[l].face].loops();
        if l == range.start { range.end - 1 } else { l - 1 }
    }

    /// The reversed loop on the adjacent face, or `None` on the outer
    /// boundary.
    pub fn opposite_loop(&self, l: LoopId) -> Option<LoopId> {
        let lp = &self.loops[l];
        self.directed.get(&(lp.next_vertex, lp.vertex)).copied()
    }

    /// Whether the wall under loop `l` is open in `graph`.
    pub fn is_open(&self, l: LoopId, graph: &MazeGraph) -> bool {
        match self.opposite_loop(l) {
            Some(o) => graph.contains(self.loops[l].face, self.loops[o].face),
            None => false,
        }
    }

    pub fn segment(&self, l: LoopId) -> (Vec2, Vec2) {
        let lp = &self.loops[l];
        (self.vertices[lp.vertex].pos, self.vertices[lp.next_vertex].pos)
    }

    pub fn face_centroid(&self, f: FaceId) -> Vec2 {
        let face = &self.faces[f];
        let sum: Vec2 = face.vertices.iter().map(|&v| self.vertices[v].pos).sum();
        sum / face.vertices.len() as f32
    }

    /// `(min, max)` corners of all vertices.
    pub fn bounding_box(&self) -> Option<(Vec2, Vec2)> {
        bounds(self.vertices.iter().map(|v| v.pos))
    }

    /// Closed walls as segments, each shared wall reported once.
    ///
    /// Loops in `skip` are treated as open (entrance and exit gaps).
    pub fn walls(&self, graph: &MazeGraph, skip: &[LoopId]) -> Vec<(Vec2, Vec2)> {
        let mut out = Vec::new();
        for l in 0..self.loops.len() {
            if skip.contains(&l) || self.is_open(l, graph) {
                continue;
            }
            if let Some(o) = self.opposite_loop(l)
                && o < l
                && !skip.contains(&o)
            {
                continue;
            }
            out.push(self.segment(l));
        }
        out
    }

    /// Entrance and exit gaps: the first side of the first face and the
    /// second-to-last side of the last face.
    ///
    /// For grid meshes these are the bottom wall of the first cell and the
    /// top wall of the last one.
    pub fn entrance_exit(&self) -> Option<[LoopId; 2]> {
        let first = self.faces.first()?;
        let last = self.faces.last()?;
        Some([first.first_loop, last.loops().end - 2])
    }
}

pub(crate) fn bounds(points: impl IntoIterator<Item = Vec2>) -> Option<(Vec2, Vec2)> {
    let mut it = points.into_iter();
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
}
