use std::fmt;

use glam::Vec2;

use crate::{
    error::{MazeError, Result},
    graph::MazeGraph,
    mesh::MazeMesh,
    types::NodeId,
};

/// Cell connectivity a generator can walk.
pub trait Topology {
    fn node_count(&self) -> usize;

    /// Nodes a passage from `node` could lead to.
    fn neighbors(&self, node: NodeId) -> Vec<NodeId>;
}

/// A `cols x rows` grid of square cells.
///
/// Cell `(x, y)` has node id `y * cols + x` and its centroid at `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RectangularMaze {
    cols: usize,
    rows: usize,
    pub graph: MazeGraph,
}

impl RectangularMaze {
    /// A grid with every wall closed.
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        if cols == 0 || rows == 0 || cols.checked_mul(rows).is_none() {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }
        Ok(Self {
            cols,
            rows,
            graph: MazeGraph::new(),
        })
    }

    /// A grid with a given graph, checking every edge joins adjacent cells.
    pub fn with_graph(cols: usize, rows: usize, graph: MazeGraph) -> Result<Self> {
        let maze = Self::new(cols, rows)?;
        for (a, b) in graph.iter() {
            if b >= maze.node_count() || !maze.are_adjacent(a, b) {
                return Err(MazeError::InvalidEdge {
                    a,
                    b,
                    node_count: maze.node_count(),
                });
            }
        }
        Ok(Self { graph, ..maze })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `(rows, cols)`, matrix order.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> NodeId {
        y * self.cols + x
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> (usize, usize) {
        (node % self.cols, node / self.cols)
    }

    pub fn centroid(&self, node: NodeId) -> Vec2 {
        let (x, y) = self.position(node);
        Vec2::new(x as f32, y as f32)
    }

    pub fn centroids(&self) -> Vec<Vec2> {
        (0..self.node_count()).map(|n| self.centroid(n)).collect()
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        let (ax, ay) = self.position(a);
        let (bx, by) = self.position(b);
        ax.abs_diff(bx) + ay.abs_diff(by) == 1
    }

    /// Opens every wall between neighbouring cells.
    pub fn fill_graph(&mut self) {
        self.graph.clear();
        for y in 0..self.rows {
            for x in 0..self.cols {
                if x + 1 < self.cols {
                    self.graph.insert(self.index(x, y), self.index(x + 1, y));
                }
                if y + 1 < self.rows {
                    self.graph.insert(self.index(x, y), self.index(x, y + 1));
                }
            }
        }
    }

    /// Passages that could be opened, as a symmetric adjacency matrix.
    pub fn possible_edges(&self) -> Vec<Vec<bool>> {
        let n = self.node_count();
        let mut matrix = vec![vec![false; n]; n];
        for (a, row) in matrix.iter_mut().enumerate() {
            for b in self.neighbors(a) {
                row[b] = true;
            }
        }
        matrix
    }

    /// Builds the wall mesh: one quad face per cell, in node order.
    pub fn to_mesh(&self) -> MazeMesh {
        let mut mesh = MazeMesh::new();
        for y in 0..=self.rows {
            for x in 0..=self.cols {
                mesh.new_vertex(x as f32 - 0.5, y as f32 - 0.5);
            }
        }

        let stride = self.cols + 1;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let quad = vec![
                    y * stride + x,
                    y * stride + x + 1,
                    (y + 1) * stride + x + 1,
                    (y + 1) * stride + x,
                ];
                // Quads of a regular grid never share a directed side.
                if let Err(e) = mesh.new_face(quad) {
                    unreachable!("grid quad rejected: {e}");
                }
            }
        }
        mesh
    }
}

impl Topology for RectangularMaze {
    fn node_count(&self) -> usize {
        self.cols * self.rows
    }

    fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let (x, y) = self.position(node);
        let mut out = Vec::with_capacity(4);
        if x + 1 < self.cols {
            out.push(self.index(x + 1, y));
        }
        if y + 1 < self.rows {
            out.push(self.index(x, y + 1));
        }
        if x > 0 {
            out.push(self.index(x - 1, y));
        }
        if y > 0 {
            out.push(self.index(x, y - 1));
        }
        out
    }
}

impl fmt::Display for RectangularMaze {
    /// Draws the maze with the highest row on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let horizontal = |f: &mut fmt::Formatter<'_>, y: Option<usize>| -> fmt::Result {
            for x in 0..self.cols {
                // Wall between row y and y + 1; the outer border is always closed.
                let open = y.is_some_and(|y| {
                    self.graph.contains(self.index(x, y), self.index(x, y + 1))
                });
                f.write_str(if open { "+   " } else { "+---" })?;
            }
            writeln!(f, "+")
        };

        horizontal(f, None)?;
        for y in (0..self.rows).rev() {
            f.write_str("|")?;
            for x in 0..self.cols {
                let open = x + 1 < self.cols
                    && self.graph.contains(self.index(x, y), self.index(x + 1, y));
                f.write_str(if open { "    " } else { "   |" })?;
            }
            writeln!(f)?;
            horizontal(f, y.checked_sub(1))?;
        }
        write!(f, "{} x {}", self.cols, self.rows)
    }
}
