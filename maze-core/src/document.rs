//! JSON documents for generated mazes.
//!
//! A document is tagged by its `"class"`, for example:
//!
//! ```json
//! { "class": "RectangularMaze", "name": "Indexed Maze", "nr_col": 2, "nr_row": 1, "graph": [[0, 1]] }
//! ```

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MazeError, Result},
    graph::MazeGraph,
    grid::RectangularMaze,
    organic::OrganicGrowth,
    types::NodeId,
};

pub const DEFAULT_NAME: &str = "Indexed Maze";

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum MazeDocument {
    RectangularMaze {
        #[serde(default = "default_name")]
        name: String,
        nr_col: usize,
        nr_row: usize,
        graph: Vec<[NodeId; 2]>,
    },
    OrganicGrowthMaze {
        #[serde(default = "default_name")]
        name: String,
        nodes: Vec<[f32; 2]>,
        graph: Vec<[NodeId; 2]>,
    },
    /// Any other node graph.
    Maze {
        #[serde(default = "default_name")]
        name: String,
        nodes: Vec<[f32; 2]>,
        graph: Vec<[NodeId; 2]>,
    },
}

fn edges(graph: &MazeGraph) -> Vec<[NodeId; 2]> {
    graph.iter().map(|(a, b)| [a, b]).collect()
}

impl MazeDocument {
    pub fn from_rectangular(maze: &RectangularMaze) -> Self {
        Self::RectangularMaze {
            name: default_name(),
            nr_col: maze.cols(),
            nr_row: maze.rows(),
            graph: edges(&maze.graph),
        }
    }

    pub fn from_organic(maze: &OrganicGrowth) -> Self {
        Self::OrganicGrowthMaze {
            name: "Organic Growth Maze".to_owned(),
            nodes: maze.network.nodes.iter().map(|n| n.pos.to_array()).collect(),
            graph: maze
                .network
                .connections
                .iter()
                .map(|&(a, b)| [a, b])
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::RectangularMaze { name, .. }
            | Self::OrganicGrowthMaze { name, .. }
            | Self::Maze { name, .. } => name,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::RectangularMaze { .. } => "RectangularMaze",
            Self::OrganicGrowthMaze { .. } => "OrganicGrowthMaze",
            Self::Maze { .. } => "Maze",
        }
    }

    fn raw_graph(&self) -> &[[NodeId; 2]] {
        match self {
            Self::RectangularMaze { graph, .. }
            | Self::OrganicGrowthMaze { graph, .. }
            | Self::Maze { graph, .. } => graph,
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Self::RectangularMaze { nr_col, nr_row, .. } => nr_col.saturating_mul(*nr_row),
            Self::OrganicGrowthMaze { nodes, .. } | Self::Maze { nodes, .. } => nodes.len(),
        }
    }

    /// Node positions; grid cells use their centroids.
    pub fn nodes(&self) -> Vec<Vec2> {
        match self {
            Self::RectangularMaze { nr_col, nr_row, .. } => (0..self.node_count())
                .map(|n| Vec2::new((n % nr_col) as f32, (n / nr_col) as f32))
                .collect(),
            Self::OrganicGrowthMaze { nodes, .. } | Self::Maze { nodes, .. } => {
                nodes.iter().map(|&p| Vec2::from_array(p)).collect()
            }
        }
    }

    pub fn graph(&self) -> MazeGraph {
        self.raw_graph().iter().map(|&[a, b]| (a, b)).collect()
    }

    /// Connections in document order, as stored.
    pub fn connections(&self) -> Vec<(NodeId, NodeId)> {
        self.raw_graph().iter().map(|&[a, b]| (a, b)).collect()
    }

    /// Checks that the grid is non-empty and its cell count fits a `usize`,
    /// and that every edge references existing nodes.
    pub fn validate(&self) -> Result<()> {
        if let Self::RectangularMaze { nr_col, nr_row, .. } = self
            && (*nr_col == 0 || *nr_row == 0 || nr_col.checked_mul(*nr_row).is_none())
        {
            return Err(MazeError::InvalidDimensions {
                cols: *nr_col,
                rows: *nr_row,
            });
        }
        let node_count = self.node_count();
        for &[a, b] in self.raw_graph() {
            if a >= node_count || b >= node_count {
                return Err(MazeError::InvalidEdge { a, b, node_count });
            }
        }
        Ok(())
    }

    /// The grid maze this document describes.
    ///
    /// Fails for non-grid documents or edges between non-adjacent cells.
    pub fn to_rectangular(&self) -> Result<RectangularMaze> {
        match self {
            Self::RectangularMaze { nr_col, nr_row, .. } => {
                RectangularMaze::with_graph(*nr_col, *nr_row, self.graph())
            }
            other => Err(MazeError::UnexpectedClass {
                expected: "RectangularMaze",
                found: other.class(),
            }),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Writes the document, creating missing parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| MazeError::io(dir, e))?;
        }
        fs::write(path, self.to_json()?).map_err(|e| MazeError::io(path, e))?;
        log::info!("wrote {} to {}", self.class(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| MazeError::io(path, e))?;
        Self::from_json(&text)
    }
}

impl From<&RectangularMaze> for MazeDocument {
    fn from(maze: &RectangularMaze) -> Self {
        Self::from_rectangular(maze)
    }
}

impl From<&OrganicGrowth> for MazeDocument {
    fn from(maze: &OrganicGrowth) -> Self {
        Self::from_organic(maze)
    }
}
