use std::path::PathBuf;

use crate::types::NodeId;

/// Errors produced while building, loading or writing mazes.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid maze json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("svg error: {0}")]
    Svg(String),
    #[error("invalid maze dimensions {cols}x{rows}")]
    InvalidDimensions { cols: usize, rows: usize },
    #[error("edge ({a}, {b}) references a node outside 0..{node_count}")]
    InvalidEdge {
        a: NodeId,
        b: NodeId,
        node_count: usize,
    },
    #[error("expected a {expected} document, found {found}")]
    UnexpectedClass {
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid face: {0}")]
    InvalidFace(String),
    #[error("booklet: {0}")]
    Booklet(String),
}

impl MazeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
