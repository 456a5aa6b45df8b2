//! Maze generation, organic growth simulation and SVG rendering.
//!
//! Main components:
//! - [`grid`], [`mesh`], [`graph`]: grid mazes, the wall mesh and the
//!   passage graph.
//! - [`depth_first`], [`recursive_division`]: grid maze generators.
//! - [`network`], [`contour`], [`phases`], [`organic`]: the spring-mass
//!   organic growth simulation.
//! - [`voronoi`]: walls around an organic path.
//! - [`render`], [`document`], [`booklet`], [`batch`]: output.
//! - [`config`]: simulation and render settings.
//! - [`types`]: shared type aliases and IDs.

pub mod batch;
pub mod booklet;
pub mod config;
pub mod contour;
pub mod depth_first;
pub mod document;
pub mod error;
pub mod force_buffer;
pub mod graph;
pub mod grid;
pub mod mesh;
pub mod network;
pub mod organic;
pub mod phases;
pub mod recursive_division;
pub mod render;
pub mod types;
pub mod voronoi;

pub use error::{MazeError, Result};
