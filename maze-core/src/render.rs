//! SVG renderers for meshes, organic networks and Voronoi walls.
//!
//! Every renderer fits its data into a `width x height` canvas through a
//! [`Viewport`] and returns an [`svg::Document`]; [`save`] writes one out.

use std::fs;
use std::path::Path;

use glam::{DVec2, Vec2};
use svg::Document;
use svg::node::element::{Circle, Line, Polygon, Rectangle, Style, Text};

use crate::{
    config::RenderConfig,
    contour::Contour,
    error::{MazeError, Result},
    graph::MazeGraph,
    mesh::{MazeMesh, bounds},
    types::NodeId,
};

const OUTLINE_CSS: &str = ".edge { stroke: black; stroke-width: {stroke}; stroke-linecap: round; }";

const WALL_CSS: &str = "
.wall { fill: black; stroke: none; }
.background { fill: white; }
";

const DEBUG_CSS: &str = "
.vertex { fill: blue; stroke: none; }
.face { fill: none; stroke: red; stroke-width: 1; }
.centroid { fill: green; }
.graph-edge { stroke: green; stroke-width: 3; }
.label { font-size: 12px; fill: black; }
";

const NETWORK_CSS: &str = "
.node { fill: green; }
.connection { stroke: black; stroke-width: 1; }
.label { font-size: 8px; fill: gray; }
";

const VORONOI_CSS: &str = "
.edge { stroke: black; stroke-width: {stroke}; stroke-linecap: round; }
.contour { fill: none; stroke: gray; stroke-width: 1; }
";

/// Maps data coordinates onto the padded canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    min: DVec2,
    scale: DVec2,
    padding: f64,
}

impl Viewport {
    /// Fits `(min, max)` into the canvas of `cfg`.
    ///
    /// An axis with zero extent gets a scale of 1. No bounds at all maps
    /// the origin onto the padding corner.
    pub fn fit(bounds: Option<(Vec2, Vec2)>, cfg: &RenderConfig) -> Self {
        let (min, max) = bounds
            .map(|(lo, hi)| (lo.as_dvec2(), hi.as_dvec2()))
            .unwrap_or((DVec2::ZERO, DVec2::ZERO));
        let inner = DVec2::new(cfg.width, cfg.height) - 2.0 * cfg.padding;
        let extent = max - min;
        let axis = |inner: f64, extent: f64| {
            if extent.abs() <= f64::EPSILON {
                1.0
            } else {
                inner / extent
            }
        };
        Self {
            min,
            scale: DVec2::new(axis(inner.x, extent.x), axis(inner.y, extent.y)),
            padding: cfg.padding,
        }
    }

    pub fn map(&self, p: Vec2) -> DVec2 {
        (p.as_dvec2() - self.min) * self.scale + self.padding
    }
}

fn document(cfg: &RenderConfig, css: &str) -> Document {
    Document::new()
        .set("viewBox", (0.0, 0.0, cfg.width, cfg.height))
        .set("width", cfg.width)
        .set("height", cfg.height)
        .add(Style::new(css.replace("{stroke}", &cfg.stroke_width.to_string())))
}

fn line(class: &str, a: DVec2, b: DVec2) -> Line {
    Line::new()
        .set("class", class)
        .set("x1", a.x)
        .set("y1", a.y)
        .set("x2", b.x)
        .set("y2", b.y)
}

fn points(pts: impl IntoIterator<Item = DVec2>) -> String {
    pts.into_iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn label(text: String, at: DVec2) -> Text {
    Text::new(text)
        .set("class", "label")
        .set("x", at.x + 8.0)
        .set("y", at.y + 5.0)
}

fn square(class: &str, at: DVec2, half: f64) -> Rectangle {
    Rectangle::new()
        .set("class", class)
        .set("x", at.x - half)
        .set("y", at.y - half)
        .set("width", 2.0 * half)
        .set("height", 2.0 * half)
}

/// Corners of a wall of `thickness` around segment `a`-`b`, or `None` for
/// a zero length segment.
fn thicken(a: DVec2, b: DVec2, thickness: f64) -> Option<[DVec2; 4]> {
    let dir = b - a;
    let len = dir.length();
    if len <= f64::EPSILON {
        return None;
    }
    let offset = dir.perp() / len * (thickness / 2.0);
    Some([a + offset, a - offset, b - offset, b + offset])
}

/// Closed walls of `mesh` as lines.
///
/// With `entrance_exit` the gaps from [`MazeMesh::entrance_exit`] are left
/// open.
pub fn outline(
    mesh: &MazeMesh,
    graph: &MazeGraph,
    cfg: &RenderConfig,
    entrance_exit: bool,
) -> Document {
    let view = Viewport::fit(mesh.bounding_box(), cfg);
    let skip = if entrance_exit {
        mesh.entrance_exit().map(Vec::from).unwrap_or_default()
    } else {
        Vec::new()
    };

    let mut doc = document(cfg, OUTLINE_CSS);
    for (a, b) in mesh.walls(graph, &skip) {
        doc = doc.add(line("edge", view.map(a), view.map(b)));
    }
    doc
}

/// Closed walls as filled polygons of `cfg.wall_thickness` on a white
/// background.
pub fn thick_walls(mesh: &MazeMesh, graph: &MazeGraph, cfg: &RenderConfig) -> Document {
    let view = Viewport::fit(mesh.bounding_box(), cfg);
    let mut doc = document(cfg, WALL_CSS).add(
        Rectangle::new()
            .set("class", "background")
            .set("x", 0)
            .set("y", 0)
            .set("width", cfg.width)
            .set("height", cfg.height),
    );

    for (a, b) in mesh.walls(graph, &[]) {
        if let Some(corners) = thicken(view.map(a), view.map(b), cfg.wall_thickness) {
            doc = doc.add(
                Polygon::new()
                    .set("class", "wall")
                    .set("points", points(corners)),
            );
        }
    }
    doc
}

/// Everything in the mesh: labelled vertices, faces, labelled centroids
/// and the open passages between them.
pub fn debug(mesh: &MazeMesh, graph: &MazeGraph, cfg: &RenderConfig) -> Document {
    let view = Viewport::fit(mesh.bounding_box(), cfg);
    let mut doc = document(cfg, DEBUG_CSS);

    for (i, v) in mesh.vertices.iter().enumerate() {
        let p = view.map(v.pos);
        doc = doc
            .add(
                Circle::new()
                    .set("class", "vertex")
                    .set("cx", p.x)
                    .set("cy", p.y)
                    .set("r", 5),
            )
            .add(label(format!("V{i}"), p));
    }

    for face in &mesh.faces {
        let corners = face.vertices.iter().map(|&v| view.map(mesh.vertices[v].pos));
        doc = doc.add(Polygon::new().set("class", "face").set("points", points(corners)));
    }

    let centroids: Vec<DVec2> = (0..mesh.faces.len())
        .map(|f| view.map(mesh.face_centroid(f)))
        .collect();
    for (i, &c) in centroids.iter().enumerate() {
        doc = doc
            .add(square("centroid", c, 5.0))
            .add(label(format!("C{i}"), c));
    }

    for (a, b) in graph.iter() {
        match (centroids.get(a), centroids.get(b)) {
            (Some(&pa), Some(&pb)) => doc = doc.add(line("graph-edge", pa, pb)),
            _ => log::warn!("debug render: edge ({a}, {b}) has no face"),
        }
    }
    doc
}

/// An organic growth path: nodes as small labelled squares joined by
/// their connections.
pub fn network(nodes: &[Vec2], connections: &[(NodeId, NodeId)], cfg: &RenderConfig) -> Document {
    let view = Viewport::fit(bounds(nodes.iter().copied()), cfg);
    let mut doc = document(cfg, NETWORK_CSS);

    for &(a, b) in connections {
        if let (Some(&pa), Some(&pb)) = (nodes.get(a), nodes.get(b)) {
            doc = doc.add(line("connection", view.map(pa), view.map(pb)));
        }
    }
    for (i, &p) in nodes.iter().enumerate() {
        let p = view.map(p);
        doc = doc
            .add(square("node", p, 2.0))
            .add(label(i.to_string(), p));
    }
    doc
}

/// Wall segments inside the contour, with the contour rings drawn as
/// closed polylines.
pub fn voronoi(walls: &[(Vec2, Vec2)], contour: &Contour, cfg: &RenderConfig) -> Document {
    let view = Viewport::fit(contour.bounding_box(), cfg);
    let mut doc = document(cfg, VORONOI_CSS);

    for ring in contour.rings() {
        doc = doc.add(
            Polygon::new()
                .set("class", "contour")
                .set("points", points(ring.iter().map(|&p| view.map(p)))),
        );
    }
    for &(a, b) in walls {
        doc = doc.add(line("edge", view.map(a), view.map(b)));
    }
    doc
}

/// Writes `doc`, creating missing parent directories.
pub fn save(path: impl AsRef<Path>, doc: &Document) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| MazeError::io(dir, e))?;
    }
    svg::save(path, doc).map_err(|e| MazeError::io(path, e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
