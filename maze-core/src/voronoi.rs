//! Voronoi walls around an organic maze path.
//!
//! Every node of the path becomes a Voronoi generator. Neighbouring cells
//! share a ridge; if the path connects the two generators the ridge is a
//! doorway and is skipped, otherwise it is a wall. Walls are clipped to
//! the contour.

use std::collections::{HashMap, HashSet};

use geo::{BooleanOps, LineString, MultiLineString};
use glam::Vec2;
use spade::{DelaunayTriangulation, Point2, Triangulation as _, handles::FixedVertexHandle};

use crate::{contour::Contour, organic::OrganicGrowth, types::NodeId};

/// Wall segments separating unconnected neighbouring nodes.
///
/// Four padding generators far outside the contour bounds keep every
/// ridge inside the contour finite.
pub fn walls(
    nodes: &[Vec2],
    connections: &[(NodeId, NodeId)],
    contour: &Contour,
) -> Vec<(Vec2, Vec2)> {
    let Some((lo, hi)) = contour.bounding_box() else {
        return Vec::new();
    };
    let pad = (hi - lo).max_element().max(1.0);
    let padding = [
        Vec2::new(lo.x - pad, lo.y - pad),
        Vec2::new(lo.x - pad, hi.y + pad),
        Vec2::new(hi.x + pad, lo.y - pad),
        Vec2::new(hi.x + pad, hi.y + pad),
    ];

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    // Generator index for every triangulation vertex; padding points get
    // indices past the node count and so are never connected.
    let mut generator: HashMap<FixedVertexHandle, usize> = HashMap::new();
    for (i, p) in nodes.iter().chain(padding.iter()).enumerate() {
        match triangulation.insert(Point2::new(p.x as f64, p.y as f64)) {
            Ok(handle) => {
                generator.entry(handle).or_insert(i);
            }
            Err(e) => log::warn!("voronoi: skipping generator {i}: {e:?}"),
        }
    }

    let connected: HashSet<(NodeId, NodeId)> = connections
        .iter()
        .map(|&(a, b)| if a <= b { (a, b) } else { (b, a) })
        .collect();

    let mut ridges = Vec::new();
    for edge in triangulation.undirected_edges() {
        let [va, vb] = edge.vertices();
        let (Some(&a), Some(&b)) = (generator.get(&va.fix()), generator.get(&vb.fix())) else {
            continue;
        };
        if connected.contains(&if a <= b { (a, b) } else { (b, a) }) {
            continue;
        }

        let directed = edge.as_directed();
        let (Some(left), Some(right)) = (directed.face().as_inner(), directed.rev().face().as_inner())
        else {
            // Ridge running to infinity: only between padding points.
            continue;
        };
        let c1 = left.circumcenter();
        let c2 = right.circumcenter();
        if (c1.x - c2.x).hypot(c1.y - c2.y) < 1e-12 {
            continue;
        }
        ridges.push(LineString::from(vec![(c1.x, c1.y), (c2.x, c2.y)]));
    }

    let clipped = contour.polygon().clip(&MultiLineString::new(ridges), false);
    clipped
        .iter()
        .flat_map(|ls| ls.lines())
        .map(|line| {
            (
                Vec2::new(line.start.x as f32, line.start.y as f32),
                Vec2::new(line.end.x as f32, line.end.y as f32),
            )
        })
        .filter(|(a, b)| a.distance_squared(*b) > 0.0)
        .collect()
}

/// Walls of the current state of an organic growth simulation.
pub fn walls_for(maze: &OrganicGrowth) -> Vec<(Vec2, Vec2)> {
    walls(
        &maze.network.positions(),
        &maze.network.connections,
        &maze.contour,
    )
}
