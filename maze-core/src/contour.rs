//! Boundary polygon that keeps organic mazes in shape.

use geo::{BoundingRect, Closest, ClosestPoint, Contains, Coord, LineString, Point, Polygon};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    polygon: Polygon<f64>,
}

fn ring(points: &[Vec2]) -> LineString<f64> {
    points
        .iter()
        .map(|p| Coord {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect()
}

fn circle(radius: f64, resolution: usize) -> Vec<Vec2> {
    (0..resolution)
        .map(|i| {
            let t = i as f64 / resolution as f64 * std::f64::consts::TAU;
            Vec2::new((radius * t.cos()) as f32, (radius * t.sin()) as f32)
        })
        .collect()
}

#[inline]
fn to_point(p: Vec2) -> Point<f64> {
    Point::new(p.x as f64, p.y as f64)
}

impl Contour {
    pub fn new(polygon: Polygon<f64>) -> Self {
        Self { polygon }
    }

    pub fn from_rings(exterior: &[Vec2], holes: &[Vec<Vec2>]) -> Self {
        Self::new(Polygon::new(
            ring(exterior),
            holes.iter().map(|h| ring(h)).collect(),
        ))
    }

    /// An annulus: the outer circle with the inner one cut out.
    pub fn torus(inner_radius: f64, outer_radius: f64, resolution: usize) -> Self {
        let resolution = resolution.max(3);
        Self::from_rings(
            &circle(outer_radius, resolution),
            &[circle(inner_radius, resolution)],
        )
    }

    /// Axis-aligned rectangle centered on the origin.
    pub fn rectangle(half_extents: Vec2) -> Self {
        let h = half_extents;
        Self::from_rings(
            &[
                Vec2::new(-h.x, -h.y),
                Vec2::new(h.x, -h.y),
                Vec2::new(h.x, h.y),
                Vec2::new(-h.x, h.y),
            ],
            &[],
        )
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.polygon.contains(&to_point(p))
    }

    /// Closest point of the polygon to `p`.
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        match self.polygon.closest_point(&to_point(p)) {
            Closest::Intersection(q) | Closest::SinglePoint(q) => {
                Vec2::new(q.x() as f32, q.y() as f32)
            }
            Closest::Indeterminate => p,
        }
    }

    /// Offset moving `p` back onto the contour, `None` when already inside.
    pub fn correction(&self, p: Vec2) -> Option<Vec2> {
        if self.contains(p) {
            None
        } else {
            Some(self.nearest_point(p) - p)
        }
    }

    /// Exterior ring first, then holes. Rings are closed (first point repeated).
    pub fn rings(&self) -> Vec<Vec<Vec2>> {
        std::iter::once(self.polygon.exterior())
            .chain(self.polygon.interiors())
            .map(|ls| {
                ls.coords()
                    .map(|c| Vec2::new(c.x as f32, c.y as f32))
                    .collect()
            })
            .collect()
    }

    pub fn bounding_box(&self) -> Option<(Vec2, Vec2)> {
        self.polygon.bounding_rect().map(|r| {
            (
                Vec2::new(r.min().x as f32, r.min().y as f32),
                Vec2::new(r.max().x as f32, r.max().y as f32),
            )
        })
    }
}
