use serde::{Deserialize, Serialize};

/// Parameters of the organic growth spring-mass simulation.
///
/// Every field has a default, so a JSON file only needs the values it
/// overrides.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganicConfig {
    /// Spring stiffness along connections.
    pub k_spring: f32,
    /// Rest length of every connection spring.
    pub rest_length: f32,
    /// Repulsion stiffness between unconnected nodes, also used to pull
    /// escaped nodes back onto the contour.
    pub k_repulsion: f32,
    /// Unconnected nodes closer than this push each other apart.
    pub min_distance: f32,
    /// Integration time step.
    pub dt: f32,
    /// Number of iterations run by [`crate::organic::OrganicGrowth::simulate`].
    pub iterations: usize,
    /// Velocity multiplier applied after every step.
    pub damping: f32,
    /// Per-component velocity clamp.
    pub max_speed: f32,
    /// Contour forces are applied on every `contour_interval`-th iteration.
    pub contour_interval: usize,
    /// A connection is split every `growth_interval` iterations ...
    pub growth_interval: usize,
    /// ... strictly after this iteration ...
    pub growth_start: usize,
    /// ... and strictly before this one.
    pub growth_end: usize,
    /// Initial node positions are uniform in `[-spread, spread]^2`.
    pub initial_spread: f32,
}

impl Default for OrganicConfig {
    fn default() -> Self {
        Self {
            k_spring: 5.0,
            rest_length: 0.1,
            k_repulsion: 3.5,
            min_distance: 0.2,
            dt: 0.1,
            iterations: 1500,
            damping: 0.9,
            max_speed: 1.0,
            contour_interval: 10,
            growth_interval: 2,
            growth_start: 30,
            growth_end: 700,
            initial_spread: 1.5,
        }
    }
}

/// Canvas settings shared by the SVG renderers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Stroke width of outline walls.
    pub stroke_width: f64,
    /// Thickness of the wall polygons drawn by [`crate::render::thick_walls`].
    pub wall_thickness: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            padding: 50.0,
            stroke_width: 2.0,
            wall_thickness: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: OrganicConfig =
            serde_json::from_str(r#"{ "min_distance": 0.1, "k_repulsion": 5.0 }"#).unwrap();

        assert_eq!(cfg.min_distance, 0.1);
        assert_eq!(cfg.k_repulsion, 5.0);
        assert_eq!(cfg.k_spring, OrganicConfig::default().k_spring);
        assert_eq!(cfg.iterations, 1500);
    }
}
