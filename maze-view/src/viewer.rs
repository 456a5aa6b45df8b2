//! Interactive organic growth maze viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns an [`OrganicGrowth`]
//! simulation and implements [`eframe::App`] to render and control it
//! through an egui UI.

use eframe::App;
use glam::Vec2;
use maze_core::{
    config::OrganicConfig, contour::Contour, network::SpringNetwork, organic::OrganicGrowth,
    types::NodeId, voronoi,
};
use rand::rng;

/// Boundary the maze grows inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContourShape {
    Torus { inner: f32, outer: f32 },
    Rectangle { half_extents: Vec2 },
}

impl ContourShape {
    fn build(self) -> Contour {
        match self {
            Self::Torus { inner, outer } => Contour::torus(inner as f64, outer as f64, 64),
            Self::Rectangle { half_extents } => Contour::rectangle(half_extents),
        }
    }

    /// Entrance and exit pins on the left and right of the shape.
    fn pins(self, last: NodeId) -> [(NodeId, Vec2); 2] {
        let x = match self {
            Self::Torus { inner, outer } => (inner + outer) / 2.0,
            Self::Rectangle { half_extents } => half_extents.x * 0.9,
        };
        [(0, Vec2::new(-x, 0.0)), (last, Vec2::new(x, 0.0))]
    }
}

const TORUS: ContourShape = ContourShape::Torus {
    inner: 0.5,
    outer: 1.5,
};
const RECTANGLE: ContourShape = ContourShape::Rectangle {
    half_extents: Vec2::new(1.5, 1.0),
};

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If `running` is `true` and enough time has passed, call [`Viewer::step_once`].
/// 3. Render the contour, the path and optionally the Voronoi walls.
///
/// ### Fields
/// - `maze` - Simulation being shown; its `cfg` is edited live by the side panel.
/// - `shape` - Contour used on the next reset.
/// - `nr_points` - Initial path length used on the next reset.
/// - `walls` - Cached Voronoi walls, recomputed after every step while shown.
/// - `last_new_ids` - Nodes grown in the last step (for highlighting).
pub struct Viewer {
    maze: OrganicGrowth,
    shape: ContourShape,
    nr_points: usize,

    rng: rand::rngs::ThreadRng,

    running: bool,
    steps_per_frame: usize,
    zoom: f32,
    pan: egui::Vec2,

    show_walls: bool,
    walls: Vec<(Vec2, Vec2)>,
    last_new_ids: Vec<NodeId>,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
}

impl Viewer {
    /// Creates a viewer with a 40 node path inside a torus.
    pub fn new() -> Self {
        let mut rng = rng();
        let shape = TORUS;
        let nr_points = 40;
        let maze = Self::seed(shape, nr_points, OrganicConfig::default(), &mut rng);

        Self {
            maze,
            shape,
            nr_points,
            rng,
            running: false,
            steps_per_frame: 5,
            zoom: 150.0,
            pan: egui::vec2(0.0, 0.0),
            show_walls: false,
            walls: Vec::new(),
            last_new_ids: Vec::with_capacity(16),
            step_interval: 0.02,
            last_step_time: 0.0,
            last_step_dt: 0.0,
        }
    }

    fn seed(
        shape: ContourShape,
        nr_points: usize,
        cfg: OrganicConfig,
        rng: &mut impl rand::Rng,
    ) -> OrganicGrowth {
        let pins = if nr_points >= 2 {
            shape.pins(nr_points - 1).to_vec()
        } else {
            Vec::new()
        };
        OrganicGrowth::new(nr_points, &pins, shape.build(), cfg, rng)
    }

    /// Starts a new simulation from a random path, keeping the current
    /// configuration and camera.
    fn reset(&mut self) {
        let cfg = self.maze.cfg;
        self.maze = Self::seed(self.shape, self.nr_points, cfg, &mut self.rng);
        self.walls.clear();
        self.last_new_ids.clear();
        self.running = false;
    }

    /// Removes every node, leaving only the contour.
    fn clear(&mut self) {
        let cfg = self.maze.cfg;
        self.maze = OrganicGrowth::from_network(SpringNetwork::default(), self.shape.build(), cfg);
        self.walls.clear();
        self.last_new_ids.clear();
    }

    /// Advances the simulation by `steps_per_frame` iterations.
    ///
    /// Nodes grown during these iterations are stored in `last_new_ids`.
    /// Auto-run stops once the configured iteration count is reached.
    fn step_once(&mut self) {
        self.last_new_ids.clear();
        for _ in 0..self.steps_per_frame.max(1) {
            if self.maze.is_finished() {
                self.running = false;
                break;
            }
            let report = self.maze.step(&mut self.rng);
            self.last_new_ids.extend(report.grown);
        }
        if self.show_walls {
            self.walls = voronoi::walls_for(&self.maze);
        }
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is flipped so that
    /// positive y goes up in world space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.0..=1.0)
                        .speed(0.01),
                );
                ui.add(
                    egui::DragValue::new(&mut self.steps_per_frame)
                        .prefix("steps = ")
                        .range(1..=100),
                );

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = now - self.last_step_time;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                if ui.button("Clear").clicked() {
                    self.clear();
                }

                ui.separator();
                if ui.checkbox(&mut self.show_walls, "Walls").changed() && self.show_walls {
                    self.walls = voronoi::walls_for(&self.maze);
                }
                ui.add(egui::Slider::new(&mut self.zoom, 10.0..=1000.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (iteration, node and connection counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("connections = {}", self.maze.network.connections.len()));
                ui.label(format!("nodes = {}", self.maze.network.nodes.len()));
                ui.label(format!(
                    "iteration = {}/{}",
                    self.maze.iteration(),
                    self.maze.cfg.iterations
                ));
            });
        });
    }

    /// Builds the right-hand configuration panel for simulation parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let cfg = &mut self.maze.cfg;
                ui.heading("Config");

                ui.separator();
                ui.label("Springs");
                Self::labeled_drag_f32(ui, "k_spring:", &mut cfg.k_spring, 0.0..=50.0, 0.1);
                Self::labeled_drag_f32(ui, "rest_length:", &mut cfg.rest_length, 0.0..=2.0, 0.01);

                ui.separator();
                ui.label("Repulsion");
                Self::labeled_drag_f32(ui, "k_repulsion:", &mut cfg.k_repulsion, 0.0..=50.0, 0.1);
                Self::labeled_drag_f32(
                    ui,
                    "min_distance:",
                    &mut cfg.min_distance,
                    0.0..=2.0,
                    0.01,
                );

                ui.separator();
                ui.label("Integration");
                Self::labeled_drag_f32(ui, "dt:", &mut cfg.dt, 0.001..=1.0, 0.005);
                Self::labeled_drag_f32(ui, "damping:", &mut cfg.damping, 0.0..=1.0, 0.01);
                Self::labeled_drag_f32(ui, "max_speed:", &mut cfg.max_speed, 0.0..=10.0, 0.05);
                Self::labeled_drag_usize(ui, "iterations:", &mut cfg.iterations, 0..=100_000, 10.0);
                Self::labeled_drag_usize(
                    ui,
                    "contour_interval:",
                    &mut cfg.contour_interval,
                    0..=100,
                    1.0,
                );

                ui.separator();
                ui.label("Growth");
                Self::labeled_drag_usize(
                    ui,
                    "growth_interval:",
                    &mut cfg.growth_interval,
                    0..=100,
                    1.0,
                );
                Self::labeled_drag_usize(ui, "growth_start:", &mut cfg.growth_start, 0..=100_000, 1.0);
                Self::labeled_drag_usize(ui, "growth_end:", &mut cfg.growth_end, 0..=100_000, 1.0);

                ui.separator();
                ui.label("Reset");
                Self::labeled_drag_usize(ui, "nr_points:", &mut self.nr_points, 0..=500, 1.0);
                Self::labeled_drag_f32(
                    ui,
                    "initial_spread:",
                    &mut self.maze.cfg.initial_spread,
                    0.0..=5.0,
                    0.05,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.maze.cfg = OrganicConfig::default();
                }
            });
    }

    /// Builds the small floating toolbar for choosing the contour shape.
    fn ui_toolbar(&mut self, ctx: &egui::Context) {
        egui::Area::new("toolbar".into())
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 100.0))
            .movable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 32))
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            for (shape, label) in [(TORUS, "◎ Torus"), (RECTANGLE, "■ Rect")] {
                                if ui.selectable_label(self.shape == shape, label).clicked()
                                    && self.shape != shape
                                {
                                    self.shape = shape;
                                    self.reset();
                                }
                            }
                        });
                    });
            });
    }

    /// Builds the central panel where the maze is drawn and navigated.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(10.0, 1000.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            // Contour rings.
            let contour_stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
            for ring in self.maze.contour.rings() {
                let points: Vec<egui::Pos2> =
                    ring.iter().map(|&p| self.world_to_screen(p, rect)).collect();
                painter.add(egui::Shape::line(points, contour_stroke));
            }

            // Voronoi walls.
            if self.show_walls {
                let stroke = egui::Stroke::new(2.0, egui::Color32::WHITE);
                for &(a, b) in &self.walls {
                    painter.line_segment(
                        [self.world_to_screen(a, rect), self.world_to_screen(b, rect)],
                        stroke,
                    );
                }
            }

            // Path connections.
            let nodes = &self.maze.network.nodes;
            for &(a, b) in &self.maze.network.connections {
                let pa = self.world_to_screen(nodes[a].pos, rect);
                let pb = self.world_to_screen(nodes[b].pos, rect);
                painter.line_segment([pa, pb], egui::Stroke::new(1.0, egui::Color32::LIGHT_GREEN));
            }

            // Nodes (newly grown in red, pinned in yellow).
            for (i, node) in nodes.iter().enumerate() {
                let p = self.world_to_screen(node.pos, rect);
                let color = if self.last_new_ids.contains(&i) {
                    egui::Color32::RED
                } else if self.maze.network.is_fixed(i) {
                    egui::Color32::YELLOW
                } else {
                    egui::Color32::LIGHT_BLUE
                };
                painter.circle_filled(p, 3.0, color);
            }

            // Auto-run simulation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
        self.ui_toolbar(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut viewer = Viewer::new();
        viewer.zoom = 120.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let eps = 1e-4;
        for p in [Vec2::ZERO, Vec2::new(1.0, -0.5), Vec2::new(-0.35, 0.825)] {
            let back = viewer.screen_to_world(viewer.world_to_screen(p, rect), rect);
            assert!(
                (back - p).abs().max_element() < eps,
                "roundtrip mismatch: p={p:?}, back={back:?}"
            );
        }
    }

    #[test]
    fn reset_restores_basic_state() {
        let mut viewer = Viewer::new();
        viewer.maze.cfg.k_spring = 1.0;
        viewer.step_once();
        viewer.last_new_ids.push(42);
        viewer.running = true;

        viewer.reset();

        assert_eq!(viewer.maze.network.nodes.len(), 40);
        assert_eq!(viewer.maze.iteration(), 0);
        // Entrance and exit are pinned.
        assert!(viewer.maze.network.is_fixed(0));
        assert!(viewer.maze.network.is_fixed(39));
        // Configuration survives a reset.
        assert_eq!(viewer.maze.cfg.k_spring, 1.0);
        assert!(viewer.last_new_ids.is_empty());
        assert!(!viewer.running);
    }

    #[test]
    fn clear_removes_all_nodes() {
        let mut viewer = Viewer::new();
        assert!(!viewer.maze.network.nodes.is_empty());
        viewer.last_new_ids.push(0);

        viewer.clear();

        assert!(viewer.maze.network.nodes.is_empty());
        assert!(viewer.maze.network.connections.is_empty());
        assert!(viewer.last_new_ids.is_empty());

        // Stepping an empty maze is harmless.
        viewer.step_once();
        assert!(viewer.maze.network.nodes.is_empty());
    }

    #[test]
    fn step_once_advances_and_reports_growth() {
        let mut viewer = Viewer::new();
        viewer.maze.cfg.growth_start = 0;
        viewer.maze.cfg.growth_interval = 1;
        viewer.steps_per_frame = 3;

        viewer.step_once();

        assert_eq!(viewer.maze.iteration(), 3);
        // Iteration 0 is not after growth_start; 1 and 2 grow.
        assert_eq!(viewer.last_new_ids, vec![40, 41]);
        assert_eq!(viewer.maze.network.nodes.len(), 42);
    }

    #[test]
    fn running_stops_when_finished() {
        let mut viewer = Viewer::new();
        viewer.maze.cfg.iterations = 2;
        viewer.running = true;
        viewer.step_once();
        assert_eq!(viewer.maze.iteration(), 2);
        assert!(!viewer.running);
    }

    #[test]
    fn walls_follow_the_toggle() {
        let mut viewer = Viewer::new();
        viewer.show_walls = true;
        viewer.steps_per_frame = 1;
        viewer.step_once();
        assert!(!viewer.walls.is_empty());
    }
}
