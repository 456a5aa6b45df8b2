//! Organic growth maze: a spring-mass path relaxed inside a contour while
//! it keeps growing.

use glam::Vec2;
use rand::Rng;

use crate::{
    config::OrganicConfig, contour::Contour, document::MazeDocument, force_buffer::ForceBuffer,
    network::SpringNetwork, phases, types::NodeId,
};

/// What a single [`OrganicGrowth::step`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Iteration that was just run.
    pub iteration: usize,
    /// Node inserted by the growth phase, if any.
    pub grown: Option<NodeId>,
    /// Whether contour forces were part of this step.
    pub contour_applied: bool,
    /// Nodes moved by the initial contour correction (first step only).
    pub corrected: usize,
}

#[derive(Debug)]
pub struct OrganicGrowth {
    pub network: SpringNetwork,
    pub contour: Contour,
    pub cfg: OrganicConfig,
    forces: ForceBuffer,
    iteration: usize,
}

impl OrganicGrowth {
    /// A chain of `nr_points` random nodes with the given pins.
    ///
    /// `fixed_points` typically pins the first and last node, which become
    /// the maze entrance and exit.
    pub fn new(
        nr_points: usize,
        fixed_points: &[(NodeId, Vec2)],
        contour: Contour,
        cfg: OrganicConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mut network = SpringNetwork::chain(nr_points, cfg.initial_spread, rng);
        for &(id, pos) in fixed_points {
            network.pin(id, pos);
        }
        Self::from_network(network, contour, cfg)
    }

    pub fn from_network(network: SpringNetwork, contour: Contour, cfg: OrganicConfig) -> Self {
        let forces = ForceBuffer::with_len(network.nodes.len());
        Self {
            network,
            contour,
            cfg,
            forces,
            iteration: 0,
        }
    }

    /// Iterations run so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.cfg.iterations
    }

    /// Runs one iteration of the force pipeline, then the growth phase.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepReport {
        let it = self.iteration;
        let mut report = StepReport {
            iteration: it,
            ..StepReport::default()
        };

        if it == 0 {
            report.corrected = phases::contour_correction(&mut self.network, &self.contour);
        }

        phases::spring_phase(&self.network, &self.cfg, &mut self.forces);
        phases::repulsion_phase(&self.network, &self.cfg, &mut self.forces);
        let n = self.cfg.contour_interval;
        if n > 0 && it % n == n - 1 {
            phases::contour_phase(&self.network, &self.contour, &self.cfg, &mut self.forces);
            report.contour_applied = true;
        }
        phases::integrate_phase(&mut self.network, &self.forces, &self.cfg);
        report.grown = phases::growth_phase(&mut self.network, it, &self.cfg, rng);

        self.iteration += 1;
        report
    }

    /// Runs the remaining iterations up to `cfg.iterations`.
    pub fn simulate(&mut self, rng: &mut impl Rng) {
        let total = self.cfg.iterations;
        while self.iteration < total {
            self.step(rng);
            log::debug!(
                "iteration {}/{total}: {} nodes",
                self.iteration,
                self.network.nodes.len()
            );
        }
        log::info!(
            "organic growth finished: {} nodes, {} connections",
            self.network.nodes.len(),
            self.network.connections.len()
        );
    }

    /// Nodes and connections as an `OrganicGrowthMaze` document.
    pub fn to_document(&self) -> MazeDocument {
        MazeDocument::from_organic(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn small_cfg() -> OrganicConfig {
        OrganicConfig {
            iterations: 120,
            growth_start: 10,
            growth_end: 60,
            ..OrganicConfig::default()
        }
    }

    #[test]
    fn first_step_corrects_and_contour_runs_on_schedule() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut maze = OrganicGrowth::new(
            10,
            &[],
            Contour::rectangle(Vec2::splat(0.5)),
            small_cfg(),
            &mut rng,
        );

        let first = maze.step(&mut rng);
        assert_eq!(first.iteration, 0);
        assert!(!first.contour_applied);

        for _ in 1..9 {
            maze.step(&mut rng);
        }
        let tenth = maze.step(&mut rng);
        assert_eq!(tenth.iteration, 9);
        assert!(tenth.contour_applied);
    }

    #[test]
    fn simulate_grows_the_path_and_keeps_pins() {
        let mut rng = StdRng::seed_from_u64(42);
        let pins = [(0, Vec2::new(-1.5, 0.0)), (19, Vec2::new(1.5, 0.0))];
        let mut maze = OrganicGrowth::new(
            20,
            &pins,
            Contour::torus(0.5, 1.5, 64),
            small_cfg(),
            &mut rng,
        );

        maze.simulate(&mut rng);

        assert!(maze.is_finished());
        // Growth on even iterations in (10, 60): 24 new nodes.
        assert_eq!(maze.network.nodes.len(), 20 + 24);
        // Splitting keeps the path a path.
        assert_eq!(
            maze.network.connections.len(),
            maze.network.nodes.len() - 1
        );
        assert_eq!(maze.network.nodes[0].pos, Vec2::new(-1.5, 0.0));
        assert_eq!(maze.network.nodes[19].pos, Vec2::new(1.5, 0.0));
        assert!(
            maze.network
                .nodes
                .iter()
                .all(|n| n.pos.is_finite())
        );

        let doc = maze.to_document();
        assert_eq!(doc.node_count(), 44);
        assert_eq!(doc.connections(), maze.network.connections);
    }

    #[test]
    fn simulate_is_idempotent_once_finished() {
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = OrganicConfig {
            iterations: 5,
            ..OrganicConfig::default()
        };
        let mut maze = OrganicGrowth::new(3, &[], Contour::rectangle(Vec2::ONE), cfg, &mut rng);
        maze.simulate(&mut rng);
        maze.simulate(&mut rng);
        assert_eq!(maze.iteration(), 5);
    }

    #[test]
    fn negative_spread_from_json_still_builds() {
        let mut rng = StdRng::seed_from_u64(6);
        let cfg: OrganicConfig = serde_json::from_str(r#"{ "initial_spread": -1.0 }"#).unwrap();
        let maze = OrganicGrowth::new(5, &[], Contour::rectangle(Vec2::ONE), cfg, &mut rng);
        assert_eq!(maze.network.nodes.len(), 5);
    }
}
