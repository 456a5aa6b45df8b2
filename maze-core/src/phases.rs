//! Simulation phases of the organic growth spring-mass system.
//!
//! One iteration looks like:
//! 1. [`spring_phase`]: connections pull their endpoints towards the rest
//!    length, accumulating into a [`ForceBuffer`].
//! 2. [`repulsion_phase`]: unconnected nodes that come too close push
//!    each other apart.
//! 3. [`contour_phase`]: every few iterations, nodes outside the contour
//!    are pulled back towards it.
//! 4. [`integrate_phase`]: positions and velocities advance by one time
//!    step, pinned nodes are restored.
//! 5. [`growth_phase`]: inside the growth window a random connection is
//!    split, lengthening the maze path.

use rand::Rng;

use crate::{
    config::OrganicConfig, contour::Contour, force_buffer::ForceBuffer, network::SpringNetwork,
    types::NodeId,
};

/// Accumulates spring forces along every connection.
///
/// For a connection `(i, j)` with displacement `d = x_j - x_i`, the force
/// `k_spring * (|d| - rest_length) * d / |d|` is added to `i` and
/// subtracted from `j`. Coincident endpoints have no defined direction and
/// contribute nothing.
///
/// The buffer is resized (and cleared) to the node count first.
pub fn spring_phase(net: &SpringNetwork, cfg: &OrganicConfig, acc: &mut ForceBuffer) {
    acc.ensure_len(net.nodes.len());

    for &(i, j) in &net.connections {
        let d = net.nodes[j].pos - net.nodes[i].pos;
        let len = d.length();
        if len <= f32::EPSILON {
            continue;
        }
        let f = cfg.k_spring * (len - cfg.rest_length) * d / len;
        acc.add(i, f);
        acc.add(j, -f);
    }
}

/// Pushes apart unconnected nodes closer than `min_distance`.
///
/// For each pair at distance `r < min_distance`, node `i` receives
/// `-k_repulsion * (min_distance - r) * (x_j - x_i) / (r + min_distance)`
/// and `j` the opposite. Connected pairs are left to the springs.
pub fn repulsion_phase(net: &SpringNetwork, cfg: &OrganicConfig, acc: &mut ForceBuffer) {
    let connected = net.connection_set();
    let md = cfg.min_distance;
    let md2 = md * md;

    for i in 0..net.nodes.len() {
        let pi = net.nodes[i].pos;
        for j in (i + 1)..net.nodes.len() {
            let d = net.nodes[j].pos - pi;
            let r2 = d.length_squared();
            if r2 >= md2 || connected.contains(&(i, j)) {
                continue;
            }
            let r = r2.sqrt();
            let f = -cfg.k_repulsion * (md - r) * d / (r + md);
            acc.add(i, f);
            acc.add(j, -f);
        }
    }
}

/// Pulls nodes outside `contour` towards their nearest contour point,
/// scaled by `k_repulsion`.
pub fn contour_phase(
    net: &SpringNetwork,
    contour: &Contour,
    cfg: &OrganicConfig,
    acc: &mut ForceBuffer,
) {
    for (i, node) in net.nodes.iter().enumerate() {
        if let Some(c) = contour.correction(node.pos) {
            acc.add(i, c * cfg.k_repulsion);
        }
    }
}

/// Moves every node outside `contour` straight onto it.
///
/// Used once before the first iteration so the random initial layout
/// starts inside the boundary. Returns the number of nodes moved.
pub fn contour_correction(net: &mut SpringNetwork, contour: &Contour) -> usize {
    let mut moved = 0;
    for node in &mut net.nodes {
        if let Some(c) = contour.correction(node.pos) {
            node.pos += c;
            moved += 1;
        }
    }
    net.apply_fixed();
    moved
}

/// Advances positions and velocities by `dt` using the accumulated forces.
///
/// `x += v*dt + 0.5*f*dt^2`, then `v += f*dt`, damped by `damping` and
/// clamped per component to `max_speed`. Pinned nodes are put back.
pub fn integrate_phase(net: &mut SpringNetwork, acc: &ForceBuffer, cfg: &OrganicConfig) {
    let dt = cfg.dt;
    let vmax = glam::Vec2::splat(cfg.max_speed.abs());
    for (i, node) in net.nodes.iter_mut().enumerate() {
        let f = acc.get(i);
        node.pos += node.vel * dt + 0.5 * f * dt * dt;
        node.vel = ((node.vel + f * dt) * cfg.damping).clamp(-vmax, vmax);
    }
    net.apply_fixed();
}

/// Splits a random connection when `iteration` falls on the growth
/// schedule.
///
/// Growth happens when `iteration % growth_interval == 0` and
/// `growth_start < iteration < growth_end`.
///
/// ### Returns
/// The id of the inserted node, or `None` if nothing grew.
pub fn growth_phase(
    net: &mut SpringNetwork,
    iteration: usize,
    cfg: &OrganicConfig,
    rng: &mut impl Rng,
) -> Option<NodeId> {
    let on_schedule = cfg.growth_interval > 0
        && iteration % cfg.growth_interval == 0
        && iteration > cfg.growth_start
        && iteration < cfg.growth_end;
    if !on_schedule || net.connections.is_empty() {
        return None;
    }

    let index = rng.random_range(0..net.connections.len());
    Some(net.split_connection(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::{SeedableRng, rngs::StdRng};

    fn pair(a: Vec2, b: Vec2, connected: bool) -> SpringNetwork {
        let connections = if connected { vec![(0, 1)] } else { Vec::new() };
        SpringNetwork::from_parts(vec![a, b], connections)
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let net = pair(Vec2::ZERO, Vec2::new(1.0, 0.0), true);
        let cfg = OrganicConfig::default();
        let mut acc = ForceBuffer::with_len(0);

        spring_phase(&net, &cfg, &mut acc);

        // 5 * (1 - 0.1) along +x on node 0.
        assert!((acc.get(0) - Vec2::new(4.5, 0.0)).length() < 1e-5);
        assert_eq!(acc.get(1), -acc.get(0));
    }

    #[test]
    fn coincident_spring_endpoints_are_skipped() {
        let net = pair(Vec2::ONE, Vec2::ONE, true);
        let mut acc = ForceBuffer::with_len(0);
        spring_phase(&net, &OrganicConfig::default(), &mut acc);
        assert!(acc.iter().all(|f| f == Vec2::ZERO));
    }

    #[test]
    fn close_unconnected_nodes_repel() {
        let net = pair(Vec2::ZERO, Vec2::new(0.1, 0.0), false);
        let cfg = OrganicConfig::default();
        let mut acc = ForceBuffer::with_len(2);

        repulsion_phase(&net, &cfg, &mut acc);

        // -3.5 * (0.2 - 0.1) * 0.1 / 0.3 on node 0, pointing away from node 1.
        let expected = -3.5 * 0.1 * 0.1 / 0.3;
        assert!((acc.get(0).x - expected).abs() < 1e-5);
        assert!(acc.get(0).x < 0.0 && acc.get(1).x > 0.0);
    }

    #[test]
    fn connected_or_distant_nodes_do_not_repel() {
        let cfg = OrganicConfig::default();

        let connected = pair(Vec2::ZERO, Vec2::new(0.1, 0.0), true);
        let mut acc = ForceBuffer::with_len(2);
        repulsion_phase(&connected, &cfg, &mut acc);
        assert_eq!(acc.get(0), Vec2::ZERO);

        let distant = pair(Vec2::ZERO, Vec2::new(0.5, 0.0), false);
        let mut acc = ForceBuffer::with_len(2);
        repulsion_phase(&distant, &cfg, &mut acc);
        assert_eq!(acc.get(0), Vec2::ZERO);
    }

    #[test]
    fn contour_phase_only_touches_escaped_nodes() {
        let net = pair(Vec2::ZERO, Vec2::new(2.0, 0.0), false);
        let contour = Contour::rectangle(Vec2::ONE);
        let cfg = OrganicConfig::default();
        let mut acc = ForceBuffer::with_len(2);

        contour_phase(&net, &contour, &cfg, &mut acc);

        assert_eq!(acc.get(0), Vec2::ZERO);
        assert!((acc.get(1) - Vec2::new(-3.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn contour_correction_moves_nodes_inside() {
        let mut net = pair(Vec2::ZERO, Vec2::new(2.0, 0.5), false);
        let contour = Contour::rectangle(Vec2::ONE);

        assert_eq!(contour_correction(&mut net, &contour), 1);
        assert!((net.nodes[1].pos - Vec2::new(1.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn integrate_applies_damping_clamp_and_pins() {
        let mut net = pair(Vec2::ZERO, Vec2::new(1.0, 0.0), false);
        net.pin(1, Vec2::new(1.0, 0.0));
        let cfg = OrganicConfig::default();
        let mut acc = ForceBuffer::with_len(2);
        acc.add(0, Vec2::new(2.0, 0.0));
        acc.add(1, Vec2::new(50.0, 0.0));

        integrate_phase(&mut net, &acc, &cfg);

        // x = 0.5 * 2 * 0.01, v = 2 * 0.1 * 0.9
        assert!((net.nodes[0].pos.x - 0.01).abs() < 1e-6);
        assert!((net.nodes[0].vel.x - 0.18).abs() < 1e-6);

        // Pinned node stays, its velocity is clamped.
        assert_eq!(net.nodes[1].pos, Vec2::new(1.0, 0.0));
        assert_eq!(net.nodes[1].vel.x, 1.0);
    }

    #[test]
    fn growth_follows_the_schedule() {
        let mut rng = StdRng::seed_from_u64(2);
        let cfg = OrganicConfig::default();
        let mut net = SpringNetwork::chain(4, 1.0, &mut rng);

        assert_eq!(growth_phase(&mut net, 30, &cfg, &mut rng), None);
        assert_eq!(growth_phase(&mut net, 31, &cfg, &mut rng), None);
        assert_eq!(growth_phase(&mut net, 700, &cfg, &mut rng), None);
        assert_eq!(growth_phase(&mut net, 32, &cfg, &mut rng), Some(4));

        assert_eq!(net.nodes.len(), 5);
        assert_eq!(net.connections.len(), 4);
    }
}
