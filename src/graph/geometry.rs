use bevy::math::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use super::node::{Node, NodeId, NodeSeed};
use crate::config::{GeometryConfig, GlowConfig};
use crate::palette::Palette;

/// Reference directions for the highlight nodes, as (colatitude, longitude) in degrees
const HIGHLIGHT_ANGLES: [(f32, f32); 10] = [
    (30.0, 0.0),
    (30.0, 180.0),
    (60.0, 90.0),
    (60.0, 270.0),
    (90.0, 45.0),
    (90.0, 225.0),
    (120.0, 135.0),
    (120.0, 315.0),
    (150.0, 60.0),
    (150.0, 240.0),
];

/// Point on a sphere of `radius` from colatitude `phi` and longitude `theta`
pub fn spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Even spacing of `count` points on a sphere (Fibonacci sphere).
///
/// Point `i` sits at colatitude `acos(-1 + 2i/N)` and longitude `sqrt(Nπ)·φ`,
/// which keeps the surface density flat instead of bunching at the poles.
pub fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    let n = count as f32;
    let spiral = (n * PI).sqrt();

    (0..count)
        .map(|i| {
            let phi = (-1.0 + 2.0 * i as f32 / n).clamp(-1.0, 1.0).acos();
            let theta = spiral * phi;
            spherical(radius, phi, theta)
        })
        .collect()
}

/// Build the node array: positions on the sphere plus randomized per-node attributes
pub fn build_nodes(
    geometry: &GeometryConfig,
    glow: &GlowConfig,
    palette: Palette,
    opacity: f32,
    now: f64,
    rng: &mut impl Rng,
) -> Vec<Node> {
    let radius = geometry.sphere_radius;
    let (mass_min, mass_max) = geometry.mass_range;
    let (pulse_min, pulse_max) = geometry.pulse_speed_range;

    let mut nodes: Vec<Node> = fibonacci_sphere(geometry.node_count, radius)
        .into_iter()
        .enumerate()
        .map(|(i, rest)| {
            let seed = NodeSeed {
                mass: rng.random_range(mass_min..mass_max),
                pulse_speed: rng.random_range(pulse_min..pulse_max),
                pulse_phase: rng.random_range(0.0..TAU),
                is_glow_candidate: rng.random_bool(glow.candidate_probability),
                next_glow_at: now + rng.random_range(0.0..glow.initial_window_ms),
                base_color: palette.node_color(rest, radius),
            };
            Node::new(NodeId(i), rest, seed, opacity)
        })
        .collect();

    for id in highlight_nodes(&nodes, radius) {
        let node = &mut nodes[id.index()];
        node.is_highlight = true;
        node.base_scale = geometry.highlight_scale;
        node.scale = geometry.highlight_scale;
        node.base_color = palette.accent_color();
    }

    nodes
}

/// Nodes closest to each highlight reference direction (deduplicated)
pub fn highlight_nodes(nodes: &[Node], radius: f32) -> Vec<NodeId> {
    let mut found: Vec<NodeId> = Vec::with_capacity(HIGHLIGHT_ANGLES.len());

    for (colatitude, longitude) in HIGHLIGHT_ANGLES {
        let target = spherical(radius, colatitude.to_radians(), longitude.to_radians());
        let nearest = nodes
            .iter()
            .min_by(|a, b| {
                let da = a.rest_position().distance_squared(target);
                let db = b.rest_position().distance_squared(target);
                da.total_cmp(&db)
            })
            .map(|node| node.id);

        if let Some(id) = nearest
            && !found.contains(&id)
        {
            found.push(id);
        }
    }

    found
}
