pub mod repulsion;

use bevy::math::Vec3;

use crate::{config::PhysicsConfig, graph::Node};

pub use repulsion::{Repulsion, pointer_repulsion};

/// One integration step for one node.
///
/// `pointer` is the pointer target in the structure's local frame, present
/// only while the pointer counts as engaged. `time_secs` drives the idle pulse.
///
/// The node is a spring-damper anchored at its rest position: velocity is
/// applied at a sub-unit step, damped, then nudged back toward rest with a
/// stiffness that grows with the drift. The pointer adds an outward impulse.
pub fn integrate_node(node: &mut Node, pointer: Option<Vec3>, time_secs: f32, config: &PhysicsConfig) {
    let push = pointer.and_then(|target| pointer_repulsion(node.position, target, node.mass, config));

    match push {
        Some(push) => {
            node.velocity += push.impulse;
            node.influence = push.influence;

            let target_opacity = config.opacity_hover_base + config.opacity_hover_gain * push.influence;
            if node.opacity < target_opacity {
                node.opacity += (target_opacity - node.opacity) * config.opacity_nudge;
            }
        }
        None => {
            node.influence = 0.0;
            if node.opacity > config.opacity_floor {
                node.opacity = (node.opacity * config.opacity_decay).max(config.opacity_floor);
            }
        }
    }

    let velocity = node.velocity;
    node.position += velocity * config.integration_step;
    node.velocity *= config.damping;

    // Stiffer pull the further the node has drifted
    let to_rest = node.rest_position() - node.position;
    let restoring = (config.restoring_base + to_rest.length() * config.restoring_gain).min(config.restoring_max);
    node.velocity += to_rest * restoring;

    if !node.is_glow_candidate && !node.is_highlight {
        let pulse = (time_secs * node.pulse_speed + node.pulse_phase).sin();
        node.scale = node.base_scale * (1.0 + config.pulse_amplitude * pulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeId, NodeSeed};
    use bevy::math::Vec4;

    fn node(rest: Vec3) -> Node {
        Node::new(
            NodeId(0),
            rest,
            NodeSeed {
                mass: 1.5,
                pulse_speed: 1.0,
                pulse_phase: 0.0,
                is_glow_candidate: false,
                next_glow_at: f64::MAX,
                base_color: Vec4::ONE,
            },
            0.5,
        )
    }

    #[test]
    fn test_displaced_node_returns_to_rest() {
        let config = PhysicsConfig::default();
        let rest = Vec3::new(0.0, 0.0, 24.0);
        let mut n = node(rest);
        n.position = rest + Vec3::new(2.0, -1.5, 1.0);
        n.velocity = Vec3::new(0.3, 0.0, -0.2);

        for frame in 0..600 {
            integrate_node(&mut n, None, frame as f32 / 60.0, &config);
        }

        assert!(n.displacement() < 1e-3, "still {} away", n.displacement());
        assert!(n.velocity.length() < 1e-3);
        assert_eq!(n.rest_position(), rest);
    }

    #[test]
    fn test_pointer_pushes_node_away() {
        let config = PhysicsConfig::default();
        let rest = Vec3::new(0.0, 0.0, 24.0);
        let mut n = node(rest);
        let pointer = Vec3::new(-2.0, 0.0, 24.0);

        for frame in 0..120 {
            integrate_node(&mut n, Some(pointer), frame as f32 / 60.0, &config);
        }

        assert!(n.position.x > rest.x + 0.05, "node at {:?}", n.position);
        assert!(n.influence > 0.0);
        assert!(n.opacity > 0.5);
    }

    #[test]
    fn test_opacity_decays_back_to_floor() {
        let config = PhysicsConfig::default();
        let mut n = node(Vec3::Z * 24.0);
        n.opacity = 0.8;

        for _ in 0..1000 {
            integrate_node(&mut n, None, 0.0, &config);
            assert!(n.opacity >= config.opacity_floor);
        }
        assert_eq!(n.opacity, config.opacity_floor);
    }

    #[test]
    fn test_idle_pulse_scales_around_base() {
        let config = PhysicsConfig::default();
        let mut n = node(Vec3::Z * 24.0);

        integrate_node(&mut n, None, std::f32::consts::FRAC_PI_2, &config);
        assert!((n.scale - 1.05).abs() < 1e-5);

        n.is_highlight = true;
        n.base_scale = 2.2;
        n.scale = 2.2;
        integrate_node(&mut n, None, 0.3, &config);
        assert_eq!(n.scale, 2.2, "highlight scale stays fixed");
    }
}
