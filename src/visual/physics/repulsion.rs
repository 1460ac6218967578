use bevy::math::Vec3;

use crate::config::PhysicsConfig;

/// Pointer push on one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsion {
    /// Velocity change for this frame
    pub impulse: Vec3,
    /// 0.0 at the edge of the interaction radius, `influence_scale` at the pointer
    pub influence: f32,
}

/// Repulsion away from the pointer target, or `None` outside the interaction radius.
///
/// Falls off with the square of the remaining distance and is divided by mass.
pub fn pointer_repulsion(node_position: Vec3, pointer: Vec3, mass: f32, config: &PhysicsConfig) -> Option<Repulsion> {
    let offset = node_position - pointer;
    let distance = offset.length();
    if distance >= config.interaction_radius {
        return None;
    }

    let falloff = (1.0 - distance / config.interaction_radius).max(0.0);
    // A node sitting exactly on the target is pushed outward from the center
    let direction = offset
        .try_normalize()
        .unwrap_or_else(|| node_position.normalize_or_zero());
    let magnitude = config.repulsion_strength * falloff * falloff / mass;

    Some(Repulsion {
        impulse: direction * magnitude,
        influence: falloff * config.influence_scale,
    })
}
