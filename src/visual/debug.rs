use bevy::prelude::*;

use crate::{
    config::NetworkConfig,
    visual::{interactions::pointer::PointerState, network::Network},
};

/// Displacement below which no rest line is drawn
const MIN_DRAWN_DISPLACEMENT: f32 = 0.02;

pub fn toggle_debug_overlay(keys: Res<ButtonInput<KeyCode>>, mut config: ResMut<NetworkConfig>) {
    if keys.just_pressed(KeyCode::F3) {
        config.debug_overlay = !config.debug_overlay;
        info!("Debug overlay {}", if config.debug_overlay { "on" } else { "off" });
    }
}

/// Debug visualization of the interaction and physics state
pub fn draw_debug_overlay(
    config: Res<NetworkConfig>,
    network: Option<Res<Network>>,
    pointer: Option<Res<PointerState>>,
    mut gizmos: Gizmos,
) {
    if !config.debug_overlay {
        return;
    }
    let Some(network) = network else {
        return;
    };

    // Interaction sphere the pointer ray is tested against
    gizmos.sphere(
        Isometry3d::IDENTITY,
        config.geometry.sphere_radius,
        Color::srgba(0.5, 0.5, 0.5, 0.3),
    );

    if let Some(pointer) = pointer {
        // Resolved target (green) and interaction radius (yellow)
        gizmos.sphere(
            Isometry3d::from_translation(pointer.world),
            0.4,
            Color::srgb(0.0, 1.0, 0.0),
        );
        gizmos.sphere(
            Isometry3d::from_translation(pointer.world),
            config.physics.interaction_radius,
            Color::srgba(1.0, 1.0, 0.0, 0.25),
        );
    }

    // Rest → current for displaced nodes
    let orientation = network.orientation();
    for node in network.nodes() {
        if node.displacement() < MIN_DRAWN_DISPLACEMENT {
            continue;
        }
        gizmos.line(
            orientation * node.rest_position(),
            orientation * node.position,
            Color::srgb(1.0, 0.4, 0.0),
        );
    }
}
