use bevy::prelude::*;

use crate::{
    palette::to_color,
    visual::{
        edges::{EdgeVisual, edge_transform},
        network::Network,
        nodes::NodeVisual,
        setup::scene::NetworkRoot,
    },
};

/// System: Push the simulation state into the scene entities
///
/// Root rotation, node transforms and colors, then edge geometry from the two
/// endpoint positions and opacity from their pointer influence.
pub fn sync_scene(
    network: Option<Res<Network>>,
    mut roots: Query<&mut Transform, (With<NetworkRoot>, Without<NodeVisual>, Without<EdgeVisual>)>,
    mut nodes: Query<(&NodeVisual, &mut Transform, &MeshMaterial3d<StandardMaterial>), Without<EdgeVisual>>,
    mut edges: Query<(&EdgeVisual, &mut Transform, &MeshMaterial3d<StandardMaterial>), Without<NodeVisual>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(network) = network else {
        return;
    };

    for mut transform in &mut roots {
        transform.rotation = network.orientation();
    }

    for (visual, mut transform, material) in &mut nodes {
        let Some(node) = network.nodes().get(visual.index) else {
            continue;
        };
        let Some(look) = network.node_appearance(visual.index) else {
            continue;
        };

        transform.translation = node.position;
        transform.scale = Vec3::splat(look.scale);
        set_color(&mut materials, material, to_color(look.color, look.opacity));
    }

    let edge_color = network.palette().edge_color();
    let all_edges = network.edges().as_slice();
    for (visual, mut transform, material) in &mut edges {
        let Some(edge) = all_edges.get(visual.index) else {
            continue;
        };

        let (a, b) = network.edge_endpoints(edge);
        *transform = edge_transform(a, b);
        set_color(&mut materials, material, to_color(edge_color, network.edge_opacity(edge)));
    }
}

/// Only touch the material when the color really changed, so untouched
/// materials are not re-uploaded
fn set_color(materials: &mut Assets<StandardMaterial>, material: &MeshMaterial3d<StandardMaterial>, color: Color) {
    let unchanged = materials
        .get(&material.0)
        .is_some_and(|current| current.base_color == color);
    if unchanged {
        return;
    }

    if let Some(current) = materials.get_mut(&material.0) {
        current.base_color = color;
    }
}
