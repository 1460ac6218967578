use bevy::prelude::*;

use crate::{
    config::NetworkConfig,
    palette::{Palette, to_color},
    visual::{
        edges::{EdgeVisual, edge_transform},
        interactions::pointer::PointerState,
        network::Network,
        nodes::NodeVisual,
    },
};

/// Parent of every node and edge entity; carries the global rotation
#[derive(Component, Debug)]
pub struct NetworkRoot;

/// Render resources acquired by one build, released together on teardown
#[derive(Resource, Debug)]
pub struct SceneHandles {
    pub root: Entity,
    /// Palette the scene was built with
    pub palette: Palette,
    pub node_mesh: Handle<Mesh>,
    pub edge_mesh: Handle<Mesh>,
    pub node_materials: Vec<Handle<StandardMaterial>>,
    pub edge_materials: Vec<Handle<StandardMaterial>>,
}

pub(crate) fn blend_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

/// Build the network and spawn one entity per node and per edge.
///
/// Inserts `Network`, `PointerState` and `SceneHandles`.
pub fn spawn_scene(world: &mut World, now: f64) {
    let config = world.resource::<NetworkConfig>().clone();
    let palette = *world.resource::<Palette>();
    let network = Network::build(&config, palette, now);
    if network.edges().is_empty() {
        warn!("Network has no edges: node count is too low for the neighbor cutoff");
    }

    world.insert_resource(ClearColor(palette.background()));

    let (node_mesh, edge_mesh) = {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        (
            meshes.add(Sphere::new(config.view.node_radius)),
            meshes.add(Cylinder::new(config.view.edge_thickness, 1.0)),
        )
    };

    let (node_materials, edge_materials) = {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let nodes: Vec<_> = (0..network.nodes().len())
            .filter_map(|i| network.node_appearance(i))
            .map(|look| materials.add(blend_material(to_color(look.color, look.opacity))))
            .collect();
        let edges: Vec<_> = network
            .edges()
            .iter()
            .map(|edge| materials.add(blend_material(to_color(palette.edge_color(), network.edge_opacity(edge)))))
            .collect();
        (nodes, edges)
    };

    let root = world
        .spawn((
            NetworkRoot,
            Transform::from_rotation(network.orientation()),
            Visibility::default(),
        ))
        .id();

    for (index, (node, material)) in network.nodes().iter().zip(&node_materials).enumerate() {
        world.spawn((
            NodeVisual { index },
            Mesh3d(node_mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(node.position).with_scale(Vec3::splat(node.scale)),
            ChildOf(root),
        ));
    }

    for (index, (edge, material)) in network.edges().iter().zip(&edge_materials).enumerate() {
        let (a, b) = network.edge_endpoints(edge);
        world.spawn((
            EdgeVisual { index },
            Mesh3d(edge_mesh.clone()),
            MeshMaterial3d(material.clone()),
            edge_transform(a, b),
            ChildOf(root),
        ));
    }

    info!(
        "Network built: {} nodes, {} edges ({} palette)",
        network.nodes().len(),
        network.edges().len(),
        if palette.dark { "dark" } else { "light" }
    );

    world.insert_resource(SceneHandles {
        root,
        palette,
        node_mesh,
        edge_mesh,
        node_materials,
        edge_materials,
    });
    world.insert_resource(network);
    world.insert_resource(PointerState::default());
}

/// Despawn the scene and free its meshes and materials.
///
/// Every step tolerates a partial build. Returns false when there was nothing
/// to release.
pub fn release_scene(world: &mut World) -> bool {
    world.remove_resource::<Network>();
    world.remove_resource::<PointerState>();

    let Some(handles) = world.remove_resource::<SceneHandles>() else {
        return false;
    };

    if let Ok(root) = world.get_entity_mut(handles.root) {
        // Children go with it
        root.despawn();
    }

    if let Some(mut meshes) = world.get_resource_mut::<Assets<Mesh>>() {
        meshes.remove(&handles.node_mesh);
        meshes.remove(&handles.edge_mesh);
    }

    if let Some(mut materials) = world.get_resource_mut::<Assets<StandardMaterial>>() {
        for handle in handles.node_materials.iter().chain(&handles.edge_materials) {
            materials.remove(handle);
        }
    }

    debug!(
        "Released {} node and {} edge materials",
        handles.node_materials.len(),
        handles.edge_materials.len()
    );
    true
}
