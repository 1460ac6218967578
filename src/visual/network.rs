use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{
    config::NetworkConfig,
    graph::{EdgeSet, NetworkEdge, Node, build_edges, build_nodes},
    palette::Palette,
    visual::{
        interactions::pointer::PointerState,
        nodes::{NodeAppearance, is_strong_glow, node_appearance, update_glow},
        physics::integrate_node,
        rotation::RotationController,
    },
};

/// The simulated node sphere: nodes, static topology and global spin.
///
/// Everything here is plain data; `step` advances one frame and never touches
/// the renderer, so the whole simulation runs headless.
#[derive(Resource, Debug)]
pub struct Network {
    nodes: Vec<Node>,
    edges: EdgeSet,
    rotation: RotationController,
    palette: Palette,
    config: NetworkConfig,
    rng: StdRng,
}

impl Network {
    /// Build nodes and edges for `palette`, seeding glow timers from `now` (ms)
    pub fn build(config: &NetworkConfig, palette: Palette, now: f64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::build_with_rng(config, palette, now, rng)
    }

    pub fn build_with_rng(config: &NetworkConfig, palette: Palette, now: f64, mut rng: StdRng) -> Self {
        let radius = config.geometry.sphere_radius;
        let nodes = build_nodes(
            &config.geometry,
            &config.glow,
            palette,
            config.physics.opacity_floor,
            now,
            &mut rng,
        );
        let edges = build_edges(&nodes, radius, &config.topology, &mut rng);

        Self {
            nodes,
            edges,
            rotation: RotationController::new(&config.rotation),
            palette,
            config: config.clone(),
            rng,
        }
    }

    /// Advance one frame at engine time `now` (ms).
    ///
    /// Order: physics against the resolved pointer target, then glow timers,
    /// then the global rotation.
    pub fn step(&mut self, now: f64, pointer: &PointerState) {
        let physics = &self.config.physics;
        let engaged = pointer.is_engaged(now, physics.pointer_idle_window_ms);

        // Compare against nodes in the structure's own frame
        let local_pointer = engaged.then(|| self.rotation.orientation().inverse() * pointer.world);
        let time_secs = (now / 1000.0) as f32;

        for node in &mut self.nodes {
            if is_strong_glow(node, &self.config.glow) {
                node.influence = 0.0;
                continue;
            }
            integrate_node(node, local_pointer, time_secs, physics);
        }

        for node in &mut self.nodes {
            update_glow(node, now, &self.config.glow, &mut self.rng);
        }

        self.rotation.update(engaged, now, &self.config.rotation);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn orientation(&self) -> Quat {
        self.rotation.orientation()
    }

    pub fn node_appearance(&self, index: usize) -> Option<NodeAppearance> {
        self.nodes
            .get(index)
            .map(|node| node_appearance(node, self.palette, &self.config.glow))
    }

    /// Current (local-frame) positions of an edge's two endpoints
    pub fn edge_endpoints(&self, edge: &NetworkEdge) -> (Vec3, Vec3) {
        (
            self.nodes[edge.edge.from.index()].position,
            self.nodes[edge.edge.to.index()].position,
        )
    }

    /// Edge opacity brightened by the average pointer influence of its endpoints
    pub fn edge_opacity(&self, edge: &NetworkEdge) -> f32 {
        let topology = &self.config.topology;
        let a = self.nodes[edge.edge.from.index()].influence;
        let b = self.nodes[edge.edge.to.index()].influence;
        let average = (a + b) * 0.5;

        (edge.base_opacity + average * topology.edge_influence_gain).min(topology.edge_opacity_cap)
    }
}
