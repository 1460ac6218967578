use bevy::math::{Vec3, Vec4};
use std::fmt;

/// Index of a node in the network's node array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Per-node attributes rolled once at construction
#[derive(Debug, Clone, Copy)]
pub struct NodeSeed {
    pub mass: f32,
    pub pulse_speed: f32,
    pub pulse_phase: f32,
    pub is_glow_candidate: bool,
    pub next_glow_at: f64,
    pub base_color: Vec4,
}

/// A particle on the sphere
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// Anchor on the sphere surface; never changes after construction
    rest_position: Vec3,
    pub position: Vec3,
    pub velocity: Vec3,
    /// >= 1, divides the pointer force
    pub mass: f32,
    pub pulse_phase: f32,
    pub pulse_speed: f32,
    pub is_glow_candidate: bool,
    /// Milliseconds on the engine clock
    pub next_glow_at: f64,
    pub glow_intensity: f32,
    pub base_color: Vec4,

    // Render state
    pub is_highlight: bool,
    pub base_scale: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Pointer influence this frame (0.0 = none)
    pub influence: f32,
}

impl Node {
    pub fn new(id: NodeId, rest_position: Vec3, seed: NodeSeed, opacity: f32) -> Self {
        Node {
            id,
            rest_position,
            position: rest_position,
            velocity: Vec3::ZERO,
            mass: seed.mass,
            pulse_phase: seed.pulse_phase,
            pulse_speed: seed.pulse_speed,
            is_glow_candidate: seed.is_glow_candidate,
            next_glow_at: seed.next_glow_at,
            glow_intensity: 0.0,
            base_color: seed.base_color,
            is_highlight: false,
            base_scale: 1.0,
            scale: 1.0,
            opacity,
            influence: 0.0,
        }
    }

    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    pub fn displacement(&self) -> f32 {
        self.position.distance(self.rest_position)
    }
}
