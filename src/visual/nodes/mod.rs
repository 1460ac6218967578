pub mod glow;

use crate::{config::GlowConfig, graph::Node, palette::Palette};
use bevy::prelude::*;

pub use glow::{is_strong_glow, update_glow, visible_glow};

/// Marks the mesh entity drawing one node
#[derive(Component, Debug)]
pub struct NodeVisual {
    pub index: usize,
}

/// What a node looks like this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeAppearance {
    pub color: Vec4,
    pub opacity: f32,
    pub scale: f32,
}

/// Blend a node's simulation state with its glow into render values
pub fn node_appearance(node: &Node, palette: Palette, glow: &GlowConfig) -> NodeAppearance {
    let g = visible_glow(node, glow);

    NodeAppearance {
        color: node.base_color.lerp(palette.glow_color(), g),
        opacity: (node.opacity + glow.opacity_boost * g).min(1.0),
        scale: node.scale * (1.0 + glow.scale_boost * g),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeId, NodeSeed};

    fn node() -> Node {
        Node::new(
            NodeId(3),
            Vec3::Y,
            NodeSeed {
                mass: 2.0,
                pulse_speed: 1.0,
                pulse_phase: 0.0,
                is_glow_candidate: true,
                next_glow_at: 0.0,
                base_color: Vec4::new(0.2, 0.4, 0.9, 1.0),
            },
            0.5,
        )
    }

    #[test]
    fn test_idle_node_uses_base_values() {
        let n = node();
        let look = node_appearance(&n, Palette::new(true), &GlowConfig::default());

        assert_eq!(look.color, n.base_color);
        assert_eq!(look.opacity, 0.5);
        assert_eq!(look.scale, 1.0);
    }

    #[test]
    fn test_full_glow_uses_glow_color() {
        let mut n = node();
        n.glow_intensity = 1.0;
        let palette = Palette::new(false);
        let look = node_appearance(&n, palette, &GlowConfig::default());

        assert_eq!(look.color, palette.glow_color());
        assert!((look.opacity - 0.9).abs() < 1e-6);
        assert!((look.scale - 1.8).abs() < 1e-6);
    }
}
