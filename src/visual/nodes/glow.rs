use rand::Rng;

use crate::{config::GlowConfig, graph::Node};

/// Advance one candidate's glow cycle.
///
/// Idle (intensity 0) flips to full intensity once `now` passes the scheduled
/// time and the next pulse is booked; a glowing node decays geometrically.
/// Returns true when the node was (re)triggered this frame.
pub fn update_glow(node: &mut Node, now: f64, config: &GlowConfig, rng: &mut impl Rng) -> bool {
    if !node.is_glow_candidate {
        return false;
    }

    if now > node.next_glow_at {
        node.glow_intensity = 1.0;
        node.next_glow_at = now + config.interval_min_ms + rng.random_range(0.0..config.interval_jitter_ms);
        return true;
    }

    if node.glow_intensity > 0.0 {
        node.glow_intensity *= config.decay;
    }
    false
}

/// Intensity as rendered: tails below epsilon count as idle
pub fn visible_glow(node: &Node, config: &GlowConfig) -> f32 {
    if node.glow_intensity < config.epsilon {
        0.0
    } else {
        node.glow_intensity
    }
}

pub fn is_strong_glow(node: &Node, config: &GlowConfig) -> bool {
    node.glow_intensity > config.strong_threshold
}
