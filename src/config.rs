use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NETWORK_JSON: &str = include_str!("../assets/network.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse network config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid network config: {0}")]
    Invalid(String),
}

/// Every tunable of the node sphere, grouped by the part of the engine that reads it.
///
/// Defaults are the reference tuning; `assets/network.json` may override any subset.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub geometry: GeometryConfig,
    pub topology: TopologyConfig,
    pub glow: GlowConfig,
    pub physics: PhysicsConfig,
    pub rotation: RotationConfig,
    pub view: ViewConfig,
    /// Fixed seed for reproducible layouts; `None` seeds from the thread rng
    pub seed: Option<u64>,
    pub debug_overlay: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub node_count: usize,
    pub sphere_radius: f32,
    pub mass_range: (f32, f32),
    pub pulse_speed_range: (f32, f32),
    pub highlight_scale: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            node_count: 1000,
            sphere_radius: 24.0,
            mass_range: (1.0, 3.0),
            pulse_speed_range: (0.5, 1.3),
            highlight_scale: 2.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Neighbor cutoff as a fraction of the sphere radius
    pub neighbor_distance_factor: f32,
    pub max_neighbors: usize,
    /// Long-range samples as a fraction of the node count
    pub long_range_fraction: f32,
    /// Long-range cutoff as a fraction of the sphere radius
    pub long_range_distance_factor: f32,
    pub edge_base_opacity: f32,
    pub long_range_opacity_factor: f32,
    pub edge_opacity_cap: f32,
    pub edge_influence_gain: f32,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            neighbor_distance_factor: 0.2,
            max_neighbors: 5,
            long_range_fraction: 0.03,
            long_range_distance_factor: 1.2,
            edge_base_opacity: 0.15,
            long_range_opacity_factor: 0.5,
            edge_opacity_cap: 0.4,
            edge_influence_gain: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub candidate_probability: f64,
    pub initial_window_ms: f64,
    pub interval_min_ms: f64,
    pub interval_jitter_ms: f64,
    pub decay: f32,
    /// Below this a glowing node renders as idle
    pub epsilon: f32,
    /// Above this a node sits out the physics pass
    pub strong_threshold: f32,
    pub opacity_boost: f32,
    pub scale_boost: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            candidate_probability: 0.10,
            initial_window_ms: 10_000.0,
            interval_min_ms: 3_000.0,
            interval_jitter_ms: 7_000.0,
            decay: 0.98,
            epsilon: 0.01,
            strong_threshold: 0.5,
            opacity_boost: 0.4,
            scale_boost: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub interaction_radius: f32,
    pub repulsion_strength: f32,
    pub influence_scale: f32,
    /// Pointer counts as active this long after its last move
    pub pointer_idle_window_ms: f64,
    pub opacity_floor: f32,
    pub opacity_decay: f32,
    pub opacity_hover_base: f32,
    pub opacity_hover_gain: f32,
    pub opacity_nudge: f32,
    pub integration_step: f32,
    pub damping: f32,
    pub restoring_base: f32,
    pub restoring_gain: f32,
    pub restoring_max: f32,
    pub pulse_amplitude: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            interaction_radius: 18.0,
            repulsion_strength: 0.015,
            influence_scale: 0.9,
            pointer_idle_window_ms: 800.0,
            opacity_floor: 0.5,
            opacity_decay: 0.99,
            opacity_hover_base: 0.6,
            opacity_hover_gain: 0.2,
            opacity_nudge: 0.1,
            integration_step: 0.8,
            damping: 0.9,
            restoring_base: 0.02,
            restoring_gain: 0.01,
            restoring_max: 0.08,
            pulse_amplitude: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Radians per frame
    pub base_speed: f32,
    pub active_factor: f32,
    pub smoothing: f32,
    pub wobble_frequency: f64,
    pub wobble_amplitude: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.0005,
            active_factor: 0.3,
            smoothing: 0.5,
            wobble_frequency: 0.00005,
            wobble_amplitude: 0.08,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub camera_distance: f32,
    pub camera_fov_degrees: f32,
    pub node_radius: f32,
    pub edge_thickness: f32,
    /// Normal of the fallback interaction plane through the origin
    pub fallback_plane_normal: [f32; 3],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            camera_distance: 60.0,
            camera_fov_degrees: 75.0,
            node_radius: 0.18,
            edge_thickness: 0.03,
            fallback_plane_normal: [0.0, 0.0, 1.0],
        }
    }
}

impl NetworkConfig {
    /// Load the config embedded from `assets/network.json`
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(NETWORK_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geometry.node_count == 0 {
            return Err(ConfigError::Invalid("node_count must be positive".into()));
        }
        if self.geometry.sphere_radius <= 0.0 {
            return Err(ConfigError::Invalid("sphere_radius must be positive".into()));
        }
        if self.geometry.mass_range.0 < 1.0 || self.geometry.mass_range.1 <= self.geometry.mass_range.0 {
            return Err(ConfigError::Invalid(
                "mass_range must be a non-empty range starting at or above 1".into(),
            ));
        }

        if self.geometry.pulse_speed_range.1 <= self.geometry.pulse_speed_range.0 {
            return Err(ConfigError::Invalid("pulse_speed_range must be non-empty".into()));
        }
        if !(0.0..=1.0).contains(&self.glow.candidate_probability) {
            return Err(ConfigError::Invalid(
                "glow.candidate_probability must lie in [0, 1]".into(),
            ));
        }
        if self.glow.initial_window_ms <= 0.0 || self.glow.interval_jitter_ms <= 0.0 {
            return Err(ConfigError::Invalid("glow timing windows must be positive".into()));
        }

        let factors = [
            ("glow.decay", self.glow.decay),
            ("physics.opacity_decay", self.physics.opacity_decay),
            ("physics.damping", self.physics.damping),
            ("physics.integration_step", self.physics.integration_step),
            ("rotation.smoothing", self.rotation.smoothing),
        ];
        for (name, value) in factors {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must lie in (0, 1], got {value}"
                )));
            }
        }

        Ok(())
    }

    pub fn fallback_plane_normal(&self) -> Vec3 {
        Vec3::from_array(self.view.fallback_plane_normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_loads() {
        let config = NetworkConfig::load().expect("embedded config should parse");
        assert_eq!(config.geometry.node_count, 1000);
        assert_eq!(config.geometry.sphere_radius, 24.0);
        assert_eq!(config.topology.max_neighbors, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = NetworkConfig::from_json(r#"{ "geometry": { "node_count": 200 } }"#).unwrap();
        assert_eq!(config.geometry.node_count, 200);
        assert_eq!(config.geometry.sphere_radius, 24.0);
        assert_eq!(config.physics.damping, 0.9);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_rejects_zero_nodes() {
        let err = NetworkConfig::from_json(r#"{ "geometry": { "node_count": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_runaway_damping() {
        let err = NetworkConfig::from_json(r#"{ "physics": { "damping": 1.5 } }"#).unwrap_err();
        assert!(err.to_string().contains("physics.damping"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = NetworkConfig::from_json("{ geometry: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
