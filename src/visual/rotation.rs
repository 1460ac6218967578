use bevy::math::{EulerRot, Quat};

use crate::config::RotationConfig;

/// Spin of the whole structure: slows while the pointer is engaged, plus a
/// slow wobble on the X axis that ignores the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationController {
    /// Radians per frame
    pub speed: f32,
    pub target_speed: f32,
    pub yaw: f32,
    /// Absolute X tilt, recomputed from the clock every frame
    pub wobble: f32,
}

impl RotationController {
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            speed: config.base_speed,
            target_speed: config.base_speed,
            yaw: 0.0,
            wobble: 0.0,
        }
    }

    pub fn update(&mut self, pointer_engaged: bool, now: f64, config: &RotationConfig) {
        self.target_speed = if pointer_engaged {
            config.base_speed * config.active_factor
        } else {
            config.base_speed
        };
        self.speed += (self.target_speed - self.speed) * config.smoothing;
        self.yaw += self.speed;
        self.wobble = ((now * config.wobble_frequency).sin() as f32) * config.wobble_amplitude;
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.wobble, self.yaw, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engaged_pointer_slows_spin() {
        let config = RotationConfig::default();
        let mut rotation = RotationController::new(&config);

        for frame in 0..60 {
            rotation.update(true, frame as f64 * 16.0, &config);
            assert!(rotation.speed >= 0.0 && rotation.speed <= config.base_speed);
        }
        assert!((rotation.speed - 0.3 * config.base_speed).abs() < 1e-8);
    }

    #[test]
    fn test_relaxes_back_to_base() {
        let config = RotationConfig::default();
        let mut rotation = RotationController::new(&config);
        for _ in 0..60 {
            rotation.update(true, 0.0, &config);
        }

        let slowed = rotation.speed;
        rotation.update(false, 0.0, &config);
        assert!(rotation.speed > slowed);

        for _ in 0..60 {
            rotation.update(false, 0.0, &config);
            assert!(rotation.speed <= config.base_speed);
        }
        assert!((rotation.speed - config.base_speed).abs() < 1e-8);
    }

    #[test]
    fn test_yaw_accumulates_and_wobble_is_absolute() {
        let config = RotationConfig::default();
        let mut rotation = RotationController::new(&config);

        for _ in 0..100 {
            rotation.update(false, 0.0, &config);
        }
        assert!((rotation.yaw - 100.0 * config.base_speed).abs() < 1e-5);
        assert_eq!(rotation.wobble, 0.0);

        let quarter_period = std::f64::consts::FRAC_PI_2 / config.wobble_frequency;
        rotation.update(false, quarter_period, &config);
        assert!((rotation.wobble - config.wobble_amplitude).abs() < 1e-6);
    }
}
