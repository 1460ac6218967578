use bevy::prelude::*;

/// The one input the host page feeds the engine: light or dark palette.
/// Changing it rebuilds the whole network.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    pub dark: bool,
}

impl Palette {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    /// Base node color, shaded from the sphere's south pole to its north pole
    pub fn node_color(&self, rest_position: Vec3, radius: f32) -> Vec4 {
        let (low, high) = if self.dark {
            (Vec4::new(0.20, 0.45, 0.95, 1.0), Vec4::new(0.55, 0.80, 1.0, 1.0))
        } else {
            (Vec4::new(0.05, 0.20, 0.55, 1.0), Vec4::new(0.15, 0.45, 0.85, 1.0))
        };

        let t = ((rest_position.y / radius) * 0.5 + 0.5).clamp(0.0, 1.0);
        low.lerp(high, t)
    }

    /// Color used for highlight nodes
    pub fn accent_color(&self) -> Vec4 {
        if self.dark {
            Vec4::new(0.35, 0.95, 1.0, 1.0) // Cyan
        } else {
            Vec4::new(0.0, 0.55, 0.85, 1.0) // Deep cyan
        }
    }

    /// Color glowing nodes blend toward
    pub fn glow_color(&self) -> Vec4 {
        if self.dark {
            Vec4::new(1.0, 1.0, 1.0, 1.0)
        } else {
            Vec4::new(1.0, 0.75, 0.25, 1.0) // Amber
        }
    }

    pub fn edge_color(&self) -> Vec4 {
        if self.dark {
            Vec4::new(0.45, 0.65, 1.0, 1.0)
        } else {
            Vec4::new(0.10, 0.25, 0.55, 1.0)
        }
    }

    pub fn background(&self) -> Color {
        if self.dark {
            Color::srgb(0.02, 0.03, 0.07)
        } else {
            Color::srgb(0.97, 0.98, 1.0)
        }
    }
}

pub fn to_color(rgba: Vec4, opacity: f32) -> Color {
    Color::srgba(rgba.x, rgba.y, rgba.z, (rgba.w * opacity).clamp(0.0, 1.0))
}
