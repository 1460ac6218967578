use bevy::prelude::*;

/// Pointer state shared between the input listeners and the frame step.
///
/// Listeners only call `on_move` / `on_enter` / `on_leave`; the frame step is
/// the only caller of `resolve`.
#[derive(Resource, Debug, Clone, Default)]
pub struct PointerState {
    /// Last pointer position in logical viewport pixels, top-left origin
    pub cursor: Option<Vec2>,
    /// Last resolved world-space target; kept when a ray misses
    pub world: Vec3,
    pub active: bool,
    /// Engine clock (ms) of the last move; `None` after the pointer leaves
    pub last_move_at: Option<f64>,
}

impl PointerState {
    pub fn on_move(&mut self, cursor: Vec2, now: f64) {
        self.cursor = Some(cursor);
        self.active = true;
        self.last_move_at = Some(now);
    }

    pub fn on_enter(&mut self) {
        self.active = true;
    }

    /// Disengage immediately instead of waiting out the idle window
    pub fn on_leave(&mut self) {
        self.active = false;
        self.last_move_at = None;
    }

    /// Active, or moved within the idle window
    pub fn is_engaged(&self, now: f64, idle_window_ms: f64) -> bool {
        self.active
            || self
                .last_move_at
                .is_some_and(|moved| now - moved < idle_window_ms)
    }

    /// Update the world target from a camera ray.
    ///
    /// The bounding sphere is tried first, then the fallback plane. On a total
    /// miss the previous target stays put.
    pub fn resolve(&mut self, ray: Ray3d, sphere_radius: f32, plane_normal: Vec3) -> bool {
        let hit = intersect_sphere(ray, Vec3::ZERO, sphere_radius)
            .or_else(|| intersect_plane(ray, Vec3::ZERO, plane_normal));

        match hit {
            Some(point) => {
                self.world = point;
                true
            }
            None => false,
        }
    }
}

/// Nearest intersection in front of the ray origin
pub fn intersect_sphere(ray: Ray3d, center: Vec3, radius: f32) -> Option<Vec3> {
    let direction = *ray.direction;
    let to_origin = ray.origin - center;

    // |o + t·d|² = r² with |d| = 1
    let b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    let t = if near >= 0.0 { near } else { far };
    (t >= 0.0).then(|| ray.get_point(t))
}

pub fn intersect_plane(ray: Ray3d, origin: Vec3, normal: Vec3) -> Option<Vec3> {
    let normal = normal.try_normalize()?;
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None; // Parallel
    }

    let t = (origin - ray.origin).dot(normal) / denom;
    (t >= 0.0).then(|| ray.get_point(t))
}
