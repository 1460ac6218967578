use bevy::prelude::*;

/// Marks the mesh entity drawing one edge
#[derive(Component, Debug)]
pub struct EdgeVisual {
    pub index: usize,
}

/// Place a unit-height, Y-aligned cylinder so it spans `a` to `b`
pub fn edge_transform(a: Vec3, b: Vec3) -> Transform {
    let span = b - a;
    let length = span.length();
    let rotation = span
        .try_normalize()
        .map(|direction| Quat::from_rotation_arc(Vec3::Y, direction))
        .unwrap_or(Quat::IDENTITY);

    Transform {
        translation: (a + b) * 0.5,
        rotation,
        scale: Vec3::new(1.0, length, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_spans_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        let transform = edge_transform(a, b);

        assert_eq!(transform.translation, Vec3::new(2.5, 4.0, 3.0));
        assert!((transform.scale.y - 5.0).abs() < 1e-6);

        // The cylinder's ends (y = ±0.5) land on the endpoints
        let top = transform.transform_point(Vec3::new(0.0, 0.5, 0.0));
        let bottom = transform.transform_point(Vec3::new(0.0, -0.5, 0.0));
        assert!(top.distance(b) < 1e-4);
        assert!(bottom.distance(a) < 1e-4);
    }

    #[test]
    fn test_degenerate_edge_collapses() {
        let p = Vec3::splat(2.0);
        let transform = edge_transform(p, p);

        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale.y, 0.0);
    }
}
