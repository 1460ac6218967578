use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::config::NetworkConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, track_viewport_size);
    }
}

/// Logical size of the drawing surface, kept current on resize.
/// Projection refits are left to Bevy.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Viewport {
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Vec2::new(1280.0, 720.0),
        }
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Perspective camera on the +Z axis looking at the sphere's center
///
/// ```text
///        Y
///        ↑
///        |
///   ----+---→ X
///       /
///      ↙ Z (toward the camera)
/// ```
fn setup_camera(mut commands: Commands, config: Res<NetworkConfig>) {
    let projection = Projection::Perspective(PerspectiveProjection {
        fov: config.view.camera_fov_degrees.to_radians(),
        near: 0.1,
        far: 1000.0,
        ..default()
    });

    commands.spawn((
        Camera3d::default(),
        projection,
        Tonemapping::None,
        Transform::from_xyz(0.0, 0.0, config.view.camera_distance).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Resize only touches the viewport record; Bevy refits the projection itself
fn track_viewport_size(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window>,
    mut viewport: ResMut<Viewport>,
) {
    let mut changed = false;
    for event in resized.read() {
        viewport.size = Vec2::new(event.width, event.height);
        changed = true;
    }

    // First frame: pick up the initial window size
    if !changed && let Ok(window) = windows.single() {
        let size = Vec2::new(window.width(), window.height());
        if size != viewport.size && size.x > 0.0 && size.y > 0.0 {
            viewport.size = size;
            changed = true;
        }
    }

    if changed {
        debug!("Viewport resized to {}x{}", viewport.size.x, viewport.size.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_resize_updates_viewport() {
        let mut world = World::new();
        world.init_resource::<Viewport>();
        world.init_resource::<Messages<WindowResized>>();
        world.write_message(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 1920.0,
            height: 1080.0,
        });

        world.run_system_once(track_viewport_size).unwrap();
        assert_eq!(world.resource::<Viewport>().size, Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn test_no_window_keeps_default_size() {
        let mut world = World::new();
        world.init_resource::<Viewport>();
        world.init_resource::<Messages<WindowResized>>();

        world.run_system_once(track_viewport_size).unwrap();
        assert_eq!(world.resource::<Viewport>().size, Viewport::default().size);
    }
}
