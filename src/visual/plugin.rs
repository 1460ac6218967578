use crate::camera::MainCamera;
use crate::input::engine_now;
use crate::visual::debug::{draw_debug_overlay, toggle_debug_overlay};
use crate::visual::interactions::pointer::PointerState;
use crate::visual::network::Network;
use crate::visual::setup::lifecycle::{
    EngineLifecycle, apply_host_requests, frames_scheduled, mount_engine,
};
use crate::visual::sync::sync_scene;
use bevy::prelude::*;

pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineLifecycle>()
            .add_systems(Startup, mount_engine)
            // Per-frame constants are tuned for 60 steps per second
            .add_systems(FixedUpdate, advance_network.run_if(frames_scheduled))
            .add_systems(
                Update,
                (
                    // Lifecycle first so a teardown never races a sync
                    apply_host_requests,
                    sync_scene.run_if(frames_scheduled),
                    toggle_debug_overlay,
                    draw_debug_overlay.run_if(frames_scheduled),
                )
                    .chain(),
            );
    }
}

/// System: Resolve the pointer ray, then step the simulation one frame
fn advance_network(
    time: Res<Time>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    pointer: Option<ResMut<PointerState>>,
    network: Option<ResMut<Network>>,
) {
    let (Some(mut pointer), Some(mut network)) = (pointer, network) else {
        return;
    };
    let now = engine_now(&time);

    if let Some(cursor) = pointer.cursor
        && let Ok((camera, camera_transform)) = camera_query.single()
        && let Ok(ray) = camera.viewport_to_world(camera_transform, cursor)
    {
        let config = network.config();
        pointer.resolve(ray, config.geometry.sphere_radius, config.fallback_plane_normal());
    }

    network.step(now, &pointer);
}
