use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::render::renderer::RenderDevice;
use thiserror::Error;

use crate::{
    config::ConfigError,
    host::{HostRequest, HostRequests},
    input::engine_now,
    palette::Palette,
    visual::{
        interactions::pointer::PointerState,
        setup::scene::{SceneHandles, release_scene, spawn_scene},
    },
};

#[derive(Debug, Error)]
pub enum MountError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no rendering context could be created for the node sphere")]
    RenderContextUnavailable,
}

/// Where the engine is in its mount / teardown cycle
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineLifecycle {
    pub mounted: bool,
    /// Simulation and render sync run only while set
    pub frames_scheduled: bool,
    /// Pointer listeners run only while set
    pub listeners_attached: bool,
}

pub fn frames_scheduled(lifecycle: Option<Res<EngineLifecycle>>) -> bool {
    lifecycle.is_some_and(|l| l.frames_scheduled)
}

pub fn listeners_attached(lifecycle: Option<Res<EngineLifecycle>>) -> bool {
    lifecycle.is_some_and(|l| l.listeners_attached)
}

/// Startup: a missing render device is fatal, there is no fallback renderer
pub fn mount_engine(world: &mut World) {
    if !world.contains_resource::<RenderDevice>() {
        error!("Mount failed: {}", MountError::RenderContextUnavailable);
        world.write_message(AppExit::error());
        return;
    }

    mount_scene(world);
    info!("Node sphere mounted");
}

/// Build the scene, then attach listeners and schedule frames
pub fn mount_scene(world: &mut World) {
    let now = world.get_resource::<Time>().map(engine_now).unwrap_or(0.0);
    spawn_scene(world, now);

    let mut lifecycle = world.get_resource_or_init::<EngineLifecycle>();
    lifecycle.mounted = true;
    lifecycle.listeners_attached = true;
    lifecycle.frames_scheduled = true;
}

/// Stop frames, detach listeners, then release resources, in that order.
/// Returns false when the engine was not mounted.
pub fn teardown(world: &mut World) -> bool {
    let was_mounted = {
        let mut lifecycle = world.get_resource_or_init::<EngineLifecycle>();
        let was_mounted = lifecycle.mounted;
        lifecycle.frames_scheduled = false;
        lifecycle.listeners_attached = false;
        lifecycle.mounted = false;
        was_mounted
    };

    let released = release_scene(world);
    was_mounted || released
}

pub fn unmount_engine(world: &mut World) {
    if teardown(world) {
        info!("Node sphere unmounted");
    } else {
        debug!("Unmount ignored: node sphere is not mounted");
    }
}

/// Full teardown and rebuild; used when the palette flips.
/// The pointer survives so a hovering cursor keeps interacting.
pub fn rebuild_engine(world: &mut World) {
    let pointer = world.get_resource::<PointerState>().cloned();

    teardown(world);
    mount_scene(world);

    if let Some(pointer) = pointer {
        world.insert_resource(pointer);
    }
}

/// Apply staged host requests, then rebuild if the palette no longer matches the scene
pub fn apply_host_requests(world: &mut World) {
    let requests = world
        .get_resource_mut::<HostRequests>()
        .map(|mut queue| queue.drain())
        .unwrap_or_default();

    for request in requests {
        match request {
            HostRequest::SetDarkPalette(dark) => {
                let mut palette = world.get_resource_or_init::<Palette>();
                if palette.dark != dark {
                    palette.dark = dark;
                }
            }
            HostRequest::Unmount => unmount_engine(world),
        }
    }

    let mounted = world
        .get_resource::<EngineLifecycle>()
        .is_some_and(|l| l.mounted);
    if !mounted {
        return;
    }

    let Some(palette) = world.get_resource::<Palette>().copied() else {
        return;
    };
    let built_with = world.get_resource::<SceneHandles>().map(|h| h.palette);
    if built_with != Some(palette) {
        info!("Palette changed (dark = {}), rebuilding", palette.dark);
        rebuild_engine(world);
    }
}
