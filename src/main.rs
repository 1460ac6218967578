use bevy::prelude::*;

mod camera;
mod config;
mod graph;
mod host;
mod input;
mod palette;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use config::NetworkConfig;
use host::HostPlugin;
use input::InputPlugin;
use palette::Palette;
use visual::setup::MountError;

use crate::visual::plugin::NetworkPlugin;

/// Canvas the engine draws into when embedded in the page
const CANVAS_SELECTOR: &str = "#node-sphere";

/// Build the engine app drawing into `container` (a canvas selector on the web).
///
/// The returned app starts animating as soon as it runs.
pub fn mount(container: Option<&str>, dark_palette: bool) -> Result<App, MountError> {
    let config = NetworkConfig::load()?;
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Node Sphere".into(),
            resolution: WindowResolution::new(1280, 720),
            resizable: true,
            canvas: container.map(str::to_owned),
            fit_canvas_to_parent: true,
            // Let the page keep scrolling under the background
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(config)
    .insert_resource(Palette::new(dark_palette))
    .insert_resource(Time::<Fixed>::from_hz(60.0))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(HostPlugin)
    .add_plugins(NetworkPlugin);

    Ok(app)
}

fn main() -> AppExit {
    let container = cfg!(target_arch = "wasm32").then_some(CANVAS_SELECTOR);

    match mount(container, false) {
        Ok(mut app) => app.run(),
        Err(err) => {
            eprintln!("Node sphere failed to mount: {err}");
            AppExit::error()
        }
    }
}
