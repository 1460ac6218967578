use bevy::prelude::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostRequests>()
            .add_systems(PreUpdate, poll_host_bridge);

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(PreUpdate, keyboard_host_controls.before(poll_host_bridge));
    }
}

/// Something the surrounding page asked the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    SetDarkPalette(bool),
    Unmount,
}

/// Requests waiting for the next frame
#[derive(Resource, Debug, Default)]
pub struct HostRequests(VecDeque<HostRequest>);

impl HostRequests {
    pub fn push(&mut self, request: HostRequest) {
        self.0.push_back(request);
    }

    pub fn drain(&mut self) -> Vec<HostRequest> {
        self.0.drain(..).collect()
    }
}

const NO_PALETTE: u8 = 0;
const LIGHT_PALETTE: u8 = 1;
const DARK_PALETTE: u8 = 2;

// Written by the page between frames, drained by `poll_host_bridge`
static PENDING_PALETTE: AtomicU8 = AtomicU8::new(NO_PALETTE);
static PENDING_UNMOUNT: AtomicBool = AtomicBool::new(false);

/// Called by the host page when its dark mode flips
#[cfg_attr(target_arch = "wasm32", wasm_bindgen::prelude::wasm_bindgen)]
pub fn set_dark_palette(dark: bool) {
    let value = if dark { DARK_PALETTE } else { LIGHT_PALETTE };
    PENDING_PALETTE.store(value, Ordering::Release);
}

/// Called by the host page when the background leaves the page
#[cfg_attr(target_arch = "wasm32", wasm_bindgen::prelude::wasm_bindgen)]
pub fn unmount() {
    PENDING_UNMOUNT.store(true, Ordering::Release);
}

fn take_bridge_requests() -> Vec<HostRequest> {
    let mut requests = Vec::new();

    match PENDING_PALETTE.swap(NO_PALETTE, Ordering::AcqRel) {
        LIGHT_PALETTE => requests.push(HostRequest::SetDarkPalette(false)),
        DARK_PALETTE => requests.push(HostRequest::SetDarkPalette(true)),
        _ => {}
    }
    if PENDING_UNMOUNT.swap(false, Ordering::AcqRel) {
        requests.push(HostRequest::Unmount);
    }

    requests
}

fn poll_host_bridge(mut requests: ResMut<HostRequests>) {
    for request in take_bridge_requests() {
        requests.push(request);
    }
}

/// Desktop stand-ins for the page: D flips the palette, Escape unmounts.
/// Goes through the same bridge the page calls.
#[cfg(not(target_arch = "wasm32"))]
fn keyboard_host_controls(keys: Res<ButtonInput<KeyCode>>, palette: Res<crate::palette::Palette>) {
    if keys.just_pressed(KeyCode::KeyD) {
        set_dark_palette(!palette.dark);
    }
    if keys.just_pressed(KeyCode::Escape) {
        unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_stages_latest_requests() {
        set_dark_palette(false);
        set_dark_palette(true);
        unmount();

        let requests = take_bridge_requests();
        assert_eq!(
            requests,
            vec![HostRequest::SetDarkPalette(true), HostRequest::Unmount]
        );
        assert!(take_bridge_requests().is_empty(), "requests are consumed once");
    }

    #[test]
    fn test_request_queue_drains_in_order() {
        let mut queue = HostRequests::default();
        queue.push(HostRequest::SetDarkPalette(true));
        queue.push(HostRequest::Unmount);

        assert_eq!(
            queue.drain(),
            vec![HostRequest::SetDarkPalette(true), HostRequest::Unmount]
        );
        assert!(queue.drain().is_empty());
    }
}
