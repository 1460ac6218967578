use bevy::prelude::*;
use bevy::window::WindowEvent;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::visual::interactions::pointer::PointerState;
use crate::visual::setup::lifecycle::listeners_attached;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, track_pointer.run_if(listeners_attached));
    }
}

/// Engine clock in milliseconds
pub fn engine_now(time: &Time) -> f64 {
    time.elapsed_secs_f64() * 1000.0
}

// Packed (x, y) bits of the latest page-level move; all ones when nothing is staged
const NO_PAGE_POINTER: u64 = u64::MAX;
static PAGE_POINTER: AtomicU64 = AtomicU64::new(NO_PAGE_POINTER);

/// Called by the host page for every move anywhere in the document.
///
/// Coordinates are CSS pixels relative to the canvas's top-left corner and may
/// lie outside it. The canvas sits behind the page content, so its own cursor
/// events stop whenever the pointer is over sibling elements.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen::prelude::wasm_bindgen)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn pointer_moved(x: f32, y: f32) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    let packed = (u64::from(x.to_bits()) << 32) | u64::from(y.to_bits());
    PAGE_POINTER.store(packed, Ordering::Release);
}

fn take_page_pointer() -> Option<Vec2> {
    let packed = PAGE_POINTER.swap(NO_PAGE_POINTER, Ordering::AcqRel);
    if packed == NO_PAGE_POINTER {
        return None;
    }
    let x = f32::from_bits((packed >> 32) as u32);
    let y = f32::from_bits(packed as u32);
    Some(Vec2::new(x, y))
}

/// Pointer listener: stages coordinates, timestamps and flags only.
///
/// Window cursor events are applied in arrival order, so a leave followed by
/// a re-enter in the same frame ends engaged. Moves staged by the page are
/// applied last; they keep the sphere reacting while the pointer is over
/// other content.
fn track_pointer(
    time: Res<Time>,
    mut window_events: MessageReader<WindowEvent>,
    pointer: Option<ResMut<PointerState>>,
) {
    let Some(mut pointer) = pointer else {
        return;
    };
    let now = engine_now(&time);

    apply_cursor_events(&mut pointer, window_events.read(), now);
    if let Some(cursor) = take_page_pointer() {
        pointer.on_move(cursor, now);
    }
}

fn apply_cursor_events<'a>(
    pointer: &mut PointerState,
    events: impl IntoIterator<Item = &'a WindowEvent>,
    now: f64,
) {
    for event in events {
        match event {
            WindowEvent::CursorEntered(_) => pointer.on_enter(),
            WindowEvent::CursorMoved(moved) => pointer.on_move(moved.position, now),
            WindowEvent::CursorLeft(_) => pointer.on_leave(),
            _ => {}
        }
    }
}
