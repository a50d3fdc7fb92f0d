use macroquad::prelude::*;

use crate::application::{Action, Camera, Engine, FrameScheduler};
use crate::ui::{Button, view_width};

/// Middle-drag pan tracking across frames.
#[derive(Default)]
pub struct PanState {
    last: Option<(f32, f32)>,
}

/// Fire the bound trigger of any clicked control button.
pub fn process_button_clicks<S: FrameScheduler>(
    engine: &mut Engine<S>,
    buttons: &[Button],
    mouse_pos: (f32, f32),
) {
    for button in buttons {
        if button.is_clicked(mouse_pos) {
            engine.trigger(button.kind());
        }
    }
}

/// Keyboard shortcuts mirror the full action set, independent of which
/// buttons the deployment wired.
pub fn process_keyboard<S: FrameScheduler>(engine: &mut Engine<S>, camera: &mut Camera) {
    if is_key_pressed(KeyCode::Space) {
        engine.toggle_play_pause();
    }
    if is_key_pressed(KeyCode::R) {
        engine.apply(Action::Restart);
    }
    if is_key_pressed(KeyCode::S) {
        engine.apply(Action::Stop);
    }
    if is_key_pressed(KeyCode::A) {
        engine.cycle_algorithm();
    }
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }
}

pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

pub fn handle_pan(camera: &mut Camera, mouse_pos: (f32, f32), pan: &mut PanState) {
    if is_mouse_button_down(MouseButton::Middle) {
        if let Some((lx, ly)) = pan.last {
            camera.pan(mouse_pos.0 - lx, mouse_pos.1 - ly);
        }
        pan.last = Some(mouse_pos);
    } else {
        pan.last = None;
    }
}

/// Left click inside the view area drops a new planet at the cursor.
pub fn handle_spawn_click<S: FrameScheduler>(
    engine: &mut Engine<S>,
    camera: &Camera,
    mouse_pos: (f32, f32),
) {
    if mouse_pos.0 >= view_width() {
        return;
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = camera.screen_to_world(mouse_pos.0, mouse_pos.1);
        engine.spawn_body(x, y);
    }
}
