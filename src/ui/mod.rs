mod button;

pub use button::Button;

use macroquad::prelude::{screen_height, screen_width};

use crate::application::ControlBindings;

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// X position where the control panel starts (right side).
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Width of the simulation view area.
pub fn view_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

pub fn view_height() -> f32 {
    screen_height()
}

/// One button per bound control, stacked from the panel top in the
/// entry-point order of the bindings.
pub fn create_control_buttons(bindings: &ControlBindings) -> Vec<Button> {
    let px = panel_x();
    bindings
        .kinds()
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            Button::new(
                px,
                20.0 + i as f32 * (BUTTON_HEIGHT + 10.0),
                PANEL_WIDTH,
                BUTTON_HEIGHT,
                kind,
            )
        })
        .collect()
}
