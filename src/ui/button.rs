use macroquad::prelude::*;

use crate::application::ControlKind;

/// Control button with hover and click detection, bound to the lifecycle
/// trigger it fires.
#[derive(Clone)]
pub struct Button {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    kind: ControlKind,
    color: Color,
    hover_color: Color,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: ControlKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            color: Color::from_rgba(70, 70, 110, 255),
            hover_color: Color::from_rgba(110, 110, 170, 255),
        }
    }

    pub const fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + self.height
    }

    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let color = if self.is_hovered(mouse_pos) {
            self.hover_color
        } else {
            self.color
        };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        let label = self.kind.label();
        let text_size = measure_text(label, None, 20, 1.0);
        draw_text(
            label,
            self.x + (self.width - text_size.width) / 2.0,
            self.y + (self.height + text_size.height) / 2.0,
            20.0,
            WHITE,
        );
    }
}
