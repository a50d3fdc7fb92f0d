/// Viewport pan/zoom over the simulation surface.
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }

    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(0.25, 10.0);
    }

    pub fn zoom_out(&mut self, factor: f32) {
        self.zoom = (self.zoom / factor).clamp(0.25, 10.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Surface coordinates to screen pixels.
    pub fn world_to_screen(&self, x: f64, y: f64) -> (f32, f32) {
        (
            x as f32 * self.zoom + self.offset_x,
            y as f32 * self.zoom + self.offset_y,
        )
    }

    /// Screen pixels back to surface coordinates (for spawn clicks).
    pub fn screen_to_world(&self, sx: f32, sy: f32) -> (f64, f64) {
        (
            f64::from((sx - self.offset_x) / self.zoom),
            f64::from((sy - self.offset_y) / self.zoom),
        )
    }

    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.zoom = 1.0;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_screen_round_trip() {
        let mut camera = Camera::new();
        camera.pan(30.0, -10.0);
        camera.zoom_in(2.0);

        let (sx, sy) = camera.world_to_screen(100.0, 50.0);
        let (wx, wy) = camera.screen_to_world(sx, sy);
        assert!((wx - 100.0).abs() < 1e-3);
        assert!((wy - 50.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.zoom_in(2.0);
        }
        assert_eq!(camera.zoom, 10.0);
        for _ in 0..100 {
            camera.zoom_out(2.0);
        }
        assert_eq!(camera.zoom, 0.25);
    }
}
