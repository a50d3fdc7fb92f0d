use macroquad::prelude::*;

use crate::application::{Camera, Phase};
use crate::domain::{Algorithm, Universe};
use crate::ui::{Button, PANEL_WIDTH, panel_x, view_height, view_width};

/// Velocity vectors are short per step; stretch them so the lines read.
const VELOCITY_LINE_SCALE: f32 = 6.0;

/// Draw one generation: a circle per planet plus its velocity line,
/// culled against the view area. Read-only over the universe.
pub fn draw_universe(universe: &Universe, camera: &Camera) {
    let area_w = view_width();
    let area_h = view_height();

    let body_fill = Color::from_rgba(20, 20, 30, 255);
    let body_stroke = Color::from_rgba(255, 0, 255, 255);
    let star_stroke = Color::from_rgba(255, 200, 80, 255);
    let velocity_color = Color::from_rgba(255, 105, 180, 200);

    for planet in universe.planets() {
        let (sx, sy) = camera.world_to_screen(planet.pos.x, planet.pos.y);
        let radius = (planet.radius as f32 * camera.zoom).max(1.0);

        // Skip planets entirely outside the viewport.
        if sx + radius < 0.0 || sx - radius > area_w || sy + radius < 0.0 || sy - radius > area_h {
            continue;
        }

        draw_circle(sx, sy, radius, body_fill);
        let stroke = if planet.pinned { star_stroke } else { body_stroke };
        draw_circle_lines(sx, sy, radius, 1.5, stroke);

        if !planet.pinned {
            let (tx, ty) = camera.world_to_screen(
                planet.pos.x + planet.velocity.x * f64::from(VELOCITY_LINE_SCALE),
                planet.pos.y + planet.velocity.y * f64::from(VELOCITY_LINE_SCALE),
            );
            draw_line(sx, sy, tx, ty, 1.0, velocity_color);
        }
    }
}

/// Snapshot of everything the HUD shows for one frame.
pub struct HudInfo {
    pub phase: Phase,
    pub generation: Option<u64>,
    pub bodies: usize,
    pub algorithm: Algorithm,
    pub step_ms: f32,
    pub render_ms: f32,
    pub zoom: f32,
}

fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255),
    );
}

/// Draw the control panel: buttons, phase, counters and timings.
pub fn draw_hud(info: &HudInfo, buttons: &[Button], mouse_pos: (f32, f32)) {
    draw_panel_background();

    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let px = panel_x();

    let controls = [
        ("Controls:", 200.0, 14.0, WHITE),
        ("Click: Spawn", 215.0, 12.0, GRAY),
        ("Space: Play", 228.0, 12.0, GRAY),
        ("R: Restart", 241.0, 12.0, GRAY),
        ("S: Stop", 254.0, 12.0, GRAY),
        ("A: Algorithm", 267.0, 12.0, GRAY),
        ("Wheel: Zoom", 280.0, 12.0, GRAY),
        ("Mid-drag: Pan", 293.0, 12.0, GRAY),
    ];
    controls.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    let phase_color = match info.phase {
        Phase::Running => Color::from_rgba(0, 255, 0, 255),
        Phase::Paused => Color::from_rgba(255, 165, 0, 255),
        Phase::Stopped => Color::from_rgba(255, 0, 0, 255),
    };

    // Color code the step time against the frame budget.
    let step_color = if info.step_ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if info.step_ms < 16.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    };

    let generation = info
        .generation
        .map_or_else(|| "-".to_string(), |g| g.to_string());

    let labels = [
        ("Status:", 340.0, 16.0, WHITE),
        (info.phase.name(), 360.0, 16.0, phase_color),
        ("Generation:", 395.0, 16.0, WHITE),
        (generation.as_str(), 415.0, 20.0, Color::from_rgba(255, 105, 180, 255)),
        ("Bodies:", 450.0, 16.0, WHITE),
        (&format!("{}", info.bodies), 470.0, 16.0, Color::from_rgba(180, 180, 180, 255)),
        (info.algorithm.name(), 505.0, 14.0, GRAY),
        (&format!("Step: {:.1}ms", info.step_ms), 530.0, 13.0, step_color),
        (&format!("Render: {:.1}ms", info.render_ms), 545.0, 13.0, GRAY),
        (&format!("FPS: {:.0}", get_fps()), 560.0, 13.0, GRAY),
        (&format!("Zoom: {:.1}x", info.zoom), 585.0, 13.0, Color::from_rgba(180, 180, 180, 255)),
    ];
    labels.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });
}
