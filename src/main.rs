use macroquad::logging::error;
use macroquad::prelude::*;

use liniverse::{
    Camera, ControlKind, LoopScheduler, SimParams, Surface, input, launch, rendering,
    rendering::HudInfo, ui,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Liniverse".to_owned(),
        window_width: 1000,
        window_height: 800,
        // Surface dimensions are fixed for the session.
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let surface = Surface {
        width: f64::from(ui::view_width()),
        height: f64::from(ui::view_height()),
    };

    // This deployment wires the restart + play/pause variant; the engine
    // supports the full action set either way.
    let mut engine = match launch(
        surface,
        vec![ControlKind::Restart, ControlKind::PlayPause],
        LoopScheduler::default(),
        SimParams::default(),
    ) {
        Ok(engine) => engine,
        Err(err) => {
            error!("failed to launch: {err}");
            return;
        }
    };

    let mut camera = Camera::new();
    let mut pan = input::PanState::default();
    let mut render_ms = 0.0_f32;

    loop {
        let mouse_pos = mouse_position();
        let buttons = ui::create_control_buttons(engine.bindings());

        input::process_button_clicks(&mut engine, &buttons, mouse_pos);
        input::process_keyboard(&mut engine, &mut camera);
        input::handle_zoom(&mut camera);
        input::handle_pan(&mut camera, mouse_pos, &mut pan);
        input::handle_spawn_click(&mut engine, &camera, mouse_pos);

        // Fire the pending frame subscription, if the driver holds one.
        if let Some(id) = engine.pending_frame() {
            engine.tick(id, get_frame_time());
        }

        let render_start = std::time::Instant::now();
        clear_background(BLACK);
        if let Some(universe) = engine.universe() {
            rendering::draw_universe(universe, &camera);
        }
        rendering::draw_hud(
            &HudInfo {
                phase: engine.phase(),
                generation: engine.generation(),
                bodies: engine.universe().map_or(0, |u| u.len()),
                algorithm: engine.algorithm(),
                step_ms: engine.last_step_ms(),
                render_ms,
                zoom: camera.zoom,
            },
            &buttons,
            mouse_pos,
        );
        render_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }
}
