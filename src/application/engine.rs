//! The engine: simulation state, lifecycle effects and the entry point
//! the host glue calls.

use std::time::Instant;

use macroquad::logging::{error, info};
use thiserror::Error;

use super::driver::{FrameDriver, FrameId, FrameScheduler};
use super::lifecycle::{self, Action, BindingError, ControlBindings, ControlKind, Effect, Phase};
use crate::domain::{Algorithm, DEFAULT_PLANET_COUNT, Rect, Universe};

/// Cap on simulation steps per frame so a long stall cannot freeze the
/// app catching up.
const MAX_STEPS_PER_TICK: u32 = 4;

/// The drawable target as the host hands it over: opaque to the core
/// beyond its pixel dimensions, which are fixed for the session.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("surface must have a positive area, got {width}x{height}")]
    ZeroSizedSurface { width: f64, height: f64 },
    #[error(transparent)]
    Bindings(#[from] BindingError),
}

/// Tunables a deployment may override before launch.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
    /// Seed for the first generation; each restart advances it by one.
    pub seed: u64,
    pub planet_count: usize,
    /// Fixed-step cadence, decoupled from the display refresh rate.
    pub steps_per_second: f64,
    /// Simulation time per step.
    pub step_dt: f64,
    pub algorithm: Algorithm,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            seed: 1,
            planet_count: DEFAULT_PLANET_COUNT,
            steps_per_second: 30.0,
            step_dt: 1.0,
            algorithm: Algorithm::default(),
        }
    }
}

/// The live simulation: current generation plus the bookkeeping that
/// produced it. Replaced wholesale on restart, dropped on stop.
pub struct SimulationState {
    pub universe: Universe,
    pub generation: u64,
    pub seed: u64,
}

/// The opaque handle `launch` returns. Owns the lifecycle phase, the
/// simulation state and the frame subscription; dropping it tears the
/// subscription down.
pub struct Engine<S: FrameScheduler> {
    surface: Rect,
    params: SimParams,
    bindings: ControlBindings,
    driver: FrameDriver<S>,
    phase: Phase,
    sim: Option<SimulationState>,
    accumulator: f64,
    next_seed: u64,
    last_step_ms: f32,
}

/// The single entry point the glue layer calls: validates the surface
/// and the 1..=3 control handles, then boots straight into Running so the
/// app seeds and plays on load.
pub fn launch<S: FrameScheduler>(
    surface: Surface,
    controls: Vec<ControlKind>,
    scheduler: S,
    params: SimParams,
) -> Result<Engine<S>, LaunchError> {
    if !(surface.width > 0.0 && surface.height > 0.0) {
        return Err(LaunchError::ZeroSizedSurface {
            width: surface.width,
            height: surface.height,
        });
    }
    let bindings = ControlBindings::new(controls)?;

    let mut engine = Engine {
        surface: Rect::surface(surface.width, surface.height),
        next_seed: params.seed,
        params,
        bindings,
        driver: FrameDriver::new(scheduler),
        phase: Phase::Stopped,
        sim: None,
        accumulator: 0.0,
        last_step_ms: 0.0,
    };
    engine.apply(Action::Start);
    Ok(engine)
}

impl<S: FrameScheduler> Engine<S> {
    /// Feed a control action through the transition table. Actions the
    /// table rejects are absorbed silently (duplicate clicks are fine).
    pub fn apply(&mut self, action: Action) {
        if let Some((next, effect)) = lifecycle::transition(self.phase, action) {
            info!(
                "lifecycle: {} -> {} on {:?}",
                self.phase.name(),
                next.name(),
                action
            );
            self.phase = next;
            self.run_effect(effect);
        }
    }

    /// Dispatch a bound UI trigger. Play/pause resolves against the
    /// current phase.
    pub fn trigger(&mut self, kind: ControlKind) {
        match kind {
            ControlKind::Restart => self.apply(Action::Restart),
            ControlKind::Start => self.apply(Action::Start),
            ControlKind::Stop => self.apply(Action::Stop),
            ControlKind::PlayPause => self.toggle_play_pause(),
        }
    }

    pub fn toggle_play_pause(&mut self) {
        match self.phase {
            Phase::Running => self.apply(Action::Pause),
            Phase::Paused => self.apply(Action::Resume),
            Phase::Stopped => self.apply(Action::Start),
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::InitAndRun | Effect::Reinit => {
                // Invalidate any frame scheduled against the old state
                // before arming a new subscription.
                self.driver.stop();
                self.sim = Some(self.fresh_state());
                self.accumulator = 0.0;
                self.driver.start();
            }
            Effect::StopAndDiscard => {
                self.driver.stop();
                self.sim = None;
                self.accumulator = 0.0;
            }
            Effect::Suspend => self.driver.stop(),
            Effect::ResumeRun => self.driver.start(),
        }
    }

    fn fresh_state(&mut self) -> SimulationState {
        let seed = self.next_seed;
        self.next_seed += 1;
        info!("seeding universe (seed {seed})");
        SimulationState {
            universe: Universe::seeded(seed, self.surface, self.params.planet_count),
            generation: 0,
            seed,
        }
    }

    /// One fired frame callback. Stale ids (scheduled before a stop,
    /// pause or restart) tick to nothing. Real frame time accumulates
    /// into fixed simulation steps, so variable refresh cadence neither
    /// drifts nor changes the generation sequence.
    pub fn tick(&mut self, id: FrameId, frame_dt: f32) {
        if !self.driver.accept(id) || self.phase != Phase::Running {
            return;
        }
        let Some(sim) = self.sim.as_mut() else {
            return;
        };

        self.accumulator += frame_dt as f64;
        let interval = 1.0 / self.params.steps_per_second;
        let started = Instant::now();
        let mut steps = 0;
        let mut poisoned = None;

        while self.accumulator >= interval && steps < MAX_STEPS_PER_TICK {
            let next = sim.universe.advance(self.params.algorithm, self.params.step_dt);
            if !next.is_finite() {
                poisoned = Some(sim.generation);
                break;
            }
            sim.universe = next;
            sim.generation += 1;
            self.accumulator -= interval;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_TICK {
            // Shed any remaining backlog after a stall.
            self.accumulator = 0.0;
        }
        if steps > 0 {
            self.last_step_ms = started.elapsed().as_secs_f32() * 1000.0 / steps as f32;
        }

        if let Some(generation) = poisoned {
            error!("non-finite state after generation {generation}, halting");
            self.driver.stop();
            self.sim = None;
            self.phase = Phase::Stopped;
        }
    }

    /// Add one planet at the given surface position. Only meaningful
    /// while a simulation exists; a click while Stopped is absorbed.
    pub fn spawn_body(&mut self, x: f64, y: f64) {
        if let Some(sim) = self.sim.as_mut() {
            sim.universe = sim.universe.with_spawned(x, y);
        }
    }

    pub fn cycle_algorithm(&mut self) {
        self.params.algorithm = self.params.algorithm.next();
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.params.algorithm
    }

    pub fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    /// Read-only view of the current generation, if one exists.
    pub fn universe(&self) -> Option<&Universe> {
        self.sim.as_ref().map(|s| &s.universe)
    }

    pub fn generation(&self) -> Option<u64> {
        self.sim.as_ref().map(|s| s.generation)
    }

    pub const fn pending_frame(&self) -> Option<FrameId> {
        self.driver.pending()
    }

    pub const fn last_step_ms(&self) -> f32 {
        self.last_step_ms
    }

    pub const fn steps_per_second(&self) -> f64 {
        self.params.steps_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::super::driver::testing::RecordingScheduler;
    use super::*;

    fn test_engine() -> Engine<RecordingScheduler> {
        let params = SimParams {
            planet_count: 8,
            // Exactly representable interval so f32 frame times hit the
            // step boundary precisely.
            steps_per_second: 4.0,
            ..SimParams::default()
        };
        launch(
            Surface {
                width: 64.0,
                height: 64.0,
            },
            vec![ControlKind::Restart, ControlKind::PlayPause],
            RecordingScheduler::default(),
            params,
        )
        .unwrap()
    }

    fn step_interval(engine: &Engine<RecordingScheduler>) -> f32 {
        (1.0 / engine.params.steps_per_second) as f32
    }

    #[test]
    fn launch_rejects_zero_sized_surface() {
        let result = launch(
            Surface {
                width: 0.0,
                height: 480.0,
            },
            vec![ControlKind::Restart, ControlKind::PlayPause],
            RecordingScheduler::default(),
            SimParams::default(),
        );
        assert!(matches!(
            result,
            Err(LaunchError::ZeroSizedSurface { .. })
        ));
    }

    #[test]
    fn launch_rejects_unbound_controls() {
        let result = launch(
            Surface {
                width: 640.0,
                height: 480.0,
            },
            vec![],
            RecordingScheduler::default(),
            SimParams::default(),
        );
        assert!(matches!(result, Err(LaunchError::Bindings(_))));
    }

    #[test]
    fn launch_boots_into_running() {
        let engine = test_engine();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.generation(), Some(0));
        // 8 planets plus the pinned star.
        assert_eq!(engine.universe().unwrap().len(), 9);
        assert!(engine.pending_frame().is_some());
    }

    #[test]
    fn start_while_running_is_a_noop() {
        let mut engine = test_engine();
        let pending = engine.pending_frame();
        let before = engine.universe().unwrap().clone();
        engine.apply(Action::Start);
        // Same subscription, same state: no reseed, no second loop.
        assert_eq!(engine.pending_frame(), pending);
        assert_eq!(engine.universe(), Some(&before));
    }

    #[test]
    fn each_accepted_tick_steps_once_at_cadence() {
        let mut engine = test_engine();
        let dt = step_interval(&engine);
        for expected in 1..=5 {
            let id = engine.pending_frame().unwrap();
            engine.tick(id, dt);
            assert_eq!(engine.generation(), Some(expected));
        }
    }

    #[test]
    fn backlog_is_capped_and_shed() {
        let mut engine = test_engine();
        let id = engine.pending_frame().unwrap();
        // Ten intervals worth of stall advances at most the cap.
        engine.tick(id, step_interval(&engine) * 10.0);
        assert_eq!(engine.generation(), Some(u64::from(MAX_STEPS_PER_TICK)));
        assert_eq!(engine.accumulator, 0.0);
    }

    #[test]
    fn stop_discards_state_and_ignores_stale_frames() {
        let mut engine = test_engine();
        let stale = engine.pending_frame().unwrap();
        engine.apply(Action::Stop);
        assert_eq!(engine.phase(), Phase::Stopped);
        assert!(engine.universe().is_none());

        engine.tick(stale, 1.0);
        assert!(engine.universe().is_none());
        assert_eq!(engine.phase(), Phase::Stopped);
    }

    #[test]
    fn pause_retains_state_and_resume_continues_it() {
        let mut engine = test_engine();
        let id = engine.pending_frame().unwrap();
        engine.tick(id, step_interval(&engine));

        engine.apply(Action::Pause);
        assert_eq!(engine.phase(), Phase::Paused);
        assert_eq!(engine.generation(), Some(1));
        let frozen = engine.universe().unwrap().clone();

        // Frames fired while paused change nothing.
        engine.tick(id, 10.0);
        assert_eq!(engine.universe(), Some(&frozen));

        engine.apply(Action::Resume);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.universe(), Some(&frozen));
        assert_eq!(engine.generation(), Some(1));
    }

    #[test]
    fn pause_and_resume_are_noops_while_stopped() {
        let mut engine = test_engine();
        engine.apply(Action::Stop);
        engine.apply(Action::Pause);
        assert_eq!(engine.phase(), Phase::Stopped);
        engine.apply(Action::Resume);
        assert_eq!(engine.phase(), Phase::Stopped);
    }

    #[test]
    fn pre_stop_frame_cannot_touch_post_restart_state() {
        let mut engine = test_engine();
        let stale = engine.pending_frame().unwrap();
        engine.apply(Action::Stop);
        engine.apply(Action::Restart);
        assert_eq!(engine.generation(), Some(0));

        engine.tick(stale, 10.0);
        assert_eq!(engine.generation(), Some(0));

        // The live subscription still works.
        let live = engine.pending_frame().unwrap();
        engine.tick(live, step_interval(&engine));
        assert_eq!(engine.generation(), Some(1));
    }

    #[test]
    fn restart_reseeds_with_a_new_seed() {
        let mut engine = test_engine();
        let first = engine.universe().unwrap().clone();
        engine.apply(Action::Restart);
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.generation(), Some(0));
        assert_ne!(engine.universe(), Some(&first));
    }

    #[test]
    fn play_pause_trigger_cycles_phases() {
        let mut engine = test_engine();
        engine.trigger(ControlKind::PlayPause);
        assert_eq!(engine.phase(), Phase::Paused);
        engine.trigger(ControlKind::PlayPause);
        assert_eq!(engine.phase(), Phase::Running);

        engine.apply(Action::Stop);
        engine.trigger(ControlKind::PlayPause);
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn spawn_is_absorbed_while_stopped() {
        let mut engine = test_engine();
        engine.spawn_body(10.0, 10.0);
        assert_eq!(engine.universe().unwrap().len(), 10);

        engine.apply(Action::Stop);
        engine.spawn_body(10.0, 10.0);
        assert!(engine.universe().is_none());
    }

    #[test]
    fn cycle_algorithm_rotates_the_strategy() {
        let mut engine = test_engine();
        let before = engine.algorithm();
        engine.cycle_algorithm();
        assert_ne!(engine.algorithm(), before);
    }
}
