mod camera;
pub mod driver;
mod engine;
mod lifecycle;

pub use camera::Camera;
pub use driver::{FrameDriver, FrameId, FrameScheduler, LoopScheduler};
pub use engine::{Engine, LaunchError, SimParams, SimulationState, Surface, launch};
pub use lifecycle::{
    Action, BindingError, ControlBindings, ControlKind, Effect, Phase, transition,
};
