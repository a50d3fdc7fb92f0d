// Domain layer - the simulation itself
pub mod domain;

// Application layer - lifecycle, frame driving, entry point
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod input;
pub mod rendering;
pub mod ui;

// Re-exports for convenience
pub use application::{
    Action, Camera, ControlBindings, ControlKind, Engine, LaunchError, LoopScheduler, Phase,
    SimParams, Surface, launch,
};
pub use domain::{Algorithm, Planet, Point, Rect, Universe};
pub use ui::Button;
