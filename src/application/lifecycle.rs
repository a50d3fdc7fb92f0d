//! The lifecycle state machine.
//!
//! A pure transition table; the engine owns the side effects. Keeping the
//! table free of effects makes every row directly testable.

use thiserror::Error;

/// Lifecycle phase. Exactly one at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl Phase {
    pub const fn name(&self) -> &'static str {
        match self {
            Phase::Stopped => "Stopped",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
        }
    }
}

/// Named control actions. A deployment only wires a subset of these to UI
/// triggers; the table always supports all five.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Pause,
    Resume,
    Restart,
}

/// What the engine must do alongside a phase change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Seed a fresh simulation state and start the frame driver.
    InitAndRun,
    /// Stop the frame driver and discard the simulation state.
    StopAndDiscard,
    /// Stop the frame driver, keep the simulation state.
    Suspend,
    /// Start the frame driver against the retained simulation state.
    ResumeRun,
    /// Discard whatever state exists, reseed, start the frame driver.
    Reinit,
}

/// The transition table. `None` means the action is invalid from this
/// phase and must be absorbed as a no-op (rapid or duplicate UI clicks
/// are not errors).
pub fn transition(phase: Phase, action: Action) -> Option<(Phase, Effect)> {
    match (phase, action) {
        (Phase::Stopped, Action::Start) => Some((Phase::Running, Effect::InitAndRun)),
        (Phase::Running | Phase::Paused, Action::Stop) => {
            Some((Phase::Stopped, Effect::StopAndDiscard))
        }
        (Phase::Running, Action::Pause) => Some((Phase::Paused, Effect::Suspend)),
        (Phase::Paused, Action::Resume) => Some((Phase::Running, Effect::ResumeRun)),
        (_, Action::Restart) => Some((Phase::Running, Effect::Reinit)),
        _ => None,
    }
}

/// UI trigger kinds a deployment may bind, in the fixed order the entry
/// point accepts them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Restart,
    Start,
    Stop,
    PlayPause,
}

impl ControlKind {
    pub const fn label(&self) -> &'static str {
        match self {
            ControlKind::Restart => "Restart",
            ControlKind::Start => "Start",
            ControlKind::Stop => "Stop",
            ControlKind::PlayPause => "Play/Pause",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("at least one control must be bound")]
    Empty,
    #[error("at most three controls can be bound, got {0}")]
    TooMany(usize),
}

/// The 1..=3 controls a deployment wires, in entry-point order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlBindings(Vec<ControlKind>);

impl ControlBindings {
    pub fn new(kinds: Vec<ControlKind>) -> Result<Self, BindingError> {
        match kinds.len() {
            0 => Err(BindingError::Empty),
            1..=3 => Ok(Self(kinds)),
            n => Err(BindingError::TooMany(n)),
        }
    }

    pub fn kinds(&self) -> &[ControlKind] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_transition_table() {
        assert_eq!(
            transition(Phase::Stopped, Action::Start),
            Some((Phase::Running, Effect::InitAndRun))
        );
        assert_eq!(
            transition(Phase::Running, Action::Stop),
            Some((Phase::Stopped, Effect::StopAndDiscard))
        );
        assert_eq!(
            transition(Phase::Paused, Action::Stop),
            Some((Phase::Stopped, Effect::StopAndDiscard))
        );
        assert_eq!(
            transition(Phase::Running, Action::Pause),
            Some((Phase::Paused, Effect::Suspend))
        );
        assert_eq!(
            transition(Phase::Paused, Action::Resume),
            Some((Phase::Running, Effect::ResumeRun))
        );
        for phase in [Phase::Stopped, Phase::Running, Phase::Paused] {
            assert_eq!(
                transition(phase, Action::Restart),
                Some((Phase::Running, Effect::Reinit))
            );
        }
    }

    #[test]
    fn invalid_actions_are_noops() {
        assert_eq!(transition(Phase::Stopped, Action::Pause), None);
        assert_eq!(transition(Phase::Stopped, Action::Resume), None);
        assert_eq!(transition(Phase::Stopped, Action::Stop), None);
        assert_eq!(transition(Phase::Running, Action::Start), None);
        assert_eq!(transition(Phase::Running, Action::Resume), None);
        assert_eq!(transition(Phase::Paused, Action::Pause), None);
        assert_eq!(transition(Phase::Paused, Action::Start), None);
    }

    #[test]
    fn bindings_enforce_arity() {
        assert_eq!(ControlBindings::new(vec![]), Err(BindingError::Empty));
        assert!(ControlBindings::new(vec![ControlKind::Start]).is_ok());
        assert_eq!(
            ControlBindings::new(vec![ControlKind::Start; 4]),
            Err(BindingError::TooMany(4))
        );
        let observed =
            ControlBindings::new(vec![ControlKind::Restart, ControlKind::PlayPause]).unwrap();
        assert_eq!(
            observed.kinds(),
            &[ControlKind::Restart, ControlKind::PlayPause]
        );
    }
}
