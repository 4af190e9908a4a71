use crate::game_state::Phase;
use thiserror::Error;

/// Contract violations in the game engine. Neither variant is recoverable:
/// both indicate a caller bug and should surface immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Draw attempted on an exhausted shoe. Correct callers reshuffle at
    /// the threshold before every deal, so this never fires in play.
    #[error("draw attempted on an empty shoe")]
    EmptyShoe,

    /// An operation was applied in a phase that does not allow it.
    #[error("{action} is not legal during {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: Phase,
    },
}
