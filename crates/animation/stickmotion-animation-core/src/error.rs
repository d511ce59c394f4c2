//! Error contracts for assembly and the pipeline facade.

use thiserror::Error;

use stickmotion_rig_core::RigError;

/// Assembly-stage failures. `UnknownAction` is a signal for the host to route
/// the plan to its external fallback producer, not a hard failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("no template registered for action type '{action}'")]
    UnknownAction { action: String },

    #[error("invalid parameters for action '{action}'")]
    InvalidParams { action: String },
}

impl AssemblyError {
    /// True when the caller should hand the plan to the external fallback.
    pub fn is_fallback_signal(&self) -> bool {
        matches!(self, AssemblyError::UnknownAction { .. })
    }
}

/// Facade-level errors surfaced to the host.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Rig(#[from] RigError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("no keyframes to optimize")]
    EmptyTimeline,
}
