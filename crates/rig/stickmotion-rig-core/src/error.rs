//! Error and violation types for the rig layer.
//!
//! `RigError` is the only unrecoverable condition in this crate; everything a
//! pose can get wrong is reported as `PoseViolation` data and routed through
//! the caller's repair stage instead of being thrown.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unrecoverable configuration failures.
#[derive(Debug, Error)]
pub enum RigError {
    /// The requested variant is known neither to the config source nor to the
    /// built-in defaults.
    #[error("unsupported rig variant '{variant}' (available: {available:?})")]
    UnsupportedVariant {
        variant: String,
        available: Vec<String>,
    },
}

/// Coarse classification of a structural violation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    BoneLength,
    Bounds,
}

/// One structural constraint violation for a single pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseViolation {
    pub kind: ViolationKind,
    pub message: String,
}

impl PoseViolation {
    pub fn missing(msg: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::MissingField,
            message: msg.into(),
        }
    }

    pub fn bone_length(msg: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::BoneLength,
            message: msg.into(),
        }
    }

    pub fn bounds(msg: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Bounds,
            message: msg.into(),
        }
    }
}
