//! Constraint validation: a pure sweep of every keyframe against the rig.

use serde::{Deserialize, Serialize};

use stickmotion_rig_core::{Rig, ViolationKind};

use crate::data::Timeline;

/// One tagged constraint violation inside a timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub keyframe_index: usize,
    /// Empty when the violation is not attributable to one character.
    pub character_id: String,
    pub kind: ViolationKind,
    pub message: String,
}

/// Result of a validation sweep.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validate every keyframe of every character; never mutates the input.
pub fn validate_timeline(rig: &dyn Rig, timeline: &Timeline) -> ValidationReport {
    let mut errors = Vec::new();

    for (index, keyframe) in timeline.keyframes.iter().enumerate() {
        if keyframe.characters.is_empty() {
            errors.push(ValidationError {
                keyframe_index: index,
                character_id: String::new(),
                kind: ViolationKind::MissingField,
                message: "keyframe carries no character poses".to_string(),
            });
            continue;
        }

        for (character_id, pose) in &keyframe.characters {
            for violation in rig.validate(pose) {
                errors.push(ValidationError {
                    keyframe_index: index,
                    character_id: character_id.clone(),
                    kind: violation.kind,
                    message: violation.message,
                });
            }
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
