//! Best-effort, local auto-repair of validation errors.
//!
//! Bounds violations are clamped into the canvas in place. Bone-length
//! violations are left untouched: a correct fix would have to preserve the
//! bone's direction while rescaling it around the right pivot, and no repair
//! heuristic has been settled on yet.

use log::debug;

use stickmotion_rig_core::{Pose, Rig, ViolationKind};

use crate::data::Timeline;
use crate::validator::ValidationError;

/// Mutate the timeline so that previously reported bounds violations are
/// clamped into `[0, canvas_width] x [0, canvas_height]`. Repair never fails;
/// whatever it cannot fix is picked up by the caller's re-validation.
pub fn auto_repair(rig: &dyn Rig, timeline: &mut Timeline, errors: &[ValidationError]) {
    let config = rig.config();
    let (width, height) = (config.canvas_width, config.canvas_height);

    for error in errors {
        match error.kind {
            ViolationKind::Bounds => {
                let Some(keyframe) = timeline.keyframes.get_mut(error.keyframe_index) else {
                    continue;
                };
                let Some(pose) = keyframe.characters.get_mut(&error.character_id) else {
                    continue;
                };
                clamp_pose(pose, width, height);
            }
            ViolationKind::BoneLength => {
                // Placeholder: keep direction, adjust length. Unresolved.
                debug!(
                    "skipping bone-length repair at keyframe {}: {}",
                    error.keyframe_index, error.message
                );
            }
            ViolationKind::MissingField => {}
        }
    }
}

fn clamp_pose(pose: &mut Pose, width: f32, height: f32) {
    match pose {
        Pose::Joints(joints) => {
            for joint in joints.values_mut() {
                joint.x = joint.x.clamp(0.0, width);
                joint.y = joint.y.clamp(0.0, height);
            }
        }
        Pose::Params(params) => {
            if let Some(x) = params.get_mut("head_x") {
                *x = x.clamp(0.0, width);
            }
            if let Some(y) = params.get_mut("head_y") {
                *y = y.clamp(0.0, height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Character, GenerationMethod, Keyframe, Timeline};
    use crate::validator::validate_timeline;
    use std::sync::Arc;
    use stickmotion_rig_core::{config::default_config, CoordinateRig, Joint};

    fn rig() -> CoordinateRig {
        CoordinateRig::new(Arc::new(default_config("12dof").unwrap()))
    }

    fn timeline_with(keyframes: Vec<Keyframe>) -> Timeline {
        Timeline {
            characters: vec![Character::new("char1", "Hero", "#2196F3")],
            keyframes,
            variant: "12dof".to_string(),
            method: GenerationMethod::Template,
            target_fps: None,
        }
    }

    /// it should clamp every joint of the offending character into the canvas
    #[test]
    fn bounds_violations_are_clamped() {
        let rig = rig();
        let mut joints = CoordinateRig::standing_joints(400.0, 300.0);
        joints.insert("right_hand".to_string(), Joint::new(900.0, -80.0));
        let kf = Keyframe::for_character(0, "stray", "char1", Pose::Joints(joints));
        let mut timeline = timeline_with(vec![kf]);

        let report = validate_timeline(&rig, &timeline);
        assert!(!report.is_valid);
        auto_repair(&rig, &mut timeline, &report.errors);

        let repaired = timeline.keyframes[0].characters["char1"].joints().unwrap();
        for joint in repaired.values() {
            assert!((0.0..=800.0).contains(&joint.x));
            assert!((0.0..=600.0).contains(&joint.y));
        }
    }

    /// it should leave bone-length violations untouched
    #[test]
    fn bone_length_repair_is_noop() {
        let rig = rig();
        let mut joints = CoordinateRig::standing_joints(400.0, 300.0);
        // stretched arm, still inside the canvas
        joints.insert("right_hand".to_string(), Joint::new(550.0, 310.0));
        let kf = Keyframe::for_character(0, "stretch", "char1", Pose::Joints(joints.clone()));
        let mut timeline = timeline_with(vec![kf]);

        let report = validate_timeline(&rig, &timeline);
        assert!(!report.is_valid);
        auto_repair(&rig, &mut timeline, &report.errors);

        assert_eq!(
            timeline.keyframes[0].characters["char1"].joints().unwrap(),
            &joints
        );
    }
}
