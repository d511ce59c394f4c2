//! Coordinate rig: 12 named joints, validated by bone length and canvas
//! bounds.
//!
//! The joint set deliberately omits elbows and knees; shoulders connect
//! straight to hands and hips straight to feet, which keeps external pose
//! producers accurate while preserving expressiveness.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::config::{RigConfig, CANVAS_MARGIN};
use crate::error::PoseViolation;
use crate::pose::{Joint, JointMap, Pose};
use crate::rig::Rig;

/// Joints a coordinate pose must always carry. `center` is optional and only
/// used as a positional reference by producers.
pub const REQUIRED_JOINTS: &[&str] = &[
    "head",
    "neck",
    "waist",
    "left_shoulder",
    "left_hand",
    "right_shoulder",
    "right_hand",
    "left_hip",
    "left_foot",
    "right_hip",
    "right_foot",
];

/// Bone table: (bone name, joint a, joint b, bone-length table key, default).
const BONE_CHECKS: &[(&str, &str, &str, &str, f32)] = &[
    ("neck_to_head", "neck", "head", "neck_to_head", 20.0),
    ("neck_to_waist", "neck", "waist", "neck_to_waist", 60.0),
    ("left_arm", "left_shoulder", "left_hand", "arm_length", 50.0),
    ("right_arm", "right_shoulder", "right_hand", "arm_length", 50.0),
    ("left_leg", "left_hip", "left_foot", "leg_length", 50.0),
    ("right_leg", "right_hip", "right_foot", "leg_length", 50.0),
];

const DEFAULT_TOLERANCE: f32 = 0.5;

#[derive(Debug)]
pub struct CoordinateRig {
    config: Arc<RigConfig>,
}

impl CoordinateRig {
    pub fn new(config: Arc<RigConfig>) -> Self {
        Self { config }
    }

    pub fn boxed(config: Arc<RigConfig>) -> Box<dyn Rig> {
        Box::new(Self::new(config))
    }

    /// Standing joints around an arbitrary anchor point.
    pub fn standing_joints(cx: f32, cy: f32) -> JointMap {
        let mut joints = JointMap::new();
        joints.insert("head".to_string(), Joint::new(cx, cy - 60.0));
        joints.insert("neck".to_string(), Joint::new(cx, cy - 40.0));
        joints.insert("waist".to_string(), Joint::new(cx, cy + 20.0));
        joints.insert("left_shoulder".to_string(), Joint::new(cx - 20.0, cy - 35.0));
        joints.insert("left_hand".to_string(), Joint::new(cx - 50.0, cy + 10.0));
        joints.insert("right_shoulder".to_string(), Joint::new(cx + 20.0, cy - 35.0));
        joints.insert("right_hand".to_string(), Joint::new(cx + 50.0, cy + 10.0));
        joints.insert("left_hip".to_string(), Joint::new(cx - 15.0, cy + 20.0));
        joints.insert("left_foot".to_string(), Joint::new(cx - 15.0, cy + 70.0));
        joints.insert("right_hip".to_string(), Joint::new(cx + 15.0, cy + 20.0));
        joints.insert("right_foot".to_string(), Joint::new(cx + 15.0, cy + 70.0));
        joints
    }

    fn validate_joints(&self, joints: &JointMap) -> Vec<PoseViolation> {
        let mut violations = Vec::new();

        // Without the full joint set the bone sweep is meaningless; report the
        // first gap and stop.
        for name in REQUIRED_JOINTS {
            if !joints.contains_key(*name) {
                violations.push(PoseViolation::missing(format!("missing joint: {name}")));
                return violations;
            }
        }

        for (bone, a, b, length_key, default_len) in BONE_CHECKS {
            let expected = self.config.bone_length_or(length_key, *default_len);
            let tolerance = self.config.tolerance_or(length_key, DEFAULT_TOLERANCE);
            let actual = joints[*a].distance(&joints[*b]);
            let min_allowed = expected * (1.0 - tolerance);
            let max_allowed = expected * (1.0 + tolerance);
            if actual < min_allowed || actual > max_allowed {
                let deviation = (actual - expected).abs() / expected * 100.0;
                violations.push(PoseViolation::bone_length(format!(
                    "bone {bone} length {actual:.1} outside {expected:.0} ±{:.0}% ({deviation:.1}% deviation)",
                    tolerance * 100.0
                )));
            }
        }

        for (name, joint) in joints {
            violations.extend(self.validate_canvas_bounds(name, joint));
        }

        violations
    }

    fn validate_canvas_bounds(&self, name: &str, joint: &Joint) -> Vec<PoseViolation> {
        let mut violations = Vec::new();
        let max_x = self.config.canvas_width + CANVAS_MARGIN;
        let max_y = self.config.canvas_height + CANVAS_MARGIN;
        if joint.x < -CANVAS_MARGIN || joint.x > max_x {
            violations.push(PoseViolation::bounds(format!(
                "{name} x coordinate {:.1} outside canvas range [{:.0}, {max_x:.0}]",
                joint.x, -CANVAS_MARGIN
            )));
        }
        if joint.y < -CANVAS_MARGIN || joint.y > max_y {
            violations.push(PoseViolation::bounds(format!(
                "{name} y coordinate {:.1} outside canvas range [{:.0}, {max_y:.0}]",
                joint.y, -CANVAS_MARGIN
            )));
        }
        violations
    }
}

impl Rig for CoordinateRig {
    fn variant(&self) -> &str {
        &self.config.variant
    }

    fn config(&self) -> &Arc<RigConfig> {
        &self.config
    }

    fn data_field_name(&self) -> &'static str {
        "joints"
    }

    fn default_pose(&self) -> Pose {
        let (cx, cy) = self.config.canvas_center();
        Pose::Joints(Self::standing_joints(cx, cy))
    }

    fn system_instructions(&self) -> String {
        let cfg = &self.config;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Describe stick-figure motion with {} named joints.",
            REQUIRED_JOINTS.len()
        );
        let _ = writeln!(out, "Torso: head, neck, waist.");
        let _ = writeln!(
            out,
            "Arms (no elbows): left_shoulder, left_hand, right_shoulder, right_hand."
        );
        let _ = writeln!(
            out,
            "Legs (no knees): left_hip, left_foot, right_hip, right_foot."
        );
        let _ = writeln!(out, "Proportions (canvas units):");
        let mut segments: Vec<&String> = cfg.bone_lengths.keys().collect();
        segments.sort();
        for segment in segments {
            let _ = writeln!(out, "  {segment}: {:.0}", cfg.bone_lengths[segment]);
        }
        let _ = writeln!(
            out,
            "Bone lengths must stay near these values; symmetric pairs stay equal."
        );
        let _ = writeln!(
            out,
            "Canvas: {:.0}x{:.0}; joints may exceed it by at most {:.0} units.",
            cfg.canvas_width, cfg.canvas_height, CANVAS_MARGIN
        );
        let (cx, cy) = cfg.canvas_center();
        let _ = writeln!(out, "Reference standing pose around ({cx:.0}, {cy:.0}):");
        let joints = Self::standing_joints(cx, cy);
        for name in REQUIRED_JOINTS {
            let joint = &joints[*name];
            let _ = writeln!(out, "  {name}: ({:.0}, {:.0})", joint.x, joint.y);
        }
        out
    }

    fn validate(&self, pose: &Pose) -> Vec<PoseViolation> {
        match pose.joints() {
            Some(joints) => self.validate_joints(joints),
            None => vec![PoseViolation::missing(
                "coordinate rig expects a joint map, got angular parameters",
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::error::ViolationKind;

    fn rig() -> CoordinateRig {
        CoordinateRig::new(Arc::new(default_config("12dof").unwrap()))
    }

    /// it should accept the canonical standing pose
    #[test]
    fn default_pose_is_valid() {
        let rig = rig();
        assert!(rig.validate(&rig.default_pose()).is_empty());
    }

    /// it should stop at the first missing joint
    #[test]
    fn missing_joint_short_circuits() {
        let rig = rig();
        let mut joints = CoordinateRig::standing_joints(400.0, 300.0);
        joints.remove("neck");
        joints.remove("waist");
        let violations = rig.validate(&Pose::Joints(joints));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MissingField);
    }

    /// it should flag bone lengths outside expected*(1±tol)
    #[test]
    fn stretched_arm_is_flagged() {
        let rig = rig();
        let mut joints = CoordinateRig::standing_joints(400.0, 300.0);
        joints.insert("right_hand".to_string(), Joint::new(600.0, 310.0));
        let violations = rig.validate(&Pose::Joints(joints));
        assert!(violations
            .iter()
            .any(|v| v.kind == ViolationKind::BoneLength && v.message.contains("right_arm")));
    }

    /// it should flag joints beyond the canvas margin
    #[test]
    fn out_of_bounds_joint_is_flagged() {
        let rig = rig();
        let mut joints = CoordinateRig::standing_joints(400.0, 300.0);
        joints.insert("head".to_string(), Joint::new(900.0, 240.0));
        let violations = rig.validate(&Pose::Joints(joints));
        assert!(violations.iter().any(|v| v.kind == ViolationKind::Bounds));
    }

    /// it should reject an angular payload outright
    #[test]
    fn angular_payload_is_missing_field() {
        let rig = rig();
        let violations = rig.validate(&Pose::Params(Default::default()));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MissingField);
    }

    /// it should render deterministic instructions mentioning every segment
    #[test]
    fn instructions_are_deterministic_and_complete() {
        let rig = rig();
        let a = rig.system_instructions();
        let b = rig.system_instructions();
        assert_eq!(a, b);
        for segment in rig.config().bone_lengths.keys() {
            assert!(a.contains(segment.as_str()), "missing {segment}");
        }
    }
}
