//! Angular rig: head position plus five limb/body angles.
//!
//! Simpler to drive than the coordinate rig and cheap to validate; the
//! parameter count is what external producers get wrong least often.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::config::{RigConfig, CANVAS_MARGIN};
use crate::error::PoseViolation;
use crate::pose::{ParamMap, Pose};
use crate::rig::Rig;

/// Parameters an angular pose must carry.
pub const REQUIRED_PARAMS: &[&str] = &[
    "head_x",
    "head_y",
    "body_angle",
    "left_arm_angle",
    "right_arm_angle",
    "left_leg_angle",
    "right_leg_angle",
];

/// Angle parameter -> angle-limit table key and default range.
const ANGLE_CHECKS: &[(&str, &str, (f32, f32))] = &[
    ("body_angle", "body_angle", (-45.0, 45.0)),
    ("left_arm_angle", "arm_angle", (-180.0, 180.0)),
    ("right_arm_angle", "arm_angle", (-180.0, 180.0)),
    ("left_leg_angle", "leg_angle", (-45.0, 45.0)),
    ("right_leg_angle", "leg_angle", (-45.0, 45.0)),
];

// The head must stay well inside the canvas so the whole figure fits.
const HEAD_X_RANGE: (f32, f32) = (100.0, 700.0);
const HEAD_Y_RANGE: (f32, f32) = (100.0, 400.0);

#[derive(Debug)]
pub struct AngularRig {
    config: Arc<RigConfig>,
}

impl AngularRig {
    pub fn new(config: Arc<RigConfig>) -> Self {
        Self { config }
    }

    pub fn boxed(config: Arc<RigConfig>) -> Box<dyn Rig> {
        Box::new(Self::new(config))
    }

    /// Standing parameters around an arbitrary head position.
    pub fn standing_params(head_x: f32, head_y: f32) -> ParamMap {
        let mut params = ParamMap::new();
        params.insert("head_x".to_string(), head_x);
        params.insert("head_y".to_string(), head_y);
        params.insert("body_angle".to_string(), 0.0);
        params.insert("left_arm_angle".to_string(), -45.0);
        params.insert("right_arm_angle".to_string(), 45.0);
        params.insert("left_leg_angle".to_string(), -10.0);
        params.insert("right_leg_angle".to_string(), 10.0);
        params
    }

    fn validate_params(&self, params: &ParamMap) -> Vec<PoseViolation> {
        let mut violations = Vec::new();

        for name in REQUIRED_PARAMS {
            if !params.contains_key(*name) {
                violations.push(PoseViolation::missing(format!("missing parameter: {name}")));
            }
        }
        if !violations.is_empty() {
            return violations;
        }

        let head_x = params["head_x"];
        let head_y = params["head_y"];
        if head_x < HEAD_X_RANGE.0 || head_x > HEAD_X_RANGE.1 {
            violations.push(PoseViolation::bounds(format!(
                "head_x {head_x:.1} outside range [{:.0}, {:.0}]",
                HEAD_X_RANGE.0, HEAD_X_RANGE.1
            )));
        }
        if head_y < HEAD_Y_RANGE.0 || head_y > HEAD_Y_RANGE.1 {
            violations.push(PoseViolation::bounds(format!(
                "head_y {head_y:.1} outside range [{:.0}, {:.0}]",
                HEAD_Y_RANGE.0, HEAD_Y_RANGE.1
            )));
        }

        let max_x = self.config.canvas_width + CANVAS_MARGIN;
        let max_y = self.config.canvas_height + CANVAS_MARGIN;
        if head_x < -CANVAS_MARGIN || head_x > max_x {
            violations.push(PoseViolation::bounds(format!(
                "head x coordinate {head_x:.1} outside canvas range [{:.0}, {max_x:.0}]",
                -CANVAS_MARGIN
            )));
        }
        if head_y < -CANVAS_MARGIN || head_y > max_y {
            violations.push(PoseViolation::bounds(format!(
                "head y coordinate {head_y:.1} outside canvas range [{:.0}, {max_y:.0}]",
                -CANVAS_MARGIN
            )));
        }

        for (param, limit_key, default_range) in ANGLE_CHECKS {
            let (min, max) = self.config.angle_limit_or(limit_key, *default_range);
            let value = params[*param];
            if value < min || value > max {
                violations.push(PoseViolation::bounds(format!(
                    "{param} {value:.1} outside range [{min:.0}, {max:.0}]"
                )));
            }
        }

        violations
    }
}

impl Rig for AngularRig {
    fn variant(&self) -> &str {
        &self.config.variant
    }

    fn config(&self) -> &Arc<RigConfig> {
        &self.config
    }

    fn data_field_name(&self) -> &'static str {
        "pose"
    }

    fn default_pose(&self) -> Pose {
        let (cx, cy) = self.config.canvas_center();
        Pose::Params(Self::standing_params(cx, cy - 100.0))
    }

    fn system_instructions(&self) -> String {
        let cfg = &self.config;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Describe stick-figure motion with {} parameters.",
            REQUIRED_PARAMS.len()
        );
        let _ = writeln!(
            out,
            "head_x, head_y position the head (x {:.0}-{:.0}, y {:.0}-{:.0}).",
            HEAD_X_RANGE.0, HEAD_X_RANGE.1, HEAD_Y_RANGE.0, HEAD_Y_RANGE.1
        );
        for (param, limit_key, default_range) in ANGLE_CHECKS {
            let (min, max) = cfg.angle_limit_or(limit_key, *default_range);
            let _ = writeln!(out, "{param}: degrees in [{min:.0}, {max:.0}].");
        }
        let _ = writeln!(out, "Proportions (canvas units):");
        let mut segments: Vec<&String> = cfg.bone_lengths.keys().collect();
        segments.sort();
        for segment in segments {
            let _ = writeln!(out, "  {segment}: {:.0}", cfg.bone_lengths[segment]);
        }
        let _ = writeln!(
            out,
            "Canvas: {:.0}x{:.0}.",
            cfg.canvas_width, cfg.canvas_height
        );
        let _ = writeln!(
            out,
            "Reference standing pose: body_angle=0, arms -45/45, legs -10/10."
        );
        out
    }

    fn validate(&self, pose: &Pose) -> Vec<PoseViolation> {
        match pose.params() {
            Some(params) => self.validate_params(params),
            None => vec![PoseViolation::missing(
                "angular rig expects a parameter map, got coordinate joints",
            )],
        }
    }
}
