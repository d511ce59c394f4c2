//! Greeting wave.
//!
//! Each repeat cycle raises the chosen hand through a rise frame (half
//! amplitude) and a peak frame (full amplitude), with a fall frame between
//! cycles; the whole gesture is bracketed by standing start/end frames.

use stickmotion_rig_core::{CoordinateRig, Joint, JointMap, Pose};

use crate::data::{Character, Keyframe};
use crate::descriptor::ActionParams;
use crate::templates::{ActionTemplate, TemplateContext};

const NORMAL_AMPLITUDE: f32 = 40.0;
const NORMAL_WAVE_MS: u32 = 700;
const ENTHUSIASTIC_AMPLITUDE: f32 = 60.0;
const ENTHUSIASTIC_WAVE_MS: u32 = 500;

/// Phase fractions within one wave cycle.
const RISE_AT: f32 = 0.3;
const PEAK_AT: f32 = 0.5;
const FALL_AT: f32 = 0.7;

pub struct WaveTemplate {
    ctx: TemplateContext,
}

impl WaveTemplate {
    pub fn new(ctx: TemplateContext) -> Self {
        Self { ctx }
    }

    fn style_settings(style: &str) -> (f32, u32) {
        if style == "enthusiastic" {
            (ENTHUSIASTIC_AMPLITUDE, ENTHUSIASTIC_WAVE_MS)
        } else {
            (NORMAL_AMPLITUDE, NORMAL_WAVE_MS)
        }
    }

    /// Standing pose with the chosen hand(s) raised by `amplitude`.
    fn wave_joints(cx: f32, cy: f32, hand: &str, amplitude: f32) -> JointMap {
        let mut joints = CoordinateRig::standing_joints(cx, cy);
        if hand == "right" || hand == "both" {
            joints.insert(
                "right_hand".to_string(),
                Joint::new(cx + 60.0, cy - amplitude),
            );
            joints.insert(
                "right_shoulder".to_string(),
                Joint::new(cx + 20.0, cy - 35.0),
            );
        }
        if hand == "left" || hand == "both" {
            joints.insert(
                "left_hand".to_string(),
                Joint::new(cx - 60.0, cy - amplitude),
            );
            joints.insert(
                "left_shoulder".to_string(),
                Joint::new(cx - 20.0, cy - 35.0),
            );
        }
        joints
    }
}

impl ActionTemplate for WaveTemplate {
    fn action_type(&self) -> &'static str {
        "wave"
    }

    fn generate(&self, character: &Character, params: &ActionParams) -> Vec<Keyframe> {
        let hand = params.str_or("hand", "right");
        let repeat = params.u32_or("repeat", 1);
        let style = params.str_or("style", "normal");
        let (amplitude, wave_ms) = Self::style_settings(style);

        let (cx, cy) = self.ctx.center();
        let total = wave_ms * repeat;

        let mut keyframes = Vec::new();
        keyframes.push(Keyframe::for_character(
            0,
            "get ready to wave",
            &character.id,
            self.ctx.standing_pose(cx, cy),
        ));

        for i in 0..repeat {
            let cycle_start = i * wave_ms;

            let t_rise = cycle_start + (wave_ms as f32 * RISE_AT) as u32;
            keyframes.push(Keyframe::for_character(
                t_rise,
                format!("wave {} of {repeat} - rising", i + 1),
                &character.id,
                Pose::Joints(Self::wave_joints(cx, cy, hand, amplitude * 0.5)),
            ));

            let t_peak = cycle_start + (wave_ms as f32 * PEAK_AT) as u32;
            keyframes.push(Keyframe::for_character(
                t_peak,
                format!("wave {} of {repeat} - peak", i + 1),
                &character.id,
                Pose::Joints(Self::wave_joints(cx, cy, hand, amplitude)),
            ));

            // No intermediate fall after the final cycle; the closing
            // standing frame handles it.
            if i + 1 < repeat {
                let t_fall = cycle_start + (wave_ms as f32 * FALL_AT) as u32;
                keyframes.push(Keyframe::for_character(
                    t_fall,
                    format!("wave {} of {repeat} - falling", i + 1),
                    &character.id,
                    Pose::Joints(Self::wave_joints(cx, cy, hand, amplitude * 0.5)),
                ));
            }
        }

        keyframes.push(Keyframe::for_character(
            total,
            "wave finished",
            &character.id,
            self.ctx.standing_pose(cx, cy),
        ));
        keyframes
    }

    fn duration_ms(&self, params: &ActionParams) -> u32 {
        let repeat = params.u32_or("repeat", 1);
        let style = params.str_or("style", "normal");
        let (_, wave_ms) = Self::style_settings(style);
        wave_ms * repeat
    }

    fn validate_params(&self, params: &ActionParams) -> bool {
        let hand = params.str_or("hand", "right");
        let repeat = params.u32_or("repeat", 1);
        matches!(hand, "left" | "right" | "both") && (1..=3).contains(&repeat)
    }
}
