//! Procedural action templates.
//!
//! One template per catalog action type, synthesizing keyframes without any
//! external call. Every keyframe a template emits already satisfies the
//! coordinate rig's structural constraints by construction; the validator
//! never has to clean up after the catalog.

pub mod bow;
pub mod walk;
pub mod wave;

use hashbrown::HashMap;

use stickmotion_rig_core::{CoordinateRig, Pose, RigConfig};

use crate::data::{Character, Keyframe};
use crate::descriptor::ActionParams;

pub use bow::BowTemplate;
pub use walk::WalkTemplate;
pub use wave::WaveTemplate;

/// Canvas geometry shared by every template.
#[derive(Copy, Clone, Debug)]
pub struct TemplateContext {
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl TemplateContext {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            canvas_width,
            canvas_height,
        }
    }

    pub fn from_config(config: &RigConfig) -> Self {
        Self::new(config.canvas_width, config.canvas_height)
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Standing pose anchored at an arbitrary point.
    pub fn standing_pose(&self, cx: f32, cy: f32) -> Pose {
        Pose::Joints(CoordinateRig::standing_joints(cx, cy))
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new(
            stickmotion_rig_core::DEFAULT_CANVAS_WIDTH,
            stickmotion_rig_core::DEFAULT_CANVAS_HEIGHT,
        )
    }
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothstep ease, kept for templates that want non-linear phase timing.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Contract implemented by each catalog action.
pub trait ActionTemplate: Send + Sync {
    /// Exact action-type string this template serves.
    fn action_type(&self) -> &'static str;

    /// Synthesize ordered keyframes, timestamps starting at 0 and strictly
    /// increasing. Call only with params accepted by `validate_params`.
    fn generate(&self, character: &Character, params: &ActionParams) -> Vec<Keyframe>;

    /// Total duration in ms, matching the last generated timestamp. The
    /// assembler uses this to chain actions without overlap.
    fn duration_ms(&self, params: &ActionParams) -> u32;

    /// Cheap parameter check, run before generation.
    fn validate_params(&self, params: &ActionParams) -> bool;
}

/// Exact-string action-type -> template instance.
///
/// An action type absent from the registry is the caller's cue to use the
/// external fallback producer.
pub struct TemplateRegistry {
    templates: HashMap<String, Box<dyn ActionTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registry with the built-in catalog: walk, wave, bow.
    pub fn with_builtins(ctx: TemplateContext) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(WalkTemplate::new(ctx)));
        registry.register(Box::new(WaveTemplate::new(ctx)));
        registry.register(Box::new(BowTemplate::new(ctx)));
        registry
    }

    pub fn register(&mut self, template: Box<dyn ActionTemplate>) {
        self.templates
            .insert(template.action_type().to_string(), template);
    }

    pub fn get(&self, action_type: &str) -> Option<&dyn ActionTemplate> {
        self.templates.get(action_type).map(Box::as_ref)
    }

    pub fn has(&self, action_type: &str) -> bool {
        self.templates.contains_key(action_type)
    }

    /// Catalog action types, sorted for stable reporting.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_builtins(TemplateContext::default())
    }
}
