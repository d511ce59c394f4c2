//! The `Rig` trait and the variant-name -> constructor registry.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::config::RigConfig;
use crate::error::{PoseViolation, RigError};
use crate::loader::ConfigCache;
use crate::pose::Pose;

/// Capability set shared by every degree-of-freedom variant.
///
/// Implementations are stateless beyond their immutable configuration and may
/// serve concurrent calls.
pub trait Rig: Send + Sync + std::fmt::Debug {
    /// Variant name this rig was built for (e.g. `12dof`).
    fn variant(&self) -> &str;

    fn config(&self) -> &Arc<RigConfig>;

    /// Name of the pose payload field (`joints` for coordinate rigs, `pose`
    /// for angular rigs).
    fn data_field_name(&self) -> &'static str;

    /// Canonical standing pose centered on the canvas.
    fn default_pose(&self) -> Pose;

    /// Deterministic textual brief of the joint/parameter schema and
    /// proportions, consumed by the external planning collaborator.
    fn system_instructions(&self) -> String;

    /// Structural validation. An empty list means the pose is valid.
    fn validate(&self, pose: &Pose) -> Vec<PoseViolation>;
}

type RigCtor = fn(Arc<RigConfig>) -> Box<dyn Rig>;

/// Variant-name -> constructor registry.
///
/// Replaces the singleton factory of earlier designs with an explicit object
/// constructed once and passed into the pipeline.
pub struct RigRegistry {
    ctors: HashMap<String, RigCtor>,
}

impl RigRegistry {
    pub fn new() -> Self {
        Self {
            ctors: HashMap::new(),
        }
    }

    /// Registry with the two built-in variants.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("12dof", crate::coordinate::CoordinateRig::boxed);
        registry.register("6dof", crate::angular::AngularRig::boxed);
        registry
    }

    pub fn register(&mut self, variant: &str, ctor: RigCtor) {
        self.ctors.insert(variant.to_string(), ctor);
    }

    pub fn is_supported(&self, variant: &str) -> bool {
        self.ctors.contains_key(variant)
    }

    /// Registered variant names, sorted for stable reporting.
    pub fn variants(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ctors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve configuration through the cache and construct the rig.
    pub fn create(&self, variant: &str, cache: &ConfigCache) -> Result<Box<dyn Rig>, RigError> {
        let ctor = self
            .ctors
            .get(variant)
            .ok_or_else(|| RigError::UnsupportedVariant {
                variant: variant.to_string(),
                available: self.variants(),
            })?;
        let config = cache.get(variant)?;
        Ok(ctor(config))
    }
}

impl Default for RigRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
