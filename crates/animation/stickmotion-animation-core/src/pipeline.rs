//! Pipeline facade: generate -> validate -> repair -> interpolate.
//!
//! A `Pipeline` is an explicit context object constructed once per rig
//! variant and passed around instead of module-level singletons. It holds no
//! mutable state, so one instance may serve concurrent calls as long as
//! call-scoped timelines are not shared.

use log::{info, warn};

use stickmotion_rig_core::{ConfigCache, Rig, RigRegistry};

use crate::assembler::assemble;
use crate::data::Timeline;
use crate::descriptor::ActionPlan;
use crate::error::PipelineError;
use crate::interpolator::interpolate_timeline;
use crate::repair::auto_repair;
use crate::templates::{TemplateContext, TemplateRegistry};
use crate::validator::{validate_timeline, ValidationError, ValidationReport};

/// Knobs for the optimize stage.
#[derive(Copy, Clone, Debug)]
pub struct OptimizeOptions {
    pub auto_fix: bool,
    pub interpolate: bool,
    pub target_fps: u32,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            auto_fix: true,
            interpolate: true,
            target_fps: 30,
        }
    }
}

/// Optimize output: the playable timeline plus residual warnings.
///
/// Warnings are validation errors that survived repair; they are reported,
/// never thrown, so the pipeline always delivers a playable timeline.
#[derive(Clone, Debug)]
pub struct Optimized {
    pub timeline: Timeline,
    pub warnings: Vec<ValidationError>,
}

pub struct Pipeline {
    rig: Box<dyn Rig>,
    templates: TemplateRegistry,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("rig", &self.rig.variant())
            .field("templates", &self.templates.names().len())
            .finish()
    }
}

impl Pipeline {
    /// Build the context for one rig variant. The config cache is owned by
    /// the host and shared across pipelines and concurrent requests.
    pub fn new(variant: &str, cache: &ConfigCache) -> Result<Self, PipelineError> {
        let rigs = RigRegistry::with_builtins();
        let rig = rigs.create(variant, cache)?;
        let templates = TemplateRegistry::with_builtins(TemplateContext::from_config(rig.config()));
        info!(
            "pipeline ready (variant={variant}, templates={})",
            templates.names().len()
        );
        Ok(Self { rig, templates })
    }

    pub fn rig(&self) -> &dyn Rig {
        self.rig.as_ref()
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Synthesize a timeline from the plan's actions via the template
    /// catalog. `AssemblyError::UnknownAction` surfaces here when the host
    /// should use its external fallback instead.
    pub fn generate(&self, plan: &ActionPlan) -> Result<Timeline, PipelineError> {
        let timeline = assemble(&self.templates, plan, self.rig.variant())?;
        Ok(timeline)
    }

    /// Sweep the timeline against the rig's structural constraints.
    pub fn validate(&self, timeline: &Timeline) -> ValidationReport {
        validate_timeline(self.rig.as_ref(), timeline)
    }

    /// Validate, repair, and densify. Residual violations come back as
    /// warnings; only an empty timeline is a hard error.
    pub fn optimize(
        &self,
        mut timeline: Timeline,
        options: &OptimizeOptions,
    ) -> Result<Optimized, PipelineError> {
        if timeline.keyframes.is_empty() {
            return Err(PipelineError::EmptyTimeline);
        }

        let mut warnings = Vec::new();
        let report = self.validate(&timeline);
        if !report.is_valid {
            warn!("{} validation errors before repair", report.errors.len());
            if options.auto_fix {
                auto_repair(self.rig.as_ref(), &mut timeline, &report.errors);
                let recheck = self.validate(&timeline);
                if recheck.is_valid {
                    info!("auto-repair cleared all violations");
                } else {
                    warn!(
                        "{} validation warnings remain after repair",
                        recheck.errors.len()
                    );
                    warnings = recheck.errors;
                }
            } else {
                warnings = report.errors;
            }
        }

        if options.interpolate {
            timeline = interpolate_timeline(&timeline, options.target_fps);
            info!(
                "interpolated to {} frames at {} fps",
                timeline.keyframes.len(),
                options.target_fps
            );
        }

        Ok(Optimized { timeline, warnings })
    }
}
