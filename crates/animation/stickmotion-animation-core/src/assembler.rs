//! Timeline assembly: splice per-action template output into one timeline.

use log::{debug, info};

use crate::data::{Character, GenerationMethod, Timeline};
use crate::descriptor::ActionPlan;
use crate::error::AssemblyError;
use crate::templates::TemplateRegistry;

/// Gap inserted between consecutive actions. Keeps timestamps strictly
/// monotonic across action boundaries and rules out duplicates.
pub const SPLICE_BUFFER_MS: u32 = 50;

fn default_character() -> Character {
    Character::new("char1", "Character", "#2196F3")
}

/// Run every action through its template and chain the results on a running
/// millisecond cursor.
///
/// The first roster character is animated. An action type missing from the
/// registry aborts with `UnknownAction`, the caller's signal to use its
/// external fallback producer instead.
pub fn assemble(
    registry: &TemplateRegistry,
    plan: &ActionPlan,
    variant: &str,
) -> Result<Timeline, AssemblyError> {
    let characters = if plan.characters.is_empty() {
        vec![default_character()]
    } else {
        plan.characters.clone()
    };
    let character = characters[0].clone();

    let mut keyframes = Vec::new();
    let mut cursor: u32 = 0;

    for descriptor in &plan.actions {
        let template =
            registry
                .get(&descriptor.action)
                .ok_or_else(|| AssemblyError::UnknownAction {
                    action: descriptor.action.clone(),
                })?;
        if !template.validate_params(&descriptor.params) {
            return Err(AssemblyError::InvalidParams {
                action: descriptor.action.clone(),
            });
        }

        let action_frames = template.generate(&character, &descriptor.params);
        if action_frames.is_empty() {
            // Nothing to splice; still reserve the action's reported span.
            cursor += template.duration_ms(&descriptor.params);
            continue;
        }

        debug!(
            "spliced {} '{}' keyframes at cursor {cursor}",
            action_frames.len(),
            descriptor.action
        );
        let mut last = cursor;
        for mut kf in action_frames {
            kf.timestamp_ms += cursor;
            last = kf.timestamp_ms;
            keyframes.push(kf);
        }
        cursor = last + SPLICE_BUFFER_MS;
    }

    info!(
        "assembled {} keyframes from {} actions",
        keyframes.len(),
        plan.actions.len()
    );
    Ok(Timeline {
        characters,
        keyframes,
        variant: variant.to_string(),
        method: GenerationMethod::Template,
        target_fps: None,
    })
}
