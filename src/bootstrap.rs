//! Decides whether the generic star widget should be built on this page.
//!
//! Pages that ship their own rating markup (the add-movie and update-rating
//! forms) mark the input or provide a dedicated container; building a second
//! widget there would double up the stars.

use crate::config::WidgetConfig;

/// Read-only view of the page needed for the mount decision.
pub trait PageProbe {
    fn has_element(&self, id: &str) -> bool;
    fn element_has_class(&self, id: &str, class: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingInput,
    ManualMarker,
    DedicatedContainer(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootDecision {
    Mount,
    Skip(SkipReason),
}

pub fn evaluate(probe: &impl PageProbe, cfg: &WidgetConfig) -> BootDecision {
    if !probe.has_element(&cfg.input_id) {
        tracing::debug!(input_id = %cfg.input_id, "no rating input on page");
        return BootDecision::Skip(SkipReason::MissingInput);
    }

    let reason = if probe.element_has_class(&cfg.input_id, &cfg.manual_marker_class) {
        Some(SkipReason::ManualMarker)
    } else {
        cfg.dedicated_container_ids
            .iter()
            .find(|id| probe.has_element(id))
            .map(|id| SkipReason::DedicatedContainer(id.clone()))
    };

    match reason {
        Some(reason) => {
            tracing::info!(
                input_id = %cfg.input_id,
                ?reason,
                "skipping automatic star generation"
            );
            BootDecision::Skip(reason)
        }
        None => {
            tracing::info!(input_id = %cfg.input_id, "building star widget");
            BootDecision::Mount
        }
    }
}
