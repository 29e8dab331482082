use super::domain::{EventType, RosterEntry};
use super::matching::match_requirements;
use super::registry::RequirementRegistry;
use super::report::{build_report, AnalysisResult};
use std::sync::Arc;
use tracing::info;

/// Classifies a roster against the requirement profile of an event type.
///
/// Pure apart from logging: the registry is read-only and every call builds its
/// own member pool, so one analysis never observes another.
pub fn analyze_staffing(
    registry: &RequirementRegistry,
    event_type: EventType,
    roster: &[RosterEntry],
) -> AnalysisResult {
    let profile = registry.profile_for(event_type);
    let outcome = match_requirements(profile, roster);
    let result = build_report(profile, outcome);

    info!(
        event_type = event_type.label(),
        members = result.total_members(),
        critical_gaps = result.critical().len(),
        high_gaps = result.high().len(),
        medium_gaps = result.medium().len(),
        under_staffed = result.is_under_staffed(),
        "staffing analysis complete"
    );

    result
}

/// Cloneable handle sharing one registry across callers.
#[derive(Debug, Clone)]
pub struct StaffingAnalyzer {
    registry: Arc<RequirementRegistry>,
}

impl StaffingAnalyzer {
    pub fn new(registry: Arc<RequirementRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RequirementRegistry {
        &self.registry
    }

    pub fn analyze_staffing(
        &self,
        event_type: EventType,
        roster: &[RosterEntry],
    ) -> AnalysisResult {
        analyze_staffing(&self.registry, event_type, roster)
    }
}
