//! Event staffing requirements analysis.
//!
//! Given an event type and the members assigned to it, the analyzer decides which
//! roles are filled, which are missing, and whether the event is under-staffed.
//! Requirement profiles are data held by [`RequirementRegistry`]; matching is a
//! single deterministic pass that lets higher tiers claim members first.

pub mod alerts;
mod analyzer;
pub mod capability;
pub mod domain;
mod matching;
pub mod registry;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use alerts::{AlertError, AlertPublisher, StaffingAlert, NEEDS_SIGNUPS_TEMPLATE};
pub use analyzer::{analyze_staffing, StaffingAnalyzer};
pub use capability::CapabilityToken;
pub use domain::{
    EventId, EventStaffingRequest, EventType, MemberAssignment, MemberId, RequirementProfile,
    RequirementTier, RoleRequirement, RosterEntry, UnknownEventType,
};
pub use registry::{RegistryError, RequirementRegistry};
pub use report::{AnalysisResult, SatisfiedRequirement};
pub use router::{staffing_router, AnalyzeStaffingRequest, AnalyzeStaffingResponse};
pub use service::{StaffingReview, StaffingService, StaffingServiceError};
