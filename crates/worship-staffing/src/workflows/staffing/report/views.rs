use super::super::domain::{EventType, MemberId, RequirementTier, RoleRequirement};
use super::builder::SatisfiedRequirement;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingVerdict {
    Staffed,
    UnderStaffed,
}

impl StaffingVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Staffed => "Staffed",
            Self::UnderStaffed => "Under-Staffed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TierCoverageEntry {
    pub tier: RequirementTier,
    pub tier_label: &'static str,
    pub satisfied: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffingGapView {
    pub role_label: String,
    pub capability: String,
    pub tier: RequirementTier,
    pub tier_label: &'static str,
    pub min_count: usize,
}

impl StaffingGapView {
    pub(crate) fn from_requirement(requirement: &RoleRequirement) -> Self {
        Self {
            role_label: requirement.role_label.clone(),
            capability: requirement.capability.label().to_string(),
            tier: requirement.tier,
            tier_label: requirement.tier.label(),
            min_count: requirement.min_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub role_label: String,
    pub tier: RequirementTier,
    pub tier_label: &'static str,
    pub member_ids: Vec<MemberId>,
}

impl AssignmentView {
    pub(crate) fn from_satisfied(entry: &SatisfiedRequirement) -> Self {
        Self {
            role_label: entry.requirement.role_label.clone(),
            tier: entry.requirement.tier,
            tier_label: entry.requirement.tier.label(),
            member_ids: entry.member_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffingSummary {
    pub event_type: EventType,
    pub event_label: &'static str,
    pub verdict: StaffingVerdict,
    pub verdict_label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verdict_reasons: Vec<String>,
    pub total_members: usize,
    pub min_required: usize,
    pub tier_coverage: Vec<TierCoverageEntry>,
    pub gaps: Vec<StaffingGapView>,
    pub assignments: Vec<AssignmentView>,
}
