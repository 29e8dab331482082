use super::super::domain::{
    EventType, MemberId, RequirementProfile, RequirementTier, RoleRequirement,
};
use super::super::matching::{MatchOutcome, RequirementVerdict};
use super::views::{
    AssignmentView, StaffingGapView, StaffingSummary, StaffingVerdict, TierCoverageEntry,
};
use serde::Serialize;

/// A requirement the roster filled, with the members who filled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SatisfiedRequirement {
    pub requirement: RoleRequirement,
    pub member_ids: Vec<MemberId>,
}

/// Outcome of one staffing analysis. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    event_type: EventType,
    critical: Vec<RoleRequirement>,
    high: Vec<RoleRequirement>,
    medium: Vec<RoleRequirement>,
    satisfied: Vec<SatisfiedRequirement>,
    total_members: usize,
    min_required: usize,
    is_under_staffed: bool,
}

impl AnalysisResult {
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn critical(&self) -> &[RoleRequirement] {
        &self.critical
    }

    pub fn high(&self) -> &[RoleRequirement] {
        &self.high
    }

    pub fn medium(&self) -> &[RoleRequirement] {
        &self.medium
    }

    pub fn gaps_for(&self, tier: RequirementTier) -> &[RoleRequirement] {
        match tier {
            RequirementTier::Critical => &self.critical,
            RequirementTier::High => &self.high,
            RequirementTier::Medium => &self.medium,
        }
    }

    pub fn gap_count(&self) -> usize {
        self.critical.len() + self.high.len() + self.medium.len()
    }

    pub fn satisfied(&self) -> &[SatisfiedRequirement] {
        &self.satisfied
    }

    pub fn total_members(&self) -> usize {
        self.total_members
    }

    pub fn min_required(&self) -> usize {
        self.min_required
    }

    pub fn is_under_staffed(&self) -> bool {
        self.is_under_staffed
    }

    pub fn verdict(&self) -> StaffingVerdict {
        if self.is_under_staffed {
            StaffingVerdict::UnderStaffed
        } else {
            StaffingVerdict::Staffed
        }
    }

    /// Human-readable reasons behind an under-staffed verdict; empty when staffed.
    pub fn verdict_reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();

        if !self.critical.is_empty() {
            let roles = self
                .critical
                .iter()
                .map(|requirement| requirement.role_label.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            reasons.push(format!(
                "{} critical role(s) unfilled: {roles}",
                self.critical.len()
            ));
        }

        if self.total_members < self.min_required {
            reasons.push(format!(
                "roster has {} member(s), {} required",
                self.total_members, self.min_required
            ));
        }

        reasons
    }

    pub fn summary(&self) -> StaffingSummary {
        let tier_coverage = RequirementTier::ordered()
            .into_iter()
            .map(|tier| {
                let satisfied = self
                    .satisfied
                    .iter()
                    .filter(|entry| entry.requirement.tier == tier)
                    .count();
                TierCoverageEntry {
                    tier,
                    tier_label: tier.label(),
                    satisfied,
                    total: satisfied + self.gaps_for(tier).len(),
                }
            })
            .filter(|entry| entry.total > 0)
            .collect();

        let gaps = RequirementTier::ordered()
            .into_iter()
            .flat_map(|tier| self.gaps_for(tier).iter())
            .map(StaffingGapView::from_requirement)
            .collect();

        let assignments = self
            .satisfied
            .iter()
            .map(AssignmentView::from_satisfied)
            .collect();

        let verdict = self.verdict();

        StaffingSummary {
            event_type: self.event_type,
            event_label: self.event_type.label(),
            verdict,
            verdict_label: verdict.label(),
            verdict_reasons: self.verdict_reasons(),
            total_members: self.total_members,
            min_required: self.min_required,
            tier_coverage,
            gaps,
            assignments,
        }
    }
}

pub(crate) fn build_report(
    profile: &RequirementProfile,
    outcome: MatchOutcome<'_>,
) -> AnalysisResult {
    let mut critical = Vec::new();
    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut satisfied = Vec::new();

    for matched in outcome.matches {
        let requirement = matched.requirement.clone();
        match matched.verdict {
            RequirementVerdict::Satisfied { member_ids } => {
                satisfied.push(SatisfiedRequirement {
                    requirement,
                    member_ids,
                });
            }
            RequirementVerdict::Unmatched { .. } => match requirement.tier {
                RequirementTier::Critical => critical.push(requirement),
                RequirementTier::High => high.push(requirement),
                RequirementTier::Medium => medium.push(requirement),
            },
        }
    }

    let total_members = outcome.total_members;
    let min_required = profile.min_total_members();
    let is_under_staffed = !critical.is_empty() || total_members < min_required;

    AnalysisResult {
        event_type: profile.event_type(),
        critical,
        high,
        medium,
        satisfied,
        total_members,
        min_required,
        is_under_staffed,
    }
}
