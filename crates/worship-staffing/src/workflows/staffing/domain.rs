use super::capability::CapabilityToken;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Service,
    Rehearsal,
    Concert,
    Training,
}

impl EventType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Service, Self::Rehearsal, Self::Concert, Self::Training]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Rehearsal => "Rehearsal",
            Self::Concert => "Concert",
            Self::Training => "Training Session",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Service => 0,
            Self::Rehearsal => 1,
            Self::Concert => 2,
            Self::Training => 3,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "service" | "worship_service" => Ok(Self::Service),
            "rehearsal" => Ok(Self::Rehearsal),
            "concert" => Ok(Self::Concert),
            "training" | "training_session" => Ok(Self::Training),
            _ => Err(UnknownEventType(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type '{0}' (expected service, rehearsal, concert, or training)")]
pub struct UnknownEventType(pub String);

/// Severity of a role requirement. Declaration order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementTier {
    Critical,
    High,
    Medium,
}

impl RequirementTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Critical, Self::High, Self::Medium]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

/// One named role an event type needs filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRequirement {
    pub role_label: String,
    pub capability: CapabilityToken,
    pub tier: RequirementTier,
    pub min_count: usize,
}

impl RoleRequirement {
    pub fn new(role_label: impl Into<String>, capability: &str, tier: RequirementTier) -> Self {
        Self {
            role_label: role_label.into(),
            capability: CapabilityToken::parse(capability),
            tier,
            min_count: 1,
        }
    }

    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }
}

/// Requirements for one event type, kept sorted by tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementProfile {
    event_type: EventType,
    min_total_members: usize,
    requirements: Vec<RoleRequirement>,
}

impl RequirementProfile {
    pub fn new(
        event_type: EventType,
        min_total_members: usize,
        mut requirements: Vec<RoleRequirement>,
    ) -> Self {
        // stable: declaration order survives within a tier
        requirements.sort_by_key(|requirement| requirement.tier);
        Self {
            event_type,
            min_total_members,
            requirements,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn min_total_members(&self) -> usize {
        self.min_total_members
    }

    pub fn requirements(&self) -> &[RoleRequirement] {
        &self.requirements
    }

    pub fn requirements_for_tier(&self, tier: RequirementTier) -> Vec<&RoleRequirement> {
        self.requirements
            .iter()
            .filter(|requirement| requirement.tier == tier)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A member assigned to the event, reduced to what matching needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub member_id: MemberId,
    #[serde(default)]
    pub assigned_role_label: String,
    #[serde(default)]
    pub capability: CapabilityToken,
}

impl RosterEntry {
    pub fn new(
        member_id: impl Into<String>,
        assigned_role_label: impl Into<String>,
        capability: &str,
    ) -> Self {
        Self {
            member_id: MemberId(member_id.into()),
            assigned_role_label: assigned_role_label.into(),
            capability: CapabilityToken::parse(capability),
        }
    }
}

/// Assignment as the scheduling application records it: a member's declared
/// capabilities plus the role they signed up for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAssignment {
    pub member_id: MemberId,
    #[serde(default)]
    pub assigned_role: String,
    #[serde(default)]
    pub primary_capability: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl MemberAssignment {
    /// Primary capability wins; otherwise the first declared capability that
    /// normalizes to a real token.
    pub fn usable_capability(&self) -> CapabilityToken {
        let primary = CapabilityToken::normalize(self.primary_capability.as_deref());
        if !primary.is_unspecified() {
            return primary;
        }

        self.capabilities
            .iter()
            .map(|raw| CapabilityToken::parse(raw))
            .find(|token| !token.is_unspecified())
            .unwrap_or_default()
    }

    pub fn to_roster_entry(&self) -> RosterEntry {
        RosterEntry {
            member_id: self.member_id.clone(),
            assigned_role_label: self.assigned_role.trim().to_string(),
            capability: self.usable_capability(),
        }
    }
}

/// An event awaiting a staffing review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStaffingRequest {
    pub event_id: EventId,
    pub event_type: EventType,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignments: Vec<MemberAssignment>,
}

impl EventStaffingRequest {
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.assignments
            .iter()
            .map(MemberAssignment::to_roster_entry)
            .collect()
    }
}
