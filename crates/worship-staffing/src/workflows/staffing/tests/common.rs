use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::staffing::alerts::{AlertError, AlertPublisher, StaffingAlert};
use crate::workflows::staffing::domain::{
    EventId, EventStaffingRequest, EventType, MemberAssignment, MemberId, RoleRequirement,
    RosterEntry,
};
use crate::workflows::staffing::registry::RequirementRegistry;
use crate::workflows::staffing::report::AnalysisResult;
use crate::workflows::staffing::service::StaffingService;
use crate::workflows::staffing::staffing_router;

pub(super) fn registry() -> Arc<RequirementRegistry> {
    Arc::new(RequirementRegistry::standard().expect("standard profiles validate"))
}

pub(super) fn member(id: &str, capability: &str) -> RosterEntry {
    RosterEntry::new(id, "", capability)
}

pub(super) fn assigned(id: &str, role: &str, capability: &str) -> RosterEntry {
    RosterEntry::new(id, role, capability)
}

/// Piano, guitar, vocal, bass and drums: one member each.
pub(super) fn service_core_roster() -> Vec<RosterEntry> {
    vec![
        assigned("m-piano", "Piano Principal", "Piano"),
        assigned("m-guitar", "Guitarist", "Guitar"),
        assigned("m-vocal", "Lead Vocalist", "Vocal"),
        assigned("m-bass", "Bassist", "Bass"),
        assigned("m-drums", "Drummer", "Drums"),
    ]
}

pub(super) fn role_labels<'a, I>(requirements: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a RoleRequirement>,
{
    requirements
        .into_iter()
        .map(|requirement| requirement.role_label.as_str())
        .collect()
}

pub(super) fn satisfied_labels(result: &AnalysisResult) -> Vec<&str> {
    role_labels(result.satisfied().iter().map(|entry| &entry.requirement))
}

pub(super) fn assert_members_claimed_once(result: &AnalysisResult) {
    let mut seen = HashSet::new();
    for entry in result.satisfied() {
        for member_id in &entry.member_ids {
            assert!(
                seen.insert(member_id.clone()),
                "member {member_id} satisfied more than one requirement"
            );
        }
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

pub(super) fn assignment(id: &str, primary: Option<&str>, declared: &[&str]) -> MemberAssignment {
    MemberAssignment {
        member_id: MemberId(id.to_string()),
        assigned_role: String::new(),
        primary_capability: primary.map(str::to_string),
        capabilities: declared.iter().map(|value| value.to_string()).collect(),
    }
}

pub(super) fn event_request(
    event_type: EventType,
    event_date: Option<NaiveDate>,
    assignments: Vec<MemberAssignment>,
) -> EventStaffingRequest {
    EventStaffingRequest {
        event_id: EventId("evt-100".to_string()),
        event_type,
        event_date,
        assignments,
    }
}

pub(super) fn build_service() -> (StaffingService<MemoryAlerts>, Arc<MemoryAlerts>) {
    let alerts = Arc::new(MemoryAlerts::default());
    let service = StaffingService::new(registry(), alerts.clone());
    (service, alerts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<StaffingAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<StaffingAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: StaffingAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineAlerts;

impl AlertPublisher for OfflineAlerts {
    fn publish(&self, _alert: StaffingAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("smtp offline".to_string()))
    }
}

pub(super) fn router_with_memory_alerts() -> (axum::Router, Arc<MemoryAlerts>) {
    let (service, alerts) = build_service();
    (staffing_router(Arc::new(service)), alerts)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
