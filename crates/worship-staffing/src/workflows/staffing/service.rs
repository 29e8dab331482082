use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::alerts::{AlertError, AlertPublisher, StaffingAlert, NEEDS_SIGNUPS_TEMPLATE};
use super::analyzer::StaffingAnalyzer;
use super::domain::{
    EventId, EventStaffingRequest, EventType, MemberId, RoleRequirement, RosterEntry,
};
use super::registry::RequirementRegistry;
use super::report::AnalysisResult;

/// Service composing the analyzer with the alert hand-off.
pub struct StaffingService<A> {
    analyzer: StaffingAnalyzer,
    alerts: Arc<A>,
}

impl<A> StaffingService<A>
where
    A: AlertPublisher + 'static,
{
    pub fn new(registry: Arc<RequirementRegistry>, alerts: Arc<A>) -> Self {
        Self {
            analyzer: StaffingAnalyzer::new(registry),
            alerts,
        }
    }

    pub fn analyzer(&self) -> &StaffingAnalyzer {
        &self.analyzer
    }

    /// Analyze an event's roster and raise a sign-up alert when it is under-staffed.
    ///
    /// Events dated before `today` are analyzed but never alerted on.
    pub fn review(
        &self,
        request: &EventStaffingRequest,
        today: NaiveDate,
    ) -> Result<StaffingReview, StaffingServiceError> {
        let roster = distinct_roster(request)?;
        let result = self.analyzer.analyze_staffing(request.event_type, &roster);
        let days_until_event = request
            .event_date
            .map(|event_date| (event_date - today).num_days());

        let upcoming = days_until_event.map_or(true, |days| days >= 0);
        let alert = if result.is_under_staffed() && upcoming {
            Some(needs_signups_alert(request, &result, days_until_event))
        } else {
            if result.is_under_staffed() {
                debug!(event_id = %request.event_id, "event already past, no alert raised");
            }
            None
        };

        if let Some(alert) = &alert {
            if let Err(error) = self.alerts.publish(alert.clone()) {
                warn!(event_id = %request.event_id, %error, "failed to publish staffing alert");
                return Err(error.into());
            }
        }

        Ok(StaffingReview {
            event_id: request.event_id.clone(),
            event_type: request.event_type,
            event_date: request.event_date,
            days_until_event,
            alert_raised: alert.is_some(),
            result,
        })
    }
}

fn distinct_roster(
    request: &EventStaffingRequest,
) -> Result<Vec<RosterEntry>, StaffingServiceError> {
    let mut seen = HashSet::new();
    for assignment in &request.assignments {
        if !seen.insert(&assignment.member_id) {
            return Err(StaffingServiceError::DuplicateMember(
                assignment.member_id.clone(),
            ));
        }
    }

    Ok(request.roster())
}

fn needs_signups_alert(
    request: &EventStaffingRequest,
    result: &AnalysisResult,
    days_until_event: Option<i64>,
) -> StaffingAlert {
    let mut details = BTreeMap::new();
    details.insert(
        "event_type".to_string(),
        request.event_type.label().to_string(),
    );
    details.insert(
        "members".to_string(),
        format!("{}/{}", result.total_members(), result.min_required()),
    );

    if !result.critical().is_empty() {
        details.insert("critical_gaps".to_string(), role_list(result.critical()));
    }
    if !result.high().is_empty() {
        details.insert("high_gaps".to_string(), role_list(result.high()));
    }
    if let Some(event_date) = request.event_date {
        details.insert("event_date".to_string(), event_date.to_string());
    }
    if let Some(days) = days_until_event {
        details.insert("days_until_event".to_string(), days.to_string());
    }

    StaffingAlert {
        template: NEEDS_SIGNUPS_TEMPLATE.to_string(),
        event_id: request.event_id.clone(),
        details,
    }
}

fn role_list(requirements: &[RoleRequirement]) -> String {
    requirements
        .iter()
        .map(|requirement| requirement.role_label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Analysis of one event together with what the service did about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffingReview {
    pub event_id: EventId,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_event: Option<i64>,
    pub alert_raised: bool,
    pub result: AnalysisResult,
}

/// Error raised by the staffing service.
#[derive(Debug, thiserror::Error)]
pub enum StaffingServiceError {
    #[error("member {0} is assigned to the event more than once")]
    DuplicateMember(MemberId),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
