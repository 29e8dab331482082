use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::EventId;

pub const NEEDS_SIGNUPS_TEMPLATE: &str = "event_needs_signups";

/// Outbound hook for the notification layer (e-mail, push, dashboards).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: StaffingAlert) -> Result<(), AlertError>;
}

/// Payload handed to the notification layer when an event needs more sign-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingAlert {
    pub template: String,
    pub event_id: EventId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
