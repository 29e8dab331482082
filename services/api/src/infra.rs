use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use worship_staffing::workflows::staffing::{
    AlertError, AlertPublisher, EventType, StaffingAlert,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Hands alerts to the log; no notification channel is wired into this binary.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LoggingAlertPublisher;

impl AlertPublisher for LoggingAlertPublisher {
    fn publish(&self, alert: StaffingAlert) -> Result<(), AlertError> {
        info!(
            template = %alert.template,
            event_id = %alert.event_id,
            details = ?alert.details,
            "staffing alert raised"
        );
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_event_type(raw: &str) -> Result<EventType, String> {
    raw.parse::<EventType>().map_err(|err| err.to_string())
}
