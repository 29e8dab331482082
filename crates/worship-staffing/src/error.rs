use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::roster_import::RosterImportError;
use crate::workflows::staffing::{RegistryError, StaffingServiceError, UnknownEventType};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Registry(RegistryError),
    RosterImport(RosterImportError),
    EventType(UnknownEventType),
    Staffing(StaffingServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Registry(err) => write!(f, "requirement profile error: {}", err),
            AppError::RosterImport(err) => write!(f, "roster import error: {}", err),
            AppError::EventType(err) => write!(f, "{}", err),
            AppError::Staffing(err) => write!(f, "staffing error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Registry(err) => Some(err),
            AppError::RosterImport(err) => Some(err),
            AppError::EventType(err) => Some(err),
            AppError::Staffing(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::RosterImport(_) | AppError::EventType(_) => StatusCode::BAD_REQUEST,
            AppError::Staffing(StaffingServiceError::DuplicateMember(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Registry(_)
            | AppError::Staffing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::RosterImport(value)
    }
}

impl From<UnknownEventType> for AppError {
    fn from(value: UnknownEventType) -> Self {
        Self::EventType(value)
    }
}

impl From<StaffingServiceError> for AppError {
    fn from(value: StaffingServiceError) -> Self {
        Self::Staffing(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::{EventType, MemberId};

    #[test]
    fn client_errors_map_to_4xx() {
        let response = AppError::from(UnknownEventType("gala".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(StaffingServiceError::DuplicateMember(MemberId(
            "m-1".to_string(),
        )))
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn startup_errors_map_to_500() {
        let response = AppError::from(RegistryError::MissingProfile(EventType::Concert))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
