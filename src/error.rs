use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum PatientsError {
    #[error("existing passport number '{0}'")]
    ExistingPassportNumber(String),

    #[error("{count} patients found for id {id}")]
    TooManyPatientsFound { id: String, count: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

/// Error body returned to clients: a message plus, for validation failures,
/// the full list of violations.
#[derive(Debug, Serialize)]
pub struct RestError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl RestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors),
        }
    }
}

impl IntoResponse for PatientsError {
    fn into_response(self) -> Response {
        match self {
            PatientsError::ExistingPassportNumber(_) => {
                let body = RestError::new(self.to_string());
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            // Duplicate rows behind a primary key mean corruption, not a
            // client problem. Log loudly, answer with a bare 500.
            PatientsError::TooManyPatientsFound { ref id, count } => {
                tracing::error!(patient_id = %id, count, "Multiple patients found for one id");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            PatientsError::Database(ref e) => {
                tracing::error!(error = %e, "Database error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            PatientsError::Unexpected(ref e) => {
                tracing::error!(error = %e, "Unexpected error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PatientsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_passport_number_maps_to_bad_request() {
        let response =
            PatientsError::ExistingPassportNumber("987678910T".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn too_many_patients_maps_to_internal_server_error() {
        let response = PatientsError::TooManyPatientsFound {
            id: "id-1".to_string(),
            count: 2,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unexpected_maps_to_internal_server_error() {
        let response = PatientsError::Unexpected(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rest_error_omits_absent_errors_field() {
        let json = serde_json::to_value(RestError::new("existing passport number '12345687II'"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "existing passport number '12345687II'"})
        );
    }

    #[test]
    fn rest_error_keeps_violation_list() {
        let json = serde_json::to_value(RestError::with_errors(
            "request body is not valid",
            vec!["'name' length must be between 1 and 50".to_string()],
        ))
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "request body is not valid",
                "errors": ["'name' length must be between 1 and 50"]
            })
        );
    }
}
