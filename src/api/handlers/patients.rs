use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::{Result, RestError};
use crate::extractors::ApiJson;
use crate::models::NewPatientRequest;
use crate::usecases::PatientsUseCases;

pub type SharedPatientsUseCases = Arc<PatientsUseCases>;

/// Create a new patient
pub async fn create_patient(
    State(usecases): State<SharedPatientsUseCases>,
    ApiJson(request): ApiJson<NewPatientRequest>,
) -> Result<Response> {
    if let Err(violations) = request.validate() {
        let body = RestError::with_errors("request body is not valid", violations);
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let patient = usecases.create_patient(&request).await?;

    let location = format!("/patients/{}", patient.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(patient),
    )
        .into_response())
}

/// Find a patient by id
pub async fn find_patient_by_id(
    State(usecases): State<SharedPatientsUseCases>,
    Path(id): Path<String>,
) -> Result<Response> {
    let patient = usecases.find_patient_by_id(&id).await?;

    Ok(match patient {
        Some(patient) => (StatusCode::OK, Json(patient)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}
