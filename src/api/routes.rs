use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::health::{health_check, liveness_check, SharedPool};
use super::handlers::patients::{create_patient, find_patient_by_id, SharedPatientsUseCases};

pub fn patient_routes(usecases: SharedPatientsUseCases) -> Router {
    Router::new()
        .route("/patients", post(create_patient))
        .route("/patients/:id", get(find_patient_by_id))
        .with_state(usecases)
}

pub fn health_routes(pool: SharedPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
        .with_state(pool)
}
