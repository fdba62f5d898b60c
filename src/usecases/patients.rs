use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{PatientsError, Result};
use crate::models::{NewPatientRequest, Patient};
use crate::repository::PatientsRepository;

/// Business rules above raw storage: transactional creation with the
/// passport-number uniqueness check, and lookup by id.
pub struct PatientsUseCases {
    repository: PatientsRepository,
    clock: Arc<dyn Clock>,
}

impl PatientsUseCases {
    pub fn new(repository: PatientsRepository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Creates a patient unless the passport number is already taken. The
    /// existence check and the insert share one transaction; nothing is
    /// written when the check fails.
    pub async fn create_patient(&self, request: &NewPatientRequest) -> Result<Patient> {
        let mut tx = self.repository.begin().await?;

        if self
            .repository
            .exists_by_passport_number(&mut tx, &request.passport_number)
            .await?
        {
            return Err(PatientsError::ExistingPassportNumber(
                request.passport_number.clone(),
            ));
        }

        let patient = Patient {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            surname: request.surname.clone(),
            passport_number: request.passport_number.clone(),
            created_at: self.clock.now(),
        };

        tracing::info!(patient_id = %patient.id, "Creating patient");

        // A concurrent create can pass the existence check in both
        // transactions; the unique index catches the loser here.
        if let Err(e) = self.repository.insert(&mut tx, &patient).await {
            if is_unique_violation(&e) {
                return Err(PatientsError::ExistingPassportNumber(
                    request.passport_number.clone(),
                ));
            }
            return Err(e);
        }

        tx.commit().await?;

        Ok(patient)
    }

    /// Looks a patient up by id. Absence is a normal outcome, not an error;
    /// `TooManyPatientsFound` propagates untouched.
    pub async fn find_patient_by_id(&self, id: &str) -> Result<Option<Patient>> {
        self.repository.find_by_id(id).await
    }
}

fn is_unique_violation(err: &PatientsError) -> bool {
    match err {
        PatientsError::Database(sqlx::Error::Database(e)) => e.code().as_deref() == Some("23505"),
        _ => false,
    }
}
