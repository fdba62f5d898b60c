use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{PatientsError, Result};
use crate::models::Patient;

/// Sole owner of SQL access to the patients table.
pub struct PatientsRepository {
    pool: PgPool,
}

impl PatientsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the transaction the use-case layer runs check-and-insert in.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    pub async fn exists_by_passport_number(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        passport_number: &str,
    ) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM patients WHERE passport_number = $1)",
        )
        .bind(passport_number)
        .fetch_one(&mut **tx)
        .await?;

        Ok(exists)
    }

    pub async fn insert(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        patient: &Patient,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO patients (id, name, surname, passport_number, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&patient.id)
        .bind(&patient.name)
        .bind(&patient.surname)
        .bind(&patient.passport_number)
        .bind(patient.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Fetches zero or one patient. More than one row behind the same id
    /// violates the primary key and is reported as corruption, not absence.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Patient>> {
        let patients: Vec<Patient> = sqlx::query_as(
            r#"
            SELECT id, name, surname, passport_number, created_at
            FROM patients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        match patients.len() {
            0 => Ok(None),
            1 => Ok(patients.into_iter().next()),
            count => Err(PatientsError::TooManyPatientsFound {
                id: id.to_string(),
                count: count as i64,
            }),
        }
    }
}
