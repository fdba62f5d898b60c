use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

/// A stored patient record. Immutable once created; `id` is assigned at
/// creation time and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub passport_number: String,
    #[serde(serialize_with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

fn rfc3339_millis<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Inbound creation payload. Carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatientRequest {
    pub name: String,
    pub surname: String,
    pub passport_number: String,
}

impl NewPatientRequest {
    /// Checks every field constraint and collects all violations instead of
    /// stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        if !(1..=50).contains(&self.name.chars().count()) {
            violations.push("'name' length must be between 1 and 50".to_string());
        }

        if !(1..=150).contains(&self.surname.chars().count()) {
            violations.push("'surname' length must be between 1 and 150".to_string());
        }

        if self.passport_number.chars().count() != 10 {
            violations.push("'passportNumber' length must be between 10 and 10".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, surname: &str, passport_number: &str) -> NewPatientRequest {
        NewPatientRequest {
            name: name.to_string(),
            surname: surname.to_string(),
            passport_number: passport_number.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("mola", "siebert", "987678910T").validate().is_ok());
        assert!(request(&"a".repeat(50), &"b".repeat(150), "0123456789")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_name_bounds() {
        let violations = request("", "siebert", "987678910T").validate().unwrap_err();
        assert_eq!(violations, vec!["'name' length must be between 1 and 50"]);

        let violations = request(&"a".repeat(51), "siebert", "987678910T")
            .validate()
            .unwrap_err();
        assert_eq!(violations, vec!["'name' length must be between 1 and 50"]);
    }

    #[test]
    fn test_surname_bounds() {
        let violations = request("mola", &"b".repeat(151), "987678910T")
            .validate()
            .unwrap_err();
        assert_eq!(violations, vec!["'surname' length must be between 1 and 150"]);
    }

    #[test]
    fn test_passport_number_exact_length() {
        let violations = request("mola", "siebert", "11").validate().unwrap_err();
        assert_eq!(
            violations,
            vec!["'passportNumber' length must be between 10 and 10"]
        );

        let violations = request("mola", "siebert", "12345678901")
            .validate()
            .unwrap_err();
        assert_eq!(
            violations,
            vec!["'passportNumber' length must be between 10 and 10"]
        );
    }

    #[test]
    fn test_all_violations_collected() {
        let violations = request(&"a".repeat(51), "", "11").validate().unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&"'name' length must be between 1 and 50".to_string()));
        assert!(violations.contains(&"'surname' length must be between 1 and 150".to_string()));
        assert!(
            violations.contains(&"'passportNumber' length must be between 10 and 10".to_string())
        );
    }

    #[test]
    fn test_lengths_counted_in_characters() {
        // 10 multi-byte characters are still 10 characters
        assert!(request("mola", "siebert", "ÄÄÄÄÄÄÄÄÄÄ").validate().is_ok());
    }

    #[test]
    fn test_patient_json_shape() {
        let patient = Patient {
            id: "91ecd50b-b035-46f2-9ba7-8ce99ae33e17".to_string(),
            name: "marcel".to_string(),
            surname: "lineal".to_string(),
            passport_number: "12345687II".to_string(),
            created_at: DateTime::parse_from_rfc3339("2021-02-28T16:32:54.123Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "91ecd50b-b035-46f2-9ba7-8ce99ae33e17",
                "name": "marcel",
                "surname": "lineal",
                "passportNumber": "12345687II",
                "createdAt": "2021-02-28T16:32:54.123Z"
            })
        );
    }
}
