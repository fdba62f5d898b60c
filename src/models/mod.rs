pub mod patient;

pub use patient::{NewPatientRequest, Patient};
