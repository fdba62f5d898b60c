pub mod patients;

pub use patients::PatientsUseCases;
