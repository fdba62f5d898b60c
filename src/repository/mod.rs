pub mod patients;

pub use patients::PatientsRepository;
