//! Domain models for the rx-check system.

mod medication;
mod patient;
mod prescription;
mod verification;

pub use medication::*;
pub use patient::*;
pub use prescription::*;
pub use verification::*;
