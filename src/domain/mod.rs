//! Care-coordination records
//!
//! FHIR-aligned patient, medication, appointment and care-gap records held by
//! the data store. Agents only ever read these.

mod records;
mod summary;

pub use records::*;
pub use summary::*;
