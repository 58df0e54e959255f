//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod catalog;
pub mod donation;
pub mod party;

pub use catalog::CatalogRepository;
pub use donation::{CreateDonationInput, DonationRepository, mark_attestation_sent};
pub use party::{NewAddress, PartyRepository};
