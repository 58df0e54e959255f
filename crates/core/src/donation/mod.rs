//! Donation domain types.
//!
//! A donor is not a type of its own in storage: it is a `Party` joined with
//! an optional `DonorProfile` (keyed by the party id) and the donations the
//! party owns.

mod types;

pub use types::{Address, Donation, DonationType, Donor, DonorProfile, DonorType, Party};
