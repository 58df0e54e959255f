//! `SeaORM` entity definitions.

pub mod addresses;
pub mod donation_types;
pub mod donations;
pub mod donor_profiles;
pub mod donor_types;
pub mod parties;
