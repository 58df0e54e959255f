//! Donation attestations and thank-you letters.
//!
//! This module provides pure business logic for attestation documents:
//! - Salutation, address block and date formatting
//! - Context building for single-year attestations, single-donation
//!   attestations and batches of thank-you letters
//! - The two-phase build/commit workflow that marks donations as sent
//!   only after their document has been produced
//!
//! Rendering and persistence are supplied by the caller through the
//! `DocumentRenderer` and `DonationRepository` traits.

pub mod address;
pub mod builder;
pub mod calendar;
pub mod error;
pub mod salutation;
pub mod service;
pub mod types;


pub use address::AddressBlock;
pub use builder::AttestationBuilder;
pub use error::{AttestationError, ValidationReason};
pub use salutation::Salutation;
pub use service::{AttestationService, DocumentRenderer, DonationRepository, Generated};
pub use types::{AttestationContext, AttestationDraft, AttestationKind};
