//! Core business logic for Dons.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `donation` - Parties, donor profiles, donations and their classifications
//! - `attestation` - Attestation and thank-you letter contexts, mark-as-sent workflow

pub mod attestation;
pub mod donation;
