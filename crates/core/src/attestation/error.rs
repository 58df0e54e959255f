//! Attestation error types.
//!
//! Validation messages are user-facing and kept in French, the language of
//! the documents.

use thiserror::Error;

use dons_shared::AppError;
use dons_shared::types::{DonationId, PartyId};

/// Why a set of donations cannot produce a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationReason {
    /// No donation was selected.
    #[error("Aucun enregistrement trouvé")]
    NoDonationSelected,

    /// The selected donations do not all fall in the same calendar year.
    #[error("Les dons sélectionnés doivent être tous de la même année.")]
    MultipleYears,

    /// The selected donations do not all belong to the same donor.
    #[error("Les dons sélectionnés doivent appartenir au même donateur.")]
    MultipleDonors,

    /// A donation was paired with a party that does not own it.
    #[error("Le don {0} n'appartient pas au donateur indiqué")]
    DonorMismatch(DonationId),

    /// A single-donation document was requested for several donations.
    #[error("Une seule donation doit être sélectionnée ({count} sélectionnées)")]
    SingleDonationExpected {
        /// Number of donations selected.
        count: usize,
    },

    /// The donor has no postal address.
    #[error("Impossible de créer le rapport: le contact n'a pas d'adresse enregistrée")]
    MissingAddress,

    /// The donor's address lacks the street or the street number.
    #[error("Impossible de créer le rapport: l'adresse est incomplète")]
    IncompleteAddress,

    /// The donor has no donation in the resolved year.
    #[error("Aucun don trouvé pour l'année {0}")]
    NoDonationForYear(i32),
}

/// Errors that can occur while producing attestation documents.
#[derive(Debug, Error)]
pub enum AttestationError {
    /// The donation set is inconsistent or the donor data is incomplete.
    #[error("{0}")]
    Validation(#[from] ValidationReason),

    /// A requested donation does not exist.
    #[error("donation not found: {0}")]
    DonationNotFound(DonationId),

    /// The donor owning a donation does not exist.
    #[error("donor not found: {0}")]
    DonorNotFound(PartyId),

    /// The document renderer failed.
    #[error("rendering failed: {0}")]
    Render(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl AttestationError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Create a render error.
    #[must_use]
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Returns true for errors caused by the selected donations themselves.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DonationNotFound(_) => "DONATION_NOT_FOUND",
            Self::DonorNotFound(_) => "DONOR_NOT_FOUND",
            Self::Render(_) => "RENDER_ERROR",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }
}

impl From<AttestationError> for AppError {
    fn from(err: AttestationError) -> Self {
        match err {
            AttestationError::Validation(reason) => Self::Validation(reason.to_string()),
            AttestationError::DonationNotFound(_) | AttestationError::DonorNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            AttestationError::Render(msg) => Self::Render(msg),
            AttestationError::Repository(msg) => Self::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_user_facing() {
        let err = AttestationError::from(ValidationReason::MultipleYears);
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Les dons sélectionnés doivent être tous de la même année."
        );
    }

    #[test]
    fn test_no_donation_for_year_message() {
        let err = AttestationError::from(ValidationReason::NoDonationForYear(2024));
        assert_eq!(err.to_string(), "Aucun don trouvé pour l'année 2024");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AttestationError::from(ValidationReason::MissingAddress).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AttestationError::DonationNotFound(DonationId::new()).error_code(),
            "DONATION_NOT_FOUND"
        );
        assert_eq!(
            AttestationError::DonorNotFound(PartyId::new()).error_code(),
            "DONOR_NOT_FOUND"
        );
        assert_eq!(AttestationError::render("x").error_code(), "RENDER_ERROR");
        assert_eq!(
            AttestationError::repository("x").error_code(),
            "REPOSITORY_ERROR"
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = AttestationError::from(ValidationReason::IncompleteAddress).into();
        assert!(matches!(app, AppError::Validation(_)));

        let app: AppError = AttestationError::DonationNotFound(DonationId::new()).into();
        assert!(matches!(app, AppError::NotFound(_)));

        let app: AppError = AttestationError::repository("boom").into();
        assert!(matches!(app, AppError::Database(ref msg) if msg == "boom"));
    }
}
