//! Attestation service: load, build, render, commit.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use dons_shared::types::{AmountFormat, DonationId, PartyId};

use super::builder::AttestationBuilder;
use super::error::{AttestationError, ValidationReason};
use super::types::{AttestationContext, AttestationDraft, AttestationKind};
use crate::donation::{Donation, Donor, Party};

/// Repository trait for donation persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait DonationRepository: Send + Sync {
    /// Loads the donations with the given IDs. Unknown IDs are skipped; order is unspecified.
    fn find_donations(
        &self,
        ids: &[DonationId],
    ) -> impl std::future::Future<Output = Result<Vec<Donation>, AttestationError>> + Send;

    /// Loads a party with its donor profile and every donation it owns.
    fn find_donor(
        &self,
        party_id: PartyId,
    ) -> impl std::future::Future<Output = Result<Option<Donor>, AttestationError>> + Send;

    /// Flags the given donations as sent, in one transaction.
    ///
    /// Donations already flagged are left untouched. Returns the number of
    /// donations that changed.
    fn mark_attestation_sent(
        &self,
        ids: &[DonationId],
    ) -> impl std::future::Future<Output = Result<u64, AttestationError>> + Send;

    /// Lists donations not yet covered by a document and not opted out,
    /// most recent first.
    fn list_awaiting_attestation(
        &self,
        year: Option<i32>,
    ) -> impl std::future::Future<Output = Result<Vec<Donation>, AttestationError>> + Send;
}

/// Turns contexts into a document.
///
/// Implemented by whatever produces the actual file (template engine,
/// JSON writer...).
pub trait DocumentRenderer {
    /// What rendering produces (a path, bytes...).
    type Output;

    /// Renders one document from the given contexts.
    ///
    /// # Errors
    ///
    /// Returns `AttestationError::Render` if the document cannot be produced.
    fn render(
        &self,
        kind: AttestationKind,
        contexts: &[AttestationContext],
    ) -> Result<Self::Output, AttestationError>;
}

/// A produced document and the number of donations flagged for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<O> {
    /// Renderer output.
    pub output: O,
    /// Number of donations flagged as sent.
    pub marked: u64,
}

/// Attestation service orchestrating the two-phase workflow.
///
/// `prepare_*` methods only read; `commit` is the single mutation.
/// `generate_*` methods chain both around a renderer and never commit when
/// rendering fails.
pub struct AttestationService<R: DonationRepository> {
    repo: Arc<R>,
    builder: AttestationBuilder,
}

impl<R: DonationRepository> AttestationService<R> {
    /// Create a new attestation service.
    #[must_use]
    pub fn new(repo: Arc<R>, format: AmountFormat) -> Self {
        Self {
            repo,
            builder: AttestationBuilder::new(format),
        }
    }

    /// Builds the yearly attestation for the donor of the selected donations.
    ///
    /// # Errors
    ///
    /// Returns an error if a donation or the donor cannot be found, or if
    /// the selection fails validation.
    pub async fn prepare_single_year(
        &self,
        ids: &[DonationId],
        generated_on: NaiveDate,
    ) -> Result<AttestationDraft<AttestationContext>, AttestationError> {
        let selected = self.load_donations(ids).await?;
        let first = selected
            .first()
            .ok_or(ValidationReason::NoDonationSelected)?;
        let donor = self.load_donor(first.donor).await?;

        let draft = self.builder.single_year(&donor, &selected, generated_on)?;
        debug!(
            donor_id = %donor.id(),
            year = draft.content.current_year,
            total = %draft.content.total_amount,
            to_mark = draft.to_mark.len(),
            "Prepared single-year attestation"
        );
        Ok(draft)
    }

    /// Builds the attestation of one donation.
    ///
    /// # Errors
    ///
    /// Returns an error if the donation or its donor cannot be found, or if
    /// the donor's address is incomplete.
    pub async fn prepare_single_donation(
        &self,
        id: DonationId,
        generated_on: NaiveDate,
    ) -> Result<AttestationDraft<AttestationContext>, AttestationError> {
        let selected = self.load_donations(&[id]).await?;
        let donor = self.load_donor(selected[0].donor).await?;

        let draft = self
            .builder
            .single_donation(&donor.party, &selected, generated_on)?;
        debug!(donation_id = %id, to_mark = draft.to_mark.len(), "Prepared single-donation attestation");
        Ok(draft)
    }

    /// Builds one thank-you context per donation, in the order of `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if any donation or donor cannot be found, or if any
    /// donor's address is incomplete.
    pub async fn prepare_thanks(
        &self,
        ids: &[DonationId],
        generated_on: NaiveDate,
    ) -> Result<AttestationDraft<Vec<AttestationContext>>, AttestationError> {
        let donations = self.load_donations(ids).await?;

        let mut parties: HashMap<PartyId, Party> = HashMap::new();
        for donation in &donations {
            if !parties.contains_key(&donation.donor) {
                let donor = self.load_donor(donation.donor).await?;
                parties.insert(donation.donor, donor.party);
            }
        }

        let entries: Vec<(&Party, &Donation)> = donations
            .iter()
            .map(|d| (&parties[&d.donor], d))
            .collect();

        let draft = self.builder.thanks(&entries, generated_on)?;
        debug!(
            letters = draft.content.len(),
            donors = parties.len(),
            to_mark = draft.to_mark.len(),
            "Prepared thank-you letters"
        );
        Ok(draft)
    }

    /// Flags the drafted donations as sent.
    ///
    /// Call only once the document exists. Idempotent: donations already
    /// flagged are not counted again.
    ///
    /// # Errors
    ///
    /// Returns `AttestationError::Repository` if the update fails; in that
    /// case no donation is flagged.
    pub async fn commit(&self, to_mark: &[DonationId]) -> Result<u64, AttestationError> {
        if to_mark.is_empty() {
            debug!("Nothing to mark as sent");
            return Ok(0);
        }

        let marked = self.repo.mark_attestation_sent(to_mark).await?;
        info!(requested = to_mark.len(), marked, "Marked donations as attestation sent");
        Ok(marked)
    }

    /// Builds, renders and commits the yearly attestation.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the build, render or commit step.
    /// Nothing is flagged unless rendering succeeded.
    pub async fn generate_single_year<D: DocumentRenderer>(
        &self,
        ids: &[DonationId],
        generated_on: NaiveDate,
        renderer: &D,
    ) -> Result<Generated<D::Output>, AttestationError> {
        let draft = self.prepare_single_year(ids, generated_on).await?;
        self.render_and_commit(draft.kind, draft.contexts(), &draft.to_mark, renderer)
            .await
    }

    /// Builds, renders and commits the attestation of one donation.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the build, render or commit step.
    /// Nothing is flagged unless rendering succeeded.
    pub async fn generate_single_donation<D: DocumentRenderer>(
        &self,
        id: DonationId,
        generated_on: NaiveDate,
        renderer: &D,
    ) -> Result<Generated<D::Output>, AttestationError> {
        let draft = self.prepare_single_donation(id, generated_on).await?;
        self.render_and_commit(draft.kind, draft.contexts(), &draft.to_mark, renderer)
            .await
    }

    /// Builds, renders and commits a batch of thank-you letters.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the build, render or commit step.
    /// Nothing is flagged unless rendering succeeded.
    pub async fn generate_thanks<D: DocumentRenderer>(
        &self,
        ids: &[DonationId],
        generated_on: NaiveDate,
        renderer: &D,
    ) -> Result<Generated<D::Output>, AttestationError> {
        let draft = self.prepare_thanks(ids, generated_on).await?;
        self.render_and_commit(draft.kind, draft.contexts(), &draft.to_mark, renderer)
            .await
    }

    /// Lists donations still waiting for an attestation.
    ///
    /// # Errors
    ///
    /// Returns `AttestationError::Repository` if the query fails.
    pub async fn awaiting_attestation(
        &self,
        year: Option<i32>,
    ) -> Result<Vec<Donation>, AttestationError> {
        self.repo.list_awaiting_attestation(year).await
    }

    async fn render_and_commit<D: DocumentRenderer>(
        &self,
        kind: AttestationKind,
        contexts: &[AttestationContext],
        to_mark: &[DonationId],
        renderer: &D,
    ) -> Result<Generated<D::Output>, AttestationError> {
        let output = renderer.render(kind, contexts).inspect_err(|e| {
            warn!(%kind, error = %e, "Rendering failed, no donation marked");
        })?;

        let marked = self.commit(to_mark).await?;
        info!(%kind, documents = contexts.len(), marked, "Document generated");
        Ok(Generated { output, marked })
    }

    /// Loads donations in the order of `ids`.
    async fn load_donations(&self, ids: &[DonationId]) -> Result<Vec<Donation>, AttestationError> {
        if ids.is_empty() {
            return Err(ValidationReason::NoDonationSelected.into());
        }

        let found: HashMap<DonationId, Donation> = self
            .repo
            .find_donations(ids)
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        ids.iter()
            .map(|id| {
                found
                    .get(id)
                    .cloned()
                    .ok_or(AttestationError::DonationNotFound(*id))
            })
            .collect()
    }

    async fn load_donor(&self, party_id: PartyId) -> Result<Donor, AttestationError> {
        self.repo
            .find_donor(party_id)
            .await?
            .ok_or(AttestationError::DonorNotFound(party_id))
    }
}
