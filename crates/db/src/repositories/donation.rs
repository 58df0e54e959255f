//! Donation repository for database operations.
//!
//! Implements the core `DonationRepository` trait used by the attestation
//! service, plus the plain CRUD needed to record donations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, prelude::DateTimeWithTimeZone,
    sea_query::Expr,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{addresses, donations, donor_profiles, parties};
use dons_core::attestation::{AttestationError, DonationRepository as DonationRepoTrait};
use dons_core::donation::{Address, Donation, Donor, DonorProfile, Party};
use dons_shared::types::{AddressId, DonationId, DonationTypeId, DonorTypeId, PartyId};

/// Input for recording a donation.
#[derive(Debug, Clone)]
pub struct CreateDonationInput {
    /// Reference number.
    pub number: Option<String>,
    /// Date of the gift.
    pub date: NaiveDate,
    /// Donation type.
    pub donation_type: DonationTypeId,
    /// Donating party.
    pub donor: PartyId,
    /// Amount.
    pub amount: Decimal,
    /// Internal notes.
    pub notes: Option<String>,
    /// Text printed on documents.
    pub complement: Option<String>,
    /// The donor opted out of attestations.
    pub no_attestation: bool,
}

/// Donation repository implementation.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    db: DatabaseConnection,
}

impl DonationRepository {
    /// Create a new donation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new donation, not yet covered by any attestation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, e.g. for an unknown
    /// donor or donation type.
    pub async fn create(&self, input: CreateDonationInput) -> Result<Donation, DbErr> {
        let now = timestamp();

        let model = donations::ActiveModel {
            id: Set(DonationId::new().into_inner()),
            number: Set(input.number),
            date: Set(input.date),
            donation_type_id: Set(input.donation_type.into_inner()),
            donor_id: Set(input.donor.into_inner()),
            amount: Set(input.amount),
            notes: Set(input.notes),
            complement: Set(input.complement),
            attestation_sent: Set(false),
            no_attestation: Set(input.no_attestation),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        debug!(donation_id = %model.id, donor_id = %model.donor_id, "Donation recorded");
        Ok(to_domain(model))
    }

    /// Finds a donation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: DonationId) -> Result<Option<Donation>, DbErr> {
        let model = donations::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(model.map(to_domain))
    }

    /// Lists the donations of a donor, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_donor(&self, donor: PartyId) -> Result<Vec<Donation>, DbErr> {
        list_by_donor(&self.db, donor.into_inner()).await
    }

    /// Sets or clears the donor's opt-out for one donation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_no_attestation(&self, id: DonationId, value: bool) -> Result<bool, DbErr> {
        let result = donations::Entity::update_many()
            .col_expr(donations::Column::NoAttestation, Expr::value(value))
            .col_expr(donations::Column::UpdatedAt, Expr::value(timestamp()))
            .filter(donations::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Flags donations as sent on any connection or open transaction.
///
/// Only donations still unflagged are updated, so repeated calls count each
/// donation once.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub async fn mark_attestation_sent<C: ConnectionTrait>(
    conn: &C,
    ids: &[DonationId],
) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = donations::Entity::update_many()
        .col_expr(donations::Column::AttestationSent, Expr::value(true))
        .col_expr(donations::Column::UpdatedAt, Expr::value(timestamp()))
        .filter(donations::Column::Id.is_in(raw_ids(ids)))
        .filter(donations::Column::AttestationSent.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

impl DonationRepoTrait for DonationRepository {
    async fn find_donations(&self, ids: &[DonationId]) -> Result<Vec<Donation>, AttestationError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = donations::Entity::find()
            .filter(donations::Column::Id.is_in(raw_ids(ids)))
            .all(&self.db)
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_donor(&self, party_id: PartyId) -> Result<Option<Donor>, AttestationError> {
        let id = party_id.into_inner();

        let Some(party) = parties::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?
        else {
            return Ok(None);
        };

        let addresses = addresses::Entity::find()
            .filter(addresses::Column::PartyId.eq(id))
            .order_by_asc(addresses::Column::Sequence)
            .all(&self.db)
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        let profile = donor_profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        let donations = list_by_donor(&self.db, id)
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        debug!(
            addresses = addresses.len(),
            donations = donations.len(),
            "Donor loaded"
        );

        Ok(Some(Donor {
            party: party_to_domain(party, addresses),
            profile: profile.map(profile_to_domain),
            donations,
        }))
    }

    async fn mark_attestation_sent(&self, ids: &[DonationId]) -> Result<u64, AttestationError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        let marked = mark_attestation_sent(&txn, ids)
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        Ok(marked)
    }

    async fn list_awaiting_attestation(
        &self,
        year: Option<i32>,
    ) -> Result<Vec<Donation>, AttestationError> {
        let mut query = donations::Entity::find()
            .filter(donations::Column::AttestationSent.eq(false))
            .filter(donations::Column::NoAttestation.eq(false));

        if let Some(year) = year {
            let Some((first, last)) = year_bounds(year) else {
                return Ok(Vec::new());
            };
            query = query
                .filter(donations::Column::Date.gte(first))
                .filter(donations::Column::Date.lte(last));
        }

        let models = query
            .order_by_desc(donations::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| AttestationError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

async fn list_by_donor<C: ConnectionTrait>(conn: &C, donor: Uuid) -> Result<Vec<Donation>, DbErr> {
    let models = donations::Entity::find()
        .filter(donations::Column::DonorId.eq(donor))
        .order_by_desc(donations::Column::Date)
        .all(conn)
        .await?;
    Ok(models.into_iter().map(to_domain).collect())
}

/// First and last day of `year`, if representable.
fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

pub(crate) fn timestamp() -> DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

fn raw_ids(ids: &[DonationId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_inner()).collect()
}

/// Convert database model to domain donation.
fn to_domain(model: donations::Model) -> Donation {
    Donation {
        id: DonationId::from_uuid(model.id),
        number: model.number,
        date: model.date,
        donation_type: DonationTypeId::from_uuid(model.donation_type_id),
        donor: PartyId::from_uuid(model.donor_id),
        amount: model.amount,
        notes: model.notes,
        complement: model.complement,
        attestation_sent: model.attestation_sent,
        no_attestation: model.no_attestation,
    }
}

pub(crate) fn party_to_domain(model: parties::Model, addresses: Vec<addresses::Model>) -> Party {
    Party {
        id: PartyId::from_uuid(model.id),
        name: model.name,
        addresses: addresses.into_iter().map(address_to_domain).collect(),
    }
}

pub(crate) fn address_to_domain(model: addresses::Model) -> Address {
    Address {
        id: AddressId::from_uuid(model.id),
        street: model.street,
        street_number: model.street_number,
        complement: model.complement,
        complement2: model.complement2,
        postal_code: model.postal_code,
        city: model.city,
    }
}

pub(crate) fn profile_to_domain(model: donor_profiles::Model) -> DonorProfile {
    DonorProfile {
        party_id: PartyId::from_uuid(model.party_id),
        donor_type: model.donor_type_id.map(DonorTypeId::from_uuid),
        is_donor: model.is_donor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        let (first, last) = year_bounds(2024).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(year_bounds(i32::MAX).is_none());
    }

    #[test]
    fn test_to_domain_keeps_flags() {
        let now = chrono::Utc::now().into();
        let model = donations::Model {
            id: Uuid::new_v4(),
            number: Some("D-2024-001".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            donation_type_id: Uuid::new_v4(),
            donor_id: Uuid::new_v4(),
            amount: Decimal::new(12_550, 2),
            notes: None,
            complement: Some("Projet école".to_string()),
            attestation_sent: true,
            no_attestation: false,
            created_at: now,
            updated_at: now,
        };

        let donation = to_domain(model.clone());
        assert_eq!(donation.id.into_inner(), model.id);
        assert_eq!(donation.donor.into_inner(), model.donor_id);
        assert_eq!(donation.amount, Decimal::new(12_550, 2));
        assert!(donation.attestation_sent);
        assert!(!donation.awaits_attestation());
        assert_eq!(donation.complement_text(), "Projet école");
    }
}
