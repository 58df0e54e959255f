//! Party repository for database operations.
//!
//! Parties are the contacts donations belong to. The donor profile is kept in
//! its own table and attached to a party when needed.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::donation::{address_to_domain, party_to_domain, profile_to_domain, timestamp};
use crate::entities::{addresses, donor_profiles, parties};
use dons_core::donation::{Address, DonorProfile, Party};
use dons_shared::types::{AddressId, DonorTypeId, PartyId};

/// Input for adding a postal address to a party.
#[derive(Debug, Clone, Default)]
pub struct NewAddress {
    /// Street name.
    pub street: Option<String>,
    /// Street number.
    pub street_number: Option<String>,
    /// Line printed above the street.
    pub complement: Option<String>,
    /// Line printed below the street.
    pub complement2: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// City.
    pub city: Option<String>,
}

/// Party repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PartyRepository {
    db: DatabaseConnection,
}

impl PartyRepository {
    /// Creates a new party repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a party without any address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str) -> Result<Party, DbErr> {
        let now = timestamp();

        let model = parties::ActiveModel {
            id: Set(PartyId::new().into_inner()),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        debug!(party_id = %model.id, "Party created");
        Ok(party_to_domain(model, Vec::new()))
    }

    /// Appends an address after the party's existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, e.g. for an unknown party.
    pub async fn add_address(&self, party: PartyId, input: NewAddress) -> Result<Address, DbErr> {
        let existing = addresses::Entity::find()
            .filter(addresses::Column::PartyId.eq(party.into_inner()))
            .count(&self.db)
            .await?;
        let sequence = i32::try_from(existing)
            .map_err(|_| DbErr::Custom(format!("too many addresses for party {party}")))?;

        let model = addresses::ActiveModel {
            id: Set(AddressId::new().into_inner()),
            party_id: Set(party.into_inner()),
            sequence: Set(sequence),
            street: Set(input.street),
            street_number: Set(input.street_number),
            complement: Set(input.complement),
            complement2: Set(input.complement2),
            postal_code: Set(input.postal_code),
            city: Set(input.city),
            created_at: Set(timestamp()),
        }
        .insert(&self.db)
        .await?;

        Ok(address_to_domain(model))
    }

    /// Finds a party by ID, with its addresses in printing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: PartyId) -> Result<Option<Party>, DbErr> {
        let Some(model) = parties::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let addresses = addresses::Entity::find()
            .filter(addresses::Column::PartyId.eq(model.id))
            .order_by_asc(addresses::Column::Sequence)
            .all(&self.db)
            .await?;

        Ok(Some(party_to_domain(model, addresses)))
    }

    /// Finds the first party with exactly this name, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Party>, DbErr> {
        let Some(model) = parties::Entity::find()
            .filter(parties::Column::Name.eq(name))
            .order_by_asc(parties::Column::CreatedAt)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        self.find_by_id(PartyId::from_uuid(model.id)).await
    }

    /// Creates or replaces the donor profile of a party.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn set_donor_profile(
        &self,
        party: PartyId,
        donor_type: Option<DonorTypeId>,
        is_donor: bool,
    ) -> Result<DonorProfile, DbErr> {
        let donor_type_id = donor_type.map(DonorTypeId::into_inner);

        let model = match donor_profiles::Entity::find_by_id(party.into_inner())
            .one(&self.db)
            .await?
        {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.donor_type_id = Set(donor_type_id);
                active.is_donor = Set(is_donor);
                active.update(&self.db).await?
            }
            None => {
                donor_profiles::ActiveModel {
                    party_id: Set(party.into_inner()),
                    donor_type_id: Set(donor_type_id),
                    is_donor: Set(is_donor),
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(profile_to_domain(model))
    }
}
