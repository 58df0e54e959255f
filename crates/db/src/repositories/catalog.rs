//! Donation and donor type catalogs.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

use crate::entities::{donation_types, donor_types};
use dons_core::donation::{DonationType, DonorType};
use dons_shared::types::{DonationTypeId, DonorTypeId};

/// Repository for the type catalogs.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active donation type.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, e.g. when the code is taken.
    pub async fn create_donation_type(&self, name: &str, code: &str) -> Result<DonationType, DbErr> {
        let model = donation_types::ActiveModel {
            id: Set(DonationTypeId::new().into_inner()),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            active: Set(true),
        }
        .insert(&self.db)
        .await?;

        Ok(donation_type_to_domain(model))
    }

    /// Finds a donation type by its code, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_donation_type_by_code(
        &self,
        code: &str,
    ) -> Result<Option<DonationType>, DbErr> {
        let model = donation_types::Entity::find()
            .filter(donation_types::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(donation_type_to_domain))
    }

    /// Lists donation types by name. Inactive types are left out unless asked for.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_donation_types(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<DonationType>, DbErr> {
        let mut query = donation_types::Entity::find();
        if !include_inactive {
            query = query.filter(donation_types::Column::Active.eq(true));
        }

        let models = query
            .order_by_asc(donation_types::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(donation_type_to_domain).collect())
    }

    /// Activates or deactivates a donation type. Returns false if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_donation_type_active(
        &self,
        id: DonationTypeId,
        active: bool,
    ) -> Result<bool, DbErr> {
        let result = donation_types::Entity::update_many()
            .col_expr(donation_types::Column::Active, Expr::value(active))
            .filter(donation_types::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Creates a donor type.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, e.g. when the code is taken.
    pub async fn create_donor_type(&self, name: &str, code: &str) -> Result<DonorType, DbErr> {
        let model = donor_types::ActiveModel {
            id: Set(DonorTypeId::new().into_inner()),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
        }
        .insert(&self.db)
        .await?;

        Ok(donor_type_to_domain(model))
    }

    /// Finds a donor type by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_donor_type_by_code(&self, code: &str) -> Result<Option<DonorType>, DbErr> {
        let model = donor_types::Entity::find()
            .filter(donor_types::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(donor_type_to_domain))
    }

    /// Lists donor types by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_donor_types(&self) -> Result<Vec<DonorType>, DbErr> {
        let models = donor_types::Entity::find()
            .order_by_asc(donor_types::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(donor_type_to_domain).collect())
    }
}

fn donation_type_to_domain(model: donation_types::Model) -> DonationType {
    DonationType {
        id: DonationTypeId::from_uuid(model.id),
        name: model.name,
        code: model.code,
        active: model.active,
    }
}

fn donor_type_to_domain(model: donor_types::Model) -> DonorType {
    DonorType {
        id: DonorTypeId::from_uuid(model.id),
        name: model.name,
        code: model.code,
    }
}
