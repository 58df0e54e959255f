//! `SeaORM` Entity for donor_profiles table.
//!
//! One row per party flagged or classified as a donor, keyed by the party id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "donor_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub party_id: Uuid,
    pub donor_type_id: Option<Uuid>,
    pub is_donor: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parties::Entity",
        from = "Column::PartyId",
        to = "super::parties::Column::Id"
    )]
    Parties,
    #[sea_orm(
        belongs_to = "super::donor_types::Entity",
        from = "Column::DonorTypeId",
        to = "super::donor_types::Column::Id"
    )]
    DonorTypes,
}

impl Related<super::parties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parties.def()
    }
}

impl Related<super::donor_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonorTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
