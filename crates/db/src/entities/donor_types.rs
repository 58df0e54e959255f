//! `SeaORM` Entity for donor_types table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "donor_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donor_profiles::Entity")]
    DonorProfiles,
}

impl Related<super::donor_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonorProfiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
