//! Donations migration.
//!
//! Creates donor and donation classifications, the donor profile extension
//! of parties, and the donations table with its attestation flags.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_parties::Parties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DonorTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DonorTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(DonorTypes::Name).string().not_null())
                    .col(
                        ColumnDef::new(DonorTypes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DonorProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DonorProfiles::PartyId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DonorProfiles::DonorTypeId).uuid())
                    .col(
                        ColumnDef::new(DonorProfiles::IsDonor)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donor_profiles_party")
                            .from(DonorProfiles::Table, DonorProfiles::PartyId)
                            .to(Parties::Table, Parties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donor_profiles_type")
                            .from(DonorProfiles::Table, DonorProfiles::DonorTypeId)
                            .to(DonorTypes::Table, DonorTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DonationTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DonationTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DonationTypes::Name).string().not_null())
                    .col(
                        ColumnDef::new(DonationTypes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DonationTypes::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Donations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Donations::Number).string())
                    .col(ColumnDef::new(Donations::Date).date().not_null())
                    .col(ColumnDef::new(Donations::DonationTypeId).uuid().not_null())
                    .col(ColumnDef::new(Donations::DonorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Donations::Amount)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donations::Notes).text())
                    .col(ColumnDef::new(Donations::Complement).string())
                    .col(
                        ColumnDef::new(Donations::AttestationSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Donations::NoAttestation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Donations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Donations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_donor")
                            .from(Donations::Table, Donations::DonorId)
                            .to(Parties::Table, Parties::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_type")
                            .from(Donations::Table, Donations::DonationTypeId)
                            .to(DonationTypes::Table, DonationTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Donor record lookups, most recent first.
        manager
            .create_index(
                Index::create()
                    .name("idx_donations_donor_date")
                    .table(Donations::Table)
                    .col(Donations::DonorId)
                    .col(Donations::Date)
                    .to_owned(),
            )
            .await?;

        // Pending attestation listing.
        manager
            .create_index(
                Index::create()
                    .name("idx_donations_pending")
                    .table(Donations::Table)
                    .col(Donations::AttestationSent)
                    .col(Donations::NoAttestation)
                    .col(Donations::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DonationTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DonorProfiles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DonorTypes::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum DonorTypes {
    Table,
    Id,
    Name,
    Code,
}

#[derive(DeriveIden)]
enum DonorProfiles {
    Table,
    PartyId,
    DonorTypeId,
    IsDonor,
}

#[derive(DeriveIden)]
enum DonationTypes {
    Table,
    Id,
    Name,
    Code,
    Active,
}

#[derive(DeriveIden)]
enum Donations {
    Table,
    Id,
    Number,
    Date,
    DonationTypeId,
    DonorId,
    Amount,
    Notes,
    Complement,
    AttestationSent,
    NoAttestation,
    CreatedAt,
    UpdatedAt,
}
