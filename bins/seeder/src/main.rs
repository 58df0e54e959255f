//! Database seeder for donations development and testing.
//!
//! Seeds donor types, donation types and a few sample donors with donations
//! for local development. Existing catalog entries and sample donors are
//! looked up first, so reruns only add what is missing.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dons_core::donation::{DonationType, DonorType};
use dons_db::{CatalogRepository, CreateDonationInput, DonationRepository, NewAddress, PartyRepository};
use dons_shared::AppConfig;

const DONOR_TYPES: [(&str, &str); 3] = [
    ("Particulier", "PART"),
    ("Entreprise", "ENT"),
    ("Fondation", "FOND"),
];

const DONATION_TYPES: [(&str, &str); 3] = [
    ("Don libre", "LIBRE"),
    ("Cotisation", "COT"),
    ("Parrainage", "PARR"),
];

struct SampleDonor {
    name: &'static str,
    donor_type: &'static str,
    street: &'static str,
    number: &'static str,
    postal_code: &'static str,
    city: &'static str,
    /// (year, month, day, amount in cents)
    gifts: &'static [(i32, u32, u32, i64)],
}

const SAMPLE_DONORS: [SampleDonor; 3] = [
    SampleDonor {
        name: "Madame Anne Dupont",
        donor_type: "PART",
        street: "Rue du Lac",
        number: "12",
        postal_code: "1000",
        city: "Lausanne",
        gifts: &[(2024, 3, 15, 12_000), (2024, 9, 1, 8_050), (2023, 12, 20, 5_000)],
    },
    SampleDonor {
        name: "Monsieur & Madame Paul et Julie Martin",
        donor_type: "PART",
        street: "Chemin des Vignes",
        number: "3",
        postal_code: "1800",
        city: "Vevey",
        gifts: &[(2024, 6, 30, 25_000)],
    },
    SampleDonor {
        name: "Dr Claire Favre",
        donor_type: "FOND",
        street: "Avenue de la Gare",
        number: "41",
        postal_code: "1950",
        city: "Sion",
        gifts: &[(2024, 1, 10, 123_450), (2025, 2, 1, 10_000)],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dons=debug,seeder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = dons_db::connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let donor_types = seed_donor_types(&db).await?;
    let donation_types = seed_donation_types(&db).await?;
    seed_sample_donors(&db, &donor_types, &donation_types).await?;

    info!("Seeding complete");
    Ok(())
}

/// Seeds donor types, returning all of them.
async fn seed_donor_types(db: &DatabaseConnection) -> anyhow::Result<Vec<DonorType>> {
    let catalog = CatalogRepository::new(db.clone());
    let mut seeded = Vec::with_capacity(DONOR_TYPES.len());

    for (name, code) in DONOR_TYPES {
        let donor_type = match catalog.find_donor_type_by_code(code).await? {
            Some(existing) => existing,
            None => {
                info!(code, "Seeding donor type");
                catalog.create_donor_type(name, code).await?
            }
        };
        seeded.push(donor_type);
    }

    Ok(seeded)
}

/// Seeds donation types, returning all of them.
async fn seed_donation_types(db: &DatabaseConnection) -> anyhow::Result<Vec<DonationType>> {
    let catalog = CatalogRepository::new(db.clone());
    let mut seeded = Vec::with_capacity(DONATION_TYPES.len());

    for (name, code) in DONATION_TYPES {
        let donation_type = match catalog.find_donation_type_by_code(code).await? {
            Some(existing) => existing,
            None => {
                info!(code, "Seeding donation type");
                catalog.create_donation_type(name, code).await?
            }
        };
        seeded.push(donation_type);
    }

    Ok(seeded)
}

async fn seed_sample_donors(
    db: &DatabaseConnection,
    donor_types: &[DonorType],
    donation_types: &[DonationType],
) -> anyhow::Result<()> {
    let parties = PartyRepository::new(db.clone());
    let donations = DonationRepository::new(db.clone());
    let default_type = donation_types
        .first()
        .context("No donation type available")?
        .id;

    for sample in &SAMPLE_DONORS {
        if parties.find_by_name(sample.name).await?.is_some() {
            info!(name = sample.name, "Sample donor already present, skipping");
            continue;
        }

        let party = parties.create(sample.name).await?;
        parties
            .add_address(
                party.id,
                NewAddress {
                    street: Some(sample.street.to_string()),
                    street_number: Some(sample.number.to_string()),
                    postal_code: Some(sample.postal_code.to_string()),
                    city: Some(sample.city.to_string()),
                    ..NewAddress::default()
                },
            )
            .await?;

        let donor_type = donor_types
            .iter()
            .find(|t| t.code == sample.donor_type)
            .map(|t| t.id);
        parties.set_donor_profile(party.id, donor_type, true).await?;

        for &(year, month, day, cents) in sample.gifts {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .with_context(|| format!("Invalid sample date {year}-{month}-{day}"))?;
            donations
                .create(CreateDonationInput {
                    number: None,
                    date,
                    donation_type: default_type,
                    donor: party.id,
                    amount: Decimal::new(cents, 2),
                    notes: None,
                    complement: None,
                    no_attestation: false,
                })
                .await?;
        }

        info!(name = sample.name, gifts = sample.gifts.len(), "Seeded sample donor");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dons_db::entities::parties;
    use dons_db::migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, EntityTrait, PaginatorTrait};

    async fn setup_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_rerun_completes_interrupted_seed() {
        let db = setup_db().await;
        let donor_types = seed_donor_types(&db).await.unwrap();
        let donation_types = seed_donation_types(&db).await.unwrap();

        // An earlier run stopped after creating the first donor.
        PartyRepository::new(db.clone())
            .create(SAMPLE_DONORS[0].name)
            .await
            .unwrap();

        seed_sample_donors(&db, &donor_types, &donation_types)
            .await
            .unwrap();
        let count = parties::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, u64::try_from(SAMPLE_DONORS.len()).unwrap());

        seed_sample_donors(&db, &donor_types, &donation_types)
            .await
            .unwrap();
        let count = parties::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, u64::try_from(SAMPLE_DONORS.len()).unwrap());
    }

    #[tokio::test]
    async fn test_catalogs_not_duplicated() {
        let db = setup_db().await;
        seed_donation_types(&db).await.unwrap();
        let again = seed_donation_types(&db).await.unwrap();
        assert_eq!(again.len(), DONATION_TYPES.len());

        let listed = CatalogRepository::new(db).list_donation_types(true).await.unwrap();
        assert_eq!(listed.len(), DONATION_TYPES.len());
    }
}
