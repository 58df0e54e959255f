//! Command-line interface.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use dons_core::attestation::{AttestationKind, AttestationService};
use dons_db::DonationRepository;
use dons_shared::types::DonationId;
use dons_shared::{AppConfig, AppError};

use crate::render::JsonFileRenderer;

#[derive(Parser, Debug)]
#[command(
    name = "attest",
    about = "Produce donation attestations and thank-you letters",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Yearly attestation covering every donation of the donor in that year
    SingleYear(SelectionArgs),
    /// Attestation of exactly one donation
    Single(SingleArgs),
    /// One thank-you letter per donation
    Thanks(SelectionArgs),
    /// List donations still waiting for an attestation
    Pending(PendingArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Date printed on the document (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// File to write (defaults to a file in the configured output directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Selected donation IDs
    #[arg(required = true)]
    ids: Vec<DonationId>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SingleArgs {
    /// The donation ID
    id: DonationId,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct PendingArgs {
    /// Only list donations of this year
    #[arg(long)]
    year: Option<i32>,
}

pub(crate) async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().map_err(AppError::from)?;
    let db = dons_db::connect_with(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let repo = Arc::new(DonationRepository::new(db));
    let format = config.attestation.amount_format.clone();
    let service = AttestationService::new(repo, format.clone());
    let output_dir = Path::new(&config.attestation.output_dir);

    match cli.command {
        Command::SingleYear(args) => {
            let (date, renderer) =
                prepare_output(&args.output, output_dir, AttestationKind::SingleYear, &args.ids);
            let generated = service
                .generate_single_year(&args.ids, date, &renderer)
                .await
                .map_err(AppError::from)?;
            report(&generated.output, generated.marked);
        }
        Command::Single(args) => {
            let ids = [args.id];
            let (date, renderer) =
                prepare_output(&args.output, output_dir, AttestationKind::SingleDonation, &ids);
            let generated = service
                .generate_single_donation(args.id, date, &renderer)
                .await
                .map_err(AppError::from)?;
            report(&generated.output, generated.marked);
        }
        Command::Thanks(args) => {
            let (date, renderer) =
                prepare_output(&args.output, output_dir, AttestationKind::Thanks, &args.ids);
            let generated = service
                .generate_thanks(&args.ids, date, &renderer)
                .await
                .map_err(AppError::from)?;
            report(&generated.output, generated.marked);
        }
        Command::Pending(args) => {
            let pending = service
                .awaiting_attestation(args.year)
                .await
                .map_err(AppError::from)?;
            for donation in &pending {
                println!(
                    "{}  {}  {}  {:>14}",
                    donation.date,
                    donation.id,
                    donation.donor,
                    donation.formatted_amount(&format)
                );
            }
            info!(count = pending.len(), year = ?args.year, "Listed pending donations");
        }
    }

    Ok(())
}

/// Resolves the document date and target file.
fn prepare_output(
    args: &OutputArgs,
    output_dir: &Path,
    kind: AttestationKind,
    ids: &[DonationId],
) -> (NaiveDate, JsonFileRenderer) {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let path = args
        .out
        .clone()
        .unwrap_or_else(|| default_path(output_dir, kind, date, ids));
    (date, JsonFileRenderer::new(path))
}

/// `{dir}/{kind}_{date}_{first id}.json`
fn default_path(dir: &Path, kind: AttestationKind, date: NaiveDate, ids: &[DonationId]) -> PathBuf {
    let suffix = ids
        .first()
        .map(|id| format!("_{}", id.into_inner().simple()))
        .unwrap_or_default();
    dir.join(format!("{kind}_{date}{suffix}.json"))
}

fn report(path: &Path, marked: u64) {
    println!("{}", path.display());
    info!(path = %path.display(), marked, "Document written");
}
