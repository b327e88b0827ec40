// restoration-docs: Generate restoration paperwork as paginated PDFs

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;

use restoration_docs::raster::load_image;
use restoration_docs::{
    documents, AgreementForm, Assets, CertificateForm, ClaimRecord, ClaimStore, CompanyRecord,
    DocError, DocumentForm, ImagePayload, JsonStore, LossAssessmentForm, PageGeometry,
    ReceiptForm,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate restoration documents as PDF")]
struct Cli {
    #[command(subcommand)]
    document: DocumentCommand,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum DocumentCommand {
    /// Certificate of Completion
    Certificate,
    /// Construction Labor Agreement
    Agreement,
    /// Payment receipt
    Receipt,
    /// Loss Assessment Report
    LossAssessment,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Form fields as JSON (takes precedence over --claim prefill)
    #[arg(short, long, global = true)]
    form: Option<PathBuf>,

    /// Exported claims/companies JSON
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Claim id to prefill the form from (requires --store)
    #[arg(short, long, global = true, requires = "store")]
    claim: Option<String>,

    /// Photo (file path, URL or data URI); repeat for more
    #[arg(short, long = "photo", global = true)]
    photos: Vec<String>,

    /// Logo image (file path or URL); defaults to the company's logo
    #[arg(long, global = true)]
    logo: Option<String>,

    /// Contractor signature image
    #[arg(long, global = true)]
    contractor_signature: Option<String>,

    /// Client signature image
    #[arg(long, global = true)]
    client_signature: Option<String>,

    /// Date used for prefilled fields (YYYY-MM-DD, defaults to today)
    #[arg(short, long, global = true)]
    date: Option<String>,

    /// Directory the PDF is written into
    #[arg(short, long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Page width in points
    #[arg(long, global = true, default_value = "612")]
    page_width: f32,

    /// Page height in points
    #[arg(long, global = true, default_value = "792")]
    page_height: f32,

    /// Page margin in points
    #[arg(long, global = true, default_value = "40")]
    margin: f32,

    /// Warn when the PDF is larger than this many MiB
    #[arg(long, global = true, default_value = "24")]
    soft_limit_mb: u64,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DocError> {
    let cli = Cli::parse();
    let args = &cli.common;

    let today = parse_date(&args.date)?;
    let geometry = PageGeometry::new(args.page_width, args.page_height, args.margin)?;
    let (claim, company) = load_claim(args)?;

    let assets = load_assets(args, company.as_ref())?;

    match cli.document {
        DocumentCommand::Certificate => {
            let form = form_or_prefill(args, || {
                CertificateForm::prefill(&claim, company.as_ref(), today)
            })?;
            emit(&form, &assets, geometry, args)
        }
        DocumentCommand::Agreement => {
            let form = form_or_prefill(args, || {
                AgreementForm::prefill(&claim, company.as_ref(), today)
            })?;
            emit(&form, &assets, geometry, args)
        }
        DocumentCommand::Receipt => {
            let form =
                form_or_prefill(args, || ReceiptForm::prefill(&claim, company.as_ref(), today))?;
            emit(&form, &assets, geometry, args)
        }
        DocumentCommand::LossAssessment => {
            let form = form_or_prefill(args, || LossAssessmentForm::prefill(&claim))?;
            emit(&form, &assets, geometry, args)
        }
    }
}

fn emit<D: DocumentForm>(
    form: &D,
    assets: &Assets,
    geometry: PageGeometry,
    args: &CommonArgs,
) -> Result<(), DocError> {
    let generated = documents::generate(form, assets, geometry)?;

    std::fs::create_dir_all(&args.out_dir)?;
    let soft_limit = documents::soft_limit_from_mib(args.soft_limit_mb);
    let outcome = documents::save(&generated, &args.out_dir, soft_limit, Local::now())?;

    println!("✓ Generated: {}", outcome.path.display());
    println!("  Document: {}", generated.kind.title());
    println!("  Reference: {}", generated.identifier);
    println!("  Pages: {}", generated.pages);
    if let Some(warning) = outcome.warning {
        println!("  Warning: {}", warning);
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_date(date_str: &Option<String>) -> Result<NaiveDate, DocError> {
    match date_str {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DocError::InvalidDate(s.clone())),
        None => Ok(Local::now().date_naive()),
    }
}

fn load_claim(args: &CommonArgs) -> Result<(ClaimRecord, Option<CompanyRecord>), DocError> {
    match (&args.store, &args.claim) {
        (Some(store), Some(id)) => JsonStore::open(store)?.claim_with_company(id),
        _ => Ok((ClaimRecord::default(), None)),
    }
}

fn form_or_prefill<D, F>(args: &CommonArgs, prefill: F) -> Result<D, DocError>
where
    D: DeserializeOwned,
    F: FnOnce() -> D,
{
    match &args.form {
        Some(path) => read_form(path),
        None => Ok(prefill()),
    }
}

fn read_form<D: DeserializeOwned>(path: &Path) -> Result<D, DocError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DocError::Store(format!("{}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}

fn load_assets(args: &CommonArgs, company: Option<&CompanyRecord>) -> Result<Assets, DocError> {
    let logo_src = args
        .logo
        .clone()
        .or_else(|| company.and_then(|c| c.logo_url.clone()));

    // Photos and logos that fail to decode are skipped during layout;
    // a signature the user pointed at has to load.
    Ok(Assets {
        logo: logo_src.as_deref().map(ImagePayload::load),
        contractor_signature: args
            .contractor_signature
            .as_deref()
            .map(load_image)
            .transpose()?,
        client_signature: args
            .client_signature
            .as_deref()
            .map(load_image)
            .transpose()?,
        photos: args.photos.iter().map(|p| ImagePayload::load(p)).collect(),
    })
}
