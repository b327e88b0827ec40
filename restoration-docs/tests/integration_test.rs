use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_restoration-docs"))
}

/// Fresh output directory per test; file names carry a timestamp.
fn setup(name: &str) -> PathBuf {
    let dir = Path::new("tests/output").join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).expect("Failed to create output directory");
    dir
}

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path.to_string_lossy().into_owned()
}

fn write_photo(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    let img = image::RgbImage::from_fn(64, 48, |x, y| image::Rgb([(x * 4) as u8, (y * 5) as u8, 120]));
    img.save(&path).expect("Failed to write photo");
    path.to_string_lossy().into_owned()
}

/// The single PDF written into `dir`.
fn generated_pdf(dir: &Path) -> PathBuf {
    let pdfs: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read output directory")
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().map_or(false, |ext| ext == "pdf"))
        .collect();
    assert_eq!(pdfs.len(), 1, "expected one PDF in {}", dir.display());
    pdfs.into_iter().next().unwrap()
}

fn assert_pdf(output: &Output, dir: &Path, prefix: &str) -> PathBuf {
    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = generated_pdf(dir);
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with(prefix), "unexpected name {}", file_name);

    let bytes = fs::read(&path).expect("Failed to read PDF");
    assert!(bytes.starts_with(b"%PDF"), "not a PDF");
    assert!(bytes.len() > 1000, "PDF file is too small, likely empty or corrupt");
    path
}

const STORE: &str = r#"{
    "companies": [{
        "id": "co-1", "name": "Summit Roofing", "address": "400 Main St",
        "phone": "555-0100", "email": "office@summit.test", "license": "RC-2291"
    }],
    "claims": [{
        "id": "cl-1", "company_id": "co-1", "claim_number": "CLM-1001",
        "homeowner_first_name": "Jordan", "homeowner_last_name": "Price",
        "property_address": "12 Elm St, Dayton OH"
    }]
}"#;

#[test]
fn test_certificate_from_claim() {
    let dir = setup("certificate");
    let store = write_file(&dir, "store.json", STORE);
    let photo = write_photo(&dir, "roof.png");
    let out = dir.to_string_lossy().into_owned();

    let output = cargo_bin()
        .args([
            "certificate",
            "--store", &store,
            "--claim", "cl-1",
            "--photo", &photo,
            "--photo", &photo,
            "--contractor-signature", &photo,
            "-d", "2026-10-15",
            "-o", &out,
        ])
        .output()
        .expect("Failed to execute command");

    let path = assert_pdf(&output, &dir, "Certificate_of_Completion_CLM-1001_");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Generated:"), "{}", stdout);
    assert!(stdout.contains(&path.file_name().unwrap().to_string_lossy().into_owned()));
}

#[test]
fn test_agreement_from_form() {
    let dir = setup("agreement");
    let form = write_file(
        &dir,
        "form.json",
        r#"{"job_reference": "JOB 77", "client_name": "Avery Cole",
            "scope_of_work": "Replace damaged siding on the north wall.",
            "contract_amount": "$12,400.00"}"#,
    );
    let out = dir.to_string_lossy().into_owned();

    let output = cargo_bin()
        .args(["agreement", "-f", &form, "-o", &out])
        .output()
        .expect("Failed to execute command");

    assert_pdf(&output, &dir, "Construction_Agreement_JOB-77_");
}

#[test]
fn test_receipt_items() {
    let dir = setup("receipt");
    let form = write_file(
        &dir,
        "form.json",
        r#"{"receipt_number": "RCT-00AB12CD", "date": "10/15/2026",
            "company_name": "Summit Roofing", "client_name": "Jordan Price",
            "items": [
                {"description": "Shingles", "quantity": 24, "unit_price": 31.5},
                {"description": "Labor", "quantity": 1.5, "unit_price": 400}
            ]}"#,
    );
    let out = dir.to_string_lossy().into_owned();

    let output = cargo_bin()
        .args(["receipt", "--form", &form, "--out-dir", &out])
        .output()
        .expect("Failed to execute command");

    assert_pdf(&output, &dir, "Receipt_RCT-00AB12CD_");
}

#[test]
fn test_receipt_prefill_generates_number() {
    let dir = setup("receipt-prefill");
    let store = write_file(&dir, "store.json", STORE);
    let out = dir.to_string_lossy().into_owned();

    let output = cargo_bin()
        .args(["receipt", "-s", &store, "-c", "cl-1", "-o", &out])
        .output()
        .expect("Failed to execute command");

    assert_pdf(&output, &dir, "Receipt_RCT-");
}

#[test]
fn test_loss_assessment_with_photos() {
    let dir = setup("loss-assessment");
    let store = write_file(&dir, "store.json", STORE);
    let photo = write_photo(&dir, "hail.png");
    let out = dir.to_string_lossy().into_owned();

    let mut args = vec![
        "loss-assessment".to_string(),
        "--store".to_string(),
        store,
        "--claim".to_string(),
        "cl-1".to_string(),
        "-o".to_string(),
        out,
    ];
    for _ in 0..9 {
        args.push("--photo".to_string());
        args.push(photo.clone());
    }
    args.push("--photo".to_string());
    args.push("tests/output/missing-photo.png".to_string());

    let output = cargo_bin()
        .args(&args)
        .output()
        .expect("Failed to execute command");

    assert_pdf(&output, &dir, "Loss_Assessment_CLM-1001_");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages: 3"), "{}", stdout);
}

#[test]
fn test_soft_limit_warning_still_saves() {
    let dir = setup("soft-limit");
    let store = write_file(&dir, "store.json", STORE);
    let out = dir.to_string_lossy().into_owned();

    let output = cargo_bin()
        .args([
            "loss-assessment",
            "--store", &store,
            "--claim", "cl-1",
            "--soft-limit-mb", "0",
            "-o", &out,
        ])
        .output()
        .expect("Failed to execute command");

    assert_pdf(&output, &dir, "Loss_Assessment_CLM-1001_");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Warning:").count(), 1, "{}", stdout);
}

#[test]
fn test_huge_soft_limit_never_warns() {
    let dir = setup("huge-soft-limit");
    let store = write_file(&dir, "store.json", STORE);
    let out = dir.to_string_lossy().into_owned();

    let output = cargo_bin()
        .args([
            "receipt",
            "-s", &store,
            "-c", "cl-1",
            "--soft-limit-mb", "18446744073709551615",
            "-o", &out,
        ])
        .output()
        .expect("Failed to execute command");

    assert_pdf(&output, &dir, "Receipt_RCT-");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Warning:"), "{}", stdout);
}

#[test]
fn test_missing_identifier() {
    let dir = setup("missing-identifier");
    let out = dir.to_string_lossy().into_owned();

    let output = cargo_bin()
        .args(["loss-assessment", "-o", &out])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed without a claim number");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing required field: claim number"), "{}", stderr);
    assert!(fs::read_dir(&dir).unwrap().next().is_none(), "nothing should be written");
}

#[test]
fn test_unknown_claim() {
    let dir = setup("unknown-claim");
    let store = write_file(&dir, "store.json", STORE);

    let output = cargo_bin()
        .args(["certificate", "--store", &store, "--claim", "cl-404", "-o", "tests/output/unknown-claim"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for an unknown claim");
}

#[test]
fn test_invalid_date_format() {
    let output = cargo_bin()
        .args(["certificate", "-d", "not-a-date", "-o", "tests/output/should-not-exist"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for invalid date");
}

#[test]
fn test_invalid_page_geometry() {
    let output = cargo_bin()
        .args([
            "receipt",
            "--margin", "400",
            "-o", "tests/output/should-not-exist",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for an impossible margin");
}
