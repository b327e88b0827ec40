//! The four generated documents and the pipeline that turns a form snapshot
//! into a saved PDF.

mod agreement;
mod certificate;
mod loss_assessment;
mod receipt;

pub use agreement::AgreementForm;
pub use certificate::CertificateForm;
pub use loss_assessment::{LossAssessmentForm, MAX_PHOTOS};
pub use receipt::{ReceiptForm, ReceiptItem};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::compose::{Composer, Style};
use crate::error::DocError;
use crate::layout::PageGeometry;
use crate::model::{Align, Block, DrawCommand, ImageRef};
use crate::pdf::{self, PdfBackend};
use crate::raster::{ImagePayload, RasterImage};

/// Soft limit above which a saved artifact is flagged (24 MiB).
pub const DEFAULT_SOFT_LIMIT_BYTES: u64 = 24 * 1024 * 1024;

/// Logo size shared by every letterhead.
const LOGO_WIDTH: f32 = 150.0;
const LOGO_HEIGHT: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Certificate,
    Agreement,
    Receipt,
    LossAssessment,
}

impl DocumentKind {
    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Certificate => "Certificate of Completion",
            DocumentKind::Agreement => "Construction Labor Agreement",
            DocumentKind::Receipt => "Receipt",
            DocumentKind::LossAssessment => "Loss Assessment Report",
        }
    }

    pub fn file_prefix(self) -> &'static str {
        match self {
            DocumentKind::Certificate => "Certificate_of_Completion",
            DocumentKind::Agreement => "Construction_Agreement",
            DocumentKind::Receipt => "Receipt",
            DocumentKind::LossAssessment => "Loss_Assessment",
        }
    }
}

/// Images gathered before generation. Callers own the photo list and pass
/// it in; nothing here outlives one generation call.
#[derive(Debug, Default)]
pub struct Assets {
    pub logo: Option<ImagePayload>,
    pub contractor_signature: Option<RasterImage>,
    pub client_signature: Option<RasterImage>,
    pub photos: Vec<ImagePayload>,
}

impl Assets {
    pub(crate) fn photo_refs(&self) -> Vec<ImageRef<'_>> {
        self.photos.iter().map(ImageRef::new).collect()
    }

    /// Centered letterhead logo followed by a small gap, or nothing.
    pub(crate) fn letterhead(&self) -> Vec<Block<'_>> {
        match &self.logo {
            Some(logo) => vec![
                Block::Image {
                    image: ImageRef::new(logo),
                    width: LOGO_WIDTH,
                    height: LOGO_HEIGHT,
                    align: Align::Center,
                },
                Block::Spacer(10.0),
            ],
            None => Vec::new(),
        }
    }
}

/// An immutable form snapshot that knows how to lay itself out.
pub trait DocumentForm {
    const KIND: DocumentKind;

    /// The reference the file is named after. Missing means the document
    /// cannot be generated at all.
    fn identifier(&self) -> Result<&str, DocError>;

    /// Checked before any layout work; `identifier` is checked first.
    fn validate(&self, _assets: &Assets) -> Result<(), DocError> {
        Ok(())
    }

    fn blocks<'a>(&'a self, assets: &'a Assets) -> Vec<Block<'a>>;

    fn style(&self) -> Style {
        Style::default()
    }
}

pub(crate) fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, DocError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DocError::MissingField(field));
    }
    Ok(trimmed)
}

/// A rendered document that has not been written anywhere yet.
#[derive(Debug)]
pub struct Generated {
    pub kind: DocumentKind,
    pub identifier: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Compose the form's blocks without rendering them. The composer's style
/// is used as given.
pub fn compose<'a, D: DocumentForm>(
    form: &'a D,
    assets: &'a Assets,
    composer: &Composer<'_>,
) -> Result<Vec<DrawCommand<'a>>, DocError> {
    form.identifier()?;
    form.validate(assets)?;
    composer.run(&form.blocks(assets))
}

/// Validate, compose and render `form` into PDF bytes.
pub fn generate<D: DocumentForm>(
    form: &D,
    assets: &Assets,
    geometry: PageGeometry,
) -> Result<Generated, DocError> {
    let t0 = Instant::now();

    let identifier = form.identifier()?.to_string();
    form.validate(assets)?;

    let backend = PdfBackend::new(D::KIND.title(), geometry)?;
    let blocks = form.blocks(assets);
    let commands = Composer::new(geometry, &backend)
        .with_style(form.style())
        .run(&blocks)?;
    let t_compose = t0.elapsed();

    let pages = 1 + commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::PageBreak))
        .count();
    let bytes = pdf::render(backend, &commands)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: compose={:.1}ms, render={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_compose.as_secs_f64() * 1000.0,
        (t_total - t_compose).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        pages,
        bytes.len(),
    );

    Ok(Generated {
        kind: D::KIND,
        identifier,
        bytes,
        pages,
    })
}

/// `{DocumentKind}_{Identifier}_{timestamp}.pdf`, timestamp in Unix millis.
pub fn file_name(kind: DocumentKind, identifier: &str, at: DateTime<Local>) -> String {
    let sanitized: String = identifier
        .trim()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let sanitized = if sanitized.is_empty() {
        "Document".to_string()
    } else {
        sanitized
    };
    format!("{}_{}_{}.pdf", kind.file_prefix(), sanitized, at.timestamp_millis())
}

/// Raised when a saved artifact is larger than the soft limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeWarning {
    pub size: u64,
    pub limit: u64,
}

impl fmt::Display for SizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PDF is {:.1} MB, larger than the {:.1} MB limit",
            self.size as f64 / (1024.0 * 1024.0),
            self.limit as f64 / (1024.0 * 1024.0)
        )
    }
}

/// Soft limit in bytes for a size given in MiB. Saturates, so a huge limit
/// means "never warn".
pub fn soft_limit_from_mib(mib: u64) -> u64 {
    mib.saturating_mul(1024 * 1024)
}

/// Check an artifact size against the soft limit.
pub fn check_size(size: u64, limit: u64) -> Option<SizeWarning> {
    (size > limit).then_some(SizeWarning { size, limit })
}

#[derive(Debug)]
pub struct SaveOutcome {
    pub path: PathBuf,
    pub size: u64,
    pub warning: Option<SizeWarning>,
}

/// Write the artifact into `dir`. Oversized output is still written; the
/// warning is logged once and returned.
pub fn save(
    generated: &Generated,
    dir: &Path,
    soft_limit: u64,
    at: DateTime<Local>,
) -> Result<SaveOutcome, DocError> {
    let path = dir.join(file_name(generated.kind, &generated.identifier, at));
    let size = generated.bytes.len() as u64;
    let warning = check_size(size, soft_limit);
    if let Some(w) = &warning {
        log::warn!("{}: {}", path.display(), w);
    }

    std::fs::write(&path, &generated.bytes)?;
    Ok(SaveOutcome {
        path,
        size,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.timestamp_millis_opt(1_760_000_000_123).unwrap()
    }

    #[test]
    fn file_names_follow_kind_identifier_timestamp() {
        assert_eq!(
            file_name(DocumentKind::LossAssessment, "CLM-1001", at()),
            "Loss_Assessment_CLM-1001_1760000000123.pdf"
        );
        assert_eq!(
            file_name(DocumentKind::Certificate, " job 7/b ", at()),
            "Certificate_of_Completion_job-7b_1760000000123.pdf"
        );
        assert_eq!(
            file_name(DocumentKind::Receipt, "///", at()),
            "Receipt_Document_1760000000123.pdf"
        );
    }

    #[test]
    fn size_warning_only_above_limit() {
        assert_eq!(check_size(10, 10), None);
        assert_eq!(check_size(11, 10), Some(SizeWarning { size: 11, limit: 10 }));
        assert_eq!(
            check_size(25 * 1024 * 1024, DEFAULT_SOFT_LIMIT_BYTES).map(|w| w.to_string()),
            Some("PDF is 25.0 MB, larger than the 24.0 MB limit".to_string())
        );
    }

    #[test]
    fn soft_limit_in_mib_saturates() {
        assert_eq!(soft_limit_from_mib(24), DEFAULT_SOFT_LIMIT_BYTES);
        assert_eq!(soft_limit_from_mib(u64::MAX), u64::MAX);
        assert_eq!(check_size(u64::MAX, soft_limit_from_mib(u64::MAX)), None);
    }

    #[test]
    fn oversized_artifact_is_still_saved_with_one_warning() {
        let dir = std::env::temp_dir().join(format!("restoration-docs-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let generated = Generated {
            kind: DocumentKind::Receipt,
            identifier: "RCT-1".to_string(),
            bytes: vec![b'x'; 2048],
            pages: 1,
        };

        let outcome = save(&generated, &dir, 1024, at()).unwrap();
        assert_eq!(outcome.warning, Some(SizeWarning { size: 2048, limit: 1024 }));
        assert_eq!(std::fs::read(&outcome.path).unwrap().len(), 2048);

        let outcome = save(&generated, &dir, 4096, at()).unwrap();
        assert!(outcome.warning.is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn require_rejects_blank() {
        assert!(matches!(require("  ", "claim number"), Err(DocError::MissingField("claim number"))));
        assert_eq!(require(" CLM-1 ", "claim number").unwrap(), "CLM-1");
    }
}
