//! Paginated PDF composition for insurance-restoration paperwork:
//! certificates of completion, labor agreements, receipts and loss
//! assessment reports.
//!
//! A form snapshot becomes a list of [`Block`]s, the [`Composer`] places
//! them onto fixed-size pages as [`DrawCommand`]s, and a [`DrawBackend`]
//! replays those commands into a PDF.

pub mod compose;
pub mod documents;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod model;
pub mod pdf;
pub mod raster;
pub mod records;

pub use compose::{Composer, Style};
pub use documents::{
    generate, save, AgreementForm, Assets, CertificateForm, DocumentForm, DocumentKind,
    Generated, LossAssessmentForm, ReceiptForm, SaveOutcome, SizeWarning,
    DEFAULT_SOFT_LIMIT_BYTES,
};
pub use error::DocError;
pub use layout::PageGeometry;
pub use metrics::{HelveticaMetrics, TextMeasure};
pub use model::{Align, Block, DrawCommand, ImageRef, TableColumn, Weight};
pub use pdf::{render, DrawBackend, PdfBackend};
pub use raster::{ImagePayload, RasterImage};
pub use records::{ClaimRecord, ClaimStore, CompanyRecord, JsonStore};
