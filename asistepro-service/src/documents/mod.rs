pub mod certificate;
pub mod generator;
pub mod presenter;
pub mod report;

pub use certificate::CertificateTemplate;
pub use generator::{DocumentError, DocumentGenerator, GeneratedDocument};
pub use presenter::{DirectoryPresenter, DocumentPresenter, PresentationError};
pub use report::ReportTemplate;

/// A finished standalone HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub title: String,
    pub html: String,
}

pub const CERTIFICATE_QR_SIZE: u32 = 90;
pub const REPORT_QR_SIZE: u32 = 120;
