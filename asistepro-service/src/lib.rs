pub mod app;
pub mod config;
pub mod courses;
pub mod documents;
pub mod export;
pub mod registration;
pub mod search;
pub mod verification;

pub use app::{AppContext, AppView};
pub use config::{AppConfig, ConfigError};
pub use courses::{CourseAdmin, NewCourse, VisibilityChanges};
pub use documents::{DirectoryPresenter, DocumentError, DocumentGenerator, DocumentPresenter};
pub use export::{export_attendance_csv, CsvExport};
pub use registration::{RegistrationError, RegistrationForm, RegistrationService};
pub use search::{DebouncedQuery, QueryState, RutLookup};
pub use verification::{VerificationPage, VerificationState};
