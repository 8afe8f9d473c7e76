pub mod attendance;
pub mod certificate_verification;
pub mod course;
pub mod identifiable;
pub mod master_participant;
pub mod report_verification;

// Re-exports
pub use attendance::*;
pub use certificate_verification::*;
pub use course::*;
pub use identifiable::*;
pub use master_participant::*;
pub use report_verification::*;
