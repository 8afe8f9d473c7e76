pub mod attendance_repository;
pub mod certificate_verification_repository;
pub mod course_repository;
pub mod db_init;
pub mod master_participant_repository;
pub mod report_verification_repository;

pub use attendance_repository::AttendanceRepositoryImpl;
pub use certificate_verification_repository::CertificateVerificationRepositoryImpl;
pub use course_repository::CourseRepositoryImpl;
pub use master_participant_repository::MasterParticipantRepositoryImpl;
pub use report_verification_repository::ReportVerificationRepositoryImpl;
