pub mod create_batch;
pub mod load;
pub mod repo_impl;

pub use repo_impl::ReportVerificationRepositoryImpl;
