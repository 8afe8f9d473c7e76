pub mod find_by_rut_prefix;
pub mod repo_impl;
pub mod upsert;

pub use repo_impl::MasterParticipantRepositoryImpl;
