pub mod create_batch;
pub mod find_by_course_id;
pub mod load;
pub mod load_batch;
pub mod repo_impl;

pub use repo_impl::AttendanceRepositoryImpl;
