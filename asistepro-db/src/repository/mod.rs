pub mod attendance_queries;
pub mod course_queries;
pub mod create_batch;
pub mod load;
pub mod load_batch;
pub mod master_participant_queries;
pub mod stores;
pub mod table;
pub mod update_batch;
pub mod upsert;

// Re-exports
pub use attendance_queries::*;
pub use course_queries::*;
pub use create_batch::*;
pub use load::*;
pub use load_batch::*;
pub use master_participant_queries::*;
pub use stores::*;
pub use table::*;
pub use update_batch::*;
pub use upsert::*;
