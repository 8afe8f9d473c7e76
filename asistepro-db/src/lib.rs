pub mod models;
pub mod repository;
pub mod store_error;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory_store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use models::*;
pub use repository::*;
pub use store_error::*;

#[cfg(any(test, feature = "test-utils"))]
pub use memory_store::MemoryStore;
