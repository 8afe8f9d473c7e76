use async_trait::async_trait;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::store_error::StoreError;

/// Generic repository trait for loading multiple entities by their IDs
///
/// The result has one slot per requested ID, in request order; missing rows are `None`.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait LoadBatch<T: Identifiable>: Send + Sync {
    /// Load multiple entities by their IDs
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs to load
    ///
    /// # Returns
    /// * `Ok(Vec<Option<T>>)` - One entry per requested ID
    /// * `Err` - An error if the query could not be executed
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<T>>, StoreError>;
}
