use async_trait::async_trait;

use crate::models::identifiable::Identifiable;
use crate::store_error::StoreError;

/// Generic repository trait for updating multiple entities in a batch
///
/// All updates are performed within a single transaction. Updating an ID that
/// does not exist fails the whole batch with `StoreError::NotFound`.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait UpdateBatch<T: Identifiable>: Send + Sync {
    /// Update multiple items in a single transaction
    ///
    /// # Arguments
    /// * `items` - A vector of entities to update
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The updated entities
    /// * `Err` - An error if the transaction could not be executed
    async fn update_batch(&self, items: Vec<T>) -> Result<Vec<T>, StoreError>;
}
