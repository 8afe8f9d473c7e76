use async_trait::async_trait;

use crate::models::identifiable::Identifiable;
use crate::store_error::StoreError;

/// Generic repository trait for creating multiple entities in a batch
///
/// All creates are performed within a single transaction for atomicity.
/// Returns saved items with any generated fields populated.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl CreateBatch<AttendanceModel> for AttendanceRepositoryImpl {
///     async fn create_batch(&self, items: Vec<AttendanceModel>) -> Result<Vec<AttendanceModel>, StoreError> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<T: Identifiable>: Send + Sync {
    /// Save multiple items in a single transaction
    ///
    /// # Arguments
    /// * `items` - A vector of entities to create
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The created entities as stored
    /// * `Err` - An error if the transaction could not be executed
    async fn create_batch(&self, items: Vec<T>) -> Result<Vec<T>, StoreError>;
}
