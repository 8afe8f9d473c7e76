use async_trait::async_trait;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::store_error::StoreError;

/// Generic repository trait for loading a single entity by its ID
///
/// This is the single-row fetch of the store: a missing row is reported as
/// `StoreError::NotFound` so callers can tell it apart from every other failure.
///
/// # Type Parameters
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl Load<CertificateVerificationModel> for CertificateVerificationRepositoryImpl {
///     async fn load(&self, id: Uuid) -> Result<CertificateVerificationModel, StoreError> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Load<T: Identifiable>: Send + Sync {
    /// Load an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the entity to load
    ///
    /// # Returns
    /// * `Ok(T)` - The loaded entity
    /// * `Err(StoreError::NotFound)` - No row carries this identifier
    /// * `Err` - Any other store failure
    async fn load(&self, id: Uuid) -> Result<T, StoreError>;
}
