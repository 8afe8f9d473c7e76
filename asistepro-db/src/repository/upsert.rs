use async_trait::async_trait;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::store_error::StoreError;

/// Entities that carry a natural key besides their ID.
pub trait HasConflictKey {
    /// Column the store matches on when deciding between insert and update.
    const CONFLICT_COLUMN: &'static str;

    fn conflict_key(&self) -> &str;

    /// Rebinds the entity to the ID of the stored row it collided with.
    fn set_id(&mut self, id: Uuid);
}

/// Insert-or-update on the entity's conflict key.
///
/// When a row with the same conflict key exists, its mutable columns are overwritten
/// and its original ID is kept; the stored row is returned either way.
#[async_trait]
pub trait Upsert<T: Identifiable + HasConflictKey>: Send + Sync {
    async fn upsert(&self, item: T) -> Result<T, StoreError>;
}
