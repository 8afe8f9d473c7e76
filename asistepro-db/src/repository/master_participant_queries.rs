use async_trait::async_trait;

use crate::models::master_participant::MasterParticipantModel;
use crate::store_error::StoreError;

#[async_trait]
pub trait MasterParticipantQueries: Send + Sync {
    /// Directory entries whose RUT starts with `prefix`, ordered by RUT, at most `limit` rows.
    async fn find_by_rut_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<MasterParticipantModel>, StoreError>;
}
