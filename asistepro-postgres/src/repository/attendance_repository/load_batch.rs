use async_trait::async_trait;
use asistepro_db::models::attendance::AttendanceModel;
use asistepro_db::repository::load_batch::LoadBatch;
use asistepro_db::{StoreError, Table};
use std::collections::HashMap;
use uuid::Uuid;

use super::repo_impl::AttendanceRepositoryImpl;
use crate::utils::{decode_rows, map_sqlx_error};

impl AttendanceRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &AttendanceRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<AttendanceModel>>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(r#"SELECT * FROM asistencias WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await
            .map_err(|e| map_sqlx_error(Table::Attendance, e))?;

        let mut item_map: HashMap<Uuid, AttendanceModel> = decode_rows(Table::Attendance, &rows)?
            .into_iter()
            .map(|item: AttendanceModel| (item.id, item))
            .collect();

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<AttendanceModel> for AttendanceRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<AttendanceModel>>, StoreError> {
        Self::load_batch_impl(self, ids).await
    }
}
