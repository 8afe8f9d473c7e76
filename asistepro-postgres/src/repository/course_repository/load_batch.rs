use async_trait::async_trait;
use asistepro_db::models::course::CourseModel;
use asistepro_db::repository::load_batch::LoadBatch;
use asistepro_db::{StoreError, Table};
use std::collections::HashMap;
use uuid::Uuid;

use super::repo_impl::CourseRepositoryImpl;
use crate::utils::{decode_rows, map_sqlx_error};

impl CourseRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &CourseRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CourseModel>>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(r#"SELECT * FROM cursos WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;

        let mut item_map: HashMap<Uuid, CourseModel> = decode_rows(Table::Courses, &rows)?
            .into_iter()
            .map(|item: CourseModel| (item.id, item))
            .collect();

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<CourseModel> for CourseRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<CourseModel>>, StoreError> {
        Self::load_batch_impl(self, ids).await
    }
}
