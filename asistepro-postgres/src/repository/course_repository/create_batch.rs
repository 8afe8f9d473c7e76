use async_trait::async_trait;
use asistepro_db::models::course::CourseModel;
use asistepro_db::repository::create_batch::CreateBatch;
use asistepro_db::{StoreError, Table};
use tracing::debug;

use super::repo_impl::CourseRepositoryImpl;
use crate::utils::map_sqlx_error;

impl CourseRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CourseRepositoryImpl,
        items: Vec<CourseModel>,
    ) -> Result<Vec<CourseModel>, StoreError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO cursos (id, name, location, provider, date, time, person_in_charge, duration, is_visible, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.location.as_str())
            .bind(item.provider.as_str())
            .bind(item.date)
            .bind(item.time)
            .bind(item.person_in_charge.as_ref().map(|s| s.as_str()))
            .bind(item.duration_minutes)
            .bind(item.is_visible)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;
        debug!(count = items.len(), "courses created");

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<CourseModel> for CourseRepositoryImpl {
    async fn create_batch(&self, items: Vec<CourseModel>) -> Result<Vec<CourseModel>, StoreError> {
        Self::create_batch_impl(self, items).await
    }
}
