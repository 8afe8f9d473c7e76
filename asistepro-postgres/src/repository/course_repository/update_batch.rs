use async_trait::async_trait;
use asistepro_db::models::course::CourseModel;
use asistepro_db::repository::update_batch::UpdateBatch;
use asistepro_db::{StoreError, Table};
use tracing::debug;

use super::repo_impl::CourseRepositoryImpl;
use crate::utils::map_sqlx_error;

impl CourseRepositoryImpl {
    pub(super) async fn update_batch_impl(
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
            let result = sqlx::query(
                r#"
                UPDATE cursos
                SET name = $2, location = $3, provider = $4, date = $5, time = $6,
                    person_in_charge = $7, duration = $8, is_visible = $9
                WHERE id = $1
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
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found(Table::Courses, format!("id={}", item.id)));
            }
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;
        debug!(count = items.len(), "courses updated");

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<CourseModel> for CourseRepositoryImpl {
    async fn update_batch(&self, items: Vec<CourseModel>) -> Result<Vec<CourseModel>, StoreError> {
        Self::update_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use asistepro_db::repository::create_batch::CreateBatch;
    use asistepro_db::repository::load::Load;
    use asistepro_db::repository::update_batch::UpdateBatch;
    use asistepro_db::test_utils::create_test_course;
    use heapless::String as HeaplessString;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_update_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let course_repo = &ctx.repos().course_repository;

        let mut course = create_test_course("Antes");
        course_repo.create_batch(vec![course.clone()]).await?;

        course.name = HeaplessString::try_from("Después").unwrap();
        course.duration_minutes = None;
        course_repo.update_batch(vec![course.clone()]).await?;

        let loaded = course_repo.load(course.id).await?;
        assert_eq!(loaded.name.as_str(), "Después");
        assert_eq!(loaded.duration_minutes, None);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_update_batch_unknown_id_rolls_back() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let course_repo = &ctx.repos().course_repository;

        let mut stored = create_test_course("Guardado");
        course_repo.create_batch(vec![stored.clone()]).await?;
        stored.is_visible = false;
        let phantom = create_test_course("Fantasma");

        let err = course_repo.update_batch(vec![stored.clone(), phantom]).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(course_repo.load(stored.id).await?.is_visible);

        Ok(())
    }
}
