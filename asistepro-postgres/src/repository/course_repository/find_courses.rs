use async_trait::async_trait;
use asistepro_db::models::course::CourseModel;
use asistepro_db::repository::course_queries::CourseQueries;
use asistepro_db::{StoreError, Table};
use tracing::debug;
use uuid::Uuid;

use super::repo_impl::CourseRepositoryImpl;
use crate::utils::{decode_rows, map_sqlx_error};

impl CourseRepositoryImpl {
    pub(super) async fn find_courses_impl(
        repo: &CourseRepositoryImpl,
        visible_only: bool,
    ) -> Result<Vec<CourseModel>, StoreError> {
        let query = if visible_only {
            r#"SELECT * FROM cursos WHERE is_visible = TRUE ORDER BY date DESC, created_at DESC"#
        } else {
            r#"SELECT * FROM cursos ORDER BY date DESC, created_at DESC"#
        };
        let rows = sqlx::query(query)
            .fetch_all(&*repo.pool)
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;
        decode_rows(Table::Courses, &rows)
    }

    pub(super) async fn set_visibility_batch_impl(
        repo: &CourseRepositoryImpl,
        changes: &[(Uuid, bool)],
    ) -> Result<(), StoreError> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut tx = repo
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;

        for (id, is_visible) in changes {
            let result = sqlx::query(r#"UPDATE cursos SET is_visible = $2 WHERE id = $1"#)
                .bind(id)
                .bind(is_visible)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(Table::Courses, e))?;
            if result.rows_affected() == 0 {
                return Err(StoreError::not_found(Table::Courses, format!("id={id}")));
            }
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?;
        debug!(count = changes.len(), "course visibility saved");
        Ok(())
    }
}

#[async_trait]
impl CourseQueries for CourseRepositoryImpl {
    async fn find_visible(&self) -> Result<Vec<CourseModel>, StoreError> {
        Self::find_courses_impl(self, true).await
    }

    async fn find_all(&self) -> Result<Vec<CourseModel>, StoreError> {
        Self::find_courses_impl(self, false).await
    }

    async fn set_visibility_batch(&self, changes: &[(Uuid, bool)]) -> Result<(), StoreError> {
        Self::set_visibility_batch_impl(self, changes).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use asistepro_db::repository::course_queries::CourseQueries;
    use asistepro_db::repository::create_batch::CreateBatch;
    use asistepro_db::test_utils::create_test_course;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_hidden_course_is_not_listed_as_visible() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let course_repo = &ctx.repos().course_repository;

        let course = create_test_course("Oculto");
        course_repo.create_batch(vec![course.clone()]).await?;
        assert!(course_repo.find_visible().await?.iter().any(|c| c.id == course.id));

        course_repo.set_visibility_batch(&[(course.id, false)]).await?;
        assert!(!course_repo.find_visible().await?.iter().any(|c| c.id == course.id));
        assert!(course_repo.find_all().await?.iter().any(|c| c.id == course.id));

        Ok(())
    }
}
