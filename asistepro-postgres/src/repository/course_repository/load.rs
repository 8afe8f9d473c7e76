use async_trait::async_trait;
use asistepro_db::models::course::CourseModel;
use asistepro_db::repository::load::Load;
use asistepro_db::{StoreError, Table};
use uuid::Uuid;

use super::repo_impl::CourseRepositoryImpl;
use crate::utils::{decode_row, map_sqlx_error};

impl CourseRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &CourseRepositoryImpl,
        id: Uuid,
    ) -> Result<CourseModel, StoreError> {
        let row = sqlx::query(r#"SELECT * FROM cursos WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&*repo.pool)
            .await
            .map_err(|e| map_sqlx_error(Table::Courses, e))?
            .ok_or_else(|| StoreError::not_found(Table::Courses, format!("id={id}")))?;
        decode_row(Table::Courses, &row)
    }
}

#[async_trait]
impl Load<CourseModel> for CourseRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<CourseModel, StoreError> {
        Self::load_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use asistepro_db::repository::load::Load;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_load_missing_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let course_repo = &ctx.repos().course_repository;

        let err = course_repo.load(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());

        Ok(())
    }
}
