use async_trait::async_trait;
use asistepro_db::models::attendance::AttendanceModel;
use asistepro_db::repository::attendance_queries::AttendanceQueries;
use asistepro_db::{StoreError, Table};
use uuid::Uuid;

use super::repo_impl::AttendanceRepositoryImpl;
use crate::utils::{decode_row, decode_rows, map_sqlx_error};

impl AttendanceRepositoryImpl {
    pub(super) async fn find_by_course_id_impl(
        repo: &AttendanceRepositoryImpl,
        course_id: Uuid,
    ) -> Result<Vec<AttendanceModel>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT * FROM asistencias WHERE curso_id = $1 ORDER BY created_at ASC"#,
        )
        .bind(course_id)
        .fetch_all(&*repo.pool)
        .await
        .map_err(|e| map_sqlx_error(Table::Attendance, e))?;
        decode_rows(Table::Attendance, &rows)
    }

    pub(super) async fn find_by_course_id_and_rut_impl(
        repo: &AttendanceRepositoryImpl,
        course_id: Uuid,
        rut: &str,
    ) -> Result<Option<AttendanceModel>, StoreError> {
        let row = sqlx::query(
            r#"SELECT * FROM asistencias WHERE curso_id = $1 AND rut = $2 LIMIT 1"#,
        )
        .bind(course_id)
        .bind(rut)
        .fetch_optional(&*repo.pool)
        .await
        .map_err(|e| map_sqlx_error(Table::Attendance, e))?;
        row.map(|row| decode_row(Table::Attendance, &row)).transpose()
    }
}

#[async_trait]
impl AttendanceQueries for AttendanceRepositoryImpl {
    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<AttendanceModel>, StoreError> {
        Self::find_by_course_id_impl(self, course_id).await
    }

    async fn find_by_course_id_and_rut(
        &self,
        course_id: Uuid,
        rut: &str,
    ) -> Result<Option<AttendanceModel>, StoreError> {
        Self::find_by_course_id_and_rut_impl(self, course_id, rut).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use asistepro_db::repository::attendance_queries::AttendanceQueries;
    use asistepro_db::repository::create_batch::CreateBatch;
    use asistepro_db::test_utils::{create_test_attendance, create_test_course};

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_find_by_course_id_orders_by_registration() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let course_repo = &ctx.repos().course_repository;
        let attendance_repo = &ctx.repos().attendance_repository;

        let course = create_test_course("Taller X");
        let other = create_test_course("Taller Y");
        course_repo.create_batch(vec![course.clone(), other.clone()]).await?;

        let late = create_test_attendance(course.id, "Luis", "Soto", "11111111-1", 60);
        let early = create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0);
        let elsewhere = create_test_attendance(other.id, "Eva", "Díaz", "12345678-5", 0);
        attendance_repo.create_batch(vec![late.clone(), early.clone(), elsewhere]).await?;

        let rows = attendance_repo.find_by_course_id(course.id).await?;
        let ids: Vec<_> = rows.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_duplicate_lookup_is_scoped_to_course() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let course_repo = &ctx.repos().course_repository;
        let attendance_repo = &ctx.repos().attendance_repository;

        let course = create_test_course("Taller X");
        let other = create_test_course("Taller Y");
        course_repo.create_batch(vec![course.clone(), other.clone()]).await?;
        let registered = create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0);
        attendance_repo.create_batch(vec![registered.clone()]).await?;

        let found = attendance_repo.find_by_course_id_and_rut(course.id, "12345678-5").await?;
        assert_eq!(found.map(|a| a.id), Some(registered.id));
        assert!(attendance_repo.find_by_course_id_and_rut(other.id, "12345678-5").await?.is_none());

        Ok(())
    }
}
