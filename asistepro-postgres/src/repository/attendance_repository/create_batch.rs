use async_trait::async_trait;
use asistepro_db::models::attendance::AttendanceModel;
use asistepro_db::repository::create_batch::CreateBatch;
use asistepro_db::{StoreError, Table};
use tracing::debug;

use super::repo_impl::AttendanceRepositoryImpl;
use crate::utils::map_sqlx_error;

impl AttendanceRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &AttendanceRepositoryImpl,
        items: Vec<AttendanceModel>,
    ) -> Result<Vec<AttendanceModel>, StoreError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(Table::Attendance, e))?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO asistencias (
                    id, curso_id, nombres, apellido_paterno, apellido_materno, rut, email, telefono,
                    rol, facultad, departamento, carrera, tipo_contrato, semestre_docencia, sede, firma, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                "#,
            )
            .bind(item.id)
            .bind(item.course_id)
            .bind(item.first_names.as_str())
            .bind(item.paternal_last_name.as_str())
            .bind(item.maternal_last_name.as_str())
            .bind(item.rut.as_str())
            .bind(item.email.as_str())
            .bind(item.phone.as_str())
            .bind(item.role.as_str())
            .bind(item.faculty.as_str())
            .bind(item.department.as_str())
            .bind(item.major.as_str())
            .bind(item.contract_type.as_str())
            .bind(item.teaching_semester.as_str())
            .bind(item.campus.to_string())
            .bind(item.signature.as_str())
            .bind(item.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(Table::Attendance, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(Table::Attendance, e))?;
        debug!(count = items.len(), "attendance rows created");

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<AttendanceModel> for AttendanceRepositoryImpl {
    async fn create_batch(&self, items: Vec<AttendanceModel>) -> Result<Vec<AttendanceModel>, StoreError> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use asistepro_db::repository::create_batch::CreateBatch;
    use asistepro_db::repository::load::Load;
    use asistepro_db::test_utils::{create_test_attendance, create_test_course};

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let course_repo = &ctx.repos().course_repository;
        let attendance_repo = &ctx.repos().attendance_repository;

        // Attendance rows reference a course
        let course = create_test_course("Taller X");
        course_repo.create_batch(vec![course.clone()]).await?;

        let attendance = create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0);
        let saved = attendance_repo.create_batch(vec![attendance.clone()]).await?;
        assert_eq!(saved.len(), 1);

        let loaded = attendance_repo.load(attendance.id).await?;
        assert_eq!(loaded, attendance);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_create_batch_unknown_course_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let attendance_repo = &ctx.repos().attendance_repository;

        let orphan = create_test_attendance(uuid::Uuid::new_v4(), "Ana", "Pérez", "12345678-5", 0);
        let err = attendance_repo.create_batch(vec![orphan]).await.unwrap_err();
        assert!(matches!(err, asistepro_db::StoreError::Rejected { .. }));

        Ok(())
    }
}
