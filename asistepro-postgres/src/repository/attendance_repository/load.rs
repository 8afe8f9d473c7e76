use async_trait::async_trait;
use asistepro_db::models::attendance::AttendanceModel;
use asistepro_db::repository::load::Load;
use asistepro_db::{StoreError, Table};
use uuid::Uuid;

use super::repo_impl::AttendanceRepositoryImpl;
use crate::utils::{decode_row, map_sqlx_error};

impl AttendanceRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &AttendanceRepositoryImpl,
        id: Uuid,
    ) -> Result<AttendanceModel, StoreError> {
        let row = sqlx::query(r#"SELECT * FROM asistencias WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&*repo.pool)
            .await
            .map_err(|e| map_sqlx_error(Table::Attendance, e))?
            .ok_or_else(|| StoreError::not_found(Table::Attendance, format!("id={id}")))?;
        decode_row(Table::Attendance, &row)
    }
}

#[async_trait]
impl Load<AttendanceModel> for AttendanceRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<AttendanceModel, StoreError> {
        Self::load_impl(self, id).await
    }
}
