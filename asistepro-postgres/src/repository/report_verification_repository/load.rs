use async_trait::async_trait;
use asistepro_db::models::report_verification::ReportVerificationModel;
use asistepro_db::repository::load::Load;
use asistepro_db::{StoreError, Table};
use uuid::Uuid;

use super::repo_impl::ReportVerificationRepositoryImpl;
use crate::utils::{decode_row, map_sqlx_error};

impl ReportVerificationRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &ReportVerificationRepositoryImpl,
        id: Uuid,
    ) -> Result<ReportVerificationModel, StoreError> {
        let row = sqlx::query(r#"SELECT * FROM reporte_verificaciones WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&*repo.pool)
            .await
            .map_err(|e| map_sqlx_error(Table::ReportVerifications, e))?
            .ok_or_else(|| StoreError::not_found(Table::ReportVerifications, format!("id={id}")))?;
        decode_row(Table::ReportVerifications, &row)
    }
}

#[async_trait]
impl Load<ReportVerificationModel> for ReportVerificationRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<ReportVerificationModel, StoreError> {
        Self::load_impl(self, id).await
    }
}
