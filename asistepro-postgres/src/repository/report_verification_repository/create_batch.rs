use async_trait::async_trait;
use asistepro_db::models::report_verification::ReportVerificationModel;
use asistepro_db::repository::create_batch::CreateBatch;
use asistepro_db::{StoreError, Table};
use tracing::debug;

use super::repo_impl::ReportVerificationRepositoryImpl;
use crate::utils::map_sqlx_error;

impl ReportVerificationRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ReportVerificationRepositoryImpl,
        items: Vec<ReportVerificationModel>,
    ) -> Result<Vec<ReportVerificationModel>, StoreError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(Table::ReportVerifications, e))?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO reporte_verificaciones (
                    id, curso_id, nombre_curso, lugar_curso, ofertante_curso, encargado_curso,
                    participantes_registrados, fecha_generacion_reporte
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.course_id)
            .bind(item.course_name.as_str())
            .bind(item.course_location.as_ref().map(|s| s.as_str()))
            .bind(item.course_provider.as_ref().map(|s| s.as_str()))
            .bind(item.person_in_charge.as_ref().map(|s| s.as_str()))
            .bind(item.participant_count)
            .bind(item.generated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(Table::ReportVerifications, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(Table::ReportVerifications, e))?;
        debug!(count = items.len(), "report verifications created");

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<ReportVerificationModel> for ReportVerificationRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ReportVerificationModel>,
    ) -> Result<Vec<ReportVerificationModel>, StoreError> {
        Self::create_batch_impl(self, items).await
    }
}
