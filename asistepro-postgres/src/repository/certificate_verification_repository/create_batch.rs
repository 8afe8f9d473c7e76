use async_trait::async_trait;
use asistepro_db::models::certificate_verification::CertificateVerificationModel;
use asistepro_db::repository::create_batch::CreateBatch;
use asistepro_db::{StoreError, Table};
use tracing::debug;

use super::repo_impl::CertificateVerificationRepositoryImpl;
use crate::utils::map_sqlx_error;

impl CertificateVerificationRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CertificateVerificationRepositoryImpl,
        items: Vec<CertificateVerificationModel>,
    ) -> Result<Vec<CertificateVerificationModel>, StoreError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(Table::CertificateVerifications, e))?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO constancia_verificaciones (
                    id, curso_id, asistencia_id, nombre_participante, rut_participante, nombre_curso, fecha_generacion
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id)
            .bind(item.course_id)
            .bind(item.attendance_id)
            .bind(item.participant_name.as_str())
            .bind(item.participant_rut.as_str())
            .bind(item.course_name.as_str())
            .bind(item.generated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(Table::CertificateVerifications, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(Table::CertificateVerifications, e))?;
        debug!(count = items.len(), "certificate verifications created");

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<CertificateVerificationModel> for CertificateVerificationRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CertificateVerificationModel>,
    ) -> Result<Vec<CertificateVerificationModel>, StoreError> {
        Self::create_batch_impl(self, items).await
    }
}
