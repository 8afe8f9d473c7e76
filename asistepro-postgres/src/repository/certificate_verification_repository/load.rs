use async_trait::async_trait;
use asistepro_db::models::certificate_verification::CertificateVerificationModel;
use asistepro_db::repository::load::Load;
use asistepro_db::{StoreError, Table};
use uuid::Uuid;

use super::repo_impl::CertificateVerificationRepositoryImpl;
use crate::utils::{decode_row, map_sqlx_error};

impl CertificateVerificationRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &CertificateVerificationRepositoryImpl,
        id: Uuid,
    ) -> Result<CertificateVerificationModel, StoreError> {
        let row = sqlx::query(r#"SELECT * FROM constancia_verificaciones WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&*repo.pool)
            .await
            .map_err(|e| map_sqlx_error(Table::CertificateVerifications, e))?
            .ok_or_else(|| {
                StoreError::not_found(Table::CertificateVerifications, format!("id={id}"))
            })?;
        decode_row(Table::CertificateVerifications, &row)
    }
}

#[async_trait]
impl Load<CertificateVerificationModel> for CertificateVerificationRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<CertificateVerificationModel, StoreError> {
        Self::load_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use asistepro_db::models::certificate_verification::CertificateVerificationModel;
    use asistepro_db::repository::create_batch::CreateBatch;
    use asistepro_db::repository::load::Load;
    use asistepro_db::utils::store_timestamp;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_snapshot_without_course_round_trip() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let certificate_repo = &ctx.repos().certificate_verification_repository;

        let snapshot = CertificateVerificationModel {
            id: Uuid::new_v4(),
            course_id: None,
            attendance_id: None,
            participant_name: HeaplessString::try_from("Ana Pérez").unwrap(),
            participant_rut: HeaplessString::try_from("12345678-5").unwrap(),
            course_name: HeaplessString::try_from("Taller X").unwrap(),
            generated_at: store_timestamp(),
        };
        certificate_repo.create_batch(vec![snapshot.clone()]).await?;

        assert_eq!(certificate_repo.load(snapshot.id).await?, snapshot);
        assert!(certificate_repo.load(Uuid::new_v4()).await.unwrap_err().is_not_found());

        Ok(())
    }
}
