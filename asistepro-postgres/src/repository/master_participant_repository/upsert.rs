use async_trait::async_trait;
use asistepro_db::models::master_participant::MasterParticipantModel;
use asistepro_db::repository::upsert::Upsert;
use asistepro_db::{StoreError, Table};
use tracing::debug;

use super::repo_impl::MasterParticipantRepositoryImpl;
use crate::utils::{decode_row, map_sqlx_error};

impl MasterParticipantRepositoryImpl {
    pub(super) async fn upsert_impl(
        repo: &MasterParticipantRepositoryImpl,
        item: MasterParticipantModel,
    ) -> Result<MasterParticipantModel, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO participantes_maestro (
                id, rut, nombres, apellido_paterno, apellido_materno, email, telefono, rol, facultad, departamento, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (rut) DO UPDATE SET
                nombres = EXCLUDED.nombres,
                apellido_paterno = EXCLUDED.apellido_paterno,
                apellido_materno = EXCLUDED.apellido_materno,
                email = EXCLUDED.email,
                telefono = EXCLUDED.telefono,
                rol = EXCLUDED.rol,
                facultad = EXCLUDED.facultad,
                departamento = EXCLUDED.departamento,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(item.rut.as_str())
        .bind(item.first_names.as_str())
        .bind(item.paternal_last_name.as_str())
        .bind(item.maternal_last_name.as_str())
        .bind(item.email.as_str())
        .bind(item.phone.as_str())
        .bind(item.role.as_str())
        .bind(item.faculty.as_str())
        .bind(item.department.as_str())
        .bind(item.updated_at)
        .fetch_one(&*repo.pool)
        .await
        .map_err(|e| map_sqlx_error(Table::MasterParticipants, e))?;

        debug!(rut = %item.rut, "master participant upserted");
        decode_row(Table::MasterParticipants, &row)
    }
}

#[async_trait]
impl Upsert<MasterParticipantModel> for MasterParticipantRepositoryImpl {
    async fn upsert(&self, item: MasterParticipantModel) -> Result<MasterParticipantModel, StoreError> {
        Self::upsert_impl(self, item).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{random_rut, setup_test_context};
    use asistepro_db::repository::upsert::Upsert;
    use asistepro_db::test_utils::create_test_master_participant;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_upsert_updates_existing_rut() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let master_repo = &ctx.repos().master_participant_repository;

        let rut = random_rut();
        let first = master_repo.upsert(create_test_master_participant(&rut, "Ana")).await?;
        let second = master_repo
            .upsert(create_test_master_participant(&rut, "Ana María"))
            .await?;

        assert_eq!(second.id, first.id);
        assert_eq!(second.first_names.as_str(), "Ana María");

        Ok(())
    }
}
