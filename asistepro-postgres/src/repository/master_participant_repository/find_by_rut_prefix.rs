use async_trait::async_trait;
use asistepro_db::models::master_participant::MasterParticipantModel;
use asistepro_db::repository::master_participant_queries::MasterParticipantQueries;
use asistepro_db::{StoreError, Table};

use super::repo_impl::MasterParticipantRepositoryImpl;
use crate::utils::{decode_rows, map_sqlx_error};

impl MasterParticipantRepositoryImpl {
    pub(super) async fn find_by_rut_prefix_impl(
        repo: &MasterParticipantRepositoryImpl,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<MasterParticipantModel>, StoreError> {
        // LIKE wildcards in user input are matched literally
        let pattern = format!(
            "{}%",
            prefix.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
        );
        let rows = sqlx::query(
            r#"SELECT * FROM participantes_maestro WHERE rut LIKE $1 ORDER BY rut ASC LIMIT $2"#,
        )
        .bind(pattern)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&*repo.pool)
        .await
        .map_err(|e| map_sqlx_error(Table::MasterParticipants, e))?;
        decode_rows(Table::MasterParticipants, &rows)
    }
}

#[async_trait]
impl MasterParticipantQueries for MasterParticipantRepositoryImpl {
    async fn find_by_rut_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<MasterParticipantModel>, StoreError> {
        Self::find_by_rut_prefix_impl(self, prefix, limit).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{random_rut, setup_test_context};
    use asistepro_db::repository::master_participant_queries::MasterParticipantQueries;
    use asistepro_db::repository::upsert::Upsert;
    use asistepro_db::test_utils::create_test_master_participant;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_find_by_rut_prefix() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let master_repo = &ctx.repos().master_participant_repository;

        let rut = random_rut();
        master_repo.upsert(create_test_master_participant(&rut, "Ana")).await?;

        let found = master_repo.find_by_rut_prefix(&rut[..6], 10).await?;
        assert!(found.iter().any(|m| m.rut.as_str() == rut));

        let found = master_repo.find_by_rut_prefix("%", 10).await?;
        assert!(found.is_empty());

        Ok(())
    }
}
