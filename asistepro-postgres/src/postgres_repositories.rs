use asistepro_db::{StoreError, Stores, Table};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::repository::attendance_repository::AttendanceRepositoryImpl;
use crate::repository::certificate_verification_repository::CertificateVerificationRepositoryImpl;
use crate::repository::course_repository::CourseRepositoryImpl;
use crate::repository::master_participant_repository::MasterParticipantRepositoryImpl;
use crate::repository::report_verification_repository::ReportVerificationRepositoryImpl;

/// Single initialization point of the PostgreSQL store.
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        info!("connected to PostgreSQL store");
        Ok(Self::new(Arc::new(pool)))
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Create all repositories sharing the pool
    pub fn create_all_repositories(&self) -> AsisteRepositories {
        AsisteRepositories {
            course_repository: Arc::new(CourseRepositoryImpl::new(self.pool.clone())),
            attendance_repository: Arc::new(AttendanceRepositoryImpl::new(self.pool.clone())),
            report_verification_repository: Arc::new(ReportVerificationRepositoryImpl::new(
                self.pool.clone(),
            )),
            certificate_verification_repository: Arc::new(
                CertificateVerificationRepositoryImpl::new(self.pool.clone()),
            ),
            master_participant_repository: Arc::new(MasterParticipantRepositoryImpl::new(
                self.pool.clone(),
            )),
        }
    }

    /// Store handle for the services.
    pub fn stores(&self) -> Stores {
        self.create_all_repositories().into()
    }

    /// Confirms every table exists, reporting the first missing one.
    pub async fn check_schema(&self) -> Result<(), StoreError> {
        for table in Table::ALL {
            let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
                .bind(format!("public.{}", table.name()))
                .fetch_one(&*self.pool)
                .await
                .map_err(|e| crate::utils::map_sqlx_error(table, e))?;
            if !exists {
                return Err(StoreError::SchemaMissing { table });
            }
        }
        Ok(())
    }
}

pub struct AsisteRepositories {
    pub course_repository: Arc<CourseRepositoryImpl>,
    pub attendance_repository: Arc<AttendanceRepositoryImpl>,
    pub report_verification_repository: Arc<ReportVerificationRepositoryImpl>,
    pub certificate_verification_repository: Arc<CertificateVerificationRepositoryImpl>,
    pub master_participant_repository: Arc<MasterParticipantRepositoryImpl>,
}

impl From<AsisteRepositories> for Stores {
    fn from(repos: AsisteRepositories) -> Self {
        Stores {
            courses: repos.course_repository,
            attendance: repos.attendance_repository,
            report_verifications: repos.report_verification_repository,
            certificate_verifications: repos.certificate_verification_repository,
            master_participants: repos.master_participant_repository,
        }
    }
}
