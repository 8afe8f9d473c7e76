use asistepro_db::models::certificate_verification::CertificateVerificationModel;
use asistepro_db::DecodeError;
use crate::utils::{get_column, get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool};
use std::sync::Arc;

pub struct CertificateVerificationRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl CertificateVerificationRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for CertificateVerificationModel {
    fn try_from_row(row: &PgRow) -> Result<Self, DecodeError> {
        Ok(CertificateVerificationModel {
            id: get_column(row, "id")?,
            course_id: get_column(row, "curso_id")?,
            attendance_id: get_column(row, "asistencia_id")?,
            participant_name: get_heapless_string(row, "nombre_participante")?,
            participant_rut: get_heapless_string(row, "rut_participante")?,
            course_name: get_heapless_string(row, "nombre_curso")?,
            generated_at: get_column(row, "fecha_generacion")?,
        })
    }
}
