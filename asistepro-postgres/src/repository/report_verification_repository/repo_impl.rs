use asistepro_db::models::report_verification::ReportVerificationModel;
use asistepro_db::DecodeError;
use crate::utils::{get_column, get_heapless_string, get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool};
use std::sync::Arc;

pub struct ReportVerificationRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ReportVerificationRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ReportVerificationModel {
    fn try_from_row(row: &PgRow) -> Result<Self, DecodeError> {
        Ok(ReportVerificationModel {
            id: get_column(row, "id")?,
            course_id: get_column(row, "curso_id")?,
            course_name: get_heapless_string(row, "nombre_curso")?,
            course_location: get_optional_heapless_string(row, "lugar_curso")?,
            course_provider: get_optional_heapless_string(row, "ofertante_curso")?,
            person_in_charge: get_optional_heapless_string(row, "encargado_curso")?,
            participant_count: get_column(row, "participantes_registrados")?,
            generated_at: get_column(row, "fecha_generacion_reporte")?,
        })
    }
}
