use asistepro_db::models::attendance::AttendanceModel;
use asistepro_db::DecodeError;
use crate::utils::{get_campus, get_column, get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool};
use std::sync::Arc;

pub struct AttendanceRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl AttendanceRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for AttendanceModel {
    fn try_from_row(row: &PgRow) -> Result<Self, DecodeError> {
        Ok(AttendanceModel {
            id: get_column(row, "id")?,
            course_id: get_column(row, "curso_id")?,
            first_names: get_heapless_string(row, "nombres")?,
            paternal_last_name: get_heapless_string(row, "apellido_paterno")?,
            maternal_last_name: get_heapless_string(row, "apellido_materno")?,
            rut: get_heapless_string(row, "rut")?,
            email: get_heapless_string(row, "email")?,
            phone: get_heapless_string(row, "telefono")?,
            role: get_heapless_string(row, "rol")?,
            faculty: get_heapless_string(row, "facultad")?,
            department: get_heapless_string(row, "departamento")?,
            major: get_heapless_string(row, "carrera")?,
            contract_type: get_heapless_string(row, "tipo_contrato")?,
            teaching_semester: get_heapless_string(row, "semestre_docencia")?,
            campus: get_campus(row, "sede")?,
            signature: get_column(row, "firma")?,
            created_at: get_column(row, "created_at")?,
        })
    }
}
