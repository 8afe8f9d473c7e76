use asistepro_db::models::master_participant::MasterParticipantModel;
use asistepro_db::DecodeError;
use crate::utils::{get_column, get_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool};
use std::sync::Arc;

pub struct MasterParticipantRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl MasterParticipantRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for MasterParticipantModel {
    fn try_from_row(row: &PgRow) -> Result<Self, DecodeError> {
        Ok(MasterParticipantModel {
            id: get_column(row, "id")?,
            rut: get_heapless_string(row, "rut")?,
            first_names: get_heapless_string(row, "nombres")?,
            paternal_last_name: get_heapless_string(row, "apellido_paterno")?,
            maternal_last_name: get_heapless_string(row, "apellido_materno")?,
            email: get_heapless_string(row, "email")?,
            phone: get_heapless_string(row, "telefono")?,
            role: get_heapless_string(row, "rol")?,
            faculty: get_heapless_string(row, "facultad")?,
            department: get_heapless_string(row, "departamento")?,
            updated_at: get_column(row, "updated_at")?,
        })
    }
}
