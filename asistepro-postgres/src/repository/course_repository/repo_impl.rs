use asistepro_db::models::course::CourseModel;
use asistepro_db::DecodeError;
use crate::utils::{get_column, get_heapless_string, get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool};
use std::sync::Arc;

pub struct CourseRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl CourseRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for CourseModel {
    fn try_from_row(row: &PgRow) -> Result<Self, DecodeError> {
        Ok(CourseModel {
            id: get_column(row, "id")?,
            name: get_heapless_string(row, "name")?,
            location: get_heapless_string(row, "location")?,
            provider: get_heapless_string(row, "provider")?,
            date: get_column(row, "date")?,
            time: get_column(row, "time")?,
            person_in_charge: get_optional_heapless_string(row, "person_in_charge")?,
            duration_minutes: get_column(row, "duration")?,
            is_visible: get_column(row, "is_visible")?,
            created_at: get_column(row, "created_at")?,
        })
    }
}
