use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - A course participants register attendance for. Never hard-deleted; hidden via `is_visible`.
/// - `duration_minutes` may be null or negative in stored rows; documents treat both as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModel {
    pub id: Uuid,

    pub name: HeaplessString<200>,

    pub location: HeaplessString<200>,

    pub provider: HeaplessString<200>,

    pub date: NaiveDate,

    pub time: Option<NaiveTime>,

    pub person_in_charge: Option<HeaplessString<100>>,

    pub duration_minutes: Option<i32>,

    pub is_visible: bool,

    pub created_at: DateTime<Utc>,
}

impl Identifiable for CourseModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
