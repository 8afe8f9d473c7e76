use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - Immutable snapshot of a course taken when its attendance report is generated
/// - `id` is the value printed on the report and encoded in its QR code
/// - `course_id` becomes null if the course row is removed; the snapshot stays readable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVerificationModel {
    pub id: Uuid,

    pub course_id: Option<Uuid>,

    pub course_name: HeaplessString<200>,

    pub course_location: Option<HeaplessString<200>>,

    pub course_provider: Option<HeaplessString<200>>,

    pub person_in_charge: Option<HeaplessString<100>>,

    pub participant_count: i32,

    pub generated_at: DateTime<Utc>,
}

impl Identifiable for ReportVerificationModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
