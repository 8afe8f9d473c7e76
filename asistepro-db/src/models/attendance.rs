use asistepro_api::Campus;
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - One participant's registration in one course, including the signature as a PNG data URL
/// - `rut` is stored in canonical `########-D` form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceModel {
    pub id: Uuid,

    pub course_id: Uuid,

    pub first_names: HeaplessString<100>,

    pub paternal_last_name: HeaplessString<50>,

    pub maternal_last_name: HeaplessString<50>,

    pub rut: HeaplessString<12>,

    pub email: HeaplessString<255>,

    pub phone: HeaplessString<20>,

    pub role: HeaplessString<100>,

    pub faculty: HeaplessString<100>,

    pub department: HeaplessString<100>,

    pub major: HeaplessString<200>,

    pub contract_type: HeaplessString<50>,

    pub teaching_semester: HeaplessString<20>,

    pub campus: Campus,

    pub signature: String,

    pub created_at: DateTime<Utc>,
}

impl AttendanceModel {
    /// Name parts joined by single spaces; empty parts are skipped.
    pub fn full_name(&self) -> String {
        [
            self.first_names.as_str(),
            self.paternal_last_name.as_str(),
            self.maternal_last_name.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn has_signature(&self) -> bool {
        !self.signature.is_empty()
    }
}

impl Identifiable for AttendanceModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
