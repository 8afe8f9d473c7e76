use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AttendanceModel, Identifiable};
use crate::repository::upsert::HasConflictKey;

/// # Documentation
/// - Cross-course participant directory keyed by RUT, refreshed on every registration
/// - Feeds the RUT autocomplete of the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterParticipantModel {
    pub id: Uuid,

    pub rut: HeaplessString<12>,

    pub first_names: HeaplessString<100>,

    pub paternal_last_name: HeaplessString<50>,

    pub maternal_last_name: HeaplessString<50>,

    pub email: HeaplessString<255>,

    pub phone: HeaplessString<20>,

    pub role: HeaplessString<100>,

    pub faculty: HeaplessString<100>,

    pub department: HeaplessString<100>,

    pub updated_at: DateTime<Utc>,
}

impl Identifiable for MasterParticipantModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl HasConflictKey for MasterParticipantModel {
    const CONFLICT_COLUMN: &'static str = "rut";

    fn conflict_key(&self) -> &str {
        self.rut.as_str()
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl From<&AttendanceModel> for MasterParticipantModel {
    fn from(attendance: &AttendanceModel) -> Self {
        MasterParticipantModel {
            id: Uuid::new_v4(),
            rut: attendance.rut.clone(),
            first_names: attendance.first_names.clone(),
            paternal_last_name: attendance.paternal_last_name.clone(),
            maternal_last_name: attendance.maternal_last_name.clone(),
            email: attendance.email.clone(),
            phone: attendance.phone.clone(),
            role: attendance.role.clone(),
            faculty: attendance.faculty.clone(),
            department: attendance.department.clone(),
            updated_at: attendance.created_at,
        }
    }
}
