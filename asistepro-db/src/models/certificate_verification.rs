use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Identifiable;

/// # Documentation
/// - Immutable snapshot of one participant's certificate
/// - Names are copied, not joined, so later edits to the course or attendance do not change it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateVerificationModel {
    pub id: Uuid,

    pub course_id: Option<Uuid>,

    pub attendance_id: Option<Uuid>,

    pub participant_name: HeaplessString<200>,

    pub participant_rut: HeaplessString<12>,

    pub course_name: HeaplessString<200>,

    pub generated_at: DateTime<Utc>,
}

impl Identifiable for CertificateVerificationModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
