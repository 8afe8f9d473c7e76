use async_trait::async_trait;
use uuid::Uuid;

use crate::models::attendance::AttendanceModel;
use crate::store_error::StoreError;

#[async_trait]
pub trait AttendanceQueries: Send + Sync {
    /// Attendance rows of a course, oldest registration first.
    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<AttendanceModel>, StoreError>;

    /// The registration of `rut` in `course_id`, if any. Used by the duplicate check.
    async fn find_by_course_id_and_rut(
        &self,
        course_id: Uuid,
        rut: &str,
    ) -> Result<Option<AttendanceModel>, StoreError>;
}
