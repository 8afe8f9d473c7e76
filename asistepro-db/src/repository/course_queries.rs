use async_trait::async_trait;
use uuid::Uuid;

use crate::models::course::CourseModel;
use crate::store_error::StoreError;

/// Listing and visibility queries over courses.
#[async_trait]
pub trait CourseQueries: Send + Sync {
    /// Courses open for registration, most recent date first.
    async fn find_visible(&self) -> Result<Vec<CourseModel>, StoreError>;

    /// Every course, most recent date first.
    async fn find_all(&self) -> Result<Vec<CourseModel>, StoreError>;

    /// Applies every `(course_id, is_visible)` pair in one transaction.
    async fn set_visibility_batch(&self, changes: &[(Uuid, bool)]) -> Result<(), StoreError>;
}
