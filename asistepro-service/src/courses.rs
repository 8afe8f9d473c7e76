use asistepro_api::{bounded, bounded_opt, ApiError, ApiResult};
use asistepro_db::models::CourseModel;
use asistepro_db::utils::store_timestamp;
use asistepro_db::Stores;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Course as entered by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewCourse {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    #[validate(length(min = 1, max = 200))]
    pub provider: String,

    pub date: NaiveDate,

    pub time: Option<NaiveTime>,

    #[validate(length(max = 100))]
    pub person_in_charge: Option<String>,

    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
}

impl NewCourse {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            provider: self.provider.trim().to_string(),
            person_in_charge: self
                .person_in_charge
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            ..self.clone()
        }
    }
}

/// Visibility toggles staged until saved. Toggling a course twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityChanges {
    pending: BTreeMap<Uuid, bool>,
}

impl VisibilityChanges {
    pub fn stage(&mut self, course_id: Uuid, visible: bool) {
        self.pending.insert(course_id, visible);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Applies the staged values to a fetched course list, for display before saving.
    pub fn apply_to(&self, courses: &mut [CourseModel]) {
        for course in courses.iter_mut() {
            if let Some(visible) = self.pending.get(&course.id) {
                course.is_visible = *visible;
            }
        }
    }
}

pub struct CourseAdmin {
    stores: Stores,
}

impl CourseAdmin {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Creates a course; new courses are visible.
    pub async fn create_course(&self, new_course: &NewCourse) -> ApiResult<CourseModel> {
        let new_course = new_course.trimmed();
        new_course
            .validate()
            .map_err(|errs| ApiError::validation(errs.to_string()))?;

        let course = CourseModel {
            id: Uuid::new_v4(),
            name: bounded("name", &new_course.name)?,
            location: bounded("location", &new_course.location)?,
            provider: bounded("provider", &new_course.provider)?,
            date: new_course.date,
            time: new_course.time,
            person_in_charge: bounded_opt("person_in_charge", new_course.person_in_charge.as_deref())?,
            duration_minutes: new_course.duration_minutes,
            is_visible: true,
            created_at: store_timestamp(),
        };

        let mut saved = self.stores.courses.create_batch(vec![course]).await?;
        let course = saved
            .pop()
            .ok_or_else(|| ApiError::InternalError("course insert returned no row".to_string()))?;
        info!(course_id = %course.id, name = %course.name, "course created");
        Ok(course)
    }

    /// Courses offered on the registration page, newest first.
    pub async fn list_visible(&self) -> ApiResult<Vec<CourseModel>> {
        Ok(self.stores.courses.find_visible().await?)
    }

    /// Every course, newest first.
    pub async fn list_all(&self) -> ApiResult<Vec<CourseModel>> {
        Ok(self.stores.courses.find_all().await?)
    }

    /// Saves the staged toggles in one batch. The staging is kept when the save fails so it can be retried.
    pub async fn save_visibility(&self, changes: &mut VisibilityChanges) -> ApiResult<usize> {
        if changes.is_empty() {
            return Ok(0);
        }
        let batch: Vec<(Uuid, bool)> = changes.pending.iter().map(|(id, v)| (*id, *v)).collect();
        if let Err(err) = self.stores.courses.set_visibility_batch(&batch).await {
            warn!(changes = batch.len(), error = %err, "visibility changes not saved");
            return Err(err.into());
        }
        changes.pending.clear();
        info!(changes = batch.len(), "visibility changes saved");
        Ok(batch.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asistepro_api::FailureKind;
    use asistepro_db::test_utils::create_test_course;
    use asistepro_db::{MemoryStore, StoreError, Table};
    use tokio_test::{assert_err, assert_ok};

    fn new_course(name: &str) -> NewCourse {
        NewCourse {
            name: name.to_string(),
            location: "Valparaíso".to_string(),
            provider: "UAD".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            time: NaiveTime::from_hms_opt(10, 30, 0),
            person_in_charge: Some("  ".to_string()),
            duration_minutes: Some(120),
        }
    }

    #[tokio::test]
    async fn test_create_course_is_visible_and_trimmed() {
        let store = MemoryStore::new();
        let admin = CourseAdmin::new(store.stores());

        let course = assert_ok!(admin.create_course(&new_course("  Taller X ")).await);
        assert_eq!(course.name.as_str(), "Taller X");
        assert!(course.is_visible);
        assert_eq!(course.person_in_charge, None);
        assert_eq!(store.rows::<CourseModel>(), vec![course]);
    }

    #[tokio::test]
    async fn test_create_course_requires_name() {
        let store = MemoryStore::new();
        let admin = CourseAdmin::new(store.stores());

        let err = assert_err!(admin.create_course(&new_course("   ")).await);
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert_eq!(store.counts(Table::Courses).writes, 0);
    }

    #[tokio::test]
    async fn test_staged_visibility_is_saved_in_one_batch() {
        let store = MemoryStore::new();
        let first = create_test_course("Taller A");
        let second = create_test_course("Taller B");
        store.seed(vec![first.clone(), second.clone()]);
        let admin = CourseAdmin::new(store.stores());

        let mut changes = VisibilityChanges::default();
        changes.stage(first.id, false);
        changes.stage(second.id, false);
        changes.stage(second.id, true);
        assert_eq!(changes.len(), 2);

        let mut listed = assert_ok!(admin.list_all().await);
        changes.apply_to(&mut listed);
        assert_eq!(listed.iter().filter(|c| c.is_visible).count(), 1);

        assert_eq!(assert_ok!(admin.save_visibility(&mut changes).await), 2);
        assert!(changes.is_empty());
        assert_eq!(store.counts(Table::Courses).writes, 1);

        let visible = assert_ok!(admin.list_visible().await);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, second.id);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_staged_changes() {
        let store = MemoryStore::new();
        let course = create_test_course("Taller A");
        store.seed(vec![course.clone()]);
        store.fail_with(
            Table::Courses,
            StoreError::PermissionDenied {
                table: Table::Courses,
                message: "row-level security".to_string(),
            },
        );
        let admin = CourseAdmin::new(store.stores());

        let mut changes = VisibilityChanges::default();
        changes.stage(course.id, false);
        let err = assert_err!(admin.save_visibility(&mut changes).await);
        assert!(err.is_configuration_problem());
        assert!(matches!(
            err,
            ApiError::PersistenceError {
                kind: FailureKind::Configuration,
                ..
            }
        ));
        assert_eq!(changes.len(), 1);
    }
}
