//! In-memory implementation of every store trait
//!
//! Used by service tests in place of PostgreSQL. Rows live in insertion order behind a
//! `parking_lot` mutex that is never held across an await point. Failures can be injected
//! per table so callers can exercise their error paths deterministically.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{
    AttendanceModel, CertificateVerificationModel, CourseModel, Identifiable,
    MasterParticipantModel, ReportVerificationModel,
};
use crate::repository::{
    AttendanceQueries, CourseQueries, CreateBatch, HasConflictKey, Load, LoadBatch,
    MasterParticipantQueries, Stores, Table, UpdateBatch, Upsert,
};
use crate::store_error::StoreError;

#[doc(hidden)]
#[derive(Default)]
pub struct Tables {
    courses: Vec<CourseModel>,
    attendance: Vec<AttendanceModel>,
    report_verifications: Vec<ReportVerificationModel>,
    certificate_verifications: Vec<CertificateVerificationModel>,
    master_participants: Vec<MasterParticipantModel>,
}

/// Rows the memory store knows how to hold.
pub trait MemoryRow: Identifiable + Clone + Send + Sync + 'static {
    const TABLE: Table;

    #[doc(hidden)]
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self>;
}

macro_rules! memory_row {
    ($model:ty, $table:expr, $field:ident) => {
        impl MemoryRow for $model {
            const TABLE: Table = $table;

            fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
                &mut tables.$field
            }
        }
    };
}

memory_row!(CourseModel, Table::Courses, courses);
memory_row!(AttendanceModel, Table::Attendance, attendance);
memory_row!(ReportVerificationModel, Table::ReportVerifications, report_verifications);
memory_row!(CertificateVerificationModel, Table::CertificateVerifications, certificate_verifications);
memory_row!(MasterParticipantModel, Table::MasterParticipants, master_participants);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperationCounts {
    pub reads: usize,
    pub writes: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failures: Mutex<HashMap<Table, StoreError>>,
    write_failures: Mutex<HashMap<Table, StoreError>>,
    counts: Mutex<HashMap<Table, OperationCounts>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store handle where every table is served by this instance.
    pub fn stores(self: &Arc<Self>) -> Stores {
        Stores {
            courses: self.clone(),
            attendance: self.clone(),
            report_verifications: self.clone(),
            certificate_verifications: self.clone(),
            master_participants: self.clone(),
        }
    }

    /// Every following operation on `table` fails with `error` until cleared.
    pub fn fail_with(&self, table: Table, error: StoreError) {
        self.failures.lock().insert(table, error);
    }

    /// Like [`MemoryStore::fail_with`] but reads on `table` keep succeeding.
    pub fn fail_writes_with(&self, table: Table, error: StoreError) {
        self.write_failures.lock().insert(table, error);
    }

    pub fn clear_failure(&self, table: Table) {
        self.failures.lock().remove(&table);
        self.write_failures.lock().remove(&table);
    }

    /// Operations attempted on `table`, including the ones that failed.
    pub fn counts(&self, table: Table) -> OperationCounts {
        self.counts.lock().get(&table).copied().unwrap_or_default()
    }

    pub fn rows<T: MemoryRow>(&self) -> Vec<T> {
        T::rows_mut(&mut self.tables.lock()).clone()
    }

    /// Inserts rows directly, bypassing counters and injected failures.
    pub fn seed<T: MemoryRow>(&self, items: impl IntoIterator<Item = T>) {
        T::rows_mut(&mut self.tables.lock()).extend(items);
    }

    fn begin_read(&self, table: Table) -> Result<(), StoreError> {
        self.counts.lock().entry(table).or_default().reads += 1;
        self.injected(table)
    }

    fn begin_write(&self, table: Table) -> Result<(), StoreError> {
        self.counts.lock().entry(table).or_default().writes += 1;
        if let Some(error) = self.write_failures.lock().get(&table) {
            return Err(error.clone());
        }
        self.injected(table)
    }

    fn injected(&self, table: Table) -> Result<(), StoreError> {
        match self.failures.lock().get(&table) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T: MemoryRow> CreateBatch<T> for MemoryStore {
    async fn create_batch(&self, items: Vec<T>) -> Result<Vec<T>, StoreError> {
        self.begin_write(T::TABLE)?;
        let mut tables = self.tables.lock();
        let rows = T::rows_mut(&mut tables);
        for (i, item) in items.iter().enumerate() {
            let id = item.get_id();
            let clashes = rows.iter().any(|r| r.get_id() == id)
                || items[..i].iter().any(|r| r.get_id() == id);
            if clashes {
                return Err(StoreError::Conflict {
                    table: T::TABLE,
                    message: format!("duplicate key id={id}"),
                });
            }
        }
        rows.extend(items.iter().cloned());
        Ok(items)
    }
}

#[async_trait]
impl<T: MemoryRow> Load<T> for MemoryStore {
    async fn load(&self, id: Uuid) -> Result<T, StoreError> {
        self.begin_read(T::TABLE)?;
        let mut tables = self.tables.lock();
        T::rows_mut(&mut tables)
            .iter()
            .find(|r| r.get_id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::TABLE, format!("id={id}")))
    }
}

#[async_trait]
impl<T: MemoryRow> LoadBatch<T> for MemoryStore {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<T>>, StoreError> {
        self.begin_read(T::TABLE)?;
        let mut tables = self.tables.lock();
        let rows = T::rows_mut(&mut tables);
        Ok(ids
            .iter()
            .map(|id| rows.iter().find(|r| r.get_id() == *id).cloned())
            .collect())
    }
}

#[async_trait]
impl<T: MemoryRow> UpdateBatch<T> for MemoryStore {
    async fn update_batch(&self, items: Vec<T>) -> Result<Vec<T>, StoreError> {
        self.begin_write(T::TABLE)?;
        let mut tables = self.tables.lock();
        let rows = T::rows_mut(&mut tables);
        let mut positions = Vec::with_capacity(items.len());
        for item in &items {
            let id = item.get_id();
            let pos = rows
                .iter()
                .position(|r| r.get_id() == id)
                .ok_or_else(|| StoreError::not_found(T::TABLE, format!("id={id}")))?;
            positions.push(pos);
        }
        for (pos, item) in positions.into_iter().zip(items.iter()) {
            rows[pos] = item.clone();
        }
        Ok(items)
    }
}

#[async_trait]
impl<T: MemoryRow + HasConflictKey> Upsert<T> for MemoryStore {
    async fn upsert(&self, item: T) -> Result<T, StoreError> {
        self.begin_write(T::TABLE)?;
        let mut tables = self.tables.lock();
        let rows = T::rows_mut(&mut tables);
        match rows
            .iter()
            .position(|r| r.conflict_key() == item.conflict_key())
        {
            Some(pos) => {
                let existing_id = rows[pos].get_id();
                let mut stored = item;
                stored.set_id(existing_id);
                rows[pos] = stored.clone();
                Ok(stored)
            }
            None => {
                rows.push(item.clone());
                Ok(item)
            }
        }
    }
}

#[async_trait]
impl CourseQueries for MemoryStore {
    async fn find_visible(&self) -> Result<Vec<CourseModel>, StoreError> {
        let mut courses = self.find_all().await?;
        courses.retain(|c| c.is_visible);
        Ok(courses)
    }

    async fn find_all(&self) -> Result<Vec<CourseModel>, StoreError> {
        self.begin_read(Table::Courses)?;
        let mut courses = self.tables.lock().courses.clone();
        courses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(courses)
    }

    async fn set_visibility_batch(&self, changes: &[(Uuid, bool)]) -> Result<(), StoreError> {
        self.begin_write(Table::Courses)?;
        let mut tables = self.tables.lock();
        if let Some((missing, _)) = changes
            .iter()
            .find(|(id, _)| !tables.courses.iter().any(|c| c.id == *id))
        {
            return Err(StoreError::not_found(Table::Courses, format!("id={missing}")));
        }
        for (id, visible) in changes {
            if let Some(course) = tables.courses.iter_mut().find(|c| c.id == *id) {
                course.is_visible = *visible;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceQueries for MemoryStore {
    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<AttendanceModel>, StoreError> {
        self.begin_read(Table::Attendance)?;
        let mut rows: Vec<AttendanceModel> = self
            .tables
            .lock()
            .attendance
            .iter()
            .filter(|a| a.course_id == course_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.created_at);
        Ok(rows)
    }

    async fn find_by_course_id_and_rut(
        &self,
        course_id: Uuid,
        rut: &str,
    ) -> Result<Option<AttendanceModel>, StoreError> {
        self.begin_read(Table::Attendance)?;
        Ok(self
            .tables
            .lock()
            .attendance
            .iter()
            .find(|a| a.course_id == course_id && a.rut.as_str() == rut)
            .cloned())
    }
}

#[async_trait]
impl MasterParticipantQueries for MemoryStore {
    async fn find_by_rut_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<MasterParticipantModel>, StoreError> {
        self.begin_read(Table::MasterParticipants)?;
        let mut rows: Vec<MasterParticipantModel> = self
            .tables
            .lock()
            .master_participants
            .iter()
            .filter(|m| m.rut.starts_with(prefix))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.rut.as_str().cmp(b.rut.as_str()));
        rows.truncate(limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_course, create_test_master_participant};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_load_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let err = Load::<CourseModel>::load(&*store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.counts(Table::Courses).reads, 1);
    }

    #[tokio::test]
    async fn test_create_batch_rejects_duplicate_ids() {
        let store = MemoryStore::new();
        let course = create_test_course("Taller X");
        store.create_batch(vec![course.clone()]).await.unwrap();
        let err = store.create_batch(vec![course]).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.rows::<CourseModel>().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_applies_until_cleared() {
        let store = MemoryStore::new();
        store.fail_with(Table::Courses, StoreError::Unavailable("offline".to_string()));
        assert!(CourseQueries::find_all(&*store).await.is_err());
        store.clear_failure(Table::Courses);
        assert!(CourseQueries::find_all(&*store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_leaves_reads_working() {
        let store = MemoryStore::new();
        store.fail_writes_with(Table::Courses, StoreError::Unavailable("read-only".to_string()));
        assert!(CourseQueries::find_all(&*store).await.is_ok());
        assert!(store.create_batch(vec![create_test_course("Taller X")]).await.is_err());
        assert_eq!(
            store.counts(Table::Courses),
            OperationCounts { reads: 1, writes: 1 }
        );
    }

    #[tokio::test]
    async fn test_find_visible_orders_by_date_descending() {
        let store = MemoryStore::new();
        let mut older = create_test_course("Older");
        older.date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let mut newer = create_test_course("Newer");
        newer.date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut hidden = create_test_course("Hidden");
        hidden.is_visible = false;
        store.seed(vec![older, newer, hidden]);

        let visible = store.find_visible().await.unwrap();
        let names: Vec<&str> = visible.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_set_visibility_batch_is_all_or_nothing() {
        let store = MemoryStore::new();
        let course = create_test_course("Taller X");
        let id = course.id;
        store.seed(vec![course]);

        let err = store
            .set_visibility_batch(&[(id, false), (Uuid::new_v4(), true)])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.rows::<CourseModel>()[0].is_visible);

        store.set_visibility_batch(&[(id, false)]).await.unwrap();
        assert!(!store.rows::<CourseModel>()[0].is_visible);
    }

    #[tokio::test]
    async fn test_upsert_keeps_id_of_existing_rut() {
        let store = MemoryStore::new();
        let first = create_test_master_participant("12345678-5", "Ana");
        let first_id = first.id;
        store.upsert(first).await.unwrap();

        let second = create_test_master_participant("12345678-5", "Ana María");
        let stored = store.upsert(second).await.unwrap();
        assert_eq!(stored.id, first_id);

        let rows = store.rows::<MasterParticipantModel>();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_names.as_str(), "Ana María");
    }

    #[tokio::test]
    async fn test_find_by_rut_prefix_limits_results() {
        let store = MemoryStore::new();
        store.seed(vec![
            create_test_master_participant("12345678-5", "Ana"),
            create_test_master_participant("12399999-3", "Luis"),
            create_test_master_participant("98765432-5", "Eva"),
        ]);
        let found = store.find_by_rut_prefix("123", 1).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rut.as_str(), "12345678-5");
        assert_eq!(store.find_by_rut_prefix("123", 5).await.unwrap().len(), 2);
    }
}
