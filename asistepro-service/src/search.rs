//! Debounced lookups driven by the RUT input
//!
//! Each keystroke restarts a timer; only when the input has been stable for the
//! configured delay is the store queried. A keystroke aborts a timer that has not
//! fired yet but never a request already sent. Every request carries the sequence
//! number of the keystroke that produced it, and a response is only published if no
//! newer keystroke has happened since.

use async_trait::async_trait;
use asistepro_api::Rut;
use asistepro_db::models::{AttendanceModel, MasterParticipantModel};
use asistepro_db::{AttendanceStore, MasterParticipantStore, StoreError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Published state of a debounced lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Pending { input: String },
    Ready { input: String, value: T },
    Failed { input: String, message: String },
}

impl<T> QueryState<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            QueryState::Ready { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// A store query a debounced lookup can run.
#[async_trait]
pub trait QuerySource: Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    /// Normalized query key for `input`, or `None` when the input should not be looked up.
    fn prepare(&self, input: &str) -> Option<String>;

    async fn run(&self, key: &str) -> Result<Self::Output, StoreError>;
}

pub struct DebouncedQuery<S: QuerySource> {
    source: Arc<S>,
    delay: Duration,
    latest: Arc<AtomicU64>,
    timer: Option<JoinHandle<()>>,
    state: Arc<watch::Sender<QueryState<S::Output>>>,
}

impl<S: QuerySource> DebouncedQuery<S> {
    pub fn new(source: S, delay: Duration) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self {
            source: Arc::new(source),
            delay,
            latest: Arc::new(AtomicU64::new(0)),
            timer: None,
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<S::Output>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> QueryState<S::Output> {
        self.state.borrow().clone()
    }

    /// Records a new input value and restarts the timer. Must be called within a tokio runtime.
    pub fn input_changed(&mut self, input: &str) {
        let prepared = self.source.prepare(input);
        // Sequence bumps and publishes both happen under the watch lock.
        let mut seq = 0;
        self.state.send_modify(|current| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *current = match &prepared {
                Some(key) => QueryState::Pending { input: key.clone() },
                None => QueryState::Idle,
            };
        });
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let Some(key) = prepared else {
            return;
        };

        let source = self.source.clone();
        let latest = self.latest.clone();
        let state = self.state.clone();
        let delay = self.delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The request outlives this timer task so a later keystroke cannot cancel it.
            tokio::spawn(async move {
                let result = source.run(&key).await;
                let next = match result {
                    Ok(value) => QueryState::Ready {
                        input: key.clone(),
                        value,
                    },
                    Err(err) => QueryState::Failed {
                        input: key.clone(),
                        message: err.to_string(),
                    },
                };
                let published = state.send_if_modified(|current| {
                    if latest.load(Ordering::SeqCst) != seq {
                        return false;
                    }
                    *current = next;
                    true
                });
                if !published {
                    debug!(input = %key, "discarding superseded lookup response");
                }
            });
        }));
    }
}

impl<S: QuerySource> Drop for DebouncedQuery<S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Looks for the RUT among the course's registrations.
pub struct DuplicateCheck {
    attendance: Arc<dyn AttendanceStore>,
    course_id: Uuid,
}

impl DuplicateCheck {
    pub fn new(attendance: Arc<dyn AttendanceStore>, course_id: Uuid) -> Self {
        Self {
            attendance,
            course_id,
        }
    }
}

#[async_trait]
impl QuerySource for DuplicateCheck {
    type Output = Option<AttendanceModel>;

    fn prepare(&self, input: &str) -> Option<String> {
        Rut::parse(input).ok().map(|rut| rut.to_string())
    }

    async fn run(&self, key: &str) -> Result<Self::Output, StoreError> {
        self.attendance
            .find_by_course_id_and_rut(self.course_id, key)
            .await
    }
}

/// Suggests directory entries whose RUT starts with the typed digits.
pub struct RutAutocomplete {
    directory: Arc<dyn MasterParticipantStore>,
    min_prefix_len: usize,
    limit: usize,
}

impl RutAutocomplete {
    pub const DEFAULT_MIN_PREFIX_LEN: usize = 3;
    pub const DEFAULT_LIMIT: usize = 5;

    pub fn new(directory: Arc<dyn MasterParticipantStore>) -> Self {
        Self {
            directory,
            min_prefix_len: Self::DEFAULT_MIN_PREFIX_LEN,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[async_trait]
impl QuerySource for RutAutocomplete {
    type Output = Vec<MasterParticipantModel>;

    fn prepare(&self, input: &str) -> Option<String> {
        // Dots are display formatting; stored RUTs have none.
        let prefix: String = input
            .trim()
            .chars()
            .filter(|c| *c != '.')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        (prefix.chars().count() >= self.min_prefix_len).then_some(prefix)
    }

    async fn run(&self, key: &str) -> Result<Self::Output, StoreError> {
        self.directory.find_by_rut_prefix(key, self.limit).await
    }
}

/// The two independent lookups attached to the RUT field of the registration form.
pub struct RutLookup {
    pub duplicate: DebouncedQuery<DuplicateCheck>,
    pub suggestions: DebouncedQuery<RutAutocomplete>,
}

impl RutLookup {
    pub fn new(
        attendance: Arc<dyn AttendanceStore>,
        directory: Arc<dyn MasterParticipantStore>,
        course_id: Uuid,
        delay: Duration,
    ) -> Self {
        Self {
            duplicate: DebouncedQuery::new(DuplicateCheck::new(attendance, course_id), delay),
            suggestions: DebouncedQuery::new(RutAutocomplete::new(directory), delay),
        }
    }

    pub fn rut_changed(&mut self, input: &str) {
        self.duplicate.input_changed(input);
        self.suggestions.input_changed(input);
    }

    /// True once the current RUT is known to be registered in the course.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self.duplicate.state(),
            QueryState::Ready { value: Some(_), .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asistepro_db::test_utils::{create_test_attendance, create_test_master_participant};
    use asistepro_db::{MemoryStore, Table};
    use parking_lot::Mutex;
    use tokio::time::sleep;

    const DELAY: Duration = Duration::from_millis(300);

    /// Answers with the key itself after a per-key latency.
    struct SlowEcho {
        latency: fn(&str) -> Duration,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl QuerySource for SlowEcho {
        type Output = String;

        fn prepare(&self, input: &str) -> Option<String> {
            (!input.is_empty()).then(|| input.to_string())
        }

        async fn run(&self, key: &str) -> Result<String, StoreError> {
            self.calls.lock().push(key.to_string());
            sleep((self.latency)(key)).await;
            Ok(key.to_string())
        }
    }

    fn slow_echo(latency: fn(&str) -> Duration) -> (SlowEcho, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            SlowEcho {
                latency,
                calls: calls.clone(),
            },
            calls,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_send_one_request() {
        let (source, calls) = slow_echo(|_| Duration::from_millis(10));
        let mut query = DebouncedQuery::new(source, DELAY);

        query.input_changed("1");
        sleep(Duration::from_millis(100)).await;
        query.input_changed("12");
        sleep(Duration::from_millis(100)).await;
        query.input_changed("123");
        assert_eq!(query.state(), QueryState::Pending { input: "123".to_string() });

        sleep(Duration::from_millis(400)).await;
        assert_eq!(*calls.lock(), vec!["123".to_string()]);
        assert_eq!(query.state().value(), Some(&"123".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_response_is_discarded() {
        // The first request is slow, the second fast: the first answer arrives last.
        let (source, calls) = slow_echo(|key| {
            if key == "1" {
                Duration::from_millis(1000)
            } else {
                Duration::from_millis(10)
            }
        });
        let mut query = DebouncedQuery::new(source, DELAY);

        query.input_changed("1");
        sleep(Duration::from_millis(350)).await;
        assert_eq!(*calls.lock(), vec!["1".to_string()]);

        query.input_changed("12");
        sleep(Duration::from_millis(350)).await;
        assert_eq!(query.state().value(), Some(&"12".to_string()));

        sleep(Duration::from_millis(1000)).await;
        // Both requests were sent; the stale one did not overwrite the newer result.
        assert_eq!(calls.lock().len(), 2);
        assert_eq!(query.state().value(), Some(&"12".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_answer_leaves_newer_pending_state_untouched() {
        let (source, _calls) = slow_echo(|key| {
            if key == "1" {
                Duration::from_millis(1000)
            } else {
                Duration::from_millis(5000)
            }
        });
        let mut query = DebouncedQuery::new(source, DELAY);
        let mut rx = query.subscribe();

        query.input_changed("1");
        sleep(Duration::from_millis(350)).await;
        query.input_changed("12");
        rx.borrow_and_update();

        // "1" answers at 1300ms while "12" is still in flight.
        sleep(Duration::from_millis(1050)).await;
        assert_eq!(query.state(), QueryState::Pending { input: "12".to_string() });
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleared_input_goes_idle_and_drops_in_flight_answer() {
        let (source, _calls) = slow_echo(|_| Duration::from_millis(500));
        let mut query = DebouncedQuery::new(source, DELAY);

        query.input_changed("9");
        sleep(Duration::from_millis(350)).await;
        query.input_changed("");
        assert_eq!(query.state(), QueryState::Idle);

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(query.state(), QueryState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rut_lookup_flags_duplicates_and_suggests() {
        let store = MemoryStore::new();
        let course_id = Uuid::new_v4();
        store.seed(vec![create_test_attendance(course_id, "Ana", "Pérez", "12345678-5", 0)]);
        store.seed(vec![
            create_test_master_participant("12345678-5", "Ana"),
            create_test_master_participant("12399999-3", "Luis"),
        ]);
        let stores = store.stores();
        let mut lookup = RutLookup::new(stores.attendance, stores.master_participants, course_id, DELAY);

        lookup.rut_changed("12.3");
        sleep(Duration::from_millis(400)).await;
        // An incomplete RUT only drives the autocomplete
        assert_eq!(lookup.duplicate.state(), QueryState::Idle);
        assert_eq!(lookup.suggestions.state().value().map(|v| v.len()), Some(2));

        lookup.rut_changed("12.345.678-5");
        sleep(Duration::from_millis(400)).await;
        assert!(lookup.is_duplicate());
        assert_eq!(lookup.suggestions.state().value().map(|v| v.len()), Some(1));
        assert_eq!(store.counts(Table::Attendance).reads, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_failure_is_published() {
        let store = MemoryStore::new();
        store.fail_with(Table::MasterParticipants, StoreError::Unavailable("offline".to_string()));
        let mut query = DebouncedQuery::new(RutAutocomplete::new(store.stores().master_participants), DELAY);

        query.input_changed("123");
        sleep(Duration::from_millis(400)).await;
        assert!(matches!(query.state(), QueryState::Failed { .. }));
    }
}
