// Student console state
// Owns the cached records, analytics, search result, status message and form
// buffers, and turns user operations into API calls whose results are applied
// back on the UI thread.

use crate::api::{
    AnalyticsOutcome, AnalyticsSummary, SearchCriterion, SearchOutcome, Student, StudentApi,
    StudentField, StudentPatch,
};
use crate::error::ApiError;
use crate::state::confirm::{delete_prompt, Confirm};
use crate::state::form::StudentForm;
use crate::state::status::{Severity, StatusMessage};
use crate::state::view::{ActiveView, ViewAction};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Callback used to wake the UI when a response arrives
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

/// Cached analytics, distinguishing "never fetched" from "backend has no data"
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalyticsState {
    #[default]
    NotLoaded,
    /// The backend reported there is nothing to analyze
    NoData(String),
    Summary(AnalyticsSummary),
}

/// Completion of a network call, applied to the console by [`Console::poll`]
#[derive(Debug)]
pub enum ConsoleEvent {
    StudentsLoaded {
        seq: u64,
        result: Result<Vec<Student>, ApiError>,
    },
    AnalyticsLoaded {
        seq: u64,
        result: Result<AnalyticsOutcome, ApiError>,
    },
    SearchCompleted {
        seq: u64,
        result: Result<SearchOutcome, ApiError>,
    },
    StudentCreated {
        result: Result<(), ApiError>,
    },
    StudentUpdated {
        result: Result<(), ApiError>,
    },
    StudentDeleted {
        result: Result<(), ApiError>,
    },
}

/// Per-resource request counter; only the newest request may update the cache
#[derive(Debug, Default, Clone, Copy)]
struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

/// The student console: a single owned state container
///
/// Operations never block. Each one spawns its request on the tokio runtime
/// and returns immediately; the response comes back as a [`ConsoleEvent`]
/// that is applied on the next [`Console::poll`]. Mutations never patch the
/// cache directly, a successful add/update/delete re-fetches the list instead.
pub struct Console {
    api: Arc<dyn StudentApi>,
    runtime: Handle,
    events_tx: UnboundedSender<ConsoleEvent>,
    events_rx: UnboundedReceiver<ConsoleEvent>,
    repaint: Option<RepaintHook>,
    in_flight: usize,

    view: ActiveView,
    students: Vec<Student>,
    analytics: AnalyticsState,
    search_result: Option<Student>,
    status: Option<StatusMessage>,

    students_seq: RequestSequence,
    analytics_seq: RequestSequence,
    search_seq: RequestSequence,

    /// Add-student form buffers
    pub add_form: StudentForm,
    /// Selected search criterion
    pub search_criterion: SearchCriterion,
    /// Search input buffer
    pub search_query: String,
}

impl Console {
    /// Create a console that issues requests through `api` on `runtime`
    pub fn new(api: Arc<dyn StudentApi>, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            events_tx,
            events_rx,
            repaint: None,
            in_flight: 0,
            view: ActiveView::default(),
            students: Vec::new(),
            analytics: AnalyticsState::default(),
            search_result: None,
            status: None,
            students_seq: RequestSequence::default(),
            analytics_seq: RequestSequence::default(),
            search_seq: RequestSequence::default(),
            add_form: StudentForm::default(),
            search_criterion: SearchCriterion::default(),
            search_query: String::new(),
        }
    }

    /// Call `hook` whenever a response is ready to be applied
    pub fn with_repaint(mut self, hook: RepaintHook) -> Self {
        self.repaint = Some(hook);
        self
    }

    /// Run the initial view's activation
    pub fn start(&mut self) {
        self.activate(self.view);
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    /// Switch views, running the new view's on-activate action
    ///
    /// Re-selecting the current view is not an activation and fetches nothing.
    pub fn set_view(&mut self, view: ActiveView) {
        if self.view == view {
            return;
        }
        tracing::debug!(from = ?self.view, to = ?view, "Switching view");
        self.view = view;
        self.activate(view);
    }

    fn activate(&mut self, view: ActiveView) {
        match view.on_activate() {
            Some(ViewAction::LoadStudents) => self.load_students(),
            Some(ViewAction::LoadAnalytics) => self.load_analytics(),
            None => {}
        }
    }

    /// Cached student list, in server order
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn analytics(&self) -> &AnalyticsState {
        &self.analytics
    }

    pub fn search_result(&self) -> Option<&Student> {
        self.search_result.as_ref()
    }

    /// Current status message, if one is showing
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// True while any request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Number of requests whose responses have not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Fetch the full student list
    pub fn load_students(&mut self) {
        let seq = self.students_seq.next();
        let api = Arc::clone(&self.api);
        tracing::debug!(seq, "Loading students");
        self.dispatch(async move {
            ConsoleEvent::StudentsLoaded {
                seq,
                result: api.list_students().await,
            }
        });
    }

    /// Fetch the analytics summary
    pub fn load_analytics(&mut self) {
        let seq = self.analytics_seq.next();
        let api = Arc::clone(&self.api);
        tracing::debug!(seq, "Loading analytics");
        self.dispatch(async move {
            ConsoleEvent::AnalyticsLoaded {
                seq,
                result: api.analyze().await,
            }
        });
    }

    /// Validate the add form and submit it
    ///
    /// Returns false if validation failed and no request was sent.
    pub fn submit_add_form(&mut self) -> bool {
        match self.add_form.validate() {
            Ok(student) => {
                self.add_student(student);
                true
            }
            Err(e) => {
                self.report_error("Error adding student", &e);
                false
            }
        }
    }

    /// Create a student; on success the form is cleared and the list re-fetched
    pub fn add_student(&mut self, student: Student) {
        let api = Arc::clone(&self.api);
        tracing::info!(id = student.id, name = %student.name, "Adding student");
        self.dispatch(async move {
            ConsoleEvent::StudentCreated {
                result: api.create_student(&student).await,
            }
        });
    }

    /// Search using the console's own criterion and query buffers
    pub fn run_search(&mut self) -> bool {
        let query = self.search_query.clone();
        self.search_students(self.search_criterion, &query)
    }

    /// Look up a single student
    ///
    /// A blank value is a no-op. Returns whether a request was issued.
    pub fn search_students(&mut self, criterion: SearchCriterion, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        let seq = self.search_seq.next();
        let api = Arc::clone(&self.api);
        let value = value.to_string();
        tracing::debug!(seq, by = criterion.as_query(), value = %value, "Searching");
        self.dispatch(async move {
            ConsoleEvent::SearchCompleted {
                seq,
                result: api.search_students(criterion, &value).await,
            }
        });
        true
    }

    /// Update one field of a student from raw user input
    ///
    /// Returns false if the value could not be coerced and no request was sent.
    pub fn update_student_field(&mut self, id: i64, field: StudentField, raw: &str) -> bool {
        let value = match field.coerce(raw) {
            Ok(value) => value,
            Err(e) => {
                self.report_error("Error updating student", &e);
                return false;
            }
        };

        let patch = StudentPatch { field, value };
        let api = Arc::clone(&self.api);
        tracing::info!(id, field = field.as_str(), "Updating student");
        self.dispatch(async move {
            ConsoleEvent::StudentUpdated {
                result: api.update_student(id, &patch).await,
            }
        });
        true
    }

    /// Delete a student once `confirmer` agrees
    ///
    /// Returns whether the delete request was issued.
    pub fn delete_student<C>(&mut self, id: i64, name: &str, confirmer: &mut C) -> bool
    where
        C: Confirm + ?Sized,
    {
        if !confirmer.confirm(&delete_prompt(name)) {
            tracing::debug!(id, "Delete declined");
            return false;
        }

        let api = Arc::clone(&self.api);
        tracing::info!(id, name = %name, "Deleting student");
        self.dispatch(async move {
            ConsoleEvent::StudentDeleted {
                result: api.delete_student(id).await,
            }
        });
        true
    }

    /// Apply every response that has arrived and expire the status message
    ///
    /// Called once per frame from the UI thread.
    pub fn poll(&mut self, now: Instant) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
        self.clear_expired_status(now);
    }

    /// Wait until every outstanding request, including follow-up refreshes,
    /// has been applied
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.events_rx.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    /// Drop the status message once its display window has passed
    pub fn clear_expired_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    fn dispatch<F>(&mut self, task: F)
    where
        F: Future<Output = ConsoleEvent> + Send + 'static,
    {
        self.in_flight += 1;
        let events = self.events_tx.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            if events.send(event).is_err() {
                tracing::debug!("Console dropped before response arrived");
                return;
            }
            if let Some(repaint) = repaint {
                repaint();
            }
        });
    }

    fn apply(&mut self, event: ConsoleEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            ConsoleEvent::StudentsLoaded { seq, result } => {
                if !self.students_seq.is_latest(seq) {
                    let latest = self.students_seq.issued;
                    tracing::debug!(seq, latest, "Discarding stale student list");
                    return;
                }
                match result {
                    Ok(students) => {
                        tracing::debug!(count = students.len(), "Student list refreshed");
                        self.students = students;
                    }
                    Err(e) => self.report_error("Error fetching students", &e),
                }
            }
            ConsoleEvent::AnalyticsLoaded { seq, result } => {
                if !self.analytics_seq.is_latest(seq) {
                    let latest = self.analytics_seq.issued;
                    tracing::debug!(seq, latest, "Discarding stale analytics");
                    return;
                }
                match result {
                    Ok(AnalyticsOutcome::Summary(summary)) => {
                        self.analytics = AnalyticsState::Summary(summary);
                    }
                    Ok(AnalyticsOutcome::NoData(message)) => {
                        self.analytics = AnalyticsState::NoData(message);
                    }
                    Err(e) => self.report_error("Error fetching analytics", &e),
                }
            }
            ConsoleEvent::SearchCompleted { seq, result } => {
                if !self.search_seq.is_latest(seq) {
                    let latest = self.search_seq.issued;
                    tracing::debug!(seq, latest, "Discarding stale search");
                    return;
                }
                match result {
                    Ok(SearchOutcome::Found(student)) => self.search_result = Some(student),
                    Ok(SearchOutcome::NotFound(message)) => {
                        self.search_result = None;
                        self.post_status(message, Severity::Info);
                    }
                    Err(e) => self.report_error("Error searching", &e),
                }
            }
            ConsoleEvent::StudentCreated { result } => match result {
                Ok(()) => {
                    self.post_status("Student added successfully!", Severity::Success);
                    self.add_form.clear();
                    self.load_students();
                }
                Err(e) => self.report_error("Error adding student", &e),
            },
            ConsoleEvent::StudentUpdated { result } => match result {
                Ok(()) => {
                    self.post_status("Student updated successfully!", Severity::Success);
                    self.load_students();
                }
                Err(e) => self.report_error("Error updating student", &e),
            },
            ConsoleEvent::StudentDeleted { result } => match result {
                Ok(()) => {
                    self.post_status("Student deleted successfully!", Severity::Success);
                    self.load_students();
                }
                Err(e) => self.report_error("Error deleting student", &e),
            },
        }
    }

    fn post_status(&mut self, text: impl Into<String>, severity: Severity) {
        self.status = Some(StatusMessage::new(text, severity, Instant::now()));
    }

    fn report_error(&mut self, context: &str, error: &dyn Display) {
        tracing::warn!(error = %error, "{}", context);
        self.post_status(format!("{}: {}", context, error), Severity::Error);
    }
}
