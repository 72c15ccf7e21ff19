//! The single application screen.
//!
//! [`Screen`] owns every piece of transient UI state: the form, the cached
//! record list, which overlay is open and the notice area. The record store
//! is injected; the screen never holds global state.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::form::{Field, Form, ValidationError};
use crate::notice::{Notice, NoticeArea, NoticeKind, MISSING_FIELDS_MESSAGE, SUCCESS_MESSAGE};
use crate::record::{Course, StudentRecord};
use crate::storage::KeyValueStore;
use crate::store::{RecordSequence, RecordStore};

/// Where the form is in its edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing typed since the last submit.
    #[default]
    Idle,
    /// At least one field has been edited.
    Filling,
    /// A submission is being written.
    Submitting,
}

/// Which full-screen overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    /// Just the form.
    #[default]
    None,
    /// The student list.
    List,
    /// Details for one student, on top of the list.
    Detail,
}

/// Result of pressing "Add Student".
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The record was stored; holds the new sequence length.
    Added(usize),
    /// A field was empty; nothing was stored.
    Rejected(ValidationError),
    /// Storage failed; the error was logged.
    Failed,
}

/// Screen state plus the store it writes to.
#[derive(Debug)]
pub struct Screen<S> {
    store: RecordStore<S>,
    form: Form,
    records: RecordSequence,
    phase: Phase,
    overlay: Overlay,
    selected: Option<StudentRecord>,
    notices: NoticeArea,
}

impl<S: KeyValueStore> Screen<S> {
    /// Create a screen over `store` whose notices last `notice_duration`.
    #[must_use]
    pub fn new(store: RecordStore<S>, notice_duration: std::time::Duration) -> Self {
        Self {
            store,
            form: Form::new(),
            records: Vec::new(),
            phase: Phase::Idle,
            overlay: Overlay::None,
            selected: None,
            notices: NoticeArea::new(notice_duration),
        }
    }

    /// Populate the cached list from storage. Call once when the screen
    /// first appears.
    pub async fn mount(&mut self) {
        self.records = self.store.read_all().await;
        debug!("Mounted with {} records", self.records.len());
    }

    /// The record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// Current form values.
    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// The cached records last read or written.
    #[must_use]
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Current form phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current overlay.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// The record shown in the detail overlay.
    #[must_use]
    pub fn selected(&self) -> Option<&StudentRecord> {
        self.selected.as_ref()
    }

    /// The notice visible at `now`.
    #[must_use]
    pub fn notice(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notices.visible(now)
    }

    /// Drop any notice that has expired by `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.notices.expire(now);
    }

    /// Type into a text field.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_text(field, value);
        self.phase = Phase::Filling;
    }

    /// Replace every field at once.
    pub fn set_form(&mut self, form: Form) {
        self.form = form;
        self.phase = Phase::Filling;
    }

    /// Pick a course, or the placeholder with `None`.
    pub fn select_course(&mut self, course: Option<Course>) {
        self.form.select_course(course);
        self.phase = Phase::Filling;
    }

    /// Press "Add Student".
    ///
    /// A complete form is appended to the store, then the form is cleared.
    /// The list is refreshed and closed and a success notice is shown, but
    /// only if the write went through. An incomplete form only shows the
    /// "fill in all fields" notice.
    pub async fn submit(&mut self, now: DateTime<Utc>) -> SubmitOutcome {
        let record = match self.form.to_record() {
            Ok(record) => record,
            Err(e) => {
                self.notices
                    .show(NoticeKind::Error, MISSING_FIELDS_MESSAGE, now);
                self.phase = Phase::Idle;
                return SubmitOutcome::Rejected(e);
            }
        };

        self.phase = Phase::Submitting;
        let result = self.store.append(record).await;
        self.form.clear();
        self.phase = Phase::Idle;

        match result {
            Ok(records) => {
                let len = records.len();
                self.records = records;
                self.overlay = Overlay::None;
                self.selected = None;
                self.notices.show(NoticeKind::Success, SUCCESS_MESSAGE, now);
                info!("Stored student record #{}", len);
                SubmitOutcome::Added(len)
            }
            Err(e) => {
                error!("Error storing student data: {}", e);
                SubmitOutcome::Failed
            }
        }
    }

    /// Press "View Student List". Always re-reads storage.
    pub async fn open_list(&mut self) {
        self.records = self.store.read_all().await;
        self.selected = None;
        self.overlay = Overlay::List;
    }

    /// Select row `index` (0-based) of the displayed list.
    ///
    /// Returns the record now shown in the detail overlay, or `None` if the
    /// list isn't open or the index is past the end.
    pub fn select_row(&mut self, index: usize) -> Option<&StudentRecord> {
        if self.overlay == Overlay::None {
            debug!("Ignoring row selection while the list is closed");
            return None;
        }
        let Some(record) = self.records.get(index) else {
            debug!(
                "Ignoring selection of row {} (list has {})",
                index,
                self.records.len()
            );
            return None;
        };

        self.selected = Some(record.clone());
        self.overlay = Overlay::Detail;
        self.selected.as_ref()
    }

    /// Close the top overlay: detail returns to the list, the list returns
    /// to the form.
    pub fn close(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Detail => {
                self.selected = None;
                Overlay::List
            }
            Overlay::List | Overlay::None => Overlay::None,
        };
    }
}
