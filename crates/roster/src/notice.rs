//! Transient notices shown under the form.
//!
//! A notice is a message with an expiry time. Nothing clears it in the
//! background; readers ask whether it is still visible at a given instant.

use chrono::{DateTime, Duration, Utc};

/// Message shown after a record is stored.
pub const SUCCESS_MESSAGE: &str = "Data added successfully!";

/// Message shown when a submission is missing a field.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

/// How long a notice stays up unless configured otherwise.
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 3000;

/// What a notice is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The last action succeeded.
    Success,
    /// The last action was rejected.
    Error,
}

/// A message that disappears after its expiry time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Kind of the notice.
    pub kind: NoticeKind,
    /// Text to show.
    pub message: String,
    /// First instant at which the notice is no longer shown.
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    /// Create a notice shown from `now` for `ttl`.
    #[must_use]
    pub fn new(
        kind: NoticeKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Whether the notice is still shown at `now`.
    #[must_use]
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// The inline notice area. Holds at most one notice.
///
/// Showing a new notice replaces the old one, along with its expiry.
#[derive(Debug, Clone)]
pub struct NoticeArea {
    current: Option<Notice>,
    ttl: Duration,
}

impl Default for NoticeArea {
    fn default() -> Self {
        Self::new(std::time::Duration::from_millis(DEFAULT_NOTICE_DURATION_MS))
    }
}

impl NoticeArea {
    /// Create an empty area whose notices last `ttl`.
    #[must_use]
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            current: None,
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    /// How long each notice stays visible.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Show `message` starting at `now`.
    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>, now: DateTime<Utc>) {
        self.current = Some(Notice::new(kind, message, now, self.ttl));
    }

    /// The notice visible at `now`, if any.
    #[must_use]
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| notice.is_visible(now))
    }

    /// Drop the notice if it has expired by `now`.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if self.current.as_ref().is_some_and(|n| !n.is_visible(now)) {
            self.current = None;
        }
    }

    /// Remove any notice immediately.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
