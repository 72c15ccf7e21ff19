//! `roster` - A single-screen student record form
//!
//! This library provides the form, the record store over a single key-value
//! slot, and the screen state that ties them to a list and detail view.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod notice;
pub mod record;
pub mod screen;
pub mod shell;
pub mod storage;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::{Error, Result};
pub use form::{Field, Form, ValidationError};
pub use logging::init_logging;
pub use notice::{Notice, NoticeKind};
pub use record::{Course, StudentRecord};
pub use screen::{Overlay, Phase, Screen, SubmitOutcome};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::{RecordSequence, RecordStore};
