//! Core record types for roster.
//!
//! This module defines the student record collected by the form and the
//! fixed set of courses a student can be enrolled in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A course offered on the form's course selector.
///
/// The serialized form matches the label shown to the user, so `BsCrim`
/// is stored as `"BS-CRIM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    /// Information Technology.
    #[serde(rename = "BSIT")]
    Bsit,
    /// Marine Engineering Technology.
    #[serde(rename = "BSMet")]
    BsMet,
    /// Criminology.
    #[serde(rename = "BS-CRIM")]
    BsCrim,
    /// Nursing.
    #[serde(rename = "BSN")]
    Bsn,
    /// Hospitality Management.
    #[serde(rename = "BSHM")]
    Bshm,
    /// Computer Science.
    #[serde(rename = "BSCS")]
    Bscs,
}

impl Course {
    /// Every course, in selector order.
    pub const ALL: [Course; 6] = [
        Self::Bsit,
        Self::BsMet,
        Self::BsCrim,
        Self::Bsn,
        Self::Bshm,
        Self::Bscs,
    ];

    /// Label shown on the selector for the "no course chosen" entry.
    pub const PLACEHOLDER: &'static str = "Select Course";

    /// The label used both on screen and in storage.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bsit => "BSIT",
            Self::BsMet => "BSMet",
            Self::BsCrim => "BS-CRIM",
            Self::Bsn => "BSN",
            Self::Bshm => "BSHM",
            Self::Bscs => "BSCS",
        }
    }

    /// Parse a selector value, where the empty string is the placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCourse`] if the value is neither empty nor a
    /// known course label.
    pub fn from_selection(value: &str) -> Result<Option<Self>, Error> {
        if value.is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Course {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|course| course.label() == s)
            .ok_or_else(|| Error::UnknownCourse(s.to_string()))
    }
}

/// One student entry collected by the form.
///
/// Records carry no identifier; a record is identified by its position in
/// the stored sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Enrolled course.
    pub course: Course,
    /// Login name. Not checked for uniqueness.
    pub username: String,
    /// Login password, kept in plaintext.
    pub password: String,
}

impl StudentRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        course: Course,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            course,
            username: username.into(),
            password: password.into(),
        }
    }

    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> StudentRecord {
        StudentRecord::new("Ana", "Cruz", Course::Bscs, "anac", "p1")
    }

    #[test]
    fn test_course_labels() {
        let labels: Vec<_> = Course::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["BSIT", "BSMet", "BS-CRIM", "BSN", "BSHM", "BSCS"]);
    }

    #[test]
    fn test_course_display_matches_label() {
        for course in Course::ALL {
            assert_eq!(course.to_string(), course.label());
        }
    }

    #[test]
    fn test_course_from_str() {
        assert_eq!("BS-CRIM".parse::<Course>().unwrap(), Course::BsCrim);
        assert_eq!("BSMet".parse::<Course>().unwrap(), Course::BsMet);
    }

    #[test]
    fn test_course_from_str_is_case_sensitive() {
        assert!("bscs".parse::<Course>().is_err());
        assert!("BSMET".parse::<Course>().is_err());
    }

    #[test]
    fn test_course_from_selection_placeholder() {
        assert_eq!(Course::from_selection("").unwrap(), None);
        assert_eq!(Course::from_selection("BSN").unwrap(), Some(Course::Bsn));
        assert!(Course::from_selection("Select Course").is_err());
    }

    #[test]
    fn test_course_serializes_as_label() {
        let json = serde_json::to_string(&Course::BsCrim).unwrap();
        assert_eq!(json, "\"BS-CRIM\"");
    }

    #[test]
    fn test_record_wire_format() {
        let value = serde_json::to_value(ana()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "firstName": "Ana",
                "lastName": "Cruz",
                "course": "BSCS",
                "username": "anac",
                "password": "p1",
            })
        );
    }

    #[test]
    fn test_record_reads_existing_storage_value() {
        let raw = r#"{"firstName":"Ben","lastName":"Reyes","course":"BSMet","username":"benr","password":"pw"}"#;
        let record: StudentRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.course, Course::BsMet);
        assert_eq!(record.username, "benr");
    }

    #[test]
    fn test_record_rejects_unknown_course() {
        let raw = r#"{"firstName":"A","lastName":"B","course":"BSXYZ","username":"u","password":"p"}"#;
        assert!(serde_json::from_str::<StudentRecord>(raw).is_err());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(ana().full_name(), "Ana Cruz");
    }
}
