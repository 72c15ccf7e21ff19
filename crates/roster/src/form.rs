//! The student form.
//!
//! Holds the five input fields between keystrokes and turns them into a
//! [`StudentRecord`] once every field has a value.

use thiserror::Error;

use crate::record::{Course, StudentRecord};

/// One input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// First name text field.
    FirstName,
    /// Last name text field.
    LastName,
    /// Course selector.
    Course,
    /// Username text field.
    Username,
    /// Password text field (obscured on screen).
    Password,
}

impl Field {
    /// Every field, in on-screen order.
    pub const ALL: [Field; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Course,
        Self::Username,
        Self::Password,
    ];

    /// Placeholder text shown while the field is empty.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Course => Course::PLACEHOLDER,
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.placeholder())
    }
}

/// A submission was missing one or more fields.
///
/// The user only ever sees the generic "fill in all fields" notice; the
/// list of fields is kept for callers that want it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    /// Fields that were empty, in on-screen order.
    pub missing: Vec<Field>,
}

/// Transient form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    /// First name as typed.
    pub first_name: String,
    /// Last name as typed.
    pub last_name: String,
    /// Selected course; `None` is the placeholder entry.
    pub course: Option<Course>,
    /// Username as typed.
    pub username: String,
    /// Password as typed.
    pub password: String,
}

impl Form {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text of a text field.
    ///
    /// Setting [`Field::Course`] this way is ignored; use
    /// [`Form::select_course`].
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Username => self.username = value,
            Field::Password => self.password = value,
            Field::Course => {}
        }
    }

    /// Choose a course, or the placeholder with `None`.
    pub fn select_course(&mut self, course: Option<Course>) {
        self.course = course;
    }

    /// Whether every field is still blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Fields that are currently empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| match field {
                Field::FirstName => self.first_name.is_empty(),
                Field::LastName => self.last_name.is_empty(),
                Field::Course => self.course.is_none(),
                Field::Username => self.username.is_empty(),
                Field::Password => self.password.is_empty(),
            })
            .collect()
    }

    /// Build a record from the current values.
    ///
    /// Only emptiness is checked. Whitespace, length, duplicate usernames
    /// and password strength are all accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every empty field.
    pub fn to_record(&self) -> Result<StudentRecord, ValidationError> {
        let missing = self.missing_fields();
        match self.course {
            Some(course) if missing.is_empty() => Ok(StudentRecord::new(
                self.first_name.clone(),
                self.last_name.clone(),
                course,
                self.username.clone(),
                self.password.clone(),
            )),
            _ => Err(ValidationError { missing }),
        }
    }

    /// Reset every field to blank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Form {
        Form {
            first_name: "Ana".to_string(),
            last_name: "Cruz".to_string(),
            course: Some(Course::Bscs),
            username: "anac".to_string(),
            password: "p1".to_string(),
        }
    }

    #[test]
    fn test_new_form_is_blank() {
        let form = Form::new();
        assert!(form.is_blank());
        assert_eq!(form.missing_fields(), Field::ALL.to_vec());
    }

    #[test]
    fn test_to_record_when_complete() {
        let record = filled().to_record().unwrap();
        assert_eq!(
            record,
            StudentRecord::new("Ana", "Cruz", Course::Bscs, "anac", "p1")
        );
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for field in Field::ALL {
            let mut form = filled();
            match field {
                Field::Course => form.select_course(None),
                other => form.set_text(other, ""),
            }

            let err = form.to_record().unwrap_err();
            assert_eq!(err.missing, vec![field], "field {field:?}");
        }
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        let mut form = filled();
        form.set_text(Field::FirstName, " ");
        assert!(form.to_record().is_ok());
    }

    #[test]
    fn test_set_text_ignores_course() {
        let mut form = Form::new();
        form.set_text(Field::Course, "BSCS");
        assert_eq!(form.course, None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut form = filled();
        form.clear();
        assert!(form.is_blank());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            missing: vec![Field::LastName, Field::Course],
        };
        assert_eq!(
            err.to_string(),
            "missing required fields: Last Name, Select Course"
        );
    }

    #[test]
    fn test_field_placeholders() {
        assert_eq!(Field::FirstName.placeholder(), "First Name");
        assert_eq!(Field::Course.placeholder(), "Select Course");
        assert_eq!(Field::Password.to_string(), "Password");
    }
}
