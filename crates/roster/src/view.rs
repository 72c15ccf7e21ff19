//! Text rendering of the screen.
//!
//! Every function returns a `String` so the shell and the one-shot CLI
//! commands print the same thing.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::form::{Field, Form};
use crate::notice::Notice;
use crate::record::{Course, StudentRecord};
use crate::screen::{Overlay, Screen};
use crate::storage::KeyValueStore;

/// Title above the form.
pub const FORM_TITLE: &str = "Student Form";

/// Title above the detail view.
pub const DETAIL_TITLE: &str = "Student Information";

/// Column headings of the student list.
pub const LIST_HEADER: [&str; 4] = ["No.", "Full Name", "Course", "Username"];

/// Render the form with placeholders for empty fields.
///
/// The password is shown as one `*` per character.
#[must_use]
pub fn render_form(form: &Form) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{FORM_TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(FORM_TITLE.len()));

    for field in Field::ALL {
        let value = match field {
            Field::FirstName => form.first_name.clone(),
            Field::LastName => form.last_name.clone(),
            Field::Course => form.course.map(|c| c.label().to_string()).unwrap_or_default(),
            Field::Username => form.username.clone(),
            Field::Password => "*".repeat(form.password.chars().count()),
        };
        let shown = if value.is_empty() {
            format!("<{}>", field.placeholder())
        } else {
            value
        };
        let _ = writeln!(out, "  {:<11} {}", format!("{}:", label(field)), shown);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  [Add Student]  [View Student List]");
    out
}

fn label(field: Field) -> &'static str {
    match field {
        Field::FirstName => "First name",
        Field::LastName => "Last name",
        Field::Course => "Course",
        Field::Username => "Username",
        Field::Password => "Password",
    }
}

/// Render the course selector options, placeholder first.
#[must_use]
pub fn render_courses() -> String {
    let mut out = format!("  {} (none)\n", Course::PLACEHOLDER);
    for course in Course::ALL {
        let _ = writeln!(out, "  {course}");
    }
    out
}

/// Render the student list as a table with 1-based row numbers.
#[must_use]
pub fn render_list(records: &[StudentRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(LIST_HEADER.to_vec());

    for (index, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(record.full_name()),
            Cell::new(record.course),
            Cell::new(&record.username),
        ]);
    }

    table.to_string()
}

/// Render the student list as one tab-separated line per row.
#[must_use]
pub fn render_list_plain(records: &[StudentRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "{}\t{}\t{}\t{}\n",
                index + 1,
                record.full_name(),
                record.course,
                record.username
            )
        })
        .collect()
}

/// Render every field of one record, password included.
#[must_use]
pub fn render_detail(record: &StudentRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{DETAIL_TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(DETAIL_TITLE.len()));
    let _ = writeln!(out, "Name: {}", record.full_name());
    let _ = writeln!(out, "Course: {}", record.course);
    let _ = writeln!(out, "Username: {}", record.username);
    let _ = writeln!(out, "Password: {}", record.password);
    out
}

/// Render a notice as a single bracketed line.
#[must_use]
pub fn render_notice(notice: &Notice) -> String {
    format!("[ {} ]\n", notice.message)
}

/// Render whatever the screen currently shows at `now`.
#[must_use]
pub fn render_screen<S: KeyValueStore>(screen: &Screen<S>, now: DateTime<Utc>) -> String {
    let mut out = match (screen.overlay(), screen.selected()) {
        (Overlay::Detail, Some(record)) => render_detail(record),
        (Overlay::List | Overlay::Detail, _) => {
            if screen.records().is_empty() {
                format!("{}\n(no students yet)\n", render_list(&[]))
            } else {
                format!("{}\n", render_list(screen.records()))
            }
        }
        (Overlay::None, _) => render_form(screen.form()),
    };

    if let Some(notice) = screen.notice(now) {
        out.push_str(&render_notice(notice));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{NoticeKind, SUCCESS_MESSAGE};

    fn ana() -> StudentRecord {
        StudentRecord::new("Ana", "Cruz", Course::Bscs, "anac", "p1")
    }

    #[test]
    fn test_render_form_shows_placeholders() {
        let out = render_form(&Form::new());
        assert!(out.starts_with(FORM_TITLE));
        assert!(out.contains("<First Name>"));
        assert!(out.contains("<Select Course>"));
        assert!(out.contains("<Password>"));
    }

    #[test]
    fn test_render_form_masks_password() {
        let mut form = Form::new();
        form.set_text(Field::Password, "secret");
        form.select_course(Some(Course::BsCrim));

        let out = render_form(&form);
        assert!(out.contains("******"));
        assert!(!out.contains("secret"));
        assert!(out.contains("BS-CRIM"));
    }

    #[test]
    fn test_render_courses_lists_all() {
        let out = render_courses();
        assert!(out.contains(Course::PLACEHOLDER));
        for course in Course::ALL {
            assert!(out.contains(course.label()));
        }
    }

    #[test]
    fn test_render_list_rows() {
        let other = StudentRecord::new("Ben", "Reyes", Course::Bsn, "benr", "p2");
        let out = render_list(&[ana(), other]);

        for heading in LIST_HEADER {
            assert!(out.contains(heading));
        }
        assert!(out.contains("Ana Cruz"));
        assert!(out.contains("Ben Reyes"));
        assert!(out.contains("benr"));
        assert!(!out.contains("p1"));
    }

    #[test]
    fn test_render_list_plain() {
        let out = render_list_plain(&[ana()]);
        assert_eq!(out, "1\tAna Cruz\tBSCS\tanac\n");
    }

    #[test]
    fn test_render_detail_shows_plaintext_password() {
        let out = render_detail(&ana());
        assert!(out.contains("Name: Ana Cruz"));
        assert!(out.contains("Course: BSCS"));
        assert!(out.contains("Username: anac"));
        assert!(out.contains("Password: p1"));
    }

    #[test]
    fn test_render_notice() {
        let now = Utc::now();
        let notice = Notice::new(
            NoticeKind::Success,
            SUCCESS_MESSAGE,
            now,
            chrono::Duration::seconds(3),
        );
        assert_eq!(render_notice(&notice), "[ Data added successfully! ]\n");
    }
}
