//! Line-driven front end for the screen.
//!
//! Each input line is one user action (typing into a field, pressing a
//! button, tapping a row). After every action the screen is re-rendered.

use std::io::Write;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::Result;
use crate::form::Field;
use crate::record::Course;
use crate::screen::Screen;
use crate::storage::KeyValueStore;
use crate::view;

/// Help text listing every shell command.
pub const HELP: &str = "\
Commands:
  first <name>        set the first name
  last <name>         set the last name
  course <label>      choose a course (`course` alone selects none)
  username <name>     set the username
  password            set the password at a hidden prompt
  password <secret>   set the password from the line itself
  blank <field>       empty a text field (first, last, username, password)
  courses             list the available courses
  add                 Add Student
  list                View Student List
  open <N>            show details for row N of the list
  close               close the detail view or the list
  form                redraw the screen
  help                show this help
  quit                leave
";

/// Prompt shown when reading the password without echo.
pub const PASSWORD_PROMPT: &str = "Password: ";

/// A line the shell could not understand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command '{0}' (type `help` for a list)")]
    Unknown(String),
    /// A command that needs an argument got none.
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    /// The row argument is not a positive number.
    #[error("'{0}' is not a row number")]
    InvalidRow(String),
    /// The course label is not one of the offered courses.
    #[error("unknown course '{0}' (type `courses` for a list)")]
    UnknownCourse(String),
    /// `blank` was given something other than a text field.
    #[error("unknown field '{0}' (first, last, username or password)")]
    UnknownField(String),
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Replace the text of a text field.
    Edit(Field, String),
    /// Read the password without echoing it.
    PromptPassword,
    /// Choose a course or the placeholder.
    SelectCourse(Option<Course>),
    /// Show the course options.
    Courses,
    /// Press "Add Student".
    Add,
    /// Press "View Student List".
    List,
    /// Tap a row, 1-based as displayed.
    Open(usize),
    /// Close the top overlay.
    Close,
    /// Redraw.
    Redraw,
    /// Show help.
    Help,
    /// Leave the shell.
    Quit,
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let edit = |field| -> std::result::Result<Self, CommandError> {
            Ok(Self::Edit(field, rest.to_string()))
        };

        match word {
            "first" => edit(Field::FirstName),
            "last" => edit(Field::LastName),
            "username" => edit(Field::Username),
            "password" if rest.is_empty() => Ok(Self::PromptPassword),
            "password" => edit(Field::Password),
            "blank" => {
                let field = match rest.trim() {
                    "" => return Err(CommandError::MissingArgument("blank")),
                    "first" => Field::FirstName,
                    "last" => Field::LastName,
                    "username" => Field::Username,
                    "password" => Field::Password,
                    other => return Err(CommandError::UnknownField(other.to_string())),
                };
                Ok(Self::Edit(field, String::new()))
            }
            "course" => Course::from_selection(rest.trim())
                .map(Self::SelectCourse)
                .map_err(|_| CommandError::UnknownCourse(rest.trim().to_string())),
            "courses" => Ok(Self::Courses),
            "add" => Ok(Self::Add),
            "list" => Ok(Self::List),
            "open" => {
                let arg = rest.trim();
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("open"));
                }
                match arg.parse::<usize>() {
                    Ok(row) if row > 0 => Ok(Self::Open(row)),
                    _ => Err(CommandError::InvalidRow(arg.to_string())),
                }
            }
            "close" | "back" => Ok(Self::Close),
            "form" => Ok(Self::Redraw),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Apply one command to the screen and return any extra text to print
/// before the screen is redrawn.
///
/// `read_secret` is called with a prompt for [`ShellCommand::PromptPassword`]
/// and must read a line without echoing it.
pub async fn apply<S, F>(
    screen: &mut Screen<S>,
    command: ShellCommand,
    now: DateTime<Utc>,
    read_secret: &mut F,
) -> Option<String>
where
    S: KeyValueStore,
    F: FnMut(&str) -> std::io::Result<String>,
{
    match command {
        ShellCommand::Edit(field, value) => screen.edit(field, value),
        ShellCommand::PromptPassword => match read_secret(PASSWORD_PROMPT) {
            Ok(secret) => screen.edit(Field::Password, secret),
            Err(e) => return Some(format!("Could not read password: {e}\n")),
        },
        ShellCommand::SelectCourse(course) => screen.select_course(course),
        ShellCommand::Courses => return Some(view::render_courses()),
        ShellCommand::Add => {
            screen.submit(now).await;
        }
        ShellCommand::List => screen.open_list().await,
        ShellCommand::Open(row) => {
            let selected = row.checked_sub(1).and_then(|index| screen.select_row(index));
            if selected.is_none() {
                return Some(format!("No student at row {row}\n"));
            }
        }
        ShellCommand::Close => screen.close(),
        ShellCommand::Help => return Some(HELP.to_string()),
        ShellCommand::Redraw | ShellCommand::Quit => {}
    }
    None
}

/// Run the shell until `quit` or end of input.
///
/// Hidden password entry goes through `read_secret`, not `input`.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub async fn run<S, R, W, F>(
    screen: &mut Screen<S>,
    input: R,
    out: &mut W,
    mut read_secret: F,
) -> Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: Write,
    F: FnMut(&str) -> std::io::Result<String>,
{
    screen.mount().await;
    write!(out, "{}", view::render_screen(screen, Utc::now()))?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let now = Utc::now();
        screen.tick(now);

        match line.trim_start().parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => {
                if let Some(text) = apply(screen, command, now, &mut read_secret).await {
                    write!(out, "{text}")?;
                }
                write!(out, "{}", view::render_screen(screen, now))?;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    writeln!(out)?;
    Ok(())
}
