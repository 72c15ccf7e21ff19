//! `roster` - CLI for the student form
//!
//! This binary opens the configured key-value store and either runs the
//! interactive screen or performs one screen action and exits.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use roster::cli::{
    AddCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat, ShowCommand,
};
use roster::screen::SubmitOutcome;
use roster::storage::{KeyValueStore, SqliteStore};
use roster::{init_logging, shell, view, Config, RecordStore, Screen};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Shell => {
            let mut screen = open_screen(&config)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(&mut screen, stdin, &mut std::io::stdout(), |prompt: &str| {
                rpassword::prompt_password(prompt)
            })
            .await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Add(add_cmd) => handle_add(&config, &add_cmd).await,
        Command::List(list_cmd) => handle_list(&config, &list_cmd).await,
        Command::Show(show_cmd) => handle_show(&config, &show_cmd).await,
        Command::Clear(clear_cmd) => {
            if !clear_cmd.yes {
                println!("This will delete every stored student.");
                println!("Use --yes to confirm.");
                return Ok(ExitCode::FAILURE);
            }
            open_store(&config)?.clear().await?;
            println!("Student data cleared.");
            Ok(ExitCode::SUCCESS)
        }
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json).await,
    }
}

fn open_store(config: &Config) -> Result<RecordStore<SqliteStore>> {
    let path = config.database_path();
    let backend = SqliteStore::open(&path)
        .with_context(|| format!("opening storage at {}", path.display()))?;
    Ok(RecordStore::with_key(
        backend,
        config.storage.slot_key.clone(),
    ))
}

fn open_screen(config: &Config) -> Result<Screen<SqliteStore>> {
    Ok(Screen::new(open_store(config)?, config.notice_duration()))
}

async fn handle_add(config: &Config, cmd: &AddCommand) -> Result<ExitCode> {
    let mut screen = open_screen(config)?;
    screen.set_form(cmd.to_form());

    let now = Utc::now();
    let outcome = screen.submit(now).await;
    if let Some(notice) = screen.notice(now) {
        print!("{}", view::render_notice(notice));
    }

    Ok(match outcome {
        SubmitOutcome::Added(count) => {
            println!("{count} students stored.");
            ExitCode::SUCCESS
        }
        SubmitOutcome::Rejected(_) | SubmitOutcome::Failed => ExitCode::FAILURE,
    })
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> Result<ExitCode> {
    let records = open_store(config)?.read_all().await;

    match cmd.format {
        OutputFormat::Table => println!("{}", view::render_list(&records)),
        OutputFormat::Plain => print!("{}", view::render_list_plain(&records)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<ExitCode> {
    let records = open_store(config)?.read_all().await;
    let row = usize::try_from(cmd.row).unwrap_or(usize::MAX);

    let Some(record) = row.checked_sub(1).and_then(|index| records.get(index)) else {
        let err = roster::Error::RowOutOfRange {
            row,
            len: records.len(),
        };
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print!("{}", view::render_detail(record));
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_status(config: &Config, json: bool) -> Result<ExitCode> {
    let store = open_store(config)?;
    let records = store.try_read_all().await;
    let keys = store.backend().all_keys().await?;
    let stats = store.backend().stats().await?;

    let (record_count, readable) = match &records {
        Ok(records) => (records.len(), true),
        Err(_) => (0, false),
    };

    if json {
        let status = serde_json::json!({
            "database_path": store.backend().path(),
            "slot_key": store.key(),
            "slot_present": keys.iter().any(|k| k == store.key()),
            "slot_readable": readable,
            "students": record_count,
            "keys": keys,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        let mut out = std::io::stdout().lock();
        writeln!(out, "roster status")?;
        writeln!(out, "-------------")?;
        writeln!(out, "Database:      {}", store.backend().path().display())?;
        writeln!(out, "Slot:          {}", store.key())?;
        writeln!(out, "Students:      {record_count}")?;
        if let Err(e) = records {
            writeln!(out, "Slot content:  unreadable ({e})")?;
        }
        writeln!(out, "Keys:          {}", stats.total_keys)?;
        writeln!(out, "Size:          {} bytes", stats.db_size_bytes)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.storage.slot_key);
                println!();
                println!("[UI]");
                println!("  Notice duration:    {} ms", config.ui.notice_duration_ms);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
