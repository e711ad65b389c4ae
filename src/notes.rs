// File: src/notes.rs
//! Turns capture records into notes: intention notes with frontmatter, and
//! timestamped entries in a per-day log file.
use crate::config::Config;
use crate::model::CaptureRecord;
use crate::vault::{Properties, Vault};
use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveDate, Utc};

pub const STAGE_CREATED: &str = "created";

fn vault_join(folder: &str, name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// `<unix millis>-intention-<text>.md`, with every whitespace character
/// turned into `-`.
pub fn intention_file_name(text: &str, now: DateTime<Local>) -> String {
    let slug: String = format!("intention {}", text)
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("{}-{}.md", now.timestamp_millis(), slug)
}

pub fn intention_properties(
    statement: &str,
    date: NaiveDate,
    tags: Option<&[String]>,
) -> Properties {
    let mut props = Properties::new()
        .with("intention date", date)
        .with("intention statement", statement)
        .with("Stage", STAGE_CREATED);
    if let Some(tags) = tags {
        props.insert("tags", tags.to_vec());
    }
    props
}

fn write_intention(
    vault: &dyn Vault,
    config: &Config,
    statement: &str,
    date: NaiveDate,
    tags: Option<&[String]>,
    now: DateTime<Local>,
) -> Result<String> {
    if config.intention_path.is_empty() {
        bail!("No intention path defined");
    }
    vault.ensure_folder(&config.intention_path)?;

    let file_name = intention_file_name(statement, now);
    let path = vault_join(&config.intention_path, &file_name);
    let props = intention_properties(statement, date, tags);
    vault.create_note(&path, statement, Some(&props))?;

    log::info!("Created intention '{}'", path);
    Ok(file_name)
}

/// Create an intention note from a committed capture. Returns the file name.
///
/// Without a recognized date the intention is dated today.
pub fn create_intention(
    vault: &dyn Vault,
    config: &Config,
    record: &CaptureRecord,
    now: DateTime<Local>,
) -> Result<String> {
    let date = record.date.unwrap_or_else(|| now.date_naive());
    write_intention(
        vault,
        config,
        &record.description,
        date,
        Some(record.tags.as_slice()),
        now,
    )
}

/// Create an intention from selected text and return the wiki link that
/// should replace the selection.
pub fn create_intention_from_selection(
    vault: &dyn Vault,
    config: &Config,
    selection: &str,
    now: DateTime<Local>,
) -> Result<String> {
    let file_name = write_intention(vault, config, selection, now.date_naive(), None, now)?;
    Ok(format!("[[{}|{}]]", file_name, selection))
}

/// Log files are named after the UTC date, headings use the local one.
pub fn daily_log_file_name(now: DateTime<Local>) -> String {
    format!("daily-log-{}.md", now.with_timezone(&Utc).format("%Y-%m-%d"))
}

pub fn daily_log_heading(now: DateTime<Local>) -> String {
    format!("# Daily Log {}\n", now.format("%d/%m/%Y"))
}

pub fn daily_log_entry(text: &str, now: DateTime<Local>) -> String {
    format!("\n## {}\n {}", now.format("%d/%m/%Y, %H:%M:%S"), text)
}

/// Append a timestamped entry to today's log, creating the file (and its
/// folder) on first use. Returns the vault path of the log.
pub fn append_daily_log(
    vault: &dyn Vault,
    config: &Config,
    text: &str,
    now: DateTime<Local>,
) -> Result<String> {
    if !config.daily_log_path.is_empty() {
        vault.ensure_folder(&config.daily_log_path)?;
    }

    let path = vault_join(&config.daily_log_path, &daily_log_file_name(now));
    if !vault.file_exists(&path) {
        vault.create_note(&path, &daily_log_heading(now), None)?;
    }
    vault.append(&path, &daily_log_entry(text, now))?;

    log::info!("Log appended to '{}'", path);
    Ok(path)
}
