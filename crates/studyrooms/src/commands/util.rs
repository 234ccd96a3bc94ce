//! Shared helpers for command handlers.

use std::future::Future;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use studyrooms_core::CoreError;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the action is refused rather than
/// silently confirmed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Run `fut` behind a spinner on stderr (interactive, non-quiet only).
pub async fn with_spinner<F: Future>(global: &GlobalOpts, message: &str, fut: F) -> F::Output {
    let spinner = (!global.quiet && io::stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_owned());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });
    let out = fut.await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    out
}

/// Unwrap the list reloaded after a change, warning when the reload failed.
/// The change itself has already gone through at this point.
pub fn reloaded<L>(global: &GlobalOpts, list: Result<L, CoreError>) -> Option<L> {
    match list {
        Ok(list) => Some(list),
        Err(e) => {
            output::warning(global, &format!("Could not reload the list: {e}"));
            None
        }
    }
}

// ── Argument parsing ────────────────────────────────────────────────

/// `YYYY-MM-DD`, `today` or `tomorrow`.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    let today = Local::now().date_naive();
    match raw.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => today.succ_opt().ok_or_else(|| CliError::Validation {
            field: field.into(),
            reason: "date out of range".into(),
        }),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| CliError::Validation {
            field: field.into(),
            reason: format!("expected YYYY-MM-DD, got '{raw}'"),
        }),
    }
}

pub fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CliError> {
    raw.map(|r| parse_date(field, r)).transpose()
}

/// `HH:MM` or `HH:MM:SS`.
pub fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, CliError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| CliError::Validation {
            field: field.into(),
            reason: format!("expected HH:MM, got '{raw}'"),
        })
}

pub fn parse_optional_time(field: &str, raw: Option<&str>) -> Result<Option<NaiveTime>, CliError> {
    raw.map(|r| parse_time(field, r)).transpose()
}

/// `YYYY-MM-DDTHH:MM[:SS]` (a space instead of `T` is accepted).
pub fn parse_datetime(field: &str, raw: &str) -> Result<NaiveDateTime, CliError> {
    let normalized = raw.trim().replacen(' ', "T", 1);
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| CliError::Validation {
            field: field.into(),
            reason: format!("expected YYYY-MM-DDTHH:MM, got '{raw}'"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        assert_eq!(
            parse_date("date", "2026-10-20").ok(),
            NaiveDate::from_ymd_opt(2026, 10, 20)
        );
        assert_eq!(parse_date("date", "Today").ok(), Some(Local::now().date_naive()));
        assert!(matches!(
            parse_date("date", "20/10/2026"),
            Err(CliError::Validation { .. })
        ));
        assert_eq!(parse_optional_date("date", None).ok(), Some(None));
    }

    #[test]
    fn times_accept_minutes_and_seconds() {
        assert_eq!(parse_time("start", "09:30").ok(), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(
            parse_time("start", "23:00:00").ok(),
            NaiveTime::from_hms_opt(23, 0, 0)
        );
        assert!(parse_time("start", "25:00").is_err());
    }

    #[test]
    fn datetimes() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 20)
            .and_then(|d| d.and_hms_opt(14, 0, 0));
        assert_eq!(parse_datetime("at", "2026-10-20T14:00").ok(), expected);
        assert_eq!(parse_datetime("at", "2026-10-20 14:00").ok(), expected);
        assert!(parse_datetime("at", "tomorrow").is_err());
    }
}
