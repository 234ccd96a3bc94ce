//! CLI configuration: thin wrapper around `studyrooms_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--server, --insecure, --timeout, --session-file) and fills `--output`
//! and `--color` from `[defaults]` when they were left alone.

use std::path::PathBuf;
use std::time::Duration;

use clap::parser::ValueSource;
use clap::{ArgMatches, ValueEnum};
use tracing::warn;

use studyrooms_core::{ClientConfig, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use studyrooms_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Matches the `--timeout` default in `cli.rs`.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Take `output` and `color` from the config file's `[defaults]` when
/// neither the flag nor its environment variable set them.
pub fn apply_defaults(global: &mut GlobalOpts, matches: &ArgMatches, defaults: &Defaults) {
    if left_default(matches, "output") {
        match OutputFormat::from_str(&defaults.output, true) {
            Ok(output) => global.output = output,
            Err(_) => warn!(value = %defaults.output, "ignoring unknown defaults.output"),
        }
    }
    if left_default(matches, "color") {
        match ColorMode::from_str(&defaults.color, true) {
            Ok(color) => global.color = color,
            Err(_) => warn!(value = %defaults.color, "ignoring unknown defaults.color"),
        }
    }
}

fn left_default(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.value_source(id), Some(ValueSource::DefaultValue) | None)
}

/// Session token location: `--session-file` / `STUDYROOMS_SESSION_FILE`,
/// else the profile's data file.
pub fn session_file(global: &GlobalOpts, profile_name: &str) -> PathBuf {
    global
        .session_file
        .clone()
        .unwrap_or_else(|| studyrooms_config::session_path(profile_name))
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut config = studyrooms_config::profile_to_client_config(profile, profile_name, defaults)?;

    if let Some(ref server) = global.server {
        config.url = studyrooms_config::parse_server_url(server)?;
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    // --timeout only wins when moved off its default.
    if global.timeout != DEFAULT_TIMEOUT_SECS {
        config.timeout = Duration::from_secs(global.timeout);
    }
    Ok(config)
}

/// Build the `ClientConfig` for this invocation, falling back to flags
/// alone when no profile exists.
pub fn build_client_config(global: &GlobalOpts) -> Result<(ClientConfig, String), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let config = resolve_profile(profile, &profile_name, &cfg.defaults, global)?;
        return Ok((config, profile_name));
    }

    if global.profile.is_some() {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;

    let mut config = ClientConfig::new(studyrooms_config::parse_server_url(server)?);
    config.timeout = Duration::from_secs(global.timeout);
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    // Flag-only use may still sign in automatically from the environment.
    let env_only = Profile::default();
    config.credentials = match studyrooms_config::resolve_credentials(&env_only, &profile_name) {
        Ok(credentials) => credentials,
        Err(studyrooms_config::ConfigError::NoCredentials { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    Ok((config, profile_name))
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, FromArgMatches};

    use super::*;
    use crate::cli::Cli;

    fn parse(args: &[&str]) -> (Cli, ArgMatches) {
        let matches = Cli::command()
            .try_get_matches_from(args)
            .expect("valid arguments");
        let cli = Cli::from_arg_matches(&matches).expect("valid arguments");
        (cli, matches)
    }

    fn defaults(output: &str, color: &str) -> Defaults {
        Defaults {
            output: output.into(),
            color: color.into(),
            ..Defaults::default()
        }
    }

    #[test]
    fn config_defaults_fill_untouched_flags() {
        if std::env::var_os("STUDYROOMS_OUTPUT").is_some() {
            return;
        }
        let (mut cli, matches) = parse(&["studyrooms", "status"]);
        apply_defaults(&mut cli.global, &matches, &defaults("json", "never"));
        assert!(matches!(cli.global.output, OutputFormat::Json));
        assert!(matches!(cli.global.color, ColorMode::Never));
    }

    #[test]
    fn explicit_flags_beat_config_defaults() {
        let (mut cli, matches) = parse(&["studyrooms", "status", "-o", "plain", "--color", "always"]);
        apply_defaults(&mut cli.global, &matches, &defaults("json", "never"));
        assert!(matches!(cli.global.output, OutputFormat::Plain));
        assert!(matches!(cli.global.color, ColorMode::Always));
    }

    #[test]
    fn unknown_default_keeps_builtin() {
        if std::env::var_os("STUDYROOMS_OUTPUT").is_some() {
            return;
        }
        let (mut cli, matches) = parse(&["studyrooms", "status"]);
        apply_defaults(&mut cli.global, &matches, &defaults("xml", "sometimes"));
        assert!(matches!(cli.global.output, OutputFormat::Table));
        assert!(matches!(cli.global.color, ColorMode::Auto));
    }
}
