//! Session command handlers: login, logout, status, register.

use dialoguer::Input;
use secrecy::SecretString;
use serde::Serialize;

use studyrooms_core::{Portal, Registration, Role};

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct SessionReport {
    profile: String,
    server: String,
    session_file: String,
    signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spaces: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reservations: Option<usize>,
}

fn session_detail(r: &SessionReport) -> String {
    let mut lines = vec![
        format!("Profile:      {}", r.profile),
        format!("Server:       {}", r.server),
        format!("Session file: {}", r.session_file),
    ];
    if r.signed_in {
        let role = r.role.as_deref().unwrap_or("unknown");
        lines.push(format!("Token ready ({role})"));
        if let (Some(spaces), Some(reservations)) = (r.spaces, r.reservations) {
            lines.push(format!("{spaces} spaces, {reservations} reservations"));
        }
    } else {
        lines.push("No token".into());
    }
    lines.join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(
    portal: &Portal,
    args: LoginArgs,
    global: &GlobalOpts,
    profile_name: &str,
) -> Result<(), CliError> {
    let configured = portal.config().credentials.clone();

    let username = match args
        .username
        .or_else(|| configured.as_ref().map(|c| c.username.clone()))
    {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(util::prompt_err)?,
    };

    let password = match configured {
        Some(c) if c.username == username => c.password,
        _ => {
            let raw = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
            SecretString::from(raw)
        }
    };

    let snapshot = util::with_spinner(global, "Signing in...", portal.login(&username, &password))
        .await?;

    output::success(global, &format!("Signed in as {username} ({})", snapshot.role));
    let report = SessionReport {
        profile: profile_name.to_owned(),
        server: portal.config().url.to_string(),
        session_file: config::session_file(global, profile_name)
            .display()
            .to_string(),
        signed_in: true,
        role: Some(snapshot.role.to_string()),
        spaces: Some(snapshot.spaces.len()),
        reservations: Some(snapshot.reservations.len()),
    };
    let out = output::render_single(&global.output, &report, session_detail, |r| {
        r.role.clone().unwrap_or_default()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn logout(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    portal.logout().await;
    output::success(global, "Signed out");
    Ok(())
}

pub async fn status(portal: &Portal, global: &GlobalOpts, profile_name: &str) -> Result<(), CliError> {
    let mut report = SessionReport {
        profile: profile_name.to_owned(),
        server: portal.config().url.to_string(),
        session_file: config::session_file(global, profile_name)
            .display()
            .to_string(),
        signed_in: false,
        role: None,
        spaces: None,
        reservations: None,
    };

    match util::with_spinner(global, "Checking session...", portal.restore()).await {
        Ok(Some(snapshot)) => {
            let role = match portal.detect_role().await {
                Ok(role) => role,
                Err(e) if e.needs_login() => Role::Unknown,
                Err(e) => return Err(e.into()),
            };
            report.signed_in = portal.is_signed_in();
            report.role = Some(role.to_string());
            report.spaces = Some(snapshot.spaces.len());
            report.reservations = Some(snapshot.reservations.len());
        }
        Ok(None) => {}
        Err(e) if e.needs_login() => {
            output::warning(global, &format!("{e}; the stored token was removed"));
        }
        Err(e) => return Err(e.into()),
    }

    let out = output::render_single(&global.output, &report, session_detail, |r| {
        if r.signed_in { "signed-in" } else { "signed-out" }.to_owned()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn register(
    portal: &Portal,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
    let confirm_password =
        rpassword::prompt_password("Confirm password: ").map_err(util::prompt_err)?;

    let registration = Registration {
        username: args.username,
        password,
        confirm_password,
        full_name: args.full_name,
        email: args.email,
    };

    let username = portal.register(&registration).await?;
    output::success(
        global,
        &format!("Account '{username}' created. Sign in with: studyrooms login -u {username}"),
    );
    Ok(())
}
