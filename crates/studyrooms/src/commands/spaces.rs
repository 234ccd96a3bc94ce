//! Study space command handlers.

use tabled::Tabled;

use studyrooms_core::display::{self, NO_SPACES};
use studyrooms_core::{Portal, Space, SpaceForm};

use crate::cli::{GlobalOpts, SpaceFields, SpaceUpdate, SpacesArgs, SpacesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SpaceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Capacity")]
    capacity: u32,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Space> for SpaceRow {
    fn from(s: &Space) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            capacity: s.capacity,
            hours: display::space_hours(s),
            description: s.description.clone().unwrap_or_default(),
        }
    }
}

fn detail(s: &Space) -> String {
    let mut lines = vec![
        format!("{} (#{})", s.name, s.id),
        display::space_line(s),
    ];
    if let Some(ref description) = s.description {
        lines.push(description.clone());
    }
    lines.join("\n")
}

fn render_spaces(spaces: &[Space], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        spaces,
        NO_SPACES,
        |s| SpaceRow::from(s),
        |s| s.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Form building ───────────────────────────────────────────────────

fn form_from_fields(fields: SpaceFields) -> Result<SpaceForm, CliError> {
    if let Some(ref path) = fields.from_file {
        let mut form: SpaceForm = util::read_json_file(path)?;
        // The file describes a new space; updates go through `spaces update`.
        form.id = None;
        return Ok(form);
    }

    let name = fields.name.ok_or_else(|| CliError::Validation {
        field: "name".into(),
        reason: "required".into(),
    })?;
    let capacity = fields.capacity.ok_or_else(|| CliError::Validation {
        field: "capacity".into(),
        reason: "required".into(),
    })?;

    Ok(SpaceForm {
        id: None,
        name,
        description: fields.description,
        capacity,
        open_time: util::parse_optional_time("open", fields.open.as_deref())?,
        close_time: util::parse_optional_time("close", fields.close.as_deref())?,
        full_day: fields.full_day,
    })
}

fn apply_update(form: &mut SpaceForm, update: SpaceUpdate) -> Result<(), CliError> {
    if let Some(name) = update.name {
        form.name = name;
    }
    if let Some(description) = update.description {
        form.description = Some(description).filter(|d| !d.is_empty());
    }
    if let Some(capacity) = update.capacity {
        form.capacity = capacity;
    }
    if let Some(open) = util::parse_optional_time("open", update.open.as_deref())? {
        form.open_time = Some(open);
    }
    if let Some(close) = util::parse_optional_time("close", update.close.as_deref())? {
        form.close_time = Some(close);
    }
    if let Some(full_day) = update.full_day {
        form.full_day = full_day;
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(portal: &Portal, args: SpacesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SpacesCommand::List => {
            let spaces = portal.list_spaces().await?;
            render_spaces(&spaces, global);
            Ok(())
        }

        SpacesCommand::Show { space } => {
            let resolved = portal.resolve_space(&space).await?;
            let fresh = portal.get_space(resolved.id).await?;
            let out = output::render_single(&global.output, &fresh, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SpacesCommand::Create(fields) => {
            let form = form_from_fields(fields)?;
            let refreshed = portal.save_space(&form).await?;
            let saved = refreshed.value;
            output::success(global, &format!("Space '{}' created (#{})", saved.name, saved.id));
            let out = output::render_single(&global.output, &saved, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            util::reloaded(global, refreshed.list);
            Ok(())
        }

        SpacesCommand::Update { space, fields } => {
            let current = portal.resolve_space(&space).await?;
            let mut form = SpaceForm::from(&current);
            apply_update(&mut form, fields)?;
            let refreshed = portal.save_space(&form).await?;
            let saved = refreshed.value;
            output::success(global, &format!("Space '{}' updated", saved.name));
            let out = output::render_single(&global.output, &saved, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            util::reloaded(global, refreshed.list);
            Ok(())
        }

        SpacesCommand::Delete { space } => {
            let target = portal.resolve_space(&space).await?;
            if !util::confirm(
                &format!("Delete space '{}' (#{})?", target.name, target.id),
                "spaces delete",
                global.yes,
            )? {
                return Ok(());
            }
            let refreshed = portal.delete_space(target.id).await?;
            output::success(global, &format!("Space '{}' deleted", target.name));
            if let Some(remaining) = util::reloaded(global, refreshed.list) {
                render_spaces(&remaining, global);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn fields() -> SpaceFields {
        SpaceFields {
            name: Some("Room B".into()),
            description: None,
            capacity: Some(12),
            open: Some("08:00".into()),
            close: Some("20:00".into()),
            full_day: false,
            from_file: None,
        }
    }

    #[test]
    fn new_space_form_from_flags() {
        let form = form_from_fields(fields()).expect("valid form");
        assert_eq!(form.id, None);
        assert_eq!(form.open_time, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(form.capacity, 12);
    }

    #[test]
    fn bad_time_is_a_validation_error() {
        let mut f = fields();
        f.open = Some("8am".into());
        assert!(matches!(
            form_from_fields(f),
            Err(CliError::Validation { ref field, .. }) if field == "open"
        ));
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut form = form_from_fields(fields()).expect("valid form");
        form.id = Some(4);
        apply_update(
            &mut form,
            SpaceUpdate {
                name: None,
                description: None,
                capacity: Some(30),
                open: None,
                close: Some("22:00".into()),
                full_day: None,
            },
        )
        .expect("valid update");
        assert_eq!(form.id, Some(4));
        assert_eq!(form.name, "Room B");
        assert_eq!(form.capacity, 30);
        assert_eq!(form.close_time, NaiveTime::from_hms_opt(22, 0, 0));
    }
}
