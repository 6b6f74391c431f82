use anyhow::Context;
use chrono::NaiveDate;
use inquire::{DateSelect, Password, PasswordDisplayMode, Select, Text};
use itinero_core::{Config, PlanTrip, ServiceId, TripType, model::parse_form_date};

use crate::cli::PlanArgs;

/// Fill every form field from flags, prompting for the rest unless `--no-input`.
///
/// The destination lookup runs as soon as the destination is entered.
pub async fn fill_form(form: &mut PlanTrip, args: &PlanArgs) -> anyhow::Result<()> {
    let ask = !args.no_input;

    form.set_source(text(args.source.as_deref(), "Source", ask)?);

    let destination = text(args.destination.as_deref(), "Destination", ask)?;
    form.update_destination(destination).await;

    form.set_start_date(date(args.start.as_deref(), "Start date", ask)?);
    form.set_end_date(date(args.end.as_deref(), "End date", ask)?);
    form.set_budget(text(args.budget.as_deref(), "Budget", ask)?);
    form.set_trip_type(trip_type(args.trip_type.as_deref(), ask)?);
    form.set_preferences(text(args.preferences.as_deref(), "Preferences", ask)?);

    Ok(())
}

fn text(given: Option<&str>, label: &str, ask: bool) -> anyhow::Result<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None if ask => Text::new(label).prompt().with_context(|| format!("No {label} entered")),
        None => Ok(String::new()),
    }
}

fn date(given: Option<&str>, label: &str, ask: bool) -> anyhow::Result<Option<NaiveDate>> {
    match given {
        Some(value) => parse_form_date(value).map(Some),
        None if ask => DateSelect::new(label)
            .with_help_message("Esc leaves the date empty")
            .prompt_skippable()
            .with_context(|| format!("No {label} entered")),
        None => Ok(None),
    }
}

fn trip_type(given: Option<&str>, ask: bool) -> anyhow::Result<TripType> {
    match given {
        Some(value) => TripType::try_from(value),
        None if ask => Select::new("Trip type", TripType::all().to_vec())
            .prompt()
            .context("No trip type selected"),
        None => Ok(TripType::default()),
    }
}

/// Interactive entry of a service's key and endpoint.
pub fn configure_service(config: &mut Config, id: ServiceId) -> anyhow::Result<()> {
    if id.requires_api_key() {
        let key = Password::new(&format!("API key for {id}"))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("No API key entered")?;
        config.upsert_api_key(id, key.trim().to_string());
    }

    let current = config.base_url(id)?.to_string();
    let base_url = Text::new(&format!("Base URL for {id}"))
        .with_default(&current)
        .prompt()
        .context("No base URL entered")?;

    let base_url = base_url.trim();
    if base_url.trim_end_matches('/') == id.default_base_url() {
        config.set_base_url(id, None);
    } else {
        config.set_base_url(id, Some(base_url.to_string()));
    }

    // Reject an unparsable URL before it is saved.
    config.base_url(id)?;
    Ok(())
}
