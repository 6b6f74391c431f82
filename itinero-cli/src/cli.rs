use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use itinero_core::{
    Config, ItineraryView, NavigationPayload, PlanTrip, ReviewTable, ServiceId, Services,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{prompt, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "itinero",
    version,
    about = "Plan a trip: weather, hotels and a day-by-day itinerary"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials or the endpoint of a service.
    Configure {
        /// Service short name: nominatim, openweather, overpass or backend.
        service: String,
    },

    /// Fill in the trip form, generate an itinerary and show it.
    Plan(PlanArgs),

    /// Show map position, weather and review for a destination.
    Details {
        destination: String,
    },

    /// Show an itinerary from a saved payload.
    Show {
        /// JSON payload written by `plan --save-payload`.
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Expand the hotel list past the first four.
        #[arg(long)]
        all_hotels: bool,
    },
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub destination: Option<String>,

    /// Start date, YYYY-MM-DD.
    #[arg(long)]
    pub start: Option<String>,

    /// End date, YYYY-MM-DD.
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub budget: Option<String>,

    /// solo, family, friends or business.
    #[arg(long)]
    pub trip_type: Option<String>,

    #[arg(long)]
    pub preferences: Option<String>,

    /// Never prompt; missing fields stay empty.
    #[arg(long)]
    pub no_input: bool,

    /// Expand the hotel list past the first four.
    #[arg(long)]
    pub all_hotels: bool,

    /// Download the generated PDF to this file.
    #[arg(long)]
    pub pdf_out: Option<PathBuf>,

    /// Write the navigation payload to this file for `show`.
    #[arg(long)]
    pub save_payload: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service } => configure(&service),
            Command::Plan(args) => plan(args).await,
            Command::Details { destination } => details(&destination).await,
            Command::Show { payload, all_hotels } => show(payload, all_hotels).await,
        }
    }
}

fn configure(service: &str) -> anyhow::Result<()> {
    let id = ServiceId::try_from(service)?;
    let mut config = Config::load()?;

    prompt::configure_service(&mut config, id)?;
    config.save()?;

    println!("Saved {id} settings to {}", Config::config_file_path()?.display());
    Ok(())
}

fn load() -> anyhow::Result<(Config, Services)> {
    let config = Config::load()?;
    let services = Services::from_config(&config)?;
    Ok((config, services))
}

async fn plan(args: PlanArgs) -> anyhow::Result<()> {
    let (config, services) = load()?;
    let reviews = ReviewTable::load_or_empty(config.reviews_path.as_deref());
    let mut form = PlanTrip::new(services.clone(), reviews);

    prompt::fill_form(&mut form, &args).await?;
    print!("{}", render::destination_details(&form));

    println!("\n{}", form.busy_flag().label());
    let mut navigation = match form.submit().await {
        Ok(navigation) => navigation,
        Err(err) => return Err(anyhow!(err.notice())),
    };

    let payload = navigation.take_payload();
    if let (Some(path), Some(payload)) = (&args.save_payload, &payload) {
        save_payload(path, payload)?;
    }

    let mut view = ItineraryView::new(payload);
    present(&mut view, &services, args.all_hotels).await;

    if let Some(out) = &args.pdf_out {
        download_pdf(&view, &services, out).await?;
    }

    Ok(())
}

async fn details(destination: &str) -> anyhow::Result<()> {
    let (config, services) = load()?;
    let reviews = ReviewTable::load_or_empty(config.reviews_path.as_deref());
    let mut form = PlanTrip::new(services, reviews);

    form.update_destination(destination).await;
    print!("{}", render::destination_details(&form));
    Ok(())
}

async fn show(payload: Option<PathBuf>, all_hotels: bool) -> anyhow::Result<()> {
    let (_, services) = load()?;
    let payload = payload.map(|path| read_payload(&path)).transpose()?;

    let mut view = ItineraryView::new(payload);
    present(&mut view, &services, all_hotels).await;
    Ok(())
}

async fn present(view: &mut ItineraryView, services: &Services, all_hotels: bool) {
    view.load_hotels(services).await;
    if all_hotels && view.hotels().has_more() {
        view.toggle_more_hotels();
    }

    let pdf_url = view.pdf_download(services).map(|url| url.to_string());
    print!("{}", render::itinerary(view, pdf_url.as_deref()));
}

async fn download_pdf(
    view: &ItineraryView,
    services: &Services,
    out: &Path,
) -> anyhow::Result<()> {
    let Some(pdf_path) = view.payload().and_then(|p| p.pdf_path.as_deref()) else {
        println!("The backend did not produce a PDF for this itinerary.");
        return Ok(());
    };

    let bytes =
        services.download_pdf(pdf_path).await.context("Failed to download itinerary PDF")?;
    fs::write(out, bytes).with_context(|| format!("Failed to write PDF: {}", out.display()))?;

    println!("Saved itinerary PDF to {}", out.display());
    Ok(())
}

fn save_payload(path: &Path, payload: &NavigationPayload) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(payload).context("Failed to serialize payload")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write payload: {}", path.display()))?;

    tracing::info!(path = %path.display(), "navigation payload saved");
    Ok(())
}

fn read_payload(path: &Path) -> anyhow::Result<NavigationPayload> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse payload: {}", path.display()))
}
