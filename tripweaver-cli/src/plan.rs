//! Plan command implementation for the Tripweaver CLI.

use std::fs::File;
use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;

use tripweaver_core::{Budget, GeneratedItinerary, PlaceKnowledge, PlanRequest, TripDates};
use tripweaver_planner::ItineraryPlanner;

use crate::CliError;

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Plan a day-by-day itinerary. The input file holds a JSON \
                 array of researched places (name, location, category, visit \
                 minutes, optional hours, fees and nearby eateries); the \
                 itinerary is written as JSON to stdout or --output.",
    about = "Plan an itinerary from researched places"
)]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing the researched places.
    #[arg(value_name = "path")]
    pub(crate) places: Utf8PathBuf,
    /// First day of the trip (YYYY-MM-DD).
    #[arg(long, value_name = "date")]
    pub(crate) start: String,
    /// Last day of the trip, inclusive (YYYY-MM-DD).
    #[arg(long, value_name = "date")]
    pub(crate) end: String,
    /// Total trip budget used to scale cost estimates.
    #[arg(long, value_name = "amount")]
    pub(crate) budget: Option<u32>,
    /// Currency tag recorded with the budget.
    #[arg(long, value_name = "code", default_value = "INR")]
    pub(crate) currency: String,
    /// Treat the budget as per traveller rather than for the group.
    #[arg(long)]
    pub(crate) per_person: bool,
    /// Write the itinerary here instead of stdout.
    #[arg(long, value_name = "path")]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pub(crate) pretty: bool,
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) places: Utf8PathBuf,
    pub(crate) dates: TripDates,
    pub(crate) budget: Option<Budget>,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) pretty: bool,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let start = parse_date("start", &args.start)?;
        let end = parse_date("end", &args.end)?;
        let dates = TripDates::new(start, end)?;
        let budget = args.budget.map(|total| Budget {
            total,
            currency: args.currency.clone(),
            per_person: args.per_person,
        });
        Ok(Self {
            places: args.places,
            dates,
            budget,
            output: args.output,
            pretty: args.pretty,
        })
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| CliError::InvalidDate {
        field,
        value: value.to_owned(),
        source,
    })
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let config = PlanConfig::try_from(args)?;
    require_existing(&config.places, "places")?;
    let itinerary = build_itinerary(&config)?;
    let rendered = render(&itinerary, config.pretty)?;
    write_output(config.output.as_deref(), &rendered)
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        })
    }
}

pub(crate) fn build_itinerary(config: &PlanConfig) -> Result<GeneratedItinerary, CliError> {
    let file = File::open(config.places.as_std_path()).map_err(|source| CliError::ReadPlaces {
        path: config.places.clone(),
        source,
    })?;
    let places: Vec<PlaceKnowledge> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParsePlaces {
            path: config.places.clone(),
            source,
        })?;
    let request = PlanRequest::new(places, config.dates, config.budget.clone())?;
    log::info!(
        "planning {} places across {} days",
        request.places.len(),
        request.dates.day_count()
    );
    Ok(ItineraryPlanner::default().plan(&request)?)
}

pub(crate) fn render(itinerary: &GeneratedItinerary, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(itinerary)
    } else {
        serde_json::to_string(itinerary)
    };
    rendered.map_err(CliError::SerializeItinerary)
}

fn write_output(output: Option<&Utf8Path>, rendered: &str) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path.as_std_path(), format!("{rendered}\n"))
            .map_err(CliError::WriteOutput),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}").map_err(CliError::WriteOutput)
        }
    }
}
