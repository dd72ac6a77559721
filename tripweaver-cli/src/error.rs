//! Error types emitted by the Tripweaver CLI.
//!
//! Keep this error type reasonably small, as the CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use camino::Utf8PathBuf;
use thiserror::Error;

use tripweaver_core::{PlanRequestError, TripDatesError};
use tripweaver_planner::PlanError;

/// Errors emitted by the Tripweaver CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A date flag could not be parsed as `YYYY-MM-DD`.
    #[error("invalid {field} date {value:?}: {source}")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// The start/end pair does not form a valid range.
    #[error("invalid trip dates: {0}")]
    Dates(#[from] TripDatesError),
    /// Reading the places file failed.
    #[error("failed to read places from {path:?}: {source}")]
    ReadPlaces {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The places JSON could not be decoded.
    #[error("failed to parse places JSON at {path:?}: {source}")]
    ParsePlaces {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The assembled request failed validation.
    #[error("invalid plan request: {0}")]
    Request(#[from] PlanRequestError),
    /// The planner rejected the request.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serializing the itinerary failed.
    #[error("failed to serialize itinerary: {0}")]
    SerializeItinerary(#[source] serde_json::Error),
    /// Writing the itinerary failed.
    #[error("failed to write itinerary: {0}")]
    WriteOutput(#[source] std::io::Error),
}
