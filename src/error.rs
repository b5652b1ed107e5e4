//! Error types.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure to build the in-memory dataset at start-up.
///
/// All variants are fatal: the dashboard refuses to start without data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A cell could not be interpreted for its column.
    #[error("row {row}, column '{column}': {reason} (got '{value}')")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        reason: &'static str,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array of records")]
    JsonLayout,

    #[error("malformed Parquet")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow conversion failed")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("invalid column mapping in {}", .path.display())]
    ColumnMapping {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A selection coming from an untrusted caller that violates the payload
/// range invariant `0 <= low <= high <= 10000`.
///
/// Unknown site names are never an error; they just match no records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("payload bound {0} is outside [{min}, {max}]", min = crate::data::filter::PAYLOAD_SLIDER_MIN, max = crate::data::filter::PAYLOAD_SLIDER_MAX)]
    OutOfBounds(f64),

    #[error("payload range is inverted: low {low} > high {high}")]
    Inverted { low: f64, high: f64 },

    #[error("payload bound is not a number")]
    NotANumber,
}

impl IntoResponse for SelectionError {
    fn into_response(self) -> Response {
        log::debug!("Rejected selection: {self}");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
