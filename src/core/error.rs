use reqwest::StatusCode;
use thiserror::Error;

/// Why a segment list could not be obtained.
///
/// None of these are fatal: the readout keeps working without segment
/// adjustment.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("segment service answered with status {0}")]
    Status(StatusCode),

    #[error("response is not a segment list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed segment at index {index}: {reason}")]
    Malformed { index: usize, reason: String },
}
