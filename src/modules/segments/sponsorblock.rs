use crate::config::AppConfig;
use crate::core::error::SegmentError;
use crate::core::models::Segment;
use crate::core::traits::SegmentSource;
use crate::utils::APP_NAME;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// One entry of the skip-segment response. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct SkipSegmentResponse {
    segment: Vec<f64>,
}

/// Client for a SponsorBlock-compatible `skipSegments` endpoint
pub struct SponsorBlockClient {
    client: Client,
    base_url: String,
    categories: Vec<String>,
}

impl SponsorBlockClient {
    pub fn new(config: &AppConfig) -> Result<Self, SegmentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.segment_service_url.clone(),
            categories: config.segment_categories.clone(),
        })
    }
}

#[async_trait]
impl SegmentSource for SponsorBlockClient {
    async fn fetch(&self, content_id: &str) -> Result<Vec<Segment>, SegmentError> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&[("videoID", content_id)]);

        if !self.categories.is_empty() {
            let categories = serde_json::to_string(&self.categories)?;
            request = request.query(&[("categories", categories)]);
        }

        debug!(content_id, "Requesting skip segments");
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;
        segments_from_response(status, &body)
    }
}

/// Interprets a service answer. The service reports a video without any
/// segments as 404, which is an empty list rather than a failure.
pub fn segments_from_response(status: StatusCode, body: &str) -> Result<Vec<Segment>, SegmentError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(Vec::new());
    }
    if !status.is_success() {
        return Err(SegmentError::Status(status));
    }
    parse_segments(body)
}

/// Parses a skip-segment response body.
///
/// The body must be a JSON array of objects whose `segment` field is a
/// `[start, end]` pair of finite seconds with `start <= end`. Anything else
/// rejects the whole list.
pub fn parse_segments(body: &str) -> Result<Vec<Segment>, SegmentError> {
    let entries: Vec<SkipSegmentResponse> = serde_json::from_str(body)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry.segment.as_slice() {
            [start, end] if !start.is_finite() || !end.is_finite() => Err(SegmentError::Malformed {
                index,
                reason: "bounds are not finite".to_string(),
            }),
            [start, end] if start > end => Err(SegmentError::Malformed {
                index,
                reason: format!("start {} is after end {}", start, end),
            }),
            [start, end] => Ok(Segment::new(*start, *end)),
            other => Err(SegmentError::Malformed {
                index,
                reason: format!("expected 2 bounds, got {}", other.len()),
            }),
        })
        .collect()
}
