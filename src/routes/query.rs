// Aggregation handlers. Query strings are decoded and validated here, then handed to
// the aggregator; results are wrapped in a named field.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::aggregator::{BucketWidth, TimeRange};
use crate::error::{AggregateError, Result};
use crate::store::EventStore;

/// Dimension listings must never be cached by browsers or proxies.
const NO_CACHE: [(header::HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store"),
    (header::EXPIRES, "-1"),
    (header::PRAGMA, "no-cache"),
];

#[derive(Debug, Deserialize)]
pub(super) struct BucketParams {
    bucket: u32,
    time_from: i64,
    time_to: i64,
    probe_id: Option<i64>,
}

impl BucketParams {
    fn width(&self) -> Result<BucketWidth> {
        BucketWidth::from_secs(self.bucket).ok_or(AggregateError::InvalidBucketWidth)
    }

    fn range(&self) -> Result<TimeRange> {
        TimeRange::new(self.time_from, self.time_to)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RangeParams {
    time_from: i64,
    time_to: i64,
}

impl RangeParams {
    fn range(&self) -> Result<TimeRange> {
        TimeRange::new(self.time_from, self.time_to)
    }
}

pub(super) async fn probe_buckets<S: EventStore + 'static>(
    State(state): State<AppState<S>>,
    Path(probe_id): Path<i64>,
    Query(params): Query<BucketParams>,
) -> Result<impl IntoResponse> {
    let buckets = state
        .aggregator
        .aggregate_by_probe(probe_id, params.width()?, params.range()?)
        .await?;
    Ok(Json(json!({ "buckets": buckets })))
}

pub(super) async fn channel_buckets<S: EventStore + 'static>(
    State(state): State<AppState<S>>,
    Path(channel): Path<String>,
    Query(params): Query<BucketParams>,
) -> Result<impl IntoResponse> {
    let buckets = state
        .aggregator
        .aggregate_by_channel(&channel, params.probe_id, params.width()?, params.range()?)
        .await?;
    Ok(Json(json!({ "buckets": buckets })))
}

pub(super) async fn channel_periods<S: EventStore + 'static>(
    State(state): State<AppState<S>>,
    Path(channel): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse> {
    let periods = state
        .aggregator
        .summarize_sessions_by_channel(&channel, params.range()?)
        .await?;
    Ok(Json(json!({ "periods": periods })))
}

/// 404 with an empty body when every probe is hidden or none are configured.
pub(super) async fn probes<S: EventStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Response> {
    Ok(match state.aggregator.list_probes().await? {
        Some(probes) => Json(json!({ "probes": probes })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

pub(super) async fn session_channels<S: EventStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse> {
    let channels = state.aggregator.list_session_channels().await?;
    Ok((NO_CACHE, Json(json!({ "channels": channels }))))
}

pub(super) async fn log_channels<S: EventStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse> {
    let channels = state.aggregator.list_channels().await?;
    Ok((NO_CACHE, Json(json!({ "channels": channels }))))
}
