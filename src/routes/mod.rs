// HTTP routes: aggregation queries under the configured base path, plus /version

mod http;
mod query;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::aggregator::BucketAggregator;
use crate::config::AppConfig;
use crate::store::EventStore;

pub(crate) struct AppState<S> {
    pub(crate) aggregator: BucketAggregator<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
        }
    }
}

pub fn app<S: EventStore + 'static>(aggregator: BucketAggregator<S>, config: &AppConfig) -> Router {
    let state = AppState { aggregator };
    let api = Router::new()
        .route("/buckets/id/{probe_id}", get(query::probe_buckets::<S>)) // GET /v1/buckets/id/:probe_id
        .route("/buckets/channel/{channel}", get(query::channel_buckets::<S>)) // GET /v1/buckets/channel/:channel
        .route("/periods/{channel}", get(query::channel_periods::<S>)) // GET /v1/periods/:channel
        .route("/probes", get(query::probes::<S>)) // GET /v1/probes
        .route("/channels", get(query::session_channels::<S>)) // GET /v1/channels
        .route("/channels/log", get(query::log_channels::<S>)); // GET /v1/channels/log
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .nest(&config.api.base_path, api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
