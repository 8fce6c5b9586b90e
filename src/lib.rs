// Probe stats: bucket aggregation over the SQLite event log, served over HTTP.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod event_log;
pub mod models;
pub mod routes;
pub mod store;
