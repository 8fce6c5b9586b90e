// Time-bucket aggregates (derived per request, never persisted)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Sums and time bounds for one `record_time div width` bucket. Times are epoch ms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Bucket {
    /// Bucket index in store seconds: `record_time / width_secs`.
    pub bucket: i64,
    /// Start of the bucket (`bucket * width_secs * 1000`).
    pub timestamp: i64,
    pub skips: i64,
    pub drops: i64,
    pub packets: i64,
    pub payload_bytes: i64,
    pub time_min: i64,
    pub time_max: i64,
    /// `time_max - time_min`.
    pub period: i64,
    pub records: i64,
}

/// Bucket of a single probe's series, enriched with the probe's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProbeBucket {
    pub name: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub stats: Bucket,
}

/// Bucket of a channel series. One row per (bucket, probe); carries the probe id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChannelBucket {
    pub probe_id: i64,
    pub multicast_dst: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub stats: Bucket,
}
