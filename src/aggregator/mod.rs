// Time-bucketed aggregation over the probe event log.
// Each operation composes one query, runs it against the injected store and returns
// ordered rows. Nothing is cached; every call recomputes from the log.

pub mod query;

use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::instrument;

use crate::error::{AggregateError, Result};
use crate::models::{
    Channel, ChannelBucket, HIDDEN_YES, Probe, ProbeBucket, SessionChannel, SessionPeriod,
    sort_channels, sort_session_channels,
};
use crate::store::EventStore;
use query::{Filter, SelectBuilder, SelectQuery};

const SUM_SKIPS_DROPS: &str =
    "SUM(log_event.delta_skips) AS skips, SUM(log_event.delta_discon) AS drops, ";
const SUM_VOLUME: &str =
    "SUM(log_event.packets) AS packets, SUM(log_event.payload_bytes) AS payload_bytes, ";
const TIME_SPAN: &str = "MIN(log_event.record_time) * 1000 AS time_min, \
     MAX(log_event.record_time) * 1000 AS time_max, \
     (MAX(log_event.record_time) - MIN(log_event.record_time)) * 1000 AS period, \
     COUNT(*) AS records";
const JOIN_PROBES: &str = " FROM log_event JOIN probes ON probes.id = log_event.probe_id";

/// Bucket width in seconds (the store's native time unit). Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketWidth(NonZeroU32);

impl BucketWidth {
    pub fn from_secs(secs: u32) -> Option<Self> {
        NonZeroU32::new(secs).map(Self)
    }

    pub fn secs(&self) -> u32 {
        self.0.get()
    }
}

/// Inclusive `[from_ms, to_ms]` range in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    from_ms: i64,
    to_ms: i64,
}

impl TimeRange {
    pub fn new(from_ms: i64, to_ms: i64) -> Result<Self> {
        if from_ms > to_ms {
            return Err(AggregateError::InvalidRange { from_ms, to_ms });
        }
        Ok(Self { from_ms, to_ms })
    }

    pub fn from_ms(&self) -> i64 {
        self.from_ms
    }

    pub fn to_ms(&self) -> i64 {
        self.to_ms
    }
}

/// Per-probe series: one row per bucket, joined with the probe's name, ordered by time.
pub fn probe_buckets_query(probe_id: i64, width: BucketWidth, range: TimeRange) -> SelectQuery {
    let mut qb = SelectBuilder::new("SELECT ");
    qb.push_bucket_columns(width)
        .push(SUM_SKIPS_DROPS)
        .push(SUM_VOLUME)
        .push(TIME_SPAN)
        .push(", probes.name AS name")
        .push(JOIN_PROBES)
        .filters(&[
            Filter::equals("probes.id", probe_id),
            Filter::RecordTimeMs(range),
        ])
        .push(" GROUP BY bucket ORDER BY timestamp");
    qb.build()
}

/// Per-channel series: one row per (bucket, probe), ordered by probe then time.
pub fn channel_buckets_query(
    channel: &str,
    probe_id: Option<i64>,
    width: BucketWidth,
    range: TimeRange,
) -> SelectQuery {
    let mut filters = vec![Filter::equals("log_event.multicast_dst", channel)];
    if let Some(id) = probe_id {
        filters.push(Filter::equals("log_event.probe_id", id));
    }
    filters.push(Filter::RecordTimeMs(range));

    let mut qb = SelectBuilder::new("SELECT ");
    qb.push_bucket_columns(width)
        .push(SUM_SKIPS_DROPS)
        .push(SUM_VOLUME)
        .push(TIME_SPAN)
        .push(", log_event.probe_id AS probe_id, log_event.multicast_dst AS multicast_dst")
        .push(" FROM log_event")
        .filters(&filters)
        .push(" GROUP BY bucket, log_event.probe_id ORDER BY log_event.probe_id, timestamp");
    qb.build()
}

/// One row per (session, probe) on a channel, ordered by distance, probe, session start.
pub fn session_periods_query(channel: &str, range: TimeRange) -> SelectQuery {
    let mut qb = SelectBuilder::new(
        "SELECT log_event.probe_id AS probe_id, log_event.daemon_session_id AS session_id, \
         probes.distance AS distance, probes.name AS name, probes.switch AS switch_id, \
         probes.shortloc AS short_location, log_event.multicast_dst AS multicast_dst, ",
    );
    qb.push(SUM_SKIPS_DROPS)
        .push(TIME_SPAN)
        .push(JOIN_PROBES)
        .filters(&[
            Filter::equals("log_event.multicast_dst", channel),
            Filter::RecordTimeMs(range),
        ])
        .push(
            " GROUP BY log_event.daemon_session_id, log_event.probe_id \
             ORDER BY probes.distance, log_event.probe_id, time_min",
        );
    qb.build()
}

pub fn visible_probes_query() -> SelectQuery {
    let mut qb = SelectBuilder::new(
        "SELECT id, id AS probe_id, name, distance, switch AS switch_id, shortloc AS short_location, hidden \
         FROM probes WHERE COALESCE(hidden, '') <> ",
    );
    qb.push_bind(HIDDEN_YES).push(" ORDER BY distance, id");
    qb.build()
}

pub fn log_channels_query() -> SelectQuery {
    SelectBuilder::new("SELECT DISTINCT multicast_dst FROM log_event").build()
}

pub fn session_channels_query() -> SelectQuery {
    SelectBuilder::new("SELECT DISTINCT multicast_dst, port_dst FROM stream_session").build()
}

pub struct BucketAggregator<S> {
    store: Arc<S>,
}

impl<S> Clone for BucketAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: EventStore> BucketAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Buckets for one probe. Unknown probe or an event-free range yields an empty vec.
    #[instrument(skip(self), fields(operation = "aggregate_by_probe", width_secs = width.secs()))]
    pub async fn aggregate_by_probe(
        &self,
        probe_id: i64,
        width: BucketWidth,
        range: TimeRange,
    ) -> Result<Vec<ProbeBucket>> {
        let query = probe_buckets_query(probe_id, width, range);
        Ok(self.store.fetch_all(&query).await?)
    }

    /// Buckets for one channel, split per contributing probe. Rows carry the probe id,
    /// not its name.
    #[instrument(skip(self), fields(operation = "aggregate_by_channel", width_secs = width.secs()))]
    pub async fn aggregate_by_channel(
        &self,
        channel: &str,
        probe_id: Option<i64>,
        width: BucketWidth,
        range: TimeRange,
    ) -> Result<Vec<ChannelBucket>> {
        let query = channel_buckets_query(channel, probe_id, width, range);
        Ok(self.store.fetch_all(&query).await?)
    }

    #[instrument(skip(self), fields(operation = "summarize_sessions_by_channel"))]
    pub async fn summarize_sessions_by_channel(
        &self,
        channel: &str,
        range: TimeRange,
    ) -> Result<Vec<SessionPeriod>> {
        let query = session_periods_query(channel, range);
        Ok(self.store.fetch_all(&query).await?)
    }

    /// Probes not marked hidden, by distance. `None` when no probe qualifies.
    #[instrument(skip(self), fields(operation = "list_probes"))]
    pub async fn list_probes(&self) -> Result<Option<Vec<Probe>>> {
        let probes: Vec<Probe> = self.store.fetch_all(&visible_probes_query()).await?;
        Ok((!probes.is_empty()).then_some(probes))
    }

    /// Distinct channels present in the event log.
    #[instrument(skip(self), fields(operation = "list_channels"))]
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let mut channels: Vec<Channel> = self.store.fetch_all(&log_channels_query()).await?;
        sort_channels(&mut channels);
        Ok(channels)
    }

    /// Distinct (channel, port) pairs from the session registrations. Can disagree with
    /// `list_channels`.
    #[instrument(skip(self), fields(operation = "list_session_channels"))]
    pub async fn list_session_channels(&self) -> Result<Vec<SessionChannel>> {
        let mut channels: Vec<SessionChannel> =
            self.store.fetch_all(&session_channels_query()).await?;
        sort_session_channels(&mut channels);
        Ok(channels)
    }
}
