// SQLite event log. Aggregation queries run here; loaders exist for importers and fixtures.

pub mod schema;

use crate::aggregator::query::{Fragment, Param, SelectQuery};
use crate::config::DatabaseConfig;
use crate::models::{Event, Probe, StreamSession};
use crate::store::{EventStore, LogRow};
use async_trait::async_trait;
use sqlx::QueryBuilder;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::instrument;

pub struct SqliteEventLog {
    pool: SqlitePool,
}

impl SqliteEventLog {
    /// Connect to SQLite at `config.path`, create parent dir and DB if missing, enable WAL.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(&config.path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", config.path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        schema::init_tables(&self.pool).await
    }

    #[instrument(skip(self, probe), fields(repo = "event_log", operation = "insert_probe", probe_id = probe.id))]
    pub async fn insert_probe(&self, probe: &Probe) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO probes (id, name, distance, switch, shortloc, hidden) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(probe.id)
        .bind(&probe.name)
        .bind(probe.distance)
        .bind(&probe.switch_id)
        .bind(&probe.short_location)
        .bind(&probe.hidden)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self, events), fields(repo = "event_log", operation = "insert_events", events_count = events.len()))]
    pub async fn insert_events(&self, events: &[Event]) -> anyhow::Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for e in events {
            sqlx::query(
                "INSERT INTO log_event (probe_id, daemon_session_id, multicast_dst, port_dst, record_time, delta_skips, delta_discon, packets, payload_bytes) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(e.probe_id)
            .bind(&e.session_id)
            .bind(&e.multicast_dst)
            .bind(e.port_dst)
            .bind(e.record_time)
            .bind(e.delta_skips)
            .bind(e.delta_discon)
            .bind(e.packets)
            .bind(e.payload_bytes)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self, session), fields(repo = "event_log", operation = "register_session"))]
    pub async fn register_session(&self, session: &StreamSession) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO stream_session (daemon_session_id, probe_id, multicast_dst, port_dst) VALUES ($1, $2, $3, $4)",
        )
        .bind(&session.session_id)
        .bind(session.probe_id)
        .bind(&session.multicast_dst)
        .bind(session.port_dst)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Renders `query` into a sqlx builder; each bound value follows the text pushed before it.
fn to_sqlx(query: &SelectQuery) -> QueryBuilder<'_, Sqlite> {
    let mut qb = QueryBuilder::new("");
    for fragment in query.fragments() {
        match fragment {
            Fragment::Sql(sql) => {
                qb.push(*sql);
            }
            Fragment::Bind(Param::Int(v)) => {
                qb.push_bind(*v);
            }
            Fragment::Bind(Param::Text(s)) => {
                qb.push_bind(s.as_str());
            }
        }
    }
    qb
}

#[async_trait]
impl EventStore for SqliteEventLog {
    #[instrument(skip_all, fields(repo = "event_log", operation = "fetch_all"))]
    async fn fetch_all<R: LogRow>(&self, query: &SelectQuery) -> Result<Vec<R>, sqlx::Error> {
        let mut qb = to_sqlx(query);
        let rows = qb.build_query_as::<R>().fetch_all(&self.pool).await?;
        tracing::debug!(rows = rows.len(), "query complete");
        Ok(rows)
    }
}
