// Shared test helpers: throwaway SQLite event logs and row builders

#![allow(dead_code)]

use probestats::config::DatabaseConfig;
use probestats::event_log::SqliteEventLog;
use probestats::models::*;
use tempfile::TempDir;

pub const CHANNEL: &str = "239.1.1.1";

/// Opens and initialises a fresh event log. Keep the TempDir alive for the test's duration.
pub async fn temp_event_log() -> (TempDir, SqliteEventLog) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("probes.db");
    let config = DatabaseConfig {
        path: path.to_str().unwrap().to_string(),
        max_pool_size: 2,
        busy_timeout_ms: 5000,
        create_schema: true,
    };
    let log = SqliteEventLog::connect(&config).await.unwrap();
    log.init().await.unwrap();
    (dir, log)
}

pub fn probe(id: i64, name: &str, distance: i64) -> Probe {
    Probe {
        id,
        probe_id: id,
        name: name.into(),
        distance,
        switch_id: Some(format!("sw-{id}")),
        short_location: Some(format!("rack-{id}")),
        hidden: Some("no".into()),
    }
}

/// Event at `record_time` seconds with `skips` skipped packets and fixed volumes.
pub fn event(probe_id: i64, channel: &str, record_time: i64, skips: i64) -> Event {
    Event {
        probe_id,
        multicast_dst: channel.into(),
        record_time,
        delta_skips: skips,
        delta_discon: 0,
        packets: 100,
        payload_bytes: 131_600,
        session_id: "s1".into(),
        port_dst: 5000,
    }
}

pub fn session_event(probe_id: i64, session: &str, record_time: i64, skips: i64) -> Event {
    Event {
        session_id: session.into(),
        ..event(probe_id, CHANNEL, record_time, skips)
    }
}
