// Event log schema. record_time is stored as epoch seconds; reads convert to ms.

use sqlx::SqlitePool;

/// Creates log_event, probes, stream_session and their indexes if not present.
pub async fn init_tables(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS probes (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            distance INTEGER NOT NULL DEFAULT 0,
            switch TEXT,
            shortloc TEXT,
            hidden TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS log_event (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            probe_id INTEGER NOT NULL,
            daemon_session_id TEXT NOT NULL,
            multicast_dst TEXT NOT NULL,
            port_dst INTEGER NOT NULL DEFAULT 0,
            record_time INTEGER NOT NULL,
            delta_skips INTEGER NOT NULL DEFAULT 0,
            delta_discon INTEGER NOT NULL DEFAULT 0,
            packets INTEGER NOT NULL DEFAULT 0,
            payload_bytes INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_log_event_probe_time ON log_event(probe_id, record_time)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_log_event_channel_time ON log_event(multicast_dst, record_time)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stream_session (
            daemon_session_id TEXT NOT NULL,
            probe_id INTEGER NOT NULL,
            multicast_dst TEXT NOT NULL,
            port_dst INTEGER NOT NULL,
            PRIMARY KEY (daemon_session_id, probe_id, multicast_dst, port_dst)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
