// Store access capability. Aggregation runs inside the store; callers hand over a
// composed query and get typed rows back.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;

use crate::aggregator::query::SelectQuery;

/// Row type a store can produce: decoded from SQLite rows in production and from
/// JSON by in-memory stores.
pub trait LogRow:
    for<'r> FromRow<'r, SqliteRow> + DeserializeOwned + Send + Unpin + 'static
{
}

impl<T> LogRow for T where
    T: for<'r> FromRow<'r, SqliteRow> + DeserializeOwned + Send + Unpin + 'static
{
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Runs `query` with its parameters bound positionally and returns all rows.
    async fn fetch_all<R: LogRow>(&self, query: &SelectQuery) -> Result<Vec<R>, sqlx::Error>;
}
