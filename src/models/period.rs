// Session continuity summaries

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One monitoring session of one probe on a channel. Times are epoch ms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionPeriod {
    pub probe_id: i64,
    #[serde(rename = "daemon_session_id")]
    pub session_id: String,
    pub distance: i64,
    pub name: String,
    #[serde(rename = "switch")]
    pub switch_id: Option<String>,
    #[serde(rename = "shortloc")]
    pub short_location: Option<String>,
    pub multicast_dst: String,
    pub skips: i64,
    pub drops: i64,
    pub records: i64,
    pub time_min: i64,
    pub time_max: i64,
    pub period: i64,
}
