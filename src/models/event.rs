// Source rows owned by the event log (written by probes / importers, read-only to aggregation)

use serde::{Deserialize, Serialize};

/// One observed measurement interval. `record_time` is epoch seconds (store-native).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub probe_id: i64,
    pub multicast_dst: String,
    pub record_time: i64,
    pub delta_skips: i64,
    pub delta_discon: i64,
    pub packets: i64,
    pub payload_bytes: i64,
    pub session_id: String,
    pub port_dst: i64,
}

/// Registration of a probe's monitoring session for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSession {
    pub session_id: String,
    pub probe_id: i64,
    pub multicast_dst: String,
    pub port_dst: i64,
}
