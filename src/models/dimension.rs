// Dimension rows: probes and channels

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::cmp::Ordering;
use std::net::Ipv4Addr;

pub const HIDDEN_YES: &str = "yes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Probe {
    pub id: i64,
    /// Same value as `id`; dashboards key probe rows by this name.
    pub probe_id: i64,
    pub name: String,
    /// Network distance from the source; listings are ordered by it.
    pub distance: i64,
    #[serde(rename = "switch")]
    pub switch_id: Option<String>,
    #[serde(rename = "shortloc")]
    pub short_location: Option<String>,
    pub hidden: Option<String>,
}

/// Channel seen in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub multicast_dst: String,
}

/// Channel and destination port registered in the session table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionChannel {
    pub multicast_dst: String,
    pub port_dst: i64,
}

/// Orders addresses by numeric IPv4 value (`10.0.0.2` < `10.0.0.10`).
/// Anything that does not parse sorts after all valid addresses, lexicographically.
pub fn cmp_address(a: &str, b: &str) -> Ordering {
    match (a.parse::<Ipv4Addr>(), b.parse::<Ipv4Addr>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

pub fn sort_channels(channels: &mut [Channel]) {
    channels.sort_by(|a, b| cmp_address(&a.multicast_dst, &b.multicast_dst));
}

pub fn sort_session_channels(channels: &mut [SessionChannel]) {
    channels.sort_by(|a, b| {
        cmp_address(&a.multicast_dst, &b.multicast_dst).then(a.port_dst.cmp(&b.port_dst))
    });
}
