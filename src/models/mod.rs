// Domain models: source rows, derived aggregates, dimensions

mod bucket;
mod dimension;
mod event;
mod period;

pub use bucket::{Bucket, ChannelBucket, ProbeBucket};
pub use dimension::{
    Channel, HIDDEN_YES, Probe, SessionChannel, cmp_address, sort_channels, sort_session_channels,
};
pub use event::{Event, StreamSession};
pub use period::SessionPeriod;
