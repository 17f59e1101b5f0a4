//! Clock port interface

/// Port for the wall clock used to name recordings
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}
