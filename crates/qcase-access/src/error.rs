//! Error types for filtered views

/// Errors from a [`LiveView`](crate::LiveView)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// No record snapshot has been published yet
    #[error("record snapshot not yet available")]
    SnapshotUnavailable,

    /// No entry-point reference snapshot has been published yet
    #[error("entry-point reference not yet available")]
    ReferenceUnavailable,

    /// Publisher went away; no further snapshots will arrive
    #[error("snapshot publisher closed")]
    Closed,
}
