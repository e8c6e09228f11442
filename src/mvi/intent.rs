//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Request lifecycle events (started, succeeded, failed)
/// - Confirmed writes (created, updated, removed)
/// - Session events (login, logout, rehydration)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
