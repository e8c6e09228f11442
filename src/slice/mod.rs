//! Generic async resource slices.
//!
//! A [`ResourceSlice`] holds a server-backed collection; a [`DetailSlice`]
//! holds a single dashboard object. Both share the [`LoadState`] machine and
//! request-id fencing.

mod detail;
mod intent;
mod reducer;
mod state;

pub use detail::{DetailIntent, DetailReducer, DetailSlice};
pub use intent::SliceIntent;
pub use reducer::SliceReducer;
pub use state::{LoadState, RequestId, ResourceSlice};
