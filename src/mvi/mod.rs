//! Model-View-Intent (MVI) primitives shared by every slice.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                 │
//!    └──── Dispatcher (network) ◄──────┘
//! ```
//!
//! - **State**: immutable snapshot of one slice
//! - **Intent**: request lifecycle events and write confirmations
//! - **Reducer**: pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SliceState;
