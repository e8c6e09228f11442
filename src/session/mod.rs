//! Authentication slice: the only slice that survives a restart.

mod intent;
mod model;
mod persist;
mod reducer;
mod state;

pub use intent::AuthIntent;
pub use model::{AuthPayload, BearerToken, Session, SessionError, SubscriptionTier, User};
pub use persist::{PersistedAuth, PersistedRoot, SessionPersistence, ROOT_KEY};
pub use reducer::AuthReducer;
pub use state::{AuthState, NavigationGate};
