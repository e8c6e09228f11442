//! The application store.
//!
//! One [`Store`] owns every slice. State lives in a `tokio::sync::watch`
//! channel: readers borrow the latest snapshot, subscribers are woken on
//! every dispatch, and reducers are the only writers. Network calls are the
//! only suspension points.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::mvi::Reducer;
use crate::resource::{
    Animal, Expense, FarmDocument, FarmProfile, ForumPost, HealthAssessment, InventoryItem,
    Listing, RevenueEntry, Schedule, Sensor, WeatherForecast,
};
use crate::session::{AuthIntent, AuthReducer, AuthState, SessionPersistence};
use crate::slice::{DetailSlice, RequestId, ResourceSlice};
use crate::storage::{FileStorage, KeyValueStorage, StorageError};

mod resources;
mod session;

pub use resources::{StoreDetail, StoreSlice};

/// Replace a slice with the reducer's output.
macro_rules! dispatch_mvi {
    ($state:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $state.$field = <$reducer>::reduce(std::mem::take(&mut $state.$field), $intent);
    };
}
pub(crate) use dispatch_mvi;

/// Snapshot of every slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub animals: ResourceSlice<Animal>,
    pub schedules: ResourceSlice<Schedule>,
    pub inventory: ResourceSlice<InventoryItem>,
    pub marketplace: ResourceSlice<Listing>,
    pub sensors: ResourceSlice<Sensor>,
    pub health: ResourceSlice<HealthAssessment>,
    pub expenses: ResourceSlice<Expense>,
    pub revenue: ResourceSlice<RevenueEntry>,
    pub posts: ResourceSlice<ForumPost>,
    pub documents: ResourceSlice<FarmDocument>,
    pub weather: DetailSlice<WeatherForecast>,
    pub farm: DetailSlice<FarmProfile>,
}

pub struct Store {
    state: watch::Sender<AppState>,
    client: ApiClient,
    persistence: SessionPersistence,
    next_request: AtomicU64,
    auth_write: Mutex<()>,
}

impl Store {
    /// Build a store with empty state. Call [`Store::rehydrate`] before use.
    pub fn new(client: ApiClient, storage: Arc<dyn KeyValueStorage>) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            state,
            client,
            persistence: SessionPersistence::new(storage),
            next_request: AtomicU64::new(0),
            auth_write: Mutex::new(()),
        }
    }

    /// Build the store from config and rehydrate the persisted session.
    pub fn bootstrap(config: &Config) -> Result<Self, ApiError> {
        let client = ApiClient::new(&config.api)?;
        let dir = config.storage.resolved_dir();
        tracing::info!(
            base_url = %client.base_url(),
            storage_dir = %dir.display(),
            "Bootstrapping store"
        );

        let store = Self::new(client, Arc::new(FileStorage::new(dir)));
        store.rehydrate()?;
        Ok(store)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Clone of the current snapshot.
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Read part of the current snapshot without cloning the rest.
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.state.borrow())
    }

    /// Receiver woken after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Apply an auth intent and keep `root` in step with it.
    ///
    /// A new or refreshed session is written before it becomes visible, so
    /// a failed write leaves the previous auth state untouched. Ending a
    /// session always lands in memory together with a reset of every data
    /// slice; a failure to clear `root` is reported afterwards.
    pub fn dispatch_auth(&self, intent: AuthIntent) -> Result<(), StorageError> {
        let _guard = self.auth_write.lock();

        // Already durable.
        let from_storage = matches!(intent, AuthIntent::Rehydrated { .. });
        let current = self.select(|state| state.auth.clone());
        let next = AuthReducer::reduce(current.clone(), intent);
        let changed = next.session != current.session;

        if changed && !from_storage {
            if let Some(session) = &next.session {
                self.persistence.save(Some(session))?;
            }
        }

        let ended = changed && next.session.is_none();
        self.state.send_modify(|state| {
            state.auth = next;
            if ended {
                state.reset_data();
            }
        });

        if ended && !from_storage {
            self.persistence.clear()?;
        }
        Ok(())
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.select(|state| state.auth.token().map(str::to_owned))
    }

    pub(crate) fn next_request_id(&self) -> RequestId {
        RequestId(self.next_request.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// A 401 on any authenticated call means the token is dead.
    pub(crate) fn invalidate_on_unauthorized(&self, err: &ApiError) {
        if !err.is_unauthorized() || self.token().is_none() {
            return;
        }
        tracing::warn!("Server rejected session token, signing out");
        let intent = AuthIntent::SessionInvalidated {
            message: err.user_message(),
        };
        if let Err(e) = self.dispatch_auth(intent) {
            tracing::error!(error = %e, "Failed to clear persisted session");
        }
    }
}
