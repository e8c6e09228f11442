use crate::mvi::SliceState;

use super::model::Session;

/// Which navigation branch the app should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationGate {
    /// A login/register/loadUser call is in flight.
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Auth sub-tree of the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SliceState for AuthState {}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token().expose())
    }

    pub fn gate(&self) -> NavigationGate {
        if self.loading {
            NavigationGate::Loading
        } else if self.is_authenticated() {
            NavigationGate::Authenticated
        } else {
            NavigationGate::Unauthenticated
        }
    }
}
