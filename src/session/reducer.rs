//! Reducer for the auth slice.

use crate::mvi::Reducer;

use super::intent::AuthIntent;
use super::state::AuthState;

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Intent = AuthIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::Rehydrated { session } => AuthState {
                session,
                loading: false,
                error: None,
            },

            AuthIntent::RequestStarted => AuthState {
                loading: true,
                error: None,
                ..state
            },

            AuthIntent::Authenticated { session } => AuthState {
                session: Some(session),
                loading: false,
                error: None,
            },

            AuthIntent::UserRefreshed { user } => AuthState {
                session: state.session.map(|s| s.with_user(user)),
                loading: false,
                error: None,
            },

            AuthIntent::RequestFailed { message } => AuthState {
                session: state.session,
                loading: false,
                error: Some(message),
            },

            AuthIntent::SessionInvalidated { message } => AuthState {
                session: None,
                loading: false,
                error: Some(message),
            },

            AuthIntent::LoggedOut => AuthState::default(),
        }
    }
}
