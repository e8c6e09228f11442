//! Intents for the auth slice.

use crate::mvi::Intent;

use super::model::{Session, User};

#[derive(Debug, Clone)]
pub enum AuthIntent {
    /// Durable storage was read at startup.
    Rehydrated { session: Option<Session> },

    /// login/register/loadUser dispatched.
    RequestStarted,

    /// login/register succeeded.
    Authenticated { session: Session },

    /// loadUser confirmed the token; the profile may have changed.
    UserRefreshed { user: User },

    /// login/register/loadUser failed without invalidating the session.
    RequestFailed { message: String },

    /// The server rejected the token.
    SessionInvalidated { message: String },

    LoggedOut,
}

impl Intent for AuthIntent {}
