//! Session operations: login, register, token validation, logout.

use reqwest::Method;
use serde::Deserialize;

use super::Store;
use crate::api::{ApiError, Payload};
use crate::session::{AuthIntent, AuthPayload, NavigationGate, Session, User};
use crate::storage::StorageError;
use crate::validation::{LoginForm, RegistrationForm};

/// `GET /api/auth/me` answers either `{ user }` or the bare user.
#[derive(Deserialize)]
#[serde(untagged)]
enum MeBody {
    Wrapped { user: User },
    Bare(User),
}

impl MeBody {
    fn into_user(self) -> User {
        match self {
            MeBody::Wrapped { user } | MeBody::Bare(user) => user,
        }
    }
}

impl Store {
    /// Load the persisted session into memory.
    pub fn rehydrate(&self) -> Result<Option<Session>, StorageError> {
        let session = self.persistence.load()?;
        match &session {
            Some(s) => tracing::info!(user_id = %s.user_id(), "Rehydrated session"),
            None => tracing::info!("No persisted session"),
        }
        self.dispatch_auth(AuthIntent::Rehydrated {
            session: session.clone(),
        })?;
        Ok(session)
    }

    pub fn session(&self) -> Option<Session> {
        self.select(|state| state.auth.session.clone())
    }

    pub fn gate(&self) -> NavigationGate {
        self.select(|state| state.auth.gate())
    }

    /// `POST /api/auth/login`. An invalid form is rejected before any
    /// request is made.
    pub async fn login(&self, form: &LoginForm) -> Result<Session, ApiError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let payload = Payload::new()
            .field("email", form.email.trim())
            .field("password", form.password.as_str());
        self.authenticate("auth/login", &payload).await
    }

    /// `POST /api/auth/register`.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session, ApiError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let mut payload = Payload::new()
            .field("name", form.name.trim())
            .field("email", form.email.trim())
            .field("password", form.password.as_str())
            .field("farmName", form.farm_name.trim());
        if let Some(phone) = form.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            payload = payload.field("phone", phone.trim());
        }
        self.authenticate("auth/register", &payload).await
    }

    /// Validate the current token against `GET /api/auth/me`.
    ///
    /// A 401 ends the session. Any other failure keeps it, so an offline
    /// start still lands on the authenticated branch. Returns `Ok(None)`
    /// without a request when there is no session.
    pub async fn load_user(&self) -> Result<Option<User>, ApiError> {
        let Some(token) = self.token() else {
            return Ok(None);
        };

        self.dispatch_auth(AuthIntent::RequestStarted)?;
        match self.client.get::<MeBody>("auth/me", &[], Some(&token)).await {
            Ok(body) => {
                let user = body.into_user();
                tracing::info!(user_id = %user.id, "Session validated");
                if let Err(e) = self.dispatch_auth(AuthIntent::UserRefreshed { user: user.clone() }) {
                    return Err(self.reject_unpersisted(e));
                }
                Ok(Some(user))
            }
            Err(err) if err.is_unauthorized() => {
                tracing::warn!("Persisted token rejected");
                self.dispatch_auth(AuthIntent::SessionInvalidated {
                    message: err.user_message(),
                })?;
                Err(err)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Could not validate session");
                self.dispatch_auth(AuthIntent::RequestFailed {
                    message: err.user_message(),
                })?;
                Err(err)
            }
        }
    }

    /// Clear the session everywhere and drop every cached slice.
    ///
    /// Memory is always cleared. A storage failure is returned after that.
    pub fn logout(&self) -> Result<(), StorageError> {
        let user_id = self.session().map(|s| s.user_id().to_string());
        let result = self.dispatch_auth(AuthIntent::LoggedOut);
        // Slices cached without a session go too.
        self.state.send_modify(|state| state.reset_data());
        match &result {
            Ok(()) => tracing::info!(user_id = ?user_id, "Logged out"),
            Err(e) => tracing::error!(user_id = ?user_id, error = %e, "Logged out, but persisted session was not cleared"),
        }
        result
    }

    async fn authenticate(&self, path: &str, payload: &Payload) -> Result<Session, ApiError> {
        self.dispatch_auth(AuthIntent::RequestStarted)?;

        let result = self
            .client
            .send::<AuthPayload>(Method::POST, path, payload, None)
            .await
            .and_then(|body| {
                body.into_session()
                    .map_err(|e| ApiError::Parse(e.to_string()))
            });

        match result {
            Ok(session) => {
                if let Err(e) = self.dispatch_auth(AuthIntent::Authenticated {
                    session: session.clone(),
                }) {
                    return Err(self.reject_unpersisted(e));
                }
                tracing::info!(user_id = %session.user_id(), path, "Authenticated");
                Ok(session)
            }
            Err(err) => {
                tracing::warn!(path, error_type = err.error_type(), error = %err, "Authentication failed");
                self.dispatch_auth(AuthIntent::RequestFailed {
                    message: err.user_message(),
                })?;
                Err(err)
            }
        }
    }

    /// Settle a pending auth request whose session could not be written.
    /// The unsaved session never becomes visible.
    fn reject_unpersisted(&self, err: StorageError) -> ApiError {
        tracing::error!(error = %err, "Could not persist session");
        let err = ApiError::Storage(err);
        let settled = self.dispatch_auth(AuthIntent::RequestFailed {
            message: err.user_message(),
        });
        if let Err(e) = settled {
            tracing::error!(error = %e, "Failed to settle auth request");
        }
        err
    }
}
