//! Session domain model.
//!
//! A [`Session`] is either absent or fully populated: it cannot be built, nor
//! deserialized, with an empty token.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Basic,
    Premium,
}

/// Authenticated user's profile as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub farm_name: String,
    #[serde(default, alias = "subscriptionTier")]
    pub subscription: SubscriptionTier,
}

/// Opaque bearer credential.
///
/// The inner value is never exposed via Debug or Display.
/// Use `expose()` when building the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(••••••••)")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "••••••••")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session token is empty")]
    EmptyToken,
}

/// Wire/persistence shape of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    user: User,
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    user: User,
    token: BearerToken,
}

impl Session {
    pub fn new(user: User, token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self {
            user,
            token: BearerToken(token),
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn name(&self) -> &str {
        &self.user.name
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn farm_name(&self) -> &str {
        &self.user.farm_name
    }

    pub fn subscription(&self) -> SubscriptionTier {
        self.user.subscription
    }

    /// Same credential, refreshed profile.
    pub fn with_user(self, user: User) -> Self {
        Self {
            user,
            token: self.token,
        }
    }
}

impl TryFrom<SessionRecord> for Session {
    type Error = SessionError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        Session::new(record.user, record.token)
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        Self {
            user: session.user,
            token: session.token.0,
        }
    }
}

/// Body of a successful login/register response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

impl AuthPayload {
    pub fn into_session(self) -> Result<Session, SessionError> {
        Session::new(self.user, self.token)
    }
}
