use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use marquee_shared::events::UserRegisteredEvent;
use marquee_shared::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{keys, StateStore, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A user record plus its password. Lives only in the credential list;
/// the password is stripped before a user is set current or persisted.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: User,
    pub password: Masked<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("User snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Holds the credential directory and the current session's user.
///
/// Login and register deliberately resolve to plain booleans: the caller
/// only ever shows a generic failure message, never the reason.
pub struct IdentityStore {
    credentials: Vec<Credential>,
    current: Option<User>,
    storage: Arc<dyn StateStore>,
    latency: Duration,
}

impl IdentityStore {
    /// Restores the persisted current-user snapshot if one exists.
    /// A corrupt snapshot is discarded rather than propagated.
    pub async fn restore(storage: Arc<dyn StateStore>) -> Result<Self, IdentityError> {
        let current = match storage.get(keys::CURRENT_USER).await? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!("Discarding corrupt user snapshot: {}", err);
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            credentials: demo_credentials(),
            current,
            storage,
            latency: Duration::from_millis(500),
        })
    }

    /// Overrides the simulated directory-lookup latency (zero in tests).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Matches a credential by email and password; with `require_admin`
    /// the record must additionally carry the Admin role. On a match the
    /// current user is set and persisted. No match is reported as `false`
    /// with no further distinction.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        require_admin: bool,
    ) -> Result<bool, IdentityError> {
        tokio::time::sleep(self.latency).await;

        let found = self.credentials.iter().find(|c| {
            c.user.email == email
                && c.password.0 == password
                && (!require_admin || c.user.role == Role::Admin)
        });

        match found {
            Some(credential) => {
                let user = credential.user.clone();
                self.storage
                    .put(keys::CURRENT_USER, &serde_json::to_string(&user)?)
                    .await?;
                tracing::info!("User logged in: {}", user.email);
                self.current = Some(user);
                Ok(true)
            }
            None => {
                tracing::warn!("Login rejected for {}", email);
                Ok(false)
            }
        }
    }

    /// Appends a new `User`-role credential and makes it current.
    /// Fails (false) when the email is already taken.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, IdentityError> {
        tokio::time::sleep(self.latency).await;

        if self.credentials.iter().any(|c| c.user.email == email) {
            tracing::warn!("Registration rejected, email already taken: {}", email);
            return Ok(false);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::User,
        };

        self.credentials.push(Credential {
            user: user.clone(),
            password: Masked(password.to_string()),
        });
        self.storage
            .put(keys::CURRENT_USER, &serde_json::to_string(&user)?)
            .await?;

        let event = UserRegisteredEvent {
            user_id: user.id.clone(),
            email: user.email.clone(),
            registered_at: Utc::now().timestamp_millis(),
        };
        tracing::info!("User registered: {:?}", event);

        self.current = Some(user);
        Ok(true)
    }

    /// Clears the current user and its persisted snapshot.
    pub async fn logout(&mut self) -> Result<(), IdentityError> {
        self.storage.remove(keys::CURRENT_USER).await?;
        if let Some(user) = self.current.take() {
            tracing::info!("User logged out: {}", user.email);
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.current.as_ref(), Some(u) if u.role == Role::Admin)
    }
}

/// The fixed demo directory.
fn demo_credentials() -> Vec<Credential> {
    vec![
        Credential {
            user: User {
                id: "1".to_string(),
                name: "Admin User".to_string(),
                email: "admin@cinema.com".to_string(),
                role: Role::Admin,
            },
            password: Masked("admin123".to_string()),
        },
        Credential {
            user: User {
                id: "2".to_string(),
                name: "John Doe".to_string(),
                email: "user@cinema.com".to_string(),
                role: Role::User,
            },
            password: Masked("user123".to_string()),
        },
    ]
}
