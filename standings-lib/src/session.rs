//! Admin login gate.
//!
//! A [`Session`] decides whether edit controls are offered. It is not a security boundary: the
//! secret is one shared static value and the underlying storage stays writable regardless.

use std::{env, fmt, sync::Arc};

use strum::Display;
use tracing::{debug, warn};

/// Environment variable holding the admin password
pub const ADMIN_PASSWORD_VAR: &str = "STANDINGS_ADMIN_PASSWORD";

/// Used when [`ADMIN_PASSWORD_VAR`] is unset. Deliberately weak; set the variable.
pub const FALLBACK_ADMIN_PASSWORD: &str = "123";

/// The configured admin password.
#[derive(Clone)]
pub struct AdminSecret(Arc<str>);

impl AdminSecret {
    pub fn new(secret: &str) -> Self {
        Self(secret.into())
    }

    /// Reads the secret from [`ADMIN_PASSWORD_VAR`].
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(ADMIN_PASSWORD_VAR).ok())
    }

    /// Uses `value` when the variable is set (even to an empty string), the fallback otherwise.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(secret) => Self::new(&secret),
            None => {
                warn!("{ADMIN_PASSWORD_VAR} is not set, using the insecure default admin password");
                Self::new(FALLBACK_ADMIN_PASSWORD)
            }
        }
    }

    fn matches(&self, candidate: &str) -> bool {
        &*self.0 == candidate
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authorized,
}

/// Login state of one consumer. Starts anonymous.
#[derive(Debug, Clone)]
pub struct Session {
    secret: AdminSecret,
    state: SessionState,
}

impl Session {
    pub fn new(secret: AdminSecret) -> Self {
        Self {
            secret,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.state == SessionState::Authorized
    }

    /// Authorizes the session if `candidate` matches the secret.
    ///
    /// Returns whether it matched. A mismatch leaves the state as it was.
    pub fn login(&mut self, candidate: &str) -> bool {
        if self.secret.matches(candidate) {
            self.state = SessionState::Authorized;
            debug!("Admin session authorized");
            true
        } else {
            debug!("Admin login rejected");
            false
        }
    }

    pub fn logout(&mut self) {
        self.state = SessionState::Anonymous;
    }
}
