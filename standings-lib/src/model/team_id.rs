use chrono::Utc;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::model::Team;

/// Opaque identifier of a [`Team`].
///
/// Assigned once when the team is created and never reassigned. Stored as a string so that
/// identifiers written by other tools round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Allocates an identifier that no team in `existing` uses yet.
    ///
    /// Identifiers are based on the current time in milliseconds. If that value is taken (two
    /// teams created within the same millisecond, or a clock that went backwards) it is bumped
    /// until it is free.
    pub fn generate(existing: &[Team]) -> Self {
        let mut candidate = Utc::now().timestamp_millis();

        loop {
            let id = candidate.to_string();
            if !existing.iter().any(|t| t.id.as_str() == id) {
                return Self(id);
            }
            candidate = candidate.saturating_add(1);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TeamId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
