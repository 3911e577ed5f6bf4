use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

use super::crypto::generate_token;

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// Ephemeral token -> user binding with per-entry expiry.
///
/// Entries past their expiry resolve to absent immediately; the periodic
/// [`SessionStore::purge_expired`] sweep reclaims their memory. A user may
/// hold any number of concurrent sessions.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Mint a fresh token bound to the user for the configured TTL.
    pub fn create(&self, user_id: &str) -> String {
        let token = generate_token();
        let entry = SessionEntry {
            user_id: user_id.to_string(),
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.insert(token.clone(), entry);
        token
    }

    /// Resolve a token to its user id. Absent for unknown tokens and for
    /// entries whose TTL has elapsed, revoked or not.
    pub fn resolve(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(token)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.user_id.clone())
    }

    /// Remove a token. Revoking an unknown or already-revoked token is a no-op.
    pub fn revoke(&self, token: &str) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.remove(token);
    }

    /// Drop entries whose expiry has passed. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|_, entry| entry.expires_at > now);
        before - sessions.len()
    }
}
