//! Explicit provider sessions.
//!
//! Upstream data providers may need authentication.  Instead of a
//! process-wide "initialise" call, the caller acquires a [`ProviderSession`]
//! once per run and hands it to every fetch.  A session has a defined
//! lifetime: once its TTL elapses every authorisation fails with
//! [`AuthError::Expired`] and the caller must acquire a new one.

use std::fmt;
use std::time::{Duration, Instant};

use crate::AuthError;

/// An acquired (possibly anonymous) session with one data provider.
#[derive(Clone)]
pub struct ProviderSession {
    provider:    String,
    credential:  Option<String>,
    acquired_at: Instant,
    ttl:         Option<Duration>,
}

impl ProviderSession {
    /// Acquire a session holding `credential`.  `ttl = None` never expires.
    pub fn acquire(provider: impl Into<String>, credential: impl Into<String>, ttl: Option<Duration>) -> Self {
        let provider = provider.into();
        log::debug!("acquired session for provider {provider:?} (ttl: {ttl:?})");
        Self {
            provider,
            credential: Some(credential.into()),
            acquired_at: Instant::now(),
            ttl,
        }
    }

    /// A session without a credential, for sources that need none.
    pub fn anonymous(provider: impl Into<String>) -> Self {
        Self {
            provider:    provider.into(),
            credential:  None,
            acquired_at: Instant::now(),
            ttl:         None,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// `true` once the TTL has elapsed.  A zero TTL is expired immediately.
    pub fn is_expired(&self) -> bool {
        self.ttl.is_some_and(|ttl| self.acquired_at.elapsed() >= ttl)
    }

    /// Check the session may be used for a fetch.
    pub fn authorize(&self, requires_credential: bool) -> Result<(), AuthError> {
        if self.is_expired() {
            return Err(AuthError::Expired { provider: self.provider.clone() });
        }
        if requires_credential && self.credential.is_none() {
            return Err(AuthError::MissingCredential { provider: self.provider.clone() });
        }
        Ok(())
    }
}

impl fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSession")
            .field("provider", &self.provider)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("ttl", &self.ttl)
            .finish()
    }
}
