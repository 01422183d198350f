use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::Result;
use crate::types::{Credentials, Token};

/// Performs the login exchange on behalf of an [`AuthSession`].
pub(crate) trait Authenticator {
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<Token>> + Send;
}

struct CachedToken {
    token: Token,
    /// `None` when the lifetime runs past what the clock can represent.
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn usable(&self, margin: Duration) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => Instant::now()
                .checked_add(margin)
                .is_some_and(|deadline| deadline < expires_at),
        }
    }
}

/// Owns the single cached access token for a client.
///
/// The check-and-refresh path runs under one async lock, so concurrent callers
/// that find the token stale wait for a single login instead of racing their own.
pub(crate) struct AuthSession {
    credentials: Credentials,
    expiry_margin: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl AuthSession {
    pub fn new(credentials: Credentials, expiry_margin: Duration) -> Self {
        Self {
            credentials,
            expiry_margin,
            cached: Mutex::new(None),
        }
    }

    /// Returns a usable bearer token, logging in only when the cached one has lapsed.
    /// A failed login leaves the previous token in place.
    pub async fn acquire_token<A: Authenticator + Sync>(&self, auth: &A) -> Result<String> {
        let mut slot = self.cached.lock().await;

        if let Some(cached) = slot.as_ref()
            && cached.usable(self.expiry_margin)
        {
            return Ok(cached.token.access_token.clone());
        }

        debug!(email = %self.credentials.email, "access token missing or expired, logging in");
        let token = auth.login(&self.credentials).await?;
        let expires_at =
            Instant::now().checked_add(Duration::from_secs(token.access_token_expires_in));
        debug!(ttl_secs = token.access_token_expires_in, "access token refreshed");

        let access_token = token.access_token.clone();
        *slot = Some(CachedToken { token, expires_at });
        Ok(access_token)
    }
}
