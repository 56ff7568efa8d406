//! Federated login handshake.
//!
//! The portal delegates authentication to a separate identity-provider
//! domain: a login control redirects there, credentials are submitted on
//! the foreign page, and the provider redirects back. [`authenticate`]
//! drives that round trip, confirming each leg by watching the session's
//! location. The handshake is one-shot; a timeout on either leg is fatal
//! and the pipeline must not proceed to course discovery.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::PortalConfig;
use crate::session::{Session, SessionError};

/// Login identifier and secret, held in memory for the duration of a run.
///
/// Never persisted and never logged; the `Debug` impl masks the secret so
/// the pair cannot leak through diagnostic output.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// The login identifier.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Errors from the login handshake. All fatal; nothing is retried.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// A login redirect was never observed within the wait bound.
    #[error("login never reached a location containing '{expected_domain}' within {waited:?}")]
    Timeout {
        /// Domain substring the wait was watching for
        expected_domain: String,
        /// How long the handshake waited
        waited: Duration,
    },

    /// The browser session failed mid-handshake.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Drives the federated login redirect and returns once the session is
/// authenticated back on the portal domain.
///
/// Steps: open the portal root, activate the login control, wait for the
/// identity-provider domain, submit the credentials there, wait for the
/// return redirect to the portal domain.
pub async fn authenticate(
    session: &dyn Session,
    credentials: &Credentials,
    config: &PortalConfig,
) -> Result<(), AuthError> {
    let wait = config.nav_wait();

    session.goto(&config.portal_url).await?;
    session.click(&config.login_button_id).await?;
    debug!(domain = %config.idp_domain, "Awaiting identity-provider redirect");
    if !wait.location_contains(session, &config.idp_domain).await? {
        return Err(AuthError::Timeout {
            expected_domain: config.idp_domain.clone(),
            waited: wait.timeout,
        });
    }

    session
        .send_keys(&config.username_field_id, credentials.username())
        .await?;
    session
        .send_keys(&config.password_field_id, credentials.secret())
        .await?;
    session.click(&config.submit_button_id).await?;
    debug!(domain = %config.portal_domain, "Awaiting return redirect to the portal");
    if !wait
        .location_contains(session, &config.portal_domain)
        .await?
    {
        return Err(AuthError::Timeout {
            expected_domain: config.portal_domain.clone(),
            waited: wait.timeout,
        });
    }

    info!("Authenticated with the portal");
    Ok(())
}
