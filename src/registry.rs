//! Named mailer instances with fail-fast configuration.
//!
//! A registry owns one transport per name, each resolved against the package
//! [`Config`] at registration time. Configuration problems surface when a
//! mailer is registered, never at send time, and a failed registration leaves
//! the other mailers untouched.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{Config, MailerSettings};
use crate::error::Result;
use crate::transport::FreesendTransport;

/// Registry of named Freesend transports.
///
/// No global state: callers own the registry and may wrap it in `Arc` for
/// sharing. Transports are handed out as `Arc` so connection pools are reused
/// across callers.
#[derive(Debug, Default)]
pub struct MailerRegistry {
    config: Config,
    mailers: HashMap<String, Arc<FreesendTransport>>,
}

impl MailerRegistry {
    /// Create a registry with the given package configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            mailers: HashMap::new(),
        }
    }

    /// Create a registry from the standard config file and environment.
    pub fn from_config_file() -> Self {
        Self::new(Config::load())
    }

    /// Register a named mailer, resolving and validating its credentials now.
    ///
    /// Replaces any previous mailer with the same name. Returns the transport
    /// for immediate use.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        settings: MailerSettings,
    ) -> Result<Arc<FreesendTransport>> {
        let name = name.into();
        let credentials = self.config.resolve(&settings)?;
        let transport = Arc::new(FreesendTransport::new(credentials)?);
        tracing::debug!(mailer = %name, endpoint = %transport.endpoint(), "registered mailer");
        self.mailers.insert(name, Arc::clone(&transport));
        Ok(transport)
    }

    /// Look up a registered mailer by name.
    pub fn get(&self, name: &str) -> Option<Arc<FreesendTransport>> {
        self.mailers.get(name).cloned()
    }

    /// Names of all registered mailers.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.mailers.keys().map(String::as_str)
    }
}
