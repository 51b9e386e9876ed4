//! Link from an instance to the external provider that owns it
//!
//! Metadata only: it is never copied, compared or snapshotted with the
//! instance's values.

use std::fmt;
use std::sync::{Arc, Weak};

/// An external owner of settings instances, such as a persistence backend
pub trait SettingsProvider: Send + Sync {
    fn provider_name(&self) -> &str;
}

/// Weak provider reference plus the optional key the provider filed the
/// instance under
#[derive(Clone)]
pub struct ProviderLink {
    provider: Weak<dyn SettingsProvider>,
    key: Option<String>,
}

impl ProviderLink {
    pub fn new(provider: &Arc<dyn SettingsProvider>, key: Option<String>) -> Self {
        Self {
            provider: Arc::downgrade(provider),
            key,
        }
    }

    /// The provider, if it is still alive
    pub fn provider(&self) -> Option<Arc<dyn SettingsProvider>> {
        self.provider.upgrade()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.provider.strong_count() > 0
    }
}

impl fmt::Debug for ProviderLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.provider().map(|p| p.provider_name().to_string());
        f.debug_struct("ProviderLink")
            .field("provider", &name)
            .field("key", &self.key)
            .finish()
    }
}
