//! Transient display URLs with scoped lifetime.
//!
//! Each loaded asset owns exactly one [`DisplayUrl`]. Dropping it (on replacement, clearing, or
//! teardown of the owning slot) releases the URL from its [`UrlRegistry`].

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::assets::library::SlotKind;

#[derive(Clone, Debug, Default)]
/// Issuer and ledger of live display URLs.
pub struct UrlRegistry {
    live: Arc<Mutex<BTreeSet<String>>>,
}

impl UrlRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh URL for `slot`. It stays live until the returned handle is dropped.
    pub fn acquire(&self, slot: SlotKind) -> DisplayUrl {
        let url = format!("blob:drape/{slot}/{}", uuid::Uuid::new_v4().simple());
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone());
        tracing::trace!(%url, "display url acquired");
        DisplayUrl {
            url,
            registry: self.clone(),
        }
    }

    /// Number of URLs not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether `url` is still live.
    pub fn is_live(&self, url: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    fn release(&self, url: &str) {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
        tracing::trace!(%url, "display url released");
    }
}

/// Owned display URL; released on drop.
#[derive(Debug)]
pub struct DisplayUrl {
    url: String,
    registry: UrlRegistry,
}

impl DisplayUrl {
    /// The URL string consumers render from.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for DisplayUrl {
    fn drop(&mut self) {
        self.registry.release(&self.url);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/display_url.rs"]
mod tests;
