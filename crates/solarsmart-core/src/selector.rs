// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! The active location shared by the live poller and the forecast pipeline.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// A location value stamped with the version it was set at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub location: String,
    pub version: u64,
}

impl Selection {
    /// Blank locations mean "nothing selected"
    pub fn is_empty(&self) -> bool {
        self.location.trim().is_empty()
    }
}

/// Handle to the active location.
///
/// Clones share the same value. Every change bumps the version, so holders of
/// an older [`Selection`] can tell exactly that it has been superseded.
#[derive(Debug, Clone)]
pub struct SelectorContext {
    tx: Arc<watch::Sender<Selection>>,
}

impl SelectorContext {
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(Selection {
            location: initial.into(),
            version: 0,
        });
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Selection {
        self.tx.borrow().clone()
    }

    pub fn location(&self) -> String {
        self.tx.borrow().location.clone()
    }

    /// Replace the active location.
    ///
    /// Returns `false` and leaves the version alone when `location` is already
    /// active.
    pub fn set(&self, location: impl Into<String>) -> bool {
        let location = location.into();
        let changed = self.tx.send_if_modified(|selection| {
            if selection.location == location {
                return false;
            }
            selection.location.clone_from(&location);
            selection.version += 1;
            true
        });

        if changed {
            info!("📍 Active location set to '{}'", location);
        }
        changed
    }

    pub fn is_current(&self, selection: &Selection) -> bool {
        self.tx.borrow().version == selection.version
    }

    /// Receiver that is notified on every change
    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bumps_version() {
        let selector = SelectorContext::new("Nagpur");
        let before = selector.current();

        assert!(selector.set("Mumbai"));

        let after = selector.current();
        assert_eq!(after.location, "Mumbai");
        assert_eq!(after.version, before.version + 1);
        assert!(!selector.is_current(&before));
        assert!(selector.is_current(&after));
    }

    #[test]
    fn test_setting_same_location_is_noop() {
        let selector = SelectorContext::new("Nagpur");
        let before = selector.current();

        assert!(!selector.set("Nagpur"));
        assert!(selector.is_current(&before));
    }

    #[test]
    fn test_clones_share_value() {
        let selector = SelectorContext::new("Nagpur");
        let other = selector.clone();

        other.set("Pune");
        assert_eq!(selector.location(), "Pune");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let selector = SelectorContext::new("");
        let mut rx = selector.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        selector.set("Jaipur");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().location, "Jaipur");
    }
}
