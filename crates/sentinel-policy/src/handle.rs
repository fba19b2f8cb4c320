//! Atomic snapshot swap for config reload (spec §3/§9): "reload produces
//! a new snapshot that replaces the live reference atomically. No
//! mutation of existing snapshot." Readers never block; only the reload
//! path takes a lock, and only around the pointer swap itself.

use crate::snapshot::CompiledPolicy;
use std::sync::{Arc, Mutex};

pub struct ConfigHandle {
    current: Mutex<Arc<CompiledPolicy>>,
}

impl ConfigHandle {
    pub fn new(initial: CompiledPolicy) -> Self {
        Self {
            current: Mutex::new(Arc::new(initial)),
        }
    }

    /// Returns an `Arc` clone of the live snapshot. An in-flight decision
    /// that already holds a clone keeps observing that clone even after a
    /// concurrent `swap`.
    pub fn load(&self) -> Arc<CompiledPolicy> {
        self.current.lock().expect("config handle mutex poisoned").clone()
    }

    /// Publish a new snapshot, replacing the live reference. Returns the
    /// snapshot that was previously live.
    pub fn swap(&self, new: CompiledPolicy) -> Arc<CompiledPolicy> {
        let mut guard = self.current.lock().expect("config handle mutex poisoned");
        let previous = std::mem::replace(&mut *guard, Arc::new(new));
        tracing::debug!(from_digest = %previous.digest, "configuration snapshot swapped");
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn swap_replaces_live_snapshot_without_mutating_old_one() {
        let handle = ConfigHandle::new(CompiledPolicy::compile(Config::default()).unwrap());
        let before = handle.load();
        let before_digest = before.digest.clone();

        let mut new_cfg = Config::default();
        new_cfg.mode.strict_mode = true;
        handle.swap(CompiledPolicy::compile(new_cfg).unwrap());

        assert_eq!(before.digest, before_digest, "previously loaded Arc is untouched");
        let after = handle.load();
        assert_ne!(after.digest, before.digest);
    }
}
