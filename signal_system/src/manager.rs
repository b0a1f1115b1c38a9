use crate::event::ChangeEvent;
use crate::types::ChangeCallback;

/// Signal manager for change notifications
pub struct SignalManager {
    callbacks: std::sync::RwLock<Vec<ChangeCallback>>,
}

impl std::fmt::Debug for SignalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalManager")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

impl SignalManager {
    pub fn new() -> Self {
        Self {
            callbacks: std::sync::RwLock::new(Vec::new()),
        }
    }

    /// Add event callback
    pub fn add_callback<F>(&self, callback: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.push(Box::new(callback));
        }
    }

    /// Emit event to all subscribers
    pub fn emit(&self, event: ChangeEvent) {
        tracing::trace!(
            "[SIGNAL] {:?} on {} ({:?})",
            event.change_type,
            event.table,
            event.record_id
        );
        if let Ok(callbacks) = self.callbacks.read() {
            for callback in callbacks.iter() {
                callback(&event);
            }
        }
    }

    /// Clear all callbacks
    pub fn clear_callbacks(&self) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.clear();
        }
    }

    /// Get number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for SignalManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ChangeType;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_reaches_every_callback() {
        let manager = SignalManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = seen.clone();
            manager.add_callback(move |event| {
                seen.lock().unwrap().push(event.change_type);
            });
        }
        manager.emit(ChangeEvent::new(ChangeType::Insert, "note"));

        assert_eq!(*seen.lock().unwrap(), vec![ChangeType::Insert, ChangeType::Insert]);
        assert_eq!(manager.callback_count(), 2);

        manager.clear_callbacks();
        assert_eq!(manager.callback_count(), 0);
    }
}
