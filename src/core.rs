//! Storage registry
//!
//! The registry turns builder options into manager instances, building each
//! `(kind, name)` at most once. Every key owns a slot mutex: the map lock is
//! held only to find or create the slot, and a build runs under the slot lock,
//! so callers asking for the same name wait for one build while different
//! names build in parallel. A failed build removes its slot unless another
//! caller is already waiting on it; a panicking build leaves an empty slot
//! that the next caller builds again.

use crate::errors::StowageError;
use crate::options::{BuilderOption, ManagerKind};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

type Instance = Box<dyn Any + Send + Sync>;
type Slot = Arc<Mutex<Option<Instance>>>;

#[derive(Default)]
pub struct StorageRegistry {
    slots: Mutex<HashMap<ManagerKind, HashMap<String, Slot>>>,
}

impl fmt::Debug for StorageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = match self.slots.try_lock() {
            Ok(slots) => slots.values().map(HashMap::len).sum::<usize>().to_string(),
            Err(TryLockError::Poisoned(poisoned)) => poisoned
                .into_inner()
                .values()
                .map(HashMap::len)
                .sum::<usize>()
                .to_string(),
            Err(TryLockError::WouldBlock) => "locked".to_string(),
        };
        f.debug_struct("StorageRegistry")
            .field("entries", &entries)
            .finish()
    }
}

/// Slots only ever hold `None` or a finished instance, so a lock poisoned by
/// a panicking build is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn is_built(slot: &Slot) -> bool {
    match slot.try_lock() {
        Ok(guard) => guard.is_some(),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().is_some(),
        Err(TryLockError::WouldBlock) => false,
    }
}

impl StorageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached or freshly built manager; failures are logged and read as `None`
    pub fn get<O: BuilderOption>(&self, option: &O) -> Option<Arc<O::Manager>> {
        match self.try_get(option) {
            Ok(manager) => Some(manager),
            Err(e) => {
                tracing::warn!("[REGISTRY] failed to build {}: {}", option.name(), e);
                None
            }
        }
    }

    /// Like [`get`](Self::get) but returns the build error
    pub fn try_get<O: BuilderOption>(&self, option: &O) -> Result<Arc<O::Manager>, StowageError> {
        let name = option.name();
        let slot = self.slot(O::KIND, &name);
        let mut guard = lock(&slot);

        if let Some(existing) = guard.as_ref() {
            return existing
                .downcast_ref::<Arc<O::Manager>>()
                .map(Arc::clone)
                .ok_or_else(|| {
                    StowageError::Internal(format!(
                        "'{}' is registered with a different manager type",
                        name
                    ))
                });
        }

        match option.build() {
            Ok(manager) => {
                *guard = Some(Box::new(Arc::clone(&manager)));
                tracing::debug!("[REGISTRY] built {}", name);
                Ok(manager)
            }
            Err(e) => {
                drop(guard);
                self.release(O::KIND, &name, slot);
                Err(e)
            }
        }
    }

    /// Whether a manager for `option` has been built
    pub fn contains<O: BuilderOption>(&self, option: &O) -> bool {
        let slots = lock(&self.slots);
        slots
            .get(&O::KIND)
            .and_then(|named| named.get(&option.name()))
            .is_some_and(is_built)
    }

    /// Names of built managers of `kind`, sorted
    pub fn names(&self, kind: ManagerKind) -> Vec<String> {
        let slots = lock(&self.slots);
        let mut names: Vec<String> = slots
            .get(&kind)
            .into_iter()
            .flat_map(|named| named.iter())
            .filter(|(_, slot)| is_built(slot))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Number of slots held, built or not
    pub fn slot_count(&self) -> usize {
        lock(&self.slots).values().map(HashMap::len).sum()
    }

    fn slot(&self, kind: ManagerKind, name: &str) -> Slot {
        let mut slots = lock(&self.slots);
        let slot = slots
            .entry(kind)
            .or_default()
            .entry(name.to_string())
            .or_default();
        Arc::clone(slot)
    }

    /// Drops an empty slot after a failed build unless another caller holds it.
    /// Clones are only handed out under the map lock, so the count is stable here.
    fn release(&self, kind: ManagerKind, name: &str, slot: Slot) {
        let mut slots = lock(&self.slots);
        let Some(named) = slots.get_mut(&kind) else {
            return;
        };
        let unused = named
            .get(name)
            .is_some_and(|held| Arc::ptr_eq(held, &slot) && Arc::strong_count(&slot) == 2);
        if unused && !is_built(&slot) {
            named.remove(name);
            if named.is_empty() {
                slots.remove(&kind);
            }
        }
    }
}
