use std::{fmt::Display, hash::Hash, sync::Arc};

use dashmap::{DashMap, mapref::entry::Entry};
use thiserror::Error;

/// Keys that currently have a simulated operation outstanding.
#[derive(Debug, Clone)]
pub struct InFlight<K>
where
    K: Eq + Hash + Clone,
{
    keys: Arc<DashMap<K, ()>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("operation already in progress for {key}")]
pub struct AlreadyRunning {
    pub key: String,
}

impl<K> Default for InFlight<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self {
            keys: Arc::new(DashMap::new()),
        }
    }
}

impl<K> InFlight<K>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, key: K) -> Result<InFlightGuard<K>, AlreadyRunning> {
        match self.keys.entry(key.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(());
                Ok(InFlightGuard {
                    key,
                    keys: Arc::clone(&self.keys),
                })
            }
            Entry::Occupied(_) => Err(AlreadyRunning {
                key: key.to_string(),
            }),
        }
    }

    pub fn is_running(&self, key: &K) -> bool {
        self.keys.contains_key(key)
    }
}

/// Releases the key on drop.
pub struct InFlightGuard<K>
where
    K: Eq + Hash + Clone,
{
    key: K,
    keys: Arc<DashMap<K, ()>>,
}

impl<K> Drop for InFlightGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_guard_drops() {
        let inflight = InFlight::<u64>::new();
        let guard = inflight.acquire(7).expect("first acquire");
        assert!(inflight.is_running(&7));
        assert_eq!(
            inflight.acquire(7).err(),
            Some(AlreadyRunning {
                key: "7".to_string()
            })
        );
        assert!(inflight.acquire(8).is_ok());

        drop(guard);
        assert!(!inflight.is_running(&7));
        assert!(inflight.acquire(7).is_ok());
    }
}
