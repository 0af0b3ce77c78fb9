// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Thread-safe table keyed by [`GroupedKey`] using DashMap.
//!
//! Single-key operations are atomic with respect to each other. There is no
//! lock spanning several keys, so listings taken while writers are active may
//! mix old and new entries.

use dashmap::DashMap;

use crate::model::Keyed;
use crate::types::GroupedKey;

/// One concurrent mapping dedicated to one entity kind.
#[derive(Debug)]
pub struct Table<V> {
    /// Table name used in log records.
    name: &'static str,
    entries: DashMap<GroupedKey, V>,
}

impl<V: Clone> Table<V> {
    /// Create a new empty table.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: DashMap::new(),
        }
    }

    /// Insert or overwrite the value stored under `key`. Last writer wins.
    pub fn insert(&self, key: GroupedKey, value: V) {
        tracing::debug!(table = self.name, key = %key, "Saving entry");
        self.entries.insert(key, value);
    }

    /// Exact lookup. Absent keys yield `None`.
    pub fn get(&self, key: &GroupedKey) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Remove the entry for `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &GroupedKey) -> Option<V> {
        let removed = self.entries.remove(key).map(|(_, value)| value);
        if removed.is_some() {
            tracing::debug!(table = self.name, key = %key, "Deleted entry");
        }
        removed
    }

    /// Mutate the stored value in place while holding its shard lock.
    /// Returns false if no entry exists for `key`.
    ///
    /// `f` must not access this table: the shard write lock is held while it
    /// runs, so a nested lookup on the same shard deadlocks.
    pub fn update<F>(&self, key: &GroupedKey, f: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }

    /// Check if an entry exists for `key`.
    pub fn contains(&self, key: &GroupedKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Snapshot copy of every value. Order is not significant.
    pub fn list(&self) -> Vec<V> {
        self.entries.iter().map(|r| r.value().clone()).collect()
    }

    /// Snapshot copy of the values matching `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Vec<V>
    where
        P: Fn(&V) -> bool,
    {
        self.entries
            .iter()
            .filter(|r| predicate(r.value()))
            .map(|r| r.value().clone())
            .collect()
    }

    /// Snapshot of `(key, value)` pairs matching `predicate`.
    pub fn filter_entries<P>(&self, predicate: P) -> Vec<(GroupedKey, V)>
    where
        P: Fn(&V) -> bool,
    {
        self.entries
            .iter()
            .filter(|r| predicate(r.value()))
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    /// Apply `f` to every stored value in place and return the mutated values.
    pub fn map_in_place<F>(&self, f: F) -> Vec<V>
    where
        F: Fn(&mut V),
    {
        self.entries
            .iter_mut()
            .map(|mut r| {
                f(r.value_mut());
                r.value().clone()
            })
            .collect()
    }

    /// Drop every entry for which `predicate` returns false.
    /// Returns the number of removed entries.
    pub fn retain<P>(&self, predicate: P) -> usize
    where
        P: Fn(&V) -> bool,
    {
        let mut removed = 0;
        self.entries.retain(|_, value| {
            let keep = predicate(&*value);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            tracing::debug!(table = self.name, removed, "Deleted matching entries");
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        tracing::debug!(table = self.name, entries = self.entries.len(), "Clearing table");
        self.entries.clear();
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone + Keyed> Table<V> {
    /// Derive the key from the entity itself and insert or overwrite.
    pub fn save(&self, value: V) {
        self.insert(value.grouped_key(), value);
    }

    /// Remove the entry whose key is derived from `value`.
    pub fn delete(&self, value: &V) -> Option<V> {
        self.remove(&value.grouped_key())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{ContainerStatus, ContainerType};

    fn container(project: &str, env: &str, name: &str) -> ContainerStatus {
        ContainerStatus::new(project, env, name, ContainerType::Project)
    }

    #[test]
    fn test_save_and_get() {
        let table = Table::new("containers");
        let status = container("p1", "dev", "c1");

        table.save(status.clone());
        assert_eq!(table.get(&status.grouped_key()), Some(status));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_size() {
        let table = Table::new("containers");
        let mut status = container("p1", "dev", "c1");
        table.save(status.clone());

        status.state = "running".to_string();
        table.save(status.clone());

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&status.grouped_key()).unwrap().state, "running");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let table: Table<ContainerStatus> = Table::new("containers");
        let key = GroupedKey::create("p1", "dev", "missing");
        assert!(table.remove(&key).is_none());
        assert!(table.remove(&key).is_none());
        assert!(!table.contains(&key));
        assert!(table.is_empty());
    }

    #[test]
    fn test_update_in_place() {
        let table = Table::new("containers");
        let status = container("p1", "dev", "c1");
        let key = status.grouped_key();
        table.save(status);

        assert!(table.contains(&key));
        assert!(table.update(&key, |s| s.code_loaded = true));
        assert!(table.get(&key).unwrap().code_loaded);
        assert!(!table.update(&GroupedKey::create("x", "y", "z"), |s| s.code_loaded = true));
    }

    #[test]
    fn test_filter_and_retain() {
        let table = Table::new("containers");
        table.save(container("p1", "dev", "c1"));
        table.save(container("p1", "prod", "c2"));
        table.save(container("p2", "dev", "c3"));

        assert_eq!(table.filter(|s| s.env == "dev").len(), 2);
        assert!(table.filter(|s| s.env == "test").is_empty());

        let removed = table.retain(|s| s.project_id != "p1");
        assert_eq!(removed, 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_concurrent_saves() {
        use std::thread;

        let table = Arc::new(Table::<ContainerStatus>::new("containers"));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let table = Arc::clone(&table);
                thread::spawn(move || {
                    for j in 0..100 {
                        table.save(container("p1", "dev", &format!("c-{}-{}", i, j)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), 1000);
    }

    #[test]
    fn test_retain_counts_only_removed_entries_under_concurrent_inserts() {
        use std::sync::Barrier;
        use std::thread;

        for _ in 0..50 {
            let table = Arc::new(Table::<ContainerStatus>::new("containers"));
            for i in 0..200 {
                table.save(container("p1", "dev", &format!("c-{}", i)));
            }

            let barrier = Arc::new(Barrier::new(2));
            let writer = {
                let table = Arc::clone(&table);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..2000 {
                        table.save(container("p2", "dev", &format!("c-{}", i)));
                    }
                })
            };

            barrier.wait();
            let removed = table.retain(|s| s.project_id != "p1");
            writer.join().unwrap();

            assert_eq!(removed, 200);
            assert!(table.filter(|s| s.project_id == "p1").is_empty());
            assert_eq!(table.len(), 2000);
        }
    }
}
