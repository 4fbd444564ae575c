#![forbid(unsafe_code)]

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::index::HierarchyIndex;
use crate::metrics;
use crate::model::RoleId;

pub type DescendantSet = Arc<HashSet<RoleId>>;

/// Role id to its full descendant set. Entries are written once and never replaced.
#[derive(Debug, Default)]
pub struct DescendantCache {
    entries: RwLock<HashMap<RoleId, DescendantSet>>,
}

impl DescendantCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: RoleId) -> Option<DescendantSet> {
        self.entries.read().get(&role).cloned()
    }

    pub fn contains(&self, role: RoleId) -> bool {
        self.entries.read().contains_key(&role)
    }

    /// Stores `set` unless `role` already has an entry. Returns the entry that
    /// ends up in the cache, so racing writers all observe the first value.
    pub fn insert(&self, role: RoleId, set: DescendantSet) -> DescendantSet {
        let mut entries = self.entries.write();
        Arc::clone(entries.entry(role).or_insert(set))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub hits: u64,
    pub misses: u64,
    pub cached_roles: usize,
}

#[derive(Debug)]
pub struct DescendantResolver {
    index: HierarchyIndex,
    cache: DescendantCache,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DescendantResolver {
    pub fn new(index: HierarchyIndex) -> Self {
        Self::with_cache(index, DescendantCache::new())
    }

    pub fn with_cache(index: HierarchyIndex, cache: DescendantCache) -> Self {
        Self {
            index,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    pub fn cache(&self) -> &DescendantCache {
        &self.cache
    }

    /// Every role reachable from `role` through child edges, excluding `role`.
    ///
    /// Expansion runs one generation at a time. Frontier members that already
    /// have a cache entry contribute their whole stored set and are not walked
    /// again; only children discovered through the index join the next
    /// frontier. Each role id is expanded at most once per call, so cyclic
    /// graphs terminate.
    pub fn resolve(&self, role: RoleId) -> DescendantSet {
        if let Some(hit) = self.cache.get(role) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            metrics::record_cache_hit();
            tracing::debug!(role = %role, size = hit.len(), "descendant cache hit");
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        metrics::record_cache_miss();
        let started = Instant::now();

        let mut result: HashSet<RoleId> = HashSet::new();
        let mut frontier = vec![role];
        let mut generations = 0usize;

        while !frontier.is_empty() {
            generations += 1;

            let mut uncached = Vec::with_capacity(frontier.len());
            for id in frontier {
                match self.cache.get(id) {
                    Some(known) => {
                        result.extend(known.iter().copied().filter(|d| *d != role));
                    }
                    None => uncached.push(id),
                }
            }

            let mut next = Vec::new();
            for id in uncached {
                for &child in self.index.children(id) {
                    if child != role && result.insert(child) {
                        next.push(child);
                    }
                }
            }

            frontier = next;
        }

        let stored = self.cache.insert(role, Arc::new(result));
        let elapsed = started.elapsed();
        metrics::record_resolution(elapsed);
        tracing::debug!(
            role = %role,
            size = stored.len(),
            generations,
            elapsed_us = elapsed.as_micros() as u64,
            "resolved descendant roles"
        );
        stored
    }

    pub fn resolve_many(&self, roles: impl IntoIterator<Item = RoleId>) -> HashSet<RoleId> {
        roles
            .into_iter()
            .flat_map(|r| self.resolve(r).iter().copied().collect::<Vec<_>>())
            .collect()
    }

    pub fn is_cached(&self, role: RoleId) -> bool {
        self.cache.contains(role)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cached_roles: self.cached_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn ids(raw: &[i64]) -> HashSet<RoleId> {
        raw.iter().copied().map(RoleId).collect()
    }

    fn fixture() -> DescendantResolver {
        let roles = vec![
            Role::new(1, "System Administrator", 0),
            Role::new(2, "Location Manager", 1),
            Role::new(3, "Supervisor", 2),
            Role::new(4, "Employee", 3),
            Role::new(5, "Trainer", 3),
        ];
        DescendantResolver::new(HierarchyIndex::build(&roles))
    }

    #[test]
    fn test_resolve_fixture_roles() {
        let resolver = fixture();

        assert_eq!(*resolver.resolve(RoleId(1)), ids(&[2, 3, 4, 5]));
        assert_eq!(*resolver.resolve(RoleId(2)), ids(&[3, 4, 5]));
        assert_eq!(*resolver.resolve(RoleId(3)), ids(&[4, 5]));
        assert!(resolver.resolve(RoleId(4)).is_empty());
        assert_eq!(*resolver.resolve(RoleId(0)), ids(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_unknown_role_is_empty_and_cached() {
        let resolver = fixture();

        assert!(resolver.resolve(RoleId(999)).is_empty());
        assert!(resolver.is_cached(RoleId(999)));
    }

    #[test]
    fn test_second_resolve_is_cache_hit() {
        let resolver = fixture();
        let index_before = resolver.index().clone();

        let first = resolver.resolve(RoleId(2));
        let second = resolver.resolve(RoleId(2));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.index(), &index_before);
        let stats = resolver.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.cached_roles, 1);
    }

    #[test]
    fn test_root_reuses_cached_subtree() {
        let resolver = fixture();

        let subtree = resolver.resolve(RoleId(3));
        let root = resolver.resolve(RoleId(1));

        assert_eq!(*root, ids(&[2, 3, 4, 5]));
        assert!(Arc::ptr_eq(&subtree, &resolver.resolve(RoleId(3))));
    }

    #[test]
    fn test_cached_len_counts_query_roots_only() {
        let resolver = fixture();
        assert_eq!(resolver.cached_len(), 0);

        resolver.resolve(RoleId(1));
        assert_eq!(resolver.cached_len(), 1);
        assert!(!resolver.is_cached(RoleId(3)));

        resolver.resolve(RoleId(3));
        resolver.resolve(RoleId(3));
        resolver.resolve(RoleId(404));
        assert_eq!(resolver.cached_len(), 3);
        assert_eq!(resolver.stats().cached_roles, 3);
    }

    #[test]
    fn test_cache_entry_never_replaced() {
        let index = HierarchyIndex::build(&[Role::new(2, "Child", 1)]);
        let cache = DescendantCache::new();
        let pinned = cache.insert(RoleId(1), Arc::new(ids(&[42])));
        let resolver = DescendantResolver::with_cache(index, cache);

        let resolved = resolver.resolve(RoleId(1));
        assert!(Arc::ptr_eq(&pinned, &resolved));

        let again = resolver.cache().insert(RoleId(1), Arc::new(HashSet::new()));
        assert_eq!(*again, ids(&[42]));
    }

    #[test]
    fn test_multiple_roots() {
        let roles = vec![
            Role::new(1, "North", 0),
            Role::new(2, "North Staff", 1),
            Role::new(10, "South", -1),
            Role::new(11, "South Staff", 10),
            Role::new(12, "South Intern", 11),
        ];
        let resolver = DescendantResolver::new(HierarchyIndex::build(&roles));

        assert_eq!(*resolver.resolve(RoleId(1)), ids(&[2]));
        assert_eq!(*resolver.resolve(RoleId(10)), ids(&[11, 12]));
    }

    #[test]
    fn test_self_parent_excluded_from_own_set() {
        let roles = vec![Role::new(1, "Loop", 1), Role::new(2, "Child", 1)];
        let resolver = DescendantResolver::new(HierarchyIndex::build(&roles));

        assert_eq!(*resolver.resolve(RoleId(1)), ids(&[2]));
    }

    #[test]
    fn test_cycle_terminates_and_excludes_root() {
        let roles = vec![
            Role::new(1, "A", 3),
            Role::new(2, "B", 1),
            Role::new(3, "C", 2),
        ];
        let resolver = DescendantResolver::new(HierarchyIndex::build(&roles));

        assert_eq!(*resolver.resolve(RoleId(2)), ids(&[3, 1]));
        // Role 1 now meets role 2's cached set, which contains 1 itself.
        assert_eq!(*resolver.resolve(RoleId(1)), ids(&[2, 3]));
    }

    #[test]
    fn test_resolve_many_unions_sets() {
        let resolver = fixture();
        assert_eq!(resolver.resolve_many([RoleId(3), RoleId(4)]), ids(&[4, 5]));
    }

    #[test]
    fn test_deep_hierarchy() {
        let depth: i64 = 1000;
        let roles: Vec<Role> = (1..=depth)
            .map(|i| Role::new(i, format!("Level {}", i), i - 1))
            .collect();
        let resolver = DescendantResolver::new(HierarchyIndex::build(&roles));

        assert_eq!(resolver.resolve(RoleId(1)).len(), (depth - 1) as usize);
        assert_eq!(resolver.resolve(RoleId(500)).len(), 500);
    }

    #[test]
    fn test_concurrent_resolution_agrees() {
        let resolver = Arc::new(fixture());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                std::thread::spawn(move || resolver.resolve(RoleId(1)))
            })
            .collect();

        for handle in handles {
            assert_eq!(*handle.join().unwrap(), ids(&[2, 3, 4, 5]));
        }
        assert_eq!(resolver.stats().cached_roles, 1);
    }
}
