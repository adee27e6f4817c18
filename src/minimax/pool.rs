//! Object pools for the search.
//!
//! A search run allocates thousands of nodes, candidate actions, scratch
//! lists and simulated states. Instead of allocating each one, they are
//! drawn from pools that live as long as the `MinimaxSearch`:
//!
//! - `Pool<H, T>`: slab of `T` addressed by a typed handle `H`, with a free
//!   list. Used for nodes and candidate actions.
//! - `ListPool<T>`: recycled `Vec<T>` buffers.
//! - `StatePool`: recycled `MatchState` shells.
//!
//! Between runs everything is released at once and storage above a retain
//! bound is dropped, so repeated searches reuse warm memory without growing
//! without bound.

use std::marker::PhantomData;

use crate::core::MatchState;

/// A value that can be recycled by a `Pool`.
pub trait Poolable: Default {
    /// Restore the freshly-constructed state.
    fn reset(&mut self);
}

/// Typed index into a `Pool`.
pub trait Handle: Copy {
    fn from_index(index: u32) -> Self;
    fn index(self) -> usize;
}

/// Slab of reusable values.
#[derive(Clone, Debug)]
pub struct Pool<H, T> {
    items: Vec<T>,
    free: Vec<u32>,
    active: usize,
    _handle: PhantomData<H>,
}

impl<H, T> Default for Pool<H, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            free: Vec::new(),
            active: 0,
            _handle: PhantomData,
        }
    }
}

impl<H: Handle, T: Poolable> Pool<H, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Hand out a reset value.
    pub fn acquire(&mut self) -> H {
        self.active += 1;
        match self.free.pop() {
            Some(index) => {
                self.items[index as usize].reset();
                H::from_index(index)
            }
            None => {
                let index = self.items.len() as u32;
                self.items.push(T::default());
                H::from_index(index)
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, handle: H) -> &T {
        &self.items[handle.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, handle: H) -> &mut T {
        &mut self.items[handle.index()]
    }

    /// Return a value. The handle must not be used afterwards.
    pub fn release(&mut self, handle: H) {
        debug_assert!(handle.index() < self.items.len());
        self.free.push(handle.index() as u32);
        self.active = self.active.saturating_sub(1);
    }

    /// Return every value. Handles are reissued from index 0 upward.
    pub fn release_all(&mut self) {
        self.free.clear();
        self.free.extend((0..self.items.len() as u32).rev());
        self.active = 0;
    }

    /// Release everything and drop storage beyond `retain` values.
    pub fn reclaim(&mut self, retain: usize) {
        self.items.truncate(retain);
        self.items.shrink_to(retain);
        self.free.shrink_to(retain);
        self.release_all();
    }

    /// Values currently handed out.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Values allocated, active or free.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.items.len()
    }
}

/// Recycled scratch vectors.
#[derive(Clone, Debug, Default)]
pub struct ListPool<T> {
    free: Vec<Vec<T>>,
}

impl<T> ListPool<T> {
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    /// An empty vector, reusing an old buffer when one is available.
    pub fn take(&mut self) -> Vec<T> {
        self.free.pop().unwrap_or_default()
    }

    pub fn give(&mut self, mut list: Vec<T>) {
        list.clear();
        self.free.push(list);
    }

    /// Drop buffers beyond `retain`.
    pub fn reclaim(&mut self, retain: usize) {
        self.free.truncate(retain);
        self.free.shrink_to(retain);
    }

    /// Buffers waiting for reuse.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.len()
    }
}

/// Recycled simulated states.
#[derive(Clone, Debug, Default)]
pub struct StatePool {
    free: Vec<MatchState>,
}

impl StatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of `source`, built in a recycled shell when available.
    pub fn acquire_clone(&mut self, source: &MatchState) -> MatchState {
        match self.free.pop() {
            Some(mut state) => {
                state.clone_from(source);
                state
            }
            None => source.clone(),
        }
    }

    pub fn release(&mut self, state: MatchState) {
        self.free.push(state);
    }

    pub fn reclaim(&mut self, retain: usize) {
        self.free.truncate(retain);
        self.free.shrink_to(retain);
    }

    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct TestId(u32);

    impl Handle for TestId {
        fn from_index(index: u32) -> Self {
            TestId(index)
        }
        fn index(self) -> usize {
            self.0 as usize
        }
    }

    #[derive(Debug, Default)]
    struct Counter {
        value: i32,
    }

    impl Poolable for Counter {
        fn reset(&mut self) {
            self.value = 0;
        }
    }

    #[test]
    fn test_acquire_resets_recycled_values() {
        let mut pool: Pool<TestId, Counter> = Pool::new();
        let a = pool.acquire();
        pool.get_mut(a).value = 7;
        pool.release(a);

        let b = pool.acquire();
        assert_eq!(b, a);
        assert_eq!(pool.get(b).value, 0);
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    fn test_active_count() {
        let mut pool: Pool<TestId, Counter> = Pool::with_capacity(4);
        let ids: Vec<_> = (0..3).map(|_| pool.acquire()).collect();
        assert_eq!(pool.active(), 3);
        pool.release(ids[1]);
        assert_eq!(pool.active(), 2);
        pool.release_all();
        assert_eq!(pool.active(), 0);
    }

    #[test]
    fn test_release_all_reissues_in_order() {
        let mut pool: Pool<TestId, Counter> = Pool::new();
        for _ in 0..3 {
            pool.acquire();
        }
        pool.release_all();
        assert_eq!(pool.acquire(), TestId(0));
        assert_eq!(pool.acquire(), TestId(1));
    }

    #[test]
    fn test_reclaim_bounds_storage() {
        let mut pool: Pool<TestId, Counter> = Pool::new();
        for _ in 0..10 {
            pool.acquire();
        }
        pool.reclaim(4);
        assert_eq!(pool.allocated(), 4);
        assert_eq!(pool.active(), 0);
        for _ in 0..6 {
            pool.acquire();
        }
        assert_eq!(pool.allocated(), 6);
    }

    #[test]
    fn test_list_pool_reuses_cleared_buffers() {
        let mut lists: ListPool<u32> = ListPool::new();
        let mut list = lists.take();
        list.extend([1, 2, 3]);
        let capacity = list.capacity();
        lists.give(list);

        let reused = lists.take();
        assert!(reused.is_empty());
        assert_eq!(reused.capacity(), capacity);
    }

    #[test]
    fn test_state_pool_copies_source() {
        let mut states = StatePool::new();
        let mut source = MatchState::default();
        source.turn = 7;

        let copy = states.acquire_clone(&source);
        assert_eq!(copy, source);
        states.release(copy);
        assert_eq!(states.idle(), 1);

        source.turn = 9;
        let again = states.acquire_clone(&source);
        assert_eq!(again.turn, 9);
        assert_eq!(states.idle(), 0);
    }

    #[test]
    fn test_bulk_release_reissues_every_slot() {
        let mut pool: Pool<TestId, Counter> = Pool::new();
        let ids: Vec<_> = (0..2_000).map(|_| pool.acquire()).collect();
        for &id in ids.iter().rev() {
            pool.release(id);
        }
        assert_eq!(pool.active(), 0);

        let mut again: Vec<_> = (0..2_000).map(|_| pool.acquire().0).collect();
        again.sort_unstable();
        again.dedup();
        assert_eq!(again.len(), 2_000);
        assert_eq!(pool.allocated(), 2_000);
    }
}
