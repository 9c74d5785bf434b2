//! Per-comparison traversal state.
//!
//! A [`State`] tracks the recursion depth and the `(v1, v2)` reference pairs
//! currently being compared on the path from the root. Both are scoped: the
//! guards returned by [`State::enter`] and [`State::visit`] undo their change
//! when dropped, on every exit path.
//!
//! States are recycled through a [`StatePool`] so that each top-level
//! comparison starts from a cleared state without reallocating.

use std::any::TypeId;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Maximum number of idle states kept by a pool.
const MAX_IDLE_STATES: usize = 64;

/// A reference pair on the current path.
///
/// The type is part of the key: a struct and its first field share an
/// address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visited {
    pub type_id: TypeId,
    pub v1: usize,
    pub v2: usize,
}

impl Visited {
    pub fn new(type_id: TypeId, v1: usize, v2: usize) -> Self {
        Self { type_id, v1, v2 }
    }
}

/// Mutable traversal state of one top-level comparison.
#[derive(Debug, Default)]
pub struct State {
    depth: usize,
    visited: Vec<Visited>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current recursion depth; `0` at the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pairs on the path from the root, outermost first.
    pub fn visited(&self) -> &[Visited] {
        &self.visited
    }

    pub fn is_visited(&self, pair: &Visited) -> bool {
        self.visited.contains(pair)
    }

    /// Descends one level. The depth is restored when the guard drops.
    pub fn enter(&mut self) -> DepthGuard<'_> {
        self.depth += 1;
        DepthGuard { state: self }
    }

    /// Records `pair` as being compared, or returns `None` if it already is
    /// (a cycle). The pair is removed when the guard drops.
    pub fn visit(&mut self, pair: Visited) -> Option<VisitGuard<'_>> {
        if self.is_visited(&pair) {
            return None;
        }
        self.visited.push(pair);
        Some(VisitGuard { state: self })
    }

    fn reset(&mut self) {
        self.depth = 0;
        self.visited.clear();
    }
}

/// Restores the depth on drop.
#[derive(Debug)]
pub struct DepthGuard<'s> {
    state: &'s mut State,
}

impl Deref for DepthGuard<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        self.state
    }
}

impl DerefMut for DepthGuard<'_> {
    fn deref_mut(&mut self) -> &mut State {
        self.state
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.state.depth = self.state.depth.saturating_sub(1);
    }
}

/// Removes the visited pair on drop.
#[derive(Debug)]
pub struct VisitGuard<'s> {
    state: &'s mut State,
}

impl Deref for VisitGuard<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        self.state
    }
}

impl DerefMut for VisitGuard<'_> {
    fn deref_mut(&mut self) -> &mut State {
        self.state
    }
}

impl Drop for VisitGuard<'_> {
    fn drop(&mut self) {
        self.state.visited.pop();
    }
}

/// Thread-safe pool of reusable states.
#[derive(Debug)]
pub struct StatePool {
    idle: Mutex<Vec<State>>,
}

impl StatePool {
    pub const fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
        }
    }

    /// The process-wide pool used by [`Comparator`](super::Comparator).
    pub fn global() -> &'static StatePool {
        static GLOBAL: StatePool = StatePool::new();
        &GLOBAL
    }

    /// Takes a cleared state, reusing an idle one when available.
    pub fn acquire(&self) -> PooledState<'_> {
        let mut state = self.lock().pop().unwrap_or_default();
        state.reset();
        PooledState { pool: self, state }
    }

    /// Number of states waiting for reuse.
    pub fn idle_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<State>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatePool {
    fn default() -> Self {
        Self::new()
    }
}

/// A state on loan from a [`StatePool`]; returned on drop.
#[derive(Debug)]
pub struct PooledState<'p> {
    pool: &'p StatePool,
    state: State,
}

impl Deref for PooledState<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        &self.state
    }
}

impl DerefMut for PooledState<'_> {
    fn deref_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl Drop for PooledState<'_> {
    fn drop(&mut self) {
        let mut state = std::mem::take(&mut self.state);
        state.reset();
        let mut idle = self.pool.lock();
        if idle.len() < MAX_IDLE_STATES {
            idle.push(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(v1: usize, v2: usize) -> Visited {
        Visited::new(TypeId::of::<Vec<i32>>(), v1, v2)
    }

    #[test]
    fn test_enter_restores_depth() {
        let mut st = State::new();
        {
            let mut outer = st.enter();
            assert_eq!(outer.depth(), 1);
            {
                let inner = outer.enter();
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(outer.depth(), 1);
        }
        assert_eq!(st.depth(), 0);
    }

    #[test]
    fn test_visit_detects_reentry() {
        let mut st = State::new();
        let mut guard = st.visit(pair(1, 2)).expect("first visit");
        assert!(guard.visit(pair(1, 2)).is_none());
        assert!(guard.visit(pair(2, 1)).is_some());
        drop(guard);
        assert!(st.visited().is_empty());
    }

    #[test]
    fn test_visit_key_includes_type() {
        let mut st = State::new();
        let mut guard = st.visit(pair(1, 2)).expect("first visit");
        let other_type = Visited::new(TypeId::of::<String>(), 1, 2);
        assert!(guard.visit(other_type).is_some());
    }

    #[test]
    fn test_guards_unwind_on_panic() {
        let mut st = State::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut depth = st.enter();
            let _visit = depth.visit(pair(1, 2));
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(st.depth(), 0);
        assert!(st.visited().is_empty());
    }

    #[test]
    fn test_pool_recycles_cleared_states() {
        let pool = StatePool::new();
        {
            let mut st = pool.acquire();
            st.depth = 3;
            st.visited.push(pair(1, 2));
        }
        assert_eq!(pool.idle_count(), 1);

        let st = pool.acquire();
        assert_eq!(pool.idle_count(), 0);
        assert_eq!(st.depth(), 0);
        assert!(st.visited().is_empty());
    }

    #[test]
    fn test_pool_is_bounded() {
        let pool = StatePool::new();
        let loans: Vec<_> = (0..MAX_IDLE_STATES + 5).map(|_| pool.acquire()).collect();
        drop(loans);
        assert_eq!(pool.idle_count(), MAX_IDLE_STATES);
    }
}
