//! Override hooks.
//!
//! A [`Hook`] runs for every value pair that passed the validity and type
//! checks, before kind-based comparison. Returning `Some` stops the
//! comparison of that pair with the given (possibly empty) diff; returning
//! `None` lets the next hook, and finally the kind rules, handle it.
//!
//! Hooks that need to recurse call
//! [`Comparator::compare_with_state`] with the state they were given.

use super::capability;
use super::state::State;
use super::Comparator;
use crate::diff::{messages, Diff, Difference};
use crate::value::render::render;
use crate::value::Value;
use std::sync::Arc;

/// A comparison override.
pub trait Hook: Send + Sync {
    fn compare<'a>(
        &self,
        comparator: &Comparator,
        st: &mut State,
        v1: Value<'a>,
        v2: Value<'a>,
    ) -> Option<Diff>;
}

/// A hook backed by a closure. Built with [`hook_fn`].
#[derive(Clone)]
pub struct FnHook<F>(F);

/// Wraps a closure as a [`Hook`].
///
/// ```
/// use deepcmp::compare::hooks::hook_fn;
/// use deepcmp::{Comparator, Diff};
///
/// // Treat floats within 1e-9 of each other as equal.
/// let hook = hook_fn(|_, _, v1, v2| {
///     let (a, b) = (v1.downcast_ref::<f64>()?, v2.downcast_ref::<f64>()?);
///     ((a - b).abs() < 1e-9).then(Diff::new)
/// });
/// let comparator = Comparator::new().with_hook(hook);
/// assert!(comparator.compare(&0.3f64, &(0.1f64 + 0.2f64)).is_empty());
/// ```
pub fn hook_fn<F>(f: F) -> FnHook<F>
where
    F: for<'a> Fn(&Comparator, &mut State, Value<'a>, Value<'a>) -> Option<Diff> + Send + Sync,
{
    FnHook(f)
}

impl<F> Hook for FnHook<F>
where
    F: for<'a> Fn(&Comparator, &mut State, Value<'a>, Value<'a>) -> Option<Diff> + Send + Sync,
{
    fn compare<'a>(
        &self,
        comparator: &Comparator,
        st: &mut State,
        v1: Value<'a>,
        v2: Value<'a>,
    ) -> Option<Diff> {
        (self.0)(comparator, st, v1, v2)
    }
}

/// The hooks every new comparator starts with, in order.
pub fn default_hooks() -> Vec<Arc<dyn Hook>> {
    vec![
        Arc::new(BytesEqualHook),
        Arc::new(ValueUnwrapHook),
        Arc::new(MethodEqualHook::new("Equal")),
        Arc::new(MethodCmpHook::new("Cmp")),
    ]
}

/// Byte-wise fast path for byte slices.
///
/// Equal bytes stop the comparison. Unequal bytes fall through so the slice
/// rules report the differing indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesEqualHook;

fn bytes_of<'a>(v: Value<'a>) -> Option<&'a [u8]> {
    if let Some(bytes) = v.downcast_ref::<Vec<u8>>() {
        return Some(bytes.as_slice());
    }
    if let Some(bytes) = v.downcast_ref::<Box<[u8]>>() {
        return Some(&bytes[..]);
    }
    v.downcast_ref::<&'static [u8]>().copied()
}

impl Hook for BytesEqualHook {
    fn compare<'a>(
        &self,
        _comparator: &Comparator,
        _st: &mut State,
        v1: Value<'a>,
        v2: Value<'a>,
    ) -> Option<Diff> {
        let (b1, b2) = (bytes_of(v1)?, bytes_of(v2)?);
        (b1 == b2).then(Diff::new)
    }
}

/// Compares stored [`Value`] handles by what they point at.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueUnwrapHook;

impl Hook for ValueUnwrapHook {
    fn compare<'a>(
        &self,
        comparator: &Comparator,
        st: &mut State,
        v1: Value<'a>,
        v2: Value<'a>,
    ) -> Option<Diff> {
        let inner1 = *v1.downcast_ref::<Value<'static>>()?;
        let inner2 = *v2.downcast_ref::<Value<'static>>()?;
        Some(comparator.compare_with_state(st, inner1, inner2))
    }
}

/// Delegates to a type's own equality method.
#[derive(Debug, Clone, Copy)]
pub struct MethodEqualHook {
    name: &'static str,
}

impl MethodEqualHook {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Hook for MethodEqualHook {
    fn compare<'a>(
        &self,
        _comparator: &Comparator,
        _st: &mut State,
        v1: Value<'a>,
        v2: Value<'a>,
    ) -> Option<Diff> {
        let (r1, r2) = (v1.get()?, v2.get()?);
        let equal = capability::equal_method(r1, self.name)?;
        if equal(r1, r2) {
            return Some(Diff::new());
        }
        Some(Diff::single(Difference::new(
            messages::method_returned_false(self.name),
            render(r1),
            render(r2),
        )))
    }
}

/// Delegates to a type's own ordering method; zero means equal.
#[derive(Debug, Clone, Copy)]
pub struct MethodCmpHook {
    name: &'static str,
}

impl MethodCmpHook {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Hook for MethodCmpHook {
    fn compare<'a>(
        &self,
        _comparator: &Comparator,
        _st: &mut State,
        v1: Value<'a>,
        v2: Value<'a>,
    ) -> Option<Diff> {
        let (r1, r2) = (v1.get()?, v2.get()?);
        let cmp = capability::cmp_method(r1, self.name)?;
        match cmp(r1, r2) {
            0 => Some(Diff::new()),
            result => Some(Diff::single(Difference::new(
                messages::method_returned(self.name, result),
                render(r1),
                render(r2),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hook_order() {
        assert_eq!(default_hooks().len(), 4);
    }

    #[test]
    fn test_bytes_hook_stops_only_when_equal() {
        let c = Comparator::new();
        let mut st = State::new();
        let (a, b, z) = (vec![1u8, 2], vec![1u8, 2], vec![9u8, 2]);

        let equal = BytesEqualHook.compare(&c, &mut st, Value::new(&a), Value::new(&b));
        assert_eq!(equal, Some(Diff::new()));

        let unequal = BytesEqualHook.compare(&c, &mut st, Value::new(&a), Value::new(&z));
        assert_eq!(unequal, None);

        let ints = vec![1i32];
        assert_eq!(
            BytesEqualHook.compare(&c, &mut st, Value::new(&ints), Value::new(&ints)),
            None
        );
    }

    #[test]
    fn test_value_unwrap_hook_recurses() {
        static ONE: i32 = 1;
        static TWO: i32 = 2;
        let c = Comparator::new();
        let mut st = State::new();
        let (h1, h2) = (Value::new(&ONE), Value::new(&TWO));

        let diff = ValueUnwrapHook
            .compare(&c, &mut st, Value::new(&h1), Value::new(&h2))
            .expect("value handles are always handled");
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].message, messages::INT_NOT_EQUAL);
    }

    #[test]
    fn test_method_hook_skips_types_without_method() {
        let c = Comparator::new();
        let mut st = State::new();
        let hook = MethodEqualHook::new("Equal");
        assert_eq!(hook.compare(&c, &mut st, Value::new(&1), Value::new(&2)), None);
    }
}
