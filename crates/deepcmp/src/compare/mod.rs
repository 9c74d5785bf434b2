//! Recursive comparison engine.
//!
//! Every pair of values is checked in a fixed order: depth limit, validity,
//! concrete type, override hooks and finally the rules of the value kind.
//! The first stage that reaches a verdict ends the comparison of that pair.
//!
//! ## Entry point
//!
//! ```
//! use deepcmp::{compare, Comparator};
//! use std::collections::HashMap;
//!
//! let m1: HashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
//! let m2: HashMap<&str, i32> = [("a", 1), ("c", 2)].into_iter().collect();
//!
//! let diff = compare(&m1, &m2);
//! assert_eq!(diff.to_string(), "[b]: map key not defined\n[c]: map key not defined");
//!
//! let limited = Comparator { map_max_differences: 1, ..Comparator::new() };
//! assert_eq!(limited.compare(&m1, &m2).len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: map entries are visited in a key order that does not
//!   depend on hash iteration order.
//! - **Termination**: reference pairs already on the current path are treated
//!   as equal, so cyclic structures terminate.
//! - **Bounded output**: with non-zero caps, at most `slice_max_differences`
//!   indices and `map_max_differences` keys report differences per container.

pub mod capability;
pub mod hooks;
pub(crate) mod keys;
pub mod state;

use crate::config::CompareConfig;
use crate::diff::{messages, Diff, Difference};
use crate::logging_facility::schema::OP_COMPARE;
use crate::path::{Path, PathElem};
use crate::value::render::{format_capacity, format_complex, format_float, render_key};
use crate::value::{ChanAccess, Kind, MapAccess, Reflect, SeqAccess, StructAccess, Value};
use crate::{log_op_end, log_op_start};
use hooks::{FnHook, Hook};
use state::{State, StatePool, Visited};
use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Deep-equality comparator.
///
/// Fields may be changed freely before the comparator is shared. A
/// comparator is `Send + Sync`; concurrent comparisons do not interfere.
pub struct Comparator {
    /// Maximum recursion depth, `0` for unlimited. Pairs at the limit are
    /// treated as equal.
    pub max_depth: usize,
    /// Maximum number of differing indices reported per slice or array,
    /// `0` for unlimited.
    pub slice_max_differences: usize,
    /// Maximum number of differing keys reported per map, `0` for unlimited.
    pub map_max_differences: usize,
    /// Override hooks, consulted in order.
    pub hooks: Vec<Arc<dyn Hook>>,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("max_depth", &self.max_depth)
            .field("slice_max_differences", &self.slice_max_differences)
            .field("map_max_differences", &self.map_max_differences)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Comparator {
    /// A comparator with default limits and the default hooks.
    pub fn new() -> Self {
        Self::from_config(CompareConfig::default())
    }

    /// A comparator with the given limits and the default hooks.
    pub fn from_config(config: CompareConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            slice_max_differences: config.slice_max_differences,
            map_max_differences: config.map_max_differences,
            hooks: hooks::default_hooks(),
        }
    }

    /// The current limits.
    pub fn config(&self) -> CompareConfig {
        CompareConfig {
            max_depth: self.max_depth,
            slice_max_differences: self.slice_max_differences,
            map_max_differences: self.map_max_differences,
        }
    }

    /// Appends a hook after the existing ones.
    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Appends a closure hook after the existing ones.
    pub fn with_hook_fn<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&Comparator, &mut State, Value<'a>, Value<'a>) -> Option<Diff>
            + Send
            + Sync
            + 'static,
    {
        let hook: FnHook<F> = hooks::hook_fn(f);
        self.with_hook(hook)
    }

    /// Compares two values.
    pub fn compare(&self, v1: &dyn Reflect, v2: &dyn Reflect) -> Diff {
        self.compare_values(Value::new(v1), Value::new(v2))
    }

    /// Compares two handles, either of which may be invalid.
    pub fn compare_values(&self, v1: Value<'_>, v2: Value<'_>) -> Diff {
        let start = Instant::now();
        log_op_start!(OP_COMPARE, type_name = %v1.type_name());

        let mut st = StatePool::global().acquire();
        let diff = self.compare_with_state(&mut st, v1, v2);

        log_op_end!(
            OP_COMPARE,
            duration_ms = start.elapsed().as_millis() as u64,
            differences = diff.len()
        );
        diff
    }

    /// Compares one pair of values within an ongoing comparison.
    ///
    /// This is the recursion entry point, also used by hooks that compare
    /// sub-values.
    pub fn compare_with_state<'a>(&self, st: &mut State, v1: Value<'a>, v2: Value<'a>) -> Diff {
        if self.max_depth > 0 && st.depth() >= self.max_depth {
            tracing::trace!(depth = st.depth(), "max depth reached, treating values as equal");
            return Diff::new();
        }
        let mut st = st.enter();

        if let Some(diff) = compare_validity(v1, v2) {
            return diff;
        }
        if let Some(diff) = compare_type(v1, v2) {
            return diff;
        }
        for hook in &self.hooks {
            if let Some(diff) = hook.compare(self, &mut st, v1, v2) {
                return diff;
            }
        }
        self.compare_kind(&mut st, v1, v2)
    }

    fn compare_kind<'a>(&self, st: &mut State, v1: Value<'a>, v2: Value<'a>) -> Diff {
        let (Some(k1), Some(k2), Some(ty)) = (v1.kind(), v2.kind(), v1.type_id()) else {
            return Diff::new();
        };
        match (k1, k2) {
            (Kind::Bool(a), Kind::Bool(b)) => {
                scalar(a == b, messages::BOOL_NOT_EQUAL, || (a.to_string(), b.to_string()))
            }
            (Kind::Int(a), Kind::Int(b)) => {
                scalar(a == b, messages::INT_NOT_EQUAL, || (a.to_string(), b.to_string()))
            }
            (Kind::Uint(a), Kind::Uint(b)) => {
                scalar(a == b, messages::UINT_NOT_EQUAL, || (a.to_string(), b.to_string()))
            }
            (Kind::Float(a, width), Kind::Float(b, _)) => scalar(a == b, messages::FLOAT_NOT_EQUAL, || {
                (format_float(a, width), format_float(b, width))
            }),
            (Kind::Complex(ar, ai, width), Kind::Complex(br, bi, _)) => {
                scalar(ar == br && ai == bi, messages::COMPLEX_NOT_EQUAL, || {
                    (format_complex(ar, ai, width), format_complex(br, bi, width))
                })
            }
            (Kind::String(a), Kind::String(b)) => {
                scalar(a == b, messages::STRING_NOT_EQUAL, || (format!("{a:?}"), format!("{b:?}")))
            }
            (Kind::Array(a), Kind::Array(b)) => self.compare_elements(st, a, b),
            (Kind::Slice(a), Kind::Slice(b)) => self.compare_slice(st, ty, a, b),
            (Kind::Map(a), Kind::Map(b)) => self.compare_map(st, ty, a, b),
            (Kind::Struct(a), Kind::Struct(b)) => self.compare_struct(st, a, b),
            (Kind::Pointer(a), Kind::Pointer(b)) | (Kind::Interface(a), Kind::Interface(b)) => {
                self.compare_reference(st, ty, a, b)
            }
            (Kind::Chan(a), Kind::Chan(b)) => match v2.get() {
                Some(other) => compare_chan(a, b, other),
                None => Diff::new(),
            },
            (Kind::Func(a), Kind::Func(b)) => compare_func(a, b),
            (Kind::UnsafePointer(a), Kind::UnsafePointer(b)) => {
                scalar(a == b, messages::UNSAFE_POINTER_NOT_EQUAL, || {
                    (format!("{a:#x}"), format!("{b:#x}"))
                })
            }
            (k1, k2) => {
                tracing::trace!(
                    type_name = %v1.type_name(),
                    kind1 = k1.name(),
                    kind2 = k2.name(),
                    "values of one type reported different kinds"
                );
                Diff::new()
            }
        }
    }

    fn compare_elements<'a>(
        &self,
        st: &mut State,
        s1: &'a dyn SeqAccess,
        s2: &'a dyn SeqAccess,
    ) -> Diff {
        let mut out = Capped::new(self.slice_max_differences);
        for index in 0..s1.len().max(s2.len()) {
            if out.is_full() {
                break;
            }
            let d = self.compare_with_state(st, s1.get(index).into(), s2.get(index).into());
            if !d.is_empty() {
                out.push(d.with_prefix(PathElem::Index(index)));
            }
        }
        out.into_diff()
    }

    fn compare_slice<'a>(
        &self,
        st: &mut State,
        ty: TypeId,
        s1: &'a dyn SeqAccess,
        s2: &'a dyn SeqAccess,
    ) -> Diff {
        let x1 = Extent::new(s1.is_nil(), s1.len(), s1.identity());
        let x2 = Extent::new(s2.is_nil(), s2.len(), s2.identity());
        if let Some(diff) = compare_extents(x1, x2) {
            return diff;
        }
        let Some(mut st) = st.visit(Visited::new(ty, x1.identity, x2.identity)) else {
            tracing::trace!("slice cycle closed, treating values as equal");
            return Diff::new();
        };
        self.compare_elements(&mut st, s1, s2)
    }

    fn compare_map<'a>(
        &self,
        st: &mut State,
        ty: TypeId,
        m1: &'a dyn MapAccess,
        m2: &'a dyn MapAccess,
    ) -> Diff {
        let x1 = Extent::new(m1.is_nil(), m1.len(), m1.identity());
        let x2 = Extent::new(m2.is_nil(), m2.len(), m2.identity());
        if let Some(diff) = compare_extents(x1, x2) {
            return diff;
        }
        let Some(mut st) = st.visit(Visited::new(ty, x1.identity, x2.identity)) else {
            tracing::trace!("map cycle closed, treating values as equal");
            return Diff::new();
        };

        let [entries1, entries2] = keys::sort_entries([m1, m2]);
        let mut out = Capped::new(self.map_max_differences);
        let (mut i, mut j) = (0, 0);
        while !out.is_full() {
            match (entries1.get(i), entries2.get(j)) {
                (None, None) => break,
                (Some(e1), Some(e2)) => match e1.cmp_key(e2) {
                    Ordering::Less => {
                        i += 1;
                        out.push(key_not_defined(e1.key, true, false));
                    }
                    Ordering::Greater => {
                        j += 1;
                        out.push(key_not_defined(e2.key, false, true));
                    }
                    Ordering::Equal => {
                        let end1 = keys::run_end(&entries1, i, e1);
                        let end2 = keys::run_end(&entries2, j, e1);
                        self.compare_key_run(&mut st, &entries1[i..end1], &entries2[j..end2], &mut out);
                        i = end1;
                        j = end2;
                    }
                },
                (Some(e1), None) => {
                    i += 1;
                    out.push(key_not_defined(e1.key, true, false));
                }
                (None, Some(e2)) => {
                    j += 1;
                    out.push(key_not_defined(e2.key, false, true));
                }
            }
        }
        out.into_diff()
    }

    /// Pairs entries whose keys tie in the sort order and compares their
    /// values. Keys ordered by text are paired by deep equality; entries left
    /// without a partner are reported as not defined.
    fn compare_key_run(
        &self,
        st: &mut State,
        run1: &[keys::Entry<'_>],
        run2: &[keys::Entry<'_>],
        out: &mut Capped,
    ) {
        let mut paired = vec![false; run2.len()];
        for e1 in run1 {
            if out.is_full() {
                return;
            }
            let partner = (0..run2.len()).find(|&k| !paired[k] && self.same_key(st, e1, &run2[k]));
            match partner {
                Some(k) => {
                    paired[k] = true;
                    let d = self.compare_with_state(st, Value::new(e1.value), Value::new(run2[k].value));
                    if !d.is_empty() {
                        out.push(d.with_prefix(PathElem::Map(render_key(e1.key))));
                    }
                }
                None => out.push(key_not_defined(e1.key, true, false)),
            }
        }
        for (e2, paired) in run2.iter().zip(paired) {
            if out.is_full() {
                return;
            }
            if !paired {
                out.push(key_not_defined(e2.key, false, true));
            }
        }
    }

    fn same_key(&self, st: &mut State, e1: &keys::Entry<'_>, e2: &keys::Entry<'_>) -> bool {
        if !e1.by_text() {
            return true;
        }
        self.compare_with_state(st, Value::new(e1.key), Value::new(e2.key))
            .is_empty()
    }

    fn compare_struct<'a>(
        &self,
        st: &mut State,
        s1: &'a dyn StructAccess,
        s2: &'a dyn StructAccess,
    ) -> Diff {
        let mut diff = Diff::new();
        for index in 0..s1.field_count().max(s2.field_count()) {
            let (f1, f2) = (s1.field(index), s2.field(index));
            let Some(name) = f1.or(f2).map(|field| field.name) else {
                continue;
            };
            let d = self.compare_with_state(
                st,
                f1.map(|field| field.value).into(),
                f2.map(|field| field.value).into(),
            );
            if !d.is_empty() {
                diff.append(d.with_prefix(PathElem::Field(name.to_string())));
            }
        }
        diff
    }

    fn compare_reference<'a>(
        &self,
        st: &mut State,
        ty: TypeId,
        r1: Option<&'a dyn Reflect>,
        r2: Option<&'a dyn Reflect>,
    ) -> Diff {
        let (t1, t2) = match (r1, r2) {
            (Some(t1), Some(t2)) => (Value::new(t1), Value::new(t2)),
            (None, None) => return Diff::new(),
            (t1, t2) => return only_one_is_nil(t1.is_none(), t2.is_none()),
        };
        // Zero-sized pointees of different types may share an address.
        if t1.address() == t2.address() && t1.type_id() == t2.type_id() {
            return Diff::new();
        }
        let Some(mut st) = st.visit(Visited::new(ty, t1.address(), t2.address())) else {
            tracing::trace!("reference cycle closed, treating values as equal");
            return Diff::new();
        };
        self.compare_with_state(&mut st, t1, t2)
    }
}

/// Differences of one container, counted per differing index or key.
struct Capped {
    diff: Diff,
    differing: usize,
    max: usize,
}

impl Capped {
    /// `max` of `0` never fills.
    fn new(max: usize) -> Self {
        Self {
            diff: Diff::new(),
            differing: 0,
            max,
        }
    }

    fn push(&mut self, diff: Diff) {
        self.diff.append(diff);
        self.differing += 1;
    }

    fn is_full(&self) -> bool {
        self.max > 0 && self.differing >= self.max
    }

    fn into_diff(self) -> Diff {
        self.diff
    }
}

/// Shape of a slice or map relevant to the pre-checks.
#[derive(Debug, Clone, Copy)]
struct Extent {
    nil: bool,
    len: usize,
    identity: usize,
}

impl Extent {
    fn new(nil: bool, len: usize, identity: usize) -> Self {
        Self { nil, len, identity }
    }
}

/// Nil, length and aliasing checks shared by slices and maps.
fn compare_extents(x1: Extent, x2: Extent) -> Option<Diff> {
    match (x1.nil, x2.nil) {
        (true, true) => return Some(Diff::new()),
        (false, false) => {}
        (nil1, nil2) => return Some(only_one_is_nil(nil1, nil2)),
    }
    if x1.len != x2.len {
        return Some(Diff::single(Difference::new(
            messages::LENGTH_NOT_EQUAL,
            x1.len.to_string(),
            x2.len.to_string(),
        )));
    }
    if x1.len == 0 || x1.identity == x2.identity {
        return Some(Diff::new());
    }
    None
}

fn compare_validity(v1: Value<'_>, v2: Value<'_>) -> Option<Diff> {
    match (v1.is_valid(), v2.is_valid()) {
        (true, true) => None,
        (false, false) => Some(Diff::new()),
        (valid1, valid2) => Some(Diff::single(Difference::new(
            messages::ONLY_ONE_IS_VALID,
            valid1.to_string(),
            valid2.to_string(),
        ))),
    }
}

fn compare_type(v1: Value<'_>, v2: Value<'_>) -> Option<Diff> {
    if v1.type_id() == v2.type_id() {
        return None;
    }
    Some(Diff::single(Difference::new(
        messages::TYPE_NOT_EQUAL,
        v1.type_name(),
        v2.type_name(),
    )))
}

fn compare_chan(c1: Option<&dyn ChanAccess>, c2: Option<&dyn ChanAccess>, other: &dyn Reflect) -> Diff {
    let (c1, c2) = match (c1, c2) {
        (Some(c1), Some(c2)) => (c1, c2),
        (None, None) => return Diff::new(),
        (c1, c2) => return only_one_is_nil(c1.is_none(), c2.is_none()),
    };
    if c1.same_channel(other) {
        return Diff::new();
    }
    let (cap1, cap2) = (c1.capacity(), c2.capacity());
    if cap1 != cap2 {
        return Diff::single(Difference::new(
            messages::CAPACITY_NOT_EQUAL,
            format_capacity(cap1),
            format_capacity(cap2),
        ));
    }
    let (len1, len2) = (c1.len(), c2.len());
    scalar(len1 == len2, messages::LENGTH_NOT_EQUAL, || {
        (len1.to_string(), len2.to_string())
    })
}

fn compare_func(f1: Option<usize>, f2: Option<usize>) -> Diff {
    match (f1, f2) {
        (Some(a), Some(b)) => scalar(a == b, messages::FUNC_POINTER_NOT_EQUAL, || {
            (format!("{a:#x}"), format!("{b:#x}"))
        }),
        (None, None) => Diff::new(),
        (f1, f2) => only_one_is_nil(f1.is_none(), f2.is_none()),
    }
}

fn scalar(equal: bool, message: &str, values: impl FnOnce() -> (String, String)) -> Diff {
    if equal {
        return Diff::new();
    }
    let (v1, v2) = values();
    Diff::single(Difference::new(message, v1, v2))
}

fn only_one_is_nil(nil1: bool, nil2: bool) -> Diff {
    Diff::single(Difference::new(
        messages::ONLY_ONE_IS_NIL,
        nil1.to_string(),
        nil2.to_string(),
    ))
}

fn key_not_defined(key: &dyn Reflect, in1: bool, in2: bool) -> Diff {
    let path: Path = std::iter::once(PathElem::Map(render_key(key))).collect();
    Diff::single(Difference::new(messages::MAP_KEY_NOT_DEFINED, in1.to_string(), in2.to_string()).with_path(path))
}

/// The shared comparator with default settings.
pub fn default_comparator() -> &'static Comparator {
    static DEFAULT: OnceLock<Comparator> = OnceLock::new();
    DEFAULT.get_or_init(Comparator::new)
}

/// Compares two values with the [`default_comparator`].
pub fn compare(v1: &dyn Reflect, v2: &dyn Reflect) -> Diff {
    default_comparator().compare(v1, v2)
}
