//! Process-wide cache of reflective method lookups.
//!
//! Whether a type publishes a method with a given name is a property of the
//! type, so the answer is computed once per `(TypeId, name)` pair and shared
//! by every comparator. Negative answers are cached too. Entries are written
//! once and never invalidated.

use crate::value::{CmpFn, EqualFn, MethodFn, Reflect};
use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

type MethodCache = RwLock<HashMap<(TypeId, &'static str), Option<MethodFn>>>;

fn cache() -> &'static MethodCache {
    static CACHE: OnceLock<MethodCache> = OnceLock::new();
    CACHE.get_or_init(Default::default)
}

/// Looks up the method `name` on the concrete type of `v`.
pub fn lookup(v: &dyn Reflect, name: &'static str) -> Option<MethodFn> {
    let key = (Any::type_id(v.as_any()), name);
    if let Some(found) = cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return *found;
    }

    let probed = v
        .methods()
        .into_iter()
        .find(|method| method.name == name)
        .map(|method| method.func);
    let mut cache = cache().write().unwrap_or_else(PoisonError::into_inner);
    match cache.entry(key) {
        Entry::Occupied(entry) => *entry.get(),
        Entry::Vacant(entry) => {
            tracing::debug!(
                type_name = %v.type_name(),
                method = name,
                found = probed.is_some(),
                "cached method lookup"
            );
            *entry.insert(probed)
        }
    }
}

/// The method `name` on `v`, if it has the equality signature.
pub fn equal_method(v: &dyn Reflect, name: &'static str) -> Option<EqualFn> {
    match lookup(v, name)? {
        MethodFn::Equal(f) => Some(f),
        MethodFn::Cmp(_) => None,
    }
}

/// The method `name` on `v`, if it has the ordering signature.
pub fn cmp_method(v: &dyn Reflect, name: &'static str) -> Option<CmpFn> {
    match lookup(v, name)? {
        MethodFn::Cmp(f) => Some(f),
        MethodFn::Equal(_) => None,
    }
}

/// Whether the answer for `(type of v, name)` is already cached.
pub fn is_cached(v: &dyn Reflect, name: &'static str) -> bool {
    let key = (Any::type_id(v.as_any()), name);
    cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Kind, Method};

    struct Probe;

    impl Reflect for Probe {
        fn reflect(&self) -> Kind<'_> {
            Kind::Bool(true)
        }

        fn methods(&self) -> Vec<Method> {
            vec![Method::new("Same", MethodFn::Equal(|_, _| true))]
        }
    }

    #[test]
    fn test_lookup_by_name_and_signature() {
        assert!(equal_method(&Probe, "Same").is_some());
        assert!(cmp_method(&Probe, "Same").is_none());
        assert!(equal_method(&Probe, "Missing").is_none());
    }

    #[test]
    fn test_negative_results_are_cached() {
        struct Bare;
        impl Reflect for Bare {
            fn reflect(&self) -> Kind<'_> {
                Kind::Int(0)
            }
        }

        assert!(!is_cached(&Bare, "Equal"));
        assert!(lookup(&Bare, "Equal").is_none());
        assert!(is_cached(&Bare, "Equal"));
    }
}
