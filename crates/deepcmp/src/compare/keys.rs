//! Deterministic map key ordering.
//!
//! Keys of the scalar kinds are ordered by value. Any other key kind, or a
//! mix of kinds across the maps being ordered together, falls back to
//! ordering every key by its rendered text, so the order is total for the
//! whole comparison.
//!
//! Text is only an order. Distinct keys can render alike, so entries whose
//! keys tie on text are paired by deep key equality, not by position.

use crate::value::render::render_key;
use crate::value::{Kind, MapAccess, Reflect};
use std::cmp::Ordering;
use std::mem::discriminant;

/// A map entry with its precomputed sort key.
pub(crate) struct Entry<'a> {
    pub key: &'a dyn Reflect,
    pub value: &'a dyn Reflect,
    sort: SortKey<'a>,
}

impl Entry<'_> {
    /// Orders two entries by key.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.sort.compare(&other.sort)
    }

    /// Whether this entry is ordered by rendered text. Equal text does not
    /// imply equal keys.
    pub fn by_text(&self) -> bool {
        matches!(self.sort, SortKey::Text(_))
    }
}

/// End of the run of entries starting at `start` whose keys tie with `probe`.
pub(crate) fn run_end(entries: &[Entry<'_>], start: usize, probe: &Entry<'_>) -> usize {
    entries[start..]
        .iter()
        .position(|entry| entry.cmp_key(probe) != Ordering::Equal)
        .map_or(entries.len(), |offset| start + offset)
}

enum SortKey<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(f64, f64),
    Str(&'a str),
    Text(String),
}

impl<'a> SortKey<'a> {
    fn direct(key: &'a dyn Reflect) -> Option<Self> {
        Some(match key.reflect() {
            Kind::Bool(b) => SortKey::Bool(b),
            Kind::Int(i) => SortKey::Int(i),
            Kind::Uint(u) => SortKey::Uint(u),
            Kind::Float(f, _) => SortKey::Float(f),
            Kind::Complex(re, im, _) => SortKey::Complex(re, im),
            Kind::String(s) => SortKey::Str(s),
            _ => return None,
        })
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Int(_) => 1,
            SortKey::Uint(_) => 2,
            SortKey::Float(_) => 3,
            SortKey::Complex(..) => 4,
            SortKey::Str(_) => 5,
            SortKey::Text(_) => 6,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Uint(a), SortKey::Uint(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Complex(ar, ai), SortKey::Complex(br, bi)) => {
                ar.total_cmp(br).then_with(|| ai.total_cmp(bi))
            }
            (SortKey::Str(a), SortKey::Str(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Collects and sorts the entries of each map with one shared key order.
pub(crate) fn sort_entries<'a, const N: usize>(maps: [&'a dyn MapAccess; N]) -> [Vec<Entry<'a>>; N] {
    let mut all = maps.map(|map| {
        map.entries()
            .map(|(key, value)| Entry {
                key,
                value,
                sort: SortKey::direct(key).unwrap_or_else(|| SortKey::Text(String::new())),
            })
            .collect::<Vec<_>>()
    });

    let mut sorts = all.iter().flatten().map(|entry| &entry.sort);
    let uniform = match sorts.next() {
        Some(first) => {
            !matches!(first, SortKey::Text(_))
                && sorts.all(|sort| discriminant(sort) == discriminant(first))
        }
        None => true,
    };
    if !uniform {
        for entry in all.iter_mut().flatten() {
            entry.sort = SortKey::Text(render_key(entry.key));
        }
    }

    for entries in &mut all {
        entries.sort_by(|a, b| a.cmp_key(b));
    }
    all
}
