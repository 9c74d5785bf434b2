#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{assert_single, paths};
use deepcmp::{compare, Kind, Reflect, StructAccess};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

#[derive(Reflect)]
struct Pair<T> {
    left: T,
    right: T,
}

#[derive(Reflect)]
struct Meters(f64);

#[derive(Reflect)]
struct Marker;

#[derive(Reflect)]
struct Session {
    user: String,
    #[reflect(skip)]
    #[allow(dead_code)]
    started_at: std::time::Instant,
    r#type: &'static str,
    #[reflect(rename = "Scopes")]
    scopes: BTreeMap<String, bool>,
}

#[derive(Reflect)]
struct Wrapper<K, V>
where
    K: Ord,
{
    entries: BTreeMap<K, V>,
}

fn session(kind: &'static str, admin: bool) -> Session {
    Session {
        user: "ann".to_string(),
        started_at: std::time::Instant::now(),
        r#type: kind,
        scopes: [("read".to_string(), true), ("admin".to_string(), admin)]
            .into_iter()
            .collect(),
    }
}

#[test]
fn test_generic_struct() {
    let diff = compare(&Pair { left: 1u8, right: 2u8 }, &Pair { left: 1u8, right: 3u8 });
    assert_single(&diff, ".right", "uint not equal", "2", "3");
}

#[test]
fn test_generic_instantiations_are_distinct_types() {
    let diff = compare(&Pair { left: 1i32, right: 2i32 }, &Pair { left: 1i64, right: 2i64 });
    assert_single(&diff, ".", "type not equal", "Pair<i32>", "Pair<i64>");
}

#[test]
fn test_tuple_struct_fields_are_positional() {
    assert_single(&compare(&Meters(1.5), &Meters(2.5)), ".0", "float not equal", "1.5", "2.5");
}

#[test]
fn test_unit_struct() {
    assert!(compare(&Marker, &Marker).is_empty());
    assert_eq!(Marker.field_count(), 0);
    assert!(matches!(Marker.reflect(), Kind::Struct(_)));
}

#[test]
fn test_skip_rename_and_raw_identifiers() {
    // Skipped fields are invisible, so differing timestamps do not matter
    assert!(compare(&session("web", false), &session("web", false)).is_empty());

    let diff = compare(&session("web", false), &session("cli", true));
    assert_eq!(paths(&diff), [".type", ".Scopes[admin]"]);
}

#[test]
fn test_field_listing() {
    let s = session("web", false);
    let names: Vec<&str> = (0..s.field_count())
        .filter_map(|i| s.field(i))
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["user", "type", "Scopes"]);
    assert!(s.field(3).is_none());
}

#[test]
fn test_where_clause_is_kept() {
    let a = Wrapper {
        entries: [(1u8, "one")].into_iter().collect(),
    };
    let b = Wrapper {
        entries: [(1u8, "uno")].into_iter().collect(),
    };
    assert_single(&compare(&a, &b), ".entries[1]", "string not equal", "\"one\"", "\"uno\"");
}
