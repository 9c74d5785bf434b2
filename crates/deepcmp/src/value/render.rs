//! Deterministic textual rendering of values.
//!
//! Used for map-key path segments, the textual fallback of map key ordering
//! and the values attached to method differences. The output loosely follows
//! Go's `%v`: scalars plain, strings unquoted, `[a b]` for sequences,
//! `map[k:v]` for maps, `{a b}` for structs and hex addresses for pointers.

use super::{address_of, Kind, Reflect, Width};
use crate::compare::keys;
use std::fmt::Write;

/// Nesting depth past which rendering prints `...`.
const MAX_RENDER_DEPTH: usize = 16;

/// Renders a value.
pub fn render(v: &dyn Reflect) -> String {
    let mut out = String::new();
    write_value(&mut out, v, Pointers::Address, 0);
    out
}

/// Renders a map key.
///
/// Pointers print their pointee rather than their address, so keys that
/// compare by value (`Option`, `Box`, `Rc`, `Arc`) get the same text in
/// every map and on every run.
pub fn render_key(v: &dyn Reflect) -> String {
    let mut out = String::new();
    write_value(&mut out, v, Pointers::Pointee, 0);
    out
}

/// Formats a float at its native width using the shortest round-trip digits.
///
/// Decimal exponents below -4 or from 21 up switch to exponent form with a
/// signed, two-digit minimum exponent: `1e+21`, `1e-07`.
pub fn format_float(f: f64, width: Width) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    let (plain, scientific) = match width {
        Width::W32 => ((f as f32).to_string(), format!("{:e}", f as f32)),
        Width::W64 => (f.to_string(), format!("{f:e}")),
    };
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return plain;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return plain;
    };
    if (-4..21).contains(&exponent) {
        return plain;
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

/// Formats a complex number as `(re+imi)`.
pub fn format_complex(re: f64, im: f64, width: Width) -> String {
    let re = format_float(re, width);
    let im = format_float(im, width);
    let sign = if im.starts_with('-') { "" } else { "+" };
    format!("({re}{sign}{im}i)")
}

/// Formats a channel capacity, `unbounded` for `None`.
pub fn format_capacity(capacity: Option<usize>) -> String {
    capacity.map_or_else(|| "unbounded".to_string(), |c| c.to_string())
}

/// Strips module paths from a fully qualified type name.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            c if c.is_alphanumeric() || c == '_' => segment.push(c),
            c => {
                out.push_str(&segment);
                segment.clear();
                out.push(c);
            }
        }
    }
    out.push_str(&segment);
    out
}

/// How pointers are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pointers {
    Address,
    Pointee,
}

fn write_value(out: &mut String, v: &dyn Reflect, pointers: Pointers, depth: usize) {
    if depth >= MAX_RENDER_DEPTH {
        out.push_str("...");
        return;
    }
    match v.reflect() {
        Kind::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Kind::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Kind::Uint(u) => {
            let _ = write!(out, "{u}");
        }
        Kind::Float(f, width) => out.push_str(&format_float(f, width)),
        Kind::Complex(re, im, width) => out.push_str(&format_complex(re, im, width)),
        Kind::String(s) => out.push_str(s),
        Kind::Array(seq) | Kind::Slice(seq) => {
            out.push('[');
            for index in 0..seq.len() {
                if index > 0 {
                    out.push(' ');
                }
                match seq.get(index) {
                    Some(elem) => write_value(out, elem, pointers, depth + 1),
                    None => out.push_str("<invalid>"),
                }
            }
            out.push(']');
        }
        Kind::Map(map) => {
            if map.is_nil() {
                out.push_str("map[]");
                return;
            }
            let [entries] = keys::sort_entries([map]);
            out.push_str("map[");
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_value(out, entry.key, Pointers::Pointee, depth + 1);
                out.push(':');
                write_value(out, entry.value, pointers, depth + 1);
            }
            out.push(']');
        }
        Kind::Struct(st) => {
            out.push('{');
            for index in 0..st.field_count() {
                if index > 0 {
                    out.push(' ');
                }
                if let Some(field) = st.field(index) {
                    write_value(out, field.value, pointers, depth + 1);
                }
            }
            out.push('}');
        }
        Kind::Pointer(target) => match target {
            Some(target) if pointers == Pointers::Pointee => {
                write_value(out, target, pointers, depth + 1)
            }
            Some(target) => {
                let _ = write!(out, "{:#x}", address_of(target));
            }
            None => out.push_str("<nil>"),
        },
        Kind::Interface(elem) => match elem {
            Some(elem) => write_value(out, elem, pointers, depth + 1),
            None => out.push_str("<nil>"),
        },
        Kind::Chan(chan) => match chan {
            Some(chan) => {
                let _ = write!(
                    out,
                    "chan(len={}, cap={})",
                    chan.len(),
                    format_capacity(chan.capacity())
                );
            }
            None => out.push_str("<nil>"),
        },
        Kind::Func(addr) => match addr {
            Some(addr) => {
                let _ = write!(out, "{addr:#x}");
            }
            None => out.push_str("<nil>"),
        },
        Kind::UnsafePointer(addr) => {
            let _ = write!(out, "{addr:#x}");
        }
    }
}
