//! Runtime value model.
//!
//! Rust has no built-in reflection, so comparable types opt in by
//! implementing [`Reflect`] (usually through `#[derive(Reflect)]`). A
//! [`Value`] is a cheap, copyable handle over a `&dyn Reflect` that exposes
//! validity, concrete type identity and a [`Kind`]-specific view with
//! accessors for fields, elements, map entries and pointees.
//!
//! Implementations for the standard library live in [`impls`]; the
//! deterministic textual rendering used for map keys lives in [`render`].

mod impls;
pub mod render;

use std::any::{Any, TypeId};
use std::fmt;

/// Upcast to [`Any`], implemented for every sized `'static` type.
///
/// This is what gives a `&dyn Reflect` its concrete [`TypeId`] and makes
/// downcasting possible.
pub trait AsAny {
    /// Returns `self` as a `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type whose values can be introspected by the comparator.
///
/// # Example
///
/// ```
/// use deepcmp::{compare, Reflect};
///
/// #[derive(Reflect)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let diff = compare(&Point { x: 1, y: 2 }, &Point { x: 1, y: 3 });
/// assert_eq!(diff.to_string(), ".y: int not equal");
/// ```
pub trait Reflect: AsAny + 'static {
    /// Kind-specific view of this value.
    fn reflect(&self) -> Kind<'_>;

    /// Short type name used in `type not equal` differences.
    fn type_name(&self) -> String {
        render::short_type_name(std::any::type_name::<Self>())
    }

    /// Reflective methods published by this type.
    ///
    /// Probed by name and signature by the method hooks; results are cached
    /// per type, so this is called at most once per `(type, name)` pair.
    fn methods(&self) -> Vec<Method> {
        Vec::new()
    }
}

/// Bit width of a floating point or complex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    W32,
    W64,
}

/// Structural category of a value, with kind-specific accessors.
#[derive(Clone, Copy)]
pub enum Kind<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64, Width),
    /// Real and imaginary parts.
    Complex(f64, f64, Width),
    String(&'a str),
    /// Fixed-length sequence. Never nil, no identity short-circuit.
    Array(&'a dyn SeqAccess),
    /// Growable sequence with nil/length/identity pre-checks.
    Slice(&'a dyn SeqAccess),
    Map(&'a dyn MapAccess),
    Struct(&'a dyn StructAccess),
    /// Owning or borrowing indirection; `None` is nil.
    Pointer(Option<&'a dyn Reflect>),
    /// Dynamically typed value (`Box<dyn Reflect>`); `None` is nil.
    Interface(Option<&'a dyn Reflect>),
    Chan(Option<&'a dyn ChanAccess>),
    /// Function address; `None` is nil.
    Func(Option<usize>),
    UnsafePointer(usize),
}

impl Kind<'_> {
    /// Lowercase kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool(_) => "bool",
            Kind::Int(_) => "int",
            Kind::Uint(_) => "uint",
            Kind::Float(..) => "float",
            Kind::Complex(..) => "complex",
            Kind::String(_) => "string",
            Kind::Array(_) => "array",
            Kind::Slice(_) => "slice",
            Kind::Map(_) => "map",
            Kind::Struct(_) => "struct",
            Kind::Pointer(_) => "pointer",
            Kind::Interface(_) => "interface",
            Kind::Chan(_) => "chan",
            Kind::Func(_) => "func",
            Kind::UnsafePointer(_) => "unsafe pointer",
        }
    }
}

impl fmt::Debug for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.name())
    }
}

/// Indexed access to array and slice elements.
pub trait SeqAccess {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Address of the backing storage, used for aliasing and cycle checks.
    fn identity(&self) -> usize;

    fn is_nil(&self) -> bool {
        false
    }
}

/// Boxed iterator over `(key, value)` map entries.
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// Entry iteration over a map.
pub trait MapAccess {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, in any order.
    fn entries(&self) -> Entries<'_>;

    /// Address of the map, used for aliasing and cycle checks.
    fn identity(&self) -> usize;

    fn is_nil(&self) -> bool {
        false
    }
}

/// One declared struct field.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a dyn Reflect) -> Self {
        Self { name, value }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &render::render(self.value))
            .finish()
    }
}

/// Field access in declaration order, private fields included.
pub trait StructAccess {
    fn field_count(&self) -> usize;

    fn field(&self, index: usize) -> Option<Field<'_>>;
}

/// Observable state of a channel.
pub trait ChanAccess {
    /// Buffer capacity; `None` for unbounded channels.
    fn capacity(&self) -> Option<usize>;

    /// Number of buffered messages.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` is a handle to the same channel.
    fn same_channel(&self, other: &dyn Reflect) -> bool;
}

/// Signature of a self-equality method.
pub type EqualFn = fn(&dyn Reflect, &dyn Reflect) -> bool;

/// Signature of a self-ordering method; the result is negative, zero or
/// positive.
pub type CmpFn = fn(&dyn Reflect, &dyn Reflect) -> i64;

/// Type-erased method body, tagged with its signature.
#[derive(Clone, Copy)]
pub enum MethodFn {
    Equal(EqualFn),
    Cmp(CmpFn),
}

impl fmt::Debug for MethodFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodFn::Equal(_) => f.write_str("MethodFn::Equal"),
            MethodFn::Cmp(_) => f.write_str("MethodFn::Cmp"),
        }
    }
}

/// A named entry in a type's reflective method table.
#[derive(Debug, Clone, Copy)]
pub struct Method {
    pub name: &'static str,
    pub func: MethodFn,
}

impl Method {
    pub fn new(name: &'static str, func: MethodFn) -> Self {
        Self { name, func }
    }

    /// Publishes `PartialEq` as the method `Equal`.
    pub fn equal<T: Reflect + PartialEq>() -> Self {
        Self::new("Equal", MethodFn::Equal(equal_thunk::<T>))
    }

    /// Publishes `Ord` as the method `Cmp`.
    pub fn cmp<T: Reflect + Ord>() -> Self {
        Self::new("Cmp", MethodFn::Cmp(cmp_thunk::<T>))
    }
}

fn equal_thunk<T: Reflect + PartialEq>(a: &dyn Reflect, b: &dyn Reflect) -> bool {
    match (a.as_any().downcast_ref::<T>(), b.as_any().downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn cmp_thunk<T: Reflect + Ord>(a: &dyn Reflect, b: &dyn Reflect) -> i64 {
    match (a.as_any().downcast_ref::<T>(), b.as_any().downcast_ref::<T>()) {
        (Some(a), Some(b)) => a.cmp(b) as i64,
        _ => 0,
    }
}

/// Address of the value behind a reflect reference.
pub fn address_of(v: &dyn Reflect) -> usize {
    v as *const dyn Reflect as *const () as usize
}

/// Handle over a possibly absent value.
#[derive(Clone, Copy, Default)]
pub struct Value<'a> {
    inner: Option<&'a dyn Reflect>,
}

impl<'a> Value<'a> {
    pub fn new(v: &'a dyn Reflect) -> Self {
        Self { inner: Some(v) }
    }

    /// The invalid (absent) value.
    pub const fn invalid() -> Self {
        Self { inner: None }
    }

    pub fn is_valid(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Option<&'a dyn Reflect> {
        self.inner
    }

    /// Concrete type identity, `None` when invalid.
    pub fn type_id(&self) -> Option<TypeId> {
        self.inner.map(|v| Any::type_id(v.as_any()))
    }

    pub fn type_name(&self) -> String {
        self.inner
            .map_or_else(|| "<invalid>".to_string(), |v| v.type_name())
    }

    pub fn kind(&self) -> Option<Kind<'a>> {
        self.inner.map(|v| v.reflect())
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&'a T> {
        self.inner?.as_any().downcast_ref::<T>()
    }

    /// Address of the value, `0` when invalid.
    pub fn address(&self) -> usize {
        self.inner.map_or(0, address_of)
    }
}

impl<'a> From<&'a dyn Reflect> for Value<'a> {
    fn from(v: &'a dyn Reflect) -> Self {
        Self::new(v)
    }
}

impl<'a> From<Option<&'a dyn Reflect>> for Value<'a> {
    fn from(inner: Option<&'a dyn Reflect>) -> Self {
        Self { inner }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            Some(v) => f.write_str(&render::render(v)),
            None => f.write_str("<invalid>"),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({}: {})", self.type_name(), self)
    }
}

// A stored handle is itself a value. Its fields are opaque; the unwrap hook
// compares what it points at instead.
impl Reflect for Value<'static> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Struct(self)
    }
}

impl StructAccess for Value<'static> {
    fn field_count(&self) -> usize {
        0
    }

    fn field(&self, _index: usize) -> Option<Field<'_>> {
        None
    }
}
