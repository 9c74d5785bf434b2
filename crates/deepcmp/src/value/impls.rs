use super::{ChanAccess, Entries, Field, Kind, MapAccess, Reflect, SeqAccess, StructAccess, Width};
use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};

static UNIT: () = ();

fn pointee<T: Reflect>(v: &T) -> Option<&dyn Reflect> {
    Some(v)
}

fn address<T: ?Sized>(v: &T) -> usize {
    v as *const T as *const () as usize
}

// Scalars

impl Reflect for bool {
    fn reflect(&self) -> Kind<'_> {
        Kind::Bool(*self)
    }
}

macro_rules! reflect_int {
    ($($t:ty),*) => {
        $(
            impl Reflect for $t {
                fn reflect(&self) -> Kind<'_> {
                    Kind::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! reflect_uint {
    ($($t:ty),*) => {
        $(
            impl Reflect for $t {
                fn reflect(&self) -> Kind<'_> {
                    Kind::Uint(*self as u64)
                }
            }
        )*
    };
}

reflect_int!(i8, i16, i32, i64, isize);
reflect_uint!(u8, u16, u32, u64, usize);

impl Reflect for char {
    fn reflect(&self) -> Kind<'_> {
        Kind::Int(i64::from(u32::from(*self)))
    }
}

impl Reflect for f32 {
    fn reflect(&self) -> Kind<'_> {
        Kind::Float(f64::from(*self), Width::W32)
    }
}

impl Reflect for f64 {
    fn reflect(&self) -> Kind<'_> {
        Kind::Float(*self, Width::W64)
    }
}

// Strings

impl Reflect for String {
    fn reflect(&self) -> Kind<'_> {
        Kind::String(self)
    }
}

impl Reflect for &'static str {
    fn reflect(&self) -> Kind<'_> {
        Kind::String(self)
    }
}

impl Reflect for Box<str> {
    fn reflect(&self) -> Kind<'_> {
        Kind::String(self)
    }
}

impl Reflect for Cow<'static, str> {
    fn reflect(&self) -> Kind<'_> {
        Kind::String(self)
    }
}

// Sequences

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Kind<'_> {
        Kind::Array(self)
    }
}

impl<T: Reflect, const N: usize> SeqAccess for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|v| v as &dyn Reflect)
    }

    fn identity(&self) -> usize {
        self.as_ptr() as usize
    }
}

macro_rules! reflect_slice {
    ($(impl<$t:ident> for $ty:ty;)*) => {
        $(
            impl<$t: Reflect> Reflect for $ty {
                fn reflect(&self) -> Kind<'_> {
                    Kind::Slice(self)
                }
            }

            impl<$t: Reflect> SeqAccess for $ty {
                fn len(&self) -> usize {
                    <[$t]>::len(self)
                }

                fn get(&self, index: usize) -> Option<&dyn Reflect> {
                    <[$t]>::get(self, index).map(|v| v as &dyn Reflect)
                }

                fn identity(&self) -> usize {
                    <[$t]>::as_ptr(self) as usize
                }
            }
        )*
    };
}

reflect_slice! {
    impl<T> for Vec<T>;
    impl<T> for Box<[T]>;
    impl<T> for &'static [T];
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Slice(self)
    }
}

impl<T: Reflect> SeqAccess for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|v| v as &dyn Reflect)
    }

    fn identity(&self) -> usize {
        self.as_slices().0.as_ptr() as usize
    }
}

// Maps and sets

impl<K: Reflect, V: Reflect, S: 'static> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Map(self)
    }
}

impl<K: Reflect, V: Reflect, S: 'static> MapAccess for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(self.iter().map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    fn identity(&self) -> usize {
        address(self)
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Map(self)
    }
}

impl<K: Reflect, V: Reflect> MapAccess for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(self.iter().map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    fn identity(&self) -> usize {
        address(self)
    }
}

impl<K: Reflect, S: 'static> Reflect for HashSet<K, S> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Map(self)
    }
}

impl<K: Reflect, S: 'static> MapAccess for HashSet<K, S> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(self.iter().map(|k| (k as &dyn Reflect, &UNIT as &dyn Reflect)))
    }

    fn identity(&self) -> usize {
        address(self)
    }
}

impl<K: Reflect> Reflect for BTreeSet<K> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Map(self)
    }
}

impl<K: Reflect> MapAccess for BTreeSet<K> {
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(self.iter().map(|k| (k as &dyn Reflect, &UNIT as &dyn Reflect)))
    }

    fn identity(&self) -> usize {
        address(self)
    }
}

// Structs

impl Reflect for () {
    fn reflect(&self) -> Kind<'_> {
        Kind::Struct(self)
    }
}

impl StructAccess for () {
    fn field_count(&self) -> usize {
        0
    }

    fn field(&self, _index: usize) -> Option<Field<'_>> {
        None
    }
}

impl<T: 'static> Reflect for PhantomData<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Struct(self)
    }
}

impl<T: 'static> StructAccess for PhantomData<T> {
    fn field_count(&self) -> usize {
        0
    }

    fn field(&self, _index: usize) -> Option<Field<'_>> {
        None
    }
}

macro_rules! reflect_tuple {
    ($len:expr => $($idx:tt $name:ident),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            fn reflect(&self) -> Kind<'_> {
                Kind::Struct(self)
            }
        }

        impl<$($name: Reflect),+> StructAccess for ($($name,)+) {
            fn field_count(&self) -> usize {
                $len
            }

            fn field(&self, index: usize) -> Option<Field<'_>> {
                match index {
                    $($idx => Some(Field::new(stringify!($idx), &self.$idx)),)+
                    _ => None,
                }
            }
        }
    };
}

reflect_tuple!(1 => 0 A);
reflect_tuple!(2 => 0 A, 1 B);
reflect_tuple!(3 => 0 A, 1 B, 2 C);
reflect_tuple!(4 => 0 A, 1 B, 2 C, 3 D);
reflect_tuple!(5 => 0 A, 1 B, 2 C, 3 D, 4 E);
reflect_tuple!(6 => 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

// Pointers

impl<T: Reflect> Reflect for Box<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Pointer(pointee(&**self))
    }
}

impl<T: Reflect> Reflect for Rc<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Pointer(pointee(&**self))
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Pointer(pointee(&**self))
    }
}

impl<T: Reflect> Reflect for &'static T {
    fn reflect(&self) -> Kind<'_> {
        Kind::Pointer(pointee(*self))
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Pointer(self.as_ref().and_then(pointee))
    }
}

impl<T: Reflect> Reflect for OnceCell<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Pointer(self.get().and_then(pointee))
    }
}

impl<T: Reflect> Reflect for OnceLock<T> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Pointer(self.get().and_then(pointee))
    }
}

// Interfaces

impl Reflect for Box<dyn Reflect> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Interface(Some(&**self))
    }
}

impl Reflect for Rc<dyn Reflect> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Interface(Some(&**self))
    }
}

impl Reflect for Arc<dyn Reflect> {
    fn reflect(&self) -> Kind<'_> {
        Kind::Interface(Some(&**self))
    }
}

// Channels

macro_rules! reflect_chan {
    ($($ty:ident),*) => {
        $(
            impl<T: 'static> Reflect for crossbeam_channel::$ty<T> {
                fn reflect(&self) -> Kind<'_> {
                    Kind::Chan(Some(self))
                }
            }

            impl<T: 'static> ChanAccess for crossbeam_channel::$ty<T> {
                fn capacity(&self) -> Option<usize> {
                    crossbeam_channel::$ty::capacity(self)
                }

                fn len(&self) -> usize {
                    crossbeam_channel::$ty::len(self)
                }

                fn same_channel(&self, other: &dyn Reflect) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<Self>()
                        .is_some_and(|other| crossbeam_channel::$ty::same_channel(self, other))
                }
            }
        )*
    };
}

reflect_chan!(Sender, Receiver);

// Functions

macro_rules! reflect_fn {
    ($($arg:ident),*) => {
        impl<R: 'static, $($arg: 'static),*> Reflect for fn($($arg),*) -> R {
            fn reflect(&self) -> Kind<'_> {
                Kind::Func(Some(*self as usize))
            }
        }
    };
}

reflect_fn!();
reflect_fn!(A);
reflect_fn!(A, B);
reflect_fn!(A, B, C);

// Raw pointers

impl<T: ?Sized + 'static> Reflect for *const T {
    fn reflect(&self) -> Kind<'_> {
        Kind::UnsafePointer(*self as *const () as usize)
    }
}

impl<T: ?Sized + 'static> Reflect for *mut T {
    fn reflect(&self) -> Kind<'_> {
        Kind::UnsafePointer(*self as *const () as usize)
    }
}
