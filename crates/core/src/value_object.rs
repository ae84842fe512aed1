//! Value objects: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity**. They are defined
//! entirely by their attribute values, so two value objects with the same values
//! are equal.
//!
//! ## Field descriptors
//!
//! Rather than every value type writing its own `eq`/`hash`/`fmt`, each type
//! declares its field list once through [`value_object!`]. The macro builds a
//! [`Descriptor`] the first time it is needed: the type name plus the fields
//! **sorted by name**, so the result never depends on declaration order.
//! Every comparison, hash and rendering of that type walks the same
//! descriptor.
//!
//! - `equals`: same instance, or every field pair equal (absent == absent,
//!   absent != present).
//! - `hash_code`: starting from 0, `hash = hash * 1236594 ^ field_hash` per
//!   field in sorted order (wrapping, absent fields contribute 0).
//! - `render`: `TypeName(a: 1; b: 2)`, absent values rendered empty.
//!
//! ## Usage Pattern
//!
//! ```
//! use taxi_core::value_object;
//!
//! #[derive(Debug, Clone)]
//! pub struct Money {
//!     amount: i64,
//!     currency: Option<String>,
//! }
//!
//! value_object!(Money { amount, currency });
//!
//! let m1 = Money { amount: 100, currency: Some("USD".into()) };
//! let m2 = Money { amount: 100, currency: Some("USD".into()) };
//! assert_eq!(m1, m2);
//! assert_eq!(m1.to_string(), "Money(amount: 100; currency: USD)");
//! ```

use std::any::Any;
use std::fmt;

/// Multiplier of the field-hash combination step.
pub const HASH_MULTIPLIER: i32 = 1_236_594;

/// Deterministic 32-bit hash, identical across processes and platforms.
///
/// `std::hash::Hash` is deliberately seeded per process, which makes it
/// unusable for a hash code that callers may persist or compare in tests.
pub trait StableHash {
    fn stable_hash(&self) -> i32;
}

impl StableHash for str {
    fn stable_hash(&self) -> i32 {
        self.encode_utf16()
            .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
    }
}

impl StableHash for String {
    fn stable_hash(&self) -> i32 {
        self.as_str().stable_hash()
    }
}

impl StableHash for bool {
    fn stable_hash(&self) -> i32 {
        if *self { 1231 } else { 1237 }
    }
}

impl StableHash for char {
    fn stable_hash(&self) -> i32 {
        *self as i32
    }
}

macro_rules! impl_stable_hash_narrow {
    ($($t:ty),*) => {
        $(
            impl StableHash for $t {
                fn stable_hash(&self) -> i32 {
                    *self as i32
                }
            }
        )*
    };
}

macro_rules! impl_stable_hash_wide {
    ($($t:ty),*) => {
        $(
            impl StableHash for $t {
                fn stable_hash(&self) -> i32 {
                    let bits = *self as u64;
                    (bits ^ (bits >> 32)) as i32
                }
            }
        )*
    };
}

impl_stable_hash_narrow!(i8, i16, i32, u8, u16, u32);
impl_stable_hash_wide!(i64, u64);

/// Object-safe view of a single field value.
pub trait FieldValue: fmt::Display {
    fn field_hash(&self) -> i32;

    /// Equality against another field value; values of different concrete
    /// types are never equal.
    fn field_eq(&self, other: &dyn FieldValue) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<T> FieldValue for T
where
    T: StableHash + PartialEq + fmt::Display + 'static,
{
    fn field_hash(&self) -> i32 {
        self.stable_hash()
    }

    fn field_eq(&self, other: &dyn FieldValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Conversion from a stored field to an optional field value.
///
/// `Option<T>` maps `None` to an absent field; plain values are always present.
pub trait AsField {
    fn as_field(&self) -> Option<&dyn FieldValue>;
}

impl<T: FieldValue> AsField for Option<T> {
    fn as_field(&self) -> Option<&dyn FieldValue> {
        self.as_ref().map(|value| value as &dyn FieldValue)
    }
}

macro_rules! impl_as_field_present {
    ($($t:ty),*) => {
        $(
            impl AsField for $t {
                fn as_field(&self) -> Option<&dyn FieldValue> {
                    Some(self)
                }
            }
        )*
    };
}

impl_as_field_present!(String, bool, char, i8, i16, i32, i64, u8, u16, u32, u64);

/// One named field of a value type.
pub struct Field<T> {
    name: &'static str,
    get: fn(&T) -> Option<&dyn FieldValue>,
}

impl<T> Field<T> {
    pub fn new(name: &'static str, get: fn(&T) -> Option<&dyn FieldValue>) -> Self {
        Self { name, get }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value<'a>(&self, value: &'a T) -> Option<&'a dyn FieldValue> {
        (self.get)(value)
    }
}

/// Per-type field layout, sorted by field name.
pub struct Descriptor<T> {
    type_name: &'static str,
    fields: Vec<Field<T>>,
}

impl<T> Descriptor<T> {
    pub fn new(type_name: &'static str, fields: impl IntoIterator<Item = Field<T>>) -> Self {
        let mut fields: Vec<Field<T>> = fields.into_iter().collect();
        fields.sort_by(|a, b| a.name.cmp(b.name));
        Self { type_name, fields }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(Field::name)
    }

    pub fn equals(&self, a: &T, b: &T) -> bool {
        if std::ptr::eq(a, b) {
            return true;
        }
        self.fields
            .iter()
            .all(|field| match (field.value(a), field.value(b)) {
                (None, None) => true,
                (Some(left), Some(right)) => left.field_eq(right),
                _ => false,
            })
    }

    pub fn hash_code(&self, value: &T) -> i32 {
        self.fields
            .iter()
            .map(|field| field.value(value).map_or(0, |v| v.field_hash()))
            .fold(0i32, |hash, field_hash| {
                hash.wrapping_mul(HASH_MULTIPLIER) ^ field_hash
            })
    }

    pub fn render(&self, value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: ", field.name)?;
            if let Some(v) = field.value(value) {
                write!(f, "{v}")?;
            }
        }
        f.write_str(")")
    }
}

/// Value object interface backed by a static [`Descriptor`].
///
/// Implement through [`value_object!`]; the macro also derives `PartialEq`,
/// `Eq`, `Hash`, `Display` and [`StableHash`] from the descriptor, so value
/// objects can be nested as fields of other value objects.
pub trait ValueObject: Clone + fmt::Debug + Sized + 'static {
    fn descriptor() -> &'static Descriptor<Self>;

    fn value_eq(&self, other: &Self) -> bool {
        Self::descriptor().equals(self, other)
    }

    fn value_hash(&self) -> i32 {
        Self::descriptor().hash_code(self)
    }
}

/// Declare a struct's fields once and derive structural equality, hashing and
/// rendering from them.
///
/// Every listed field must implement [`AsField`] (`String`, integers, `bool`,
/// other value objects, or `Option` of any of those).
#[macro_export]
macro_rules! value_object {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::value_object::ValueObject for $ty {
            fn descriptor() -> &'static $crate::value_object::Descriptor<Self> {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::value_object::Descriptor<$ty>> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::value_object::Descriptor::new(
                        stringify!($ty),
                        [$(
                            $crate::value_object::Field::new(stringify!($field), {
                                fn get(
                                    value: &$ty,
                                ) -> ::core::option::Option<&dyn $crate::value_object::FieldValue> {
                                    $crate::value_object::AsField::as_field(&value.$field)
                                }
                                get
                            })
                        ),+],
                    )
                })
            }
        }

        impl ::core::cmp::PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                <Self as $crate::value_object::ValueObject>::value_eq(self, other)
            }
        }

        impl ::core::cmp::Eq for $ty {}

        impl ::core::hash::Hash for $ty {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_i32(<Self as $crate::value_object::ValueObject>::value_hash(self));
            }
        }

        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                <Self as $crate::value_object::ValueObject>::descriptor().render(self, f)
            }
        }

        impl $crate::value_object::StableHash for $ty {
            fn stable_hash(&self) -> i32 {
                <Self as $crate::value_object::ValueObject>::value_hash(self)
            }
        }

        impl $crate::value_object::AsField for $ty {
            fn as_field(&self) -> ::core::option::Option<&dyn $crate::value_object::FieldValue> {
                ::core::option::Option::Some(self)
            }
        }
    };
}
