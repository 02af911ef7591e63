mod compound;
mod list;
mod ser;

use crate::{ByteArray, IntArray, LongArray, Tag};

pub use self::compound::{Compound, CompoundBuilder};
pub use self::list::List;

/// Value is a complete NBT value. It owns its data, and nothing inside it can
/// be changed after construction. Compounds and Lists nest further values.
///
/// Equality is structural: two values are equal when they are the same kind
/// and hold equal contents, no matter how they were built. Floats compare by
/// their bits, so a NaN equals itself and `0.0` differs from `-0.0`, matching
/// what is written to the wire.
///
/// ```
/// # use nbtree::{Compound, Value};
/// let compound = Compound::builder().put("DataVersion", 3465).build();
/// match compound.get("DataVersion") {
///     Some(Value::Int(ver)) => println!("Version: {}", ver),
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(ByteArray),
    IntArray(IntArray),
    LongArray(LongArray),
    List(List),
    Compound(Compound),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Byte(a), Byte(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (ByteArray(a), ByteArray(b)) => a == b,
            (IntArray(a), IntArray(b)) => a == b,
            (LongArray(a), LongArray(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Compound(a), Compound(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// The tag this value is written under.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::String(_) => Tag::String,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
        }
    }

    /// Read any numeric value as `T`, widening or truncating as needed. Non
    /// numeric values give `None`.
    ///
    /// ```
    /// # use nbtree::Value;
    /// assert_eq!(Value::Int(42).as_number::<i64>(), Some(42));
    /// assert_eq!(Value::Long(0x1234).as_number::<i8>(), Some(0x34));
    /// assert_eq!(Value::String("42".into()).as_number::<i32>(), None);
    /// ```
    pub fn as_number<T: Numeric>(&self) -> Option<T> {
        T::from_value(self)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }
}

/// Numeric types that any numeric NBT value can be converted into.
///
/// Integers convert with two's-complement truncation or sign extension.
/// Floating point values convert to a 32-bit integer first when the target is
/// narrower than a long, saturating at the bounds, and are then truncated like
/// any other integer.
pub trait Numeric: Sized + Copy {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! numeric {
    ($ty:ty, float via $via:ty) => {
        impl Numeric for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                Some(match *value {
                    Value::Byte(v) => v as $ty,
                    Value::Short(v) => v as $ty,
                    Value::Int(v) => v as $ty,
                    Value::Long(v) => v as $ty,
                    Value::Float(v) => v as $via as $ty,
                    Value::Double(v) => v as $via as $ty,
                    _ => return None,
                })
            }
        }
    };
}

numeric!(i8, float via i32);
numeric!(i16, float via i32);
numeric!(i32, float via i32);
numeric!(i64, float via i64);
numeric!(f32, float via f32);
numeric!(f64, float via f64);

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
        impl From<&$type> for Value {
            fn from(val: &$type) -> Self {
                Self::$variant(val.to_owned()$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(ByteArray, ByteArray);
from!(IntArray, IntArray);
from!(LongArray, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}
impl From<&bool> for Value {
    fn from(val: &bool) -> Self {
        Self::Byte(i8::from(*val))
    }
}

#[cfg(feature = "arbitrary1")]
fn arb_list(u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<List> {
    let tag = match u.arbitrary::<Tag>()? {
        // Only empty lists may be tagged End.
        Tag::End => return Ok(List::empty(Tag::End)),
        tag => tag,
    };

    let len = u.arbitrary_len::<u8>()?.min(16);
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(arb_value(u, tag, depth + 1)?);
    }
    List::new(tag, items).map_err(|_| arbitrary::Error::IncorrectFormat)
}

#[cfg(feature = "arbitrary1")]
fn arb_value(u: &mut arbitrary::Unstructured, tag: Tag, depth: usize) -> arbitrary::Result<Value> {
    use Value::*;

    // Keep fuzzed trees shallow, nesting limits have their own tests.
    let tag = match tag {
        Tag::List | Tag::Compound if depth > 8 => Tag::Byte,
        tag => tag,
    };

    Ok(match tag {
        Tag::End => return Err(arbitrary::Error::IncorrectFormat),
        Tag::Byte => Byte(u.arbitrary()?),
        Tag::Short => Short(u.arbitrary()?),
        Tag::Int => Int(u.arbitrary()?),
        Tag::Long => Long(u.arbitrary()?),
        Tag::Float => Float(u.arbitrary()?),
        Tag::Double => Double(u.arbitrary()?),
        Tag::ByteArray => ByteArray(u.arbitrary()?),
        Tag::String => String(u.arbitrary()?),
        Tag::IntArray => IntArray(u.arbitrary()?),
        Tag::LongArray => LongArray(u.arbitrary()?),
        Tag::List => List(arb_list(u, depth)?),
        Tag::Compound => {
            let len = u.arbitrary_len::<u8>()?.min(16);
            let mut builder = crate::Compound::builder();
            for _ in 0..len {
                let key: std::string::String = u.arbitrary()?;
                let tag = u.arbitrary::<Tag>()?;
                if tag == Tag::End {
                    continue;
                }
                builder = builder.put(key, arb_value(u, tag, depth + 1)?);
            }
            Compound(builder.build())
        }
    })
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Value {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let tag = match u.arbitrary::<Tag>()? {
            Tag::End => Tag::Compound,
            tag => tag,
        };
        arb_value(u, tag, 0)
    }
}
