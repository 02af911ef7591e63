//! nbtree reads and writes NBT data from *Minecraft: Java Edition* as a tree
//! of immutable values. This format is used by the game to store various
//! things, such as the world data and player inventories.
//!
//! * For the tree types see [`Value`], [`Compound`] and [`List`].
//! * For NBT array types see [`ByteArray`], [`IntArray`], and [`LongArray`].
//! * For the binary codec see [`Writer`] and [`Reader`].
//! * For stream framing see [`Compression`].
//!
//! # Immutability
//!
//! Nothing in a tree can be changed once it is built. A [`Compound`] is
//! assembled once through a [`CompoundBuilder`], after which
//! [`Compound::with_entries`] and [`Compound::with_removed_keys`] hand back
//! new compounds and leave the original alone. Clones are cheap, the entries
//! are reference counted.
//!
//! # Quick example
//!
//! ```
//! use nbtree::{Compound, Compression, IntArray, List, Tag, Value};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let names = List::new(Tag::String, vec!["Steve".into(), "Alex".into()])?;
//!
//! let level = Compound::builder()
//!     .put("DataVersion", 3465)
//!     .put("Players", names)
//!     .put("Seed", IntArray::from(vec![1, 2, 3]))
//!     .build();
//!
//! let bytes = nbtree::to_bytes("", &Value::from(level.clone()), Compression::Gzip)?;
//! let (name, value) = nbtree::from_bytes(&bytes, Compression::Gzip)?;
//!
//! assert_eq!(name, "");
//! assert_eq!(value.as_compound(), Some(&level));
//! assert_eq!(level.get_as_long("DataVersion"), Some(3465));
//! assert_eq!(level.get_long("DataVersion"), None);
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

pub mod compression;
pub mod error;
pub mod read;
pub mod write;

mod arrays;
mod value;

pub use arrays::*;
pub use compression::Compression;
pub use read::{ReadOpts, Reader};
pub use value::*;
pub use write::{WriteOpts, Writer};

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag. This does not carry the value or the name of the data, it is
/// the kind of a value and the single byte that identifies that kind on the
/// wire.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object. Never carries data.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other values, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

// Crates exist to generate this code for us, but the tags will very rarely
// change so it isn't a massive burden to write out.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
            Tag::LongArray => 12,
        }
    }
}

impl Tag {
    /// Whether values of this tag can be read through the widening getters.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Tag::Byte | Tag::Short | Tag::Int | Tag::Long | Tag::Float | Tag::Double
        )
    }
}

/// Serialize `value` under the root `name` into a new buffer.
pub fn to_bytes(name: &str, value: &Value, compression: Compression) -> error::Result<Vec<u8>> {
    to_writer(Vec::new(), name, value, compression)
}

/// Serialize `value` under the root `name` into `writer`, returning the
/// writer once the compression framing is complete.
pub fn to_writer<W: Write>(
    writer: W,
    name: &str,
    value: &Value,
    compression: Compression,
) -> error::Result<W> {
    let mut writer = Writer::new(writer, compression);
    writer.write_named(name, value)?;
    writer.finish()
}

/// Read a single named root value from `input`.
pub fn from_bytes(input: &[u8], compression: Compression) -> error::Result<(String, Value)> {
    from_reader(input, compression)
}

/// Read a single named root value from `reader`.
pub fn from_reader<R: Read>(reader: R, compression: Compression) -> error::Result<(String, Value)> {
    Reader::new(reader, compression).read_named()
}
