use std::ops::Deref;

use serde::Serialize;

use crate::Tag;

// The three array types only differ by element type and tag, so they are
// stamped out from one definition. None of them hand out mutable access, a
// different array has to be built instead.
macro_rules! nbt_array {
    ($(#[$meta:meta])* $name:ident, $elem:ty, $tag:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
        pub struct $name {
            data: Vec<$elem>,
        }

        impl $name {
            pub fn new(data: Vec<$elem>) -> Self {
                Self { data }
            }

            /// The tag values of this array are written under.
            pub const TAG: Tag = $tag;

            pub fn len(&self) -> usize {
                self.data.len()
            }

            pub fn is_empty(&self) -> bool {
                self.data.is_empty()
            }

            pub fn get(&self, index: usize) -> Option<$elem> {
                self.data.get(index).copied()
            }

            pub fn as_slice(&self) -> &[$elem] {
                &self.data
            }

            pub fn into_inner(self) -> Vec<$elem> {
                self.data
            }
        }

        impl Deref for $name {
            type Target = [$elem];

            fn deref(&self) -> &Self::Target {
                &self.data
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(data: Vec<$elem>) -> Self {
                Self::new(data)
            }
        }

        impl From<&[$elem]> for $name {
            fn from(data: &[$elem]) -> Self {
                Self::new(data.to_vec())
            }
        }

        impl<const N: usize> From<[$elem; N]> for $name {
            fn from(data: [$elem; N]) -> Self {
                Self::new(data.to_vec())
            }
        }

        impl FromIterator<$elem> for $name {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                Self::new(iter.into_iter().collect())
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $elem;
            type IntoIter = std::slice::Iter<'a, $elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.data.iter()
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(self.data.iter())
            }
        }
    };
}

nbt_array!(
    /// Payload of an NBT ByteArray, a sequence of i8.
    ByteArray,
    i8,
    Tag::ByteArray
);

nbt_array!(
    /// Payload of an NBT IntArray, a sequence of i32.
    IntArray,
    i32,
    Tag::IntArray
);

nbt_array!(
    /// Payload of an NBT LongArray, a sequence of i64.
    LongArray,
    i64,
    Tag::LongArray
);
