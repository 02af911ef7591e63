use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ByteArray, IntArray, List, LongArray, Numeric, Value};

/// An immutable mapping of names to values.
///
/// Entries keep the order they were inserted in, which is also the order they
/// are written in. Equality does not depend on that order.
///
/// Deriving a compound with [`with_entries`](Compound::with_entries) or
/// [`with_removed_keys`](Compound::with_removed_keys) never affects the
/// compound it was derived from:
///
/// ```
/// # use nbtree::Compound;
/// let c = Compound::builder().put("a", "value").build();
/// let removed = c.with_removed_keys(["a"]);
///
/// assert_eq!(removed.len(), 0);
/// assert_eq!(c.get_string("a"), Some("value"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    entries: Arc<IndexMap<String, Value>>,
}

/// Staging area for a [`Compound`]. Entries can be added and replaced freely
/// until [`build`](CompoundBuilder::build) freezes them.
#[derive(Debug, Clone, Default)]
pub struct CompoundBuilder {
    entries: IndexMap<String, Value>,
}

impl CompoundBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous value under the same key.
    pub fn put(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Same as [`put`](CompoundBuilder::put) for use behind a `&mut`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> Compound {
        Compound {
            entries: Arc::new(self.entries),
        }
    }
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CompoundBuilder {
        CompoundBuilder::new()
    }

    /// Build a compound by filling in a staging map.
    ///
    /// ```
    /// # use nbtree::Compound;
    /// let c = Compound::build(|map| {
    ///     map.insert("a", 1i8);
    ///     map.insert("b", "two");
    /// });
    /// assert_eq!(c.len(), 2);
    /// ```
    pub fn build<F>(f: F) -> Self
    where
        F: FnOnce(&mut CompoundBuilder),
    {
        let mut builder = CompoundBuilder::new();
        f(&mut builder);
        builder.build()
    }

    /// A builder pre-filled with the entries of this compound.
    pub fn to_builder(&self) -> CompoundBuilder {
        CompoundBuilder {
            entries: (*self.entries).clone(),
        }
    }

    /// A new compound with the given entries added. Existing keys are
    /// overwritten in place, new keys go at the end.
    pub fn with_entries<I, K, V>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return self.clone();
        }

        let mut builder = self.to_builder();
        for (k, v) in entries {
            builder.insert(k, v);
        }
        builder.build()
    }

    /// A new compound without the given keys. Keys that are not present are
    /// ignored.
    pub fn with_removed_keys<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut builder: Option<CompoundBuilder> = None;
        for key in keys {
            let key = key.as_ref();
            if !self.entries.contains_key(key) {
                continue;
            }
            builder.get_or_insert_with(|| self.to_builder()).remove(key);
        }

        match builder {
            Some(builder) => builder.build(),
            None => self.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read any numeric entry as `T`. See [`Numeric`] for how values are
    /// converted.
    pub fn get_as<T: Numeric>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.as_number())
    }

    /// A Byte entry read as a boolean, anything but zero is true.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_byte(key).map(|b| b != 0)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_byte_array(&self, key: &str) -> Option<&ByteArray> {
        match self.get(key)? {
            Value::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_int_array(&self, key: &str) -> Option<&IntArray> {
        match self.get(key)? {
            Value::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_long_array(&self, key: &str) -> Option<&LongArray> {
        match self.get(key)? {
            Value::LongArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&List> {
        match self.get(key)? {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_compound(&self, key: &str) -> Option<&Compound> {
        match self.get(key)? {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }
}

// Exact getters only match their own kind, the get_as_ ones accept any number.
macro_rules! numeric_getters {
    ($($exact:ident, $widen:ident, $variant:ident, $ty:ty;)*) => {
        impl Compound {
            $(
                pub fn $exact(&self, key: &str) -> Option<$ty> {
                    match self.get(key)? {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }

                pub fn $widen(&self, key: &str) -> Option<$ty> {
                    self.get_as::<$ty>(key)
                }
            )*
        }
    };
}

numeric_getters! {
    get_byte, get_as_byte, Byte, i8;
    get_short, get_as_short, Short, i16;
    get_int, get_as_int, Int, i32;
    get_long, get_as_long, Long, i64;
    get_float, get_as_float, Float, f32;
    get_double, get_as_double, Double, f64;
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = CompoundBuilder::new();
        for (k, v) in iter {
            builder.insert(k, v);
        }
        builder.build()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
