use std::sync::Arc;

use crate::error::{Error, Result};
use crate::{Tag, Value};

/// An immutable, ordered sequence of values that all share one tag.
///
/// The element tag is fixed when the list is made, even for an empty list.
/// Empty lists read from the wire are often tagged [`Tag::End`].
///
/// ```
/// # use nbtree::{List, Tag, Value};
/// let list = List::new(Tag::String, vec!["A".into(), "B".into()]).unwrap();
/// assert_eq!(list.get(1), Some(&Value::from("B")));
///
/// assert!(List::new(Tag::String, vec![Value::Int(1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    element_tag: Tag,
    items: Arc<[Value]>,
}

impl List {
    /// Create a list of `element_tag` values. Fails if any item has a
    /// different tag.
    pub fn new(element_tag: Tag, items: Vec<Value>) -> Result<Self> {
        if let Some(bad) = items.iter().find(|v| v.tag() != element_tag) {
            return Err(Error::tag_mismatch(element_tag, bad.tag()));
        }

        Ok(Self {
            element_tag,
            items: items.into(),
        })
    }

    pub fn empty(element_tag: Tag) -> Self {
        Self {
            element_tag,
            items: Arc::new([]),
        }
    }

    /// Create a list tagged with the tag of the first item, or End if there
    /// are none.
    pub fn from_values(items: Vec<Value>) -> Result<Self> {
        let tag = items.first().map_or(Tag::End, Value::tag);
        Self::new(tag, items)
    }

    /// A new list with `value` on the end. This list is left as it is.
    pub fn with_element(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        let mut items = self.items.to_vec();
        items.push(value);

        // An empty End list takes on the tag of its first element.
        let tag = match self.element_tag {
            Tag::End if self.items.is_empty() => items[0].tag(),
            tag => tag,
        };
        Self::new(tag, items)
    }

    pub fn element_tag(&self) -> Tag {
        self.element_tag
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
