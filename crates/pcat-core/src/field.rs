//! Tri-state document field: missing key, explicit `null`, or a value.
//!
//! Catalog files are edited by hand and by other tools, which write empty
//! inputs as `null` and omit keys they do not know about. Keeping the two
//! apart lets an untouched record serialize back exactly as it was read.
//! Pair every use with `#[serde(default, skip_serializing_if = "Field::is_absent")]`.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    /// The key is not present in the document.
    #[default]
    Absent,
    /// The key is present with a `null` value.
    Null,
    Value(T),
}

impl<T> Field<T> {
    /// Maps `None` to an explicit `null`.
    pub fn nullable(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` for both a missing key and `null`.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        !matches!(self, Self::Value(_))
    }

    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn set(&mut self, value: T) {
        *self = Self::Value(value);
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T: Copy> Field<T> {
    #[must_use]
    pub fn copied(&self) -> Option<T> {
        self.get().copied()
    }
}

impl Field<String> {
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.get().map(String::as_str)
    }

    /// The value, or `""` when unset.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.as_deref().unwrap_or("")
    }
}

impl<T> Field<Vec<T>> {
    /// Contents of a list field; unset reads as empty.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.get().map_or(&[], Vec::as_slice)
    }

    /// Replaces the list, leaving an unset field untouched when `items` is
    /// empty.
    pub fn replace_list(&mut self, items: Vec<T>) {
        if items.is_empty() && self.is_unset() {
            return;
        }
        self.set(items);
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::nullable)
    }
}

/// A nested record that remembers whether its key was in the document.
///
/// A section read from the file is always written back, even when empty. A
/// section the file did not have is written only once something sets a
/// value in it. Equality looks at the contents only.
#[derive(Debug, Clone, Default)]
pub struct Section<T> {
    inner: T,
    present: bool,
}

impl<T> Section<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            present: false,
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Default + PartialEq> Section<T> {
    /// `true` when the section was not read from the document and nothing
    /// has been set in it since.
    #[must_use]
    pub fn is_unwritten(&self) -> bool {
        !self.present && self.inner == T::default()
    }
}

impl<T> From<T> for Section<T> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

impl<T> Deref for Section<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for Section<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: PartialEq> PartialEq for Section<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Section<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(|inner| Self {
            inner,
            present: true,
        })
    }
}
