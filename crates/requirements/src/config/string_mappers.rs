//! Pluggable rendering of values inside failure messages.
//!
//! Values are rendered through their `Debug` implementation unless a mapper
//! has been registered for their type. Mappers are keyed by
//! [`std::any::type_name`], so registering a mapper for `String` does not
//! affect `&str`.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Renders a value as a string.
pub type StringMapper = Arc<dyn Fn(&dyn fmt::Debug) -> String + Send + Sync>;

/// An immutable set of string mappers.
#[derive(Clone, Default)]
pub struct StringMappers {
    mappers: Arc<IndexMap<&'static str, StringMapper>>,
}

impl StringMappers {
    /// Renders `value` using the mapper registered for `T`, or `Debug`.
    pub fn to_string<T: fmt::Debug>(&self, value: &T) -> String {
        match self.mappers.get(type_name::<T>()) {
            Some(mapper) => mapper(value),
            None => format!("{value:?}"),
        }
    }

    /// Returns true if no mapper is registered.
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Returns a mutable copy of these mappers.
    pub fn to_mutable(&self) -> MutableStringMappers {
        MutableStringMappers {
            mappers: (*self.mappers).clone(),
        }
    }
}

impl PartialEq for StringMappers {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.mappers, &other.mappers) {
            return true;
        }
        self.mappers.len() == other.mappers.len()
            && self
                .mappers
                .iter()
                .all(|(key, mapper)| other.mappers.get(key).is_some_and(|m| Arc::ptr_eq(m, mapper)))
    }
}

impl Eq for StringMappers {}

impl fmt::Debug for StringMappers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.mappers.keys()).finish()
    }
}

/// A staged, mutable set of string mappers.
///
/// Obtained from [`ConfigurationUpdater::string_mappers`]; changes are
/// published when the updater is closed.
///
/// [`ConfigurationUpdater::string_mappers`]: crate::ConfigurationUpdater::string_mappers
#[derive(Clone, Default)]
pub struct MutableStringMappers {
    mappers: IndexMap<&'static str, StringMapper>,
}

impl MutableStringMappers {
    /// Registers the mapper used to render values of type `T`.
    pub fn put<T, F>(&mut self, mapper: F) -> &mut Self
    where
        T: ?Sized,
        F: Fn(&dyn fmt::Debug) -> String + Send + Sync + 'static,
    {
        self.mappers.insert(type_name::<T>(), Arc::new(mapper));
        self
    }

    /// Removes the mapper registered for `T`, if any.
    pub fn remove<T: ?Sized>(&mut self) -> &mut Self {
        self.mappers.shift_remove(type_name::<T>());
        self
    }

    /// Returns true if a mapper is registered for `T`.
    pub fn contains<T: ?Sized>(&self) -> bool {
        self.mappers.contains_key(type_name::<T>())
    }

    /// Freezes the staged mappers.
    pub fn to_immutable(&self) -> StringMappers {
        StringMappers {
            mappers: Arc::new(self.mappers.clone()),
        }
    }
}

impl fmt::Debug for MutableStringMappers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.mappers.keys()).finish()
    }
}
