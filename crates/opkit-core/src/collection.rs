//! Ordered property collections.
//!
//! Properties live in a map keyed by id, but callers (the CLI binder in
//! particular) need a reproducible order for help text, flag listings and
//! report fields. The map is therefore paired with an explicit
//! insertion-order key list; every mutation keeps the two in step.

use std::collections::HashMap;

use crate::errors::PropertyError;
use crate::property::{Property, Value};

/// An ordered, mutable set of properties, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PropertyCollection {
    entries: HashMap<String, Property>,
    order: Vec<String>,
}

impl PropertyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property. Adding an id that already exists replaces the
    /// property in place, keeping its original position.
    pub fn add(&mut self, property: Property) {
        let id = property.id().to_string();
        if self.entries.insert(id.clone(), property).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Property> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Property> {
        self.entries.get_mut(id)
    }

    /// Assign a value into the named property, validating its type tag.
    pub fn set(&mut self, id: &str, value: Value) -> Result<(), PropertyError> {
        match self.entries.get_mut(id) {
            Some(property) => property.set(value),
            None => Err(PropertyError::UnknownProperty(id.to_string())),
        }
    }

    /// Property ids in insertion order. Stable across calls absent
    /// mutation.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
