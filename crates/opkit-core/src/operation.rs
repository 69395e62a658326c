//! Operations: identified, describable units of work, and the ordered
//! collections that hold them.

use std::collections::HashMap;
use std::fmt;

use crate::collection::PropertyCollection;
use crate::property::Audience;
use crate::result::OperationResult;

/// An identified, described, parameterized unit of work with an
/// asynchronous execution contract.
///
/// Ids are hierarchical and dot-separated: the first segment is the
/// command category, the last is its short alias (`users.list` belongs
/// to category `users` and answers to `list`).
///
/// One instance serves at most one in-flight execution — `exec` takes
/// `&mut self`, so the borrow checker enforces this; callers that need
/// concurrent runs obtain fresh instances from the owning handler.
pub trait Operation: Send {
    fn id(&self) -> &str;

    /// Short human label.
    fn label(&self) -> &str;

    /// One-line human description, used as command help text.
    fn description(&self) -> &str;

    /// Whether the operation is part of the user-facing surface or only
    /// reachable in internal mode.
    fn usage(&self) -> Audience;

    /// The live schema and current values — callers configure inputs by
    /// mutating the collection returned by [`Operation::properties_mut`]
    /// before calling `exec`, and read outputs back after the result
    /// completes.
    fn properties(&self) -> &PropertyCollection;

    fn properties_mut(&mut self) -> &mut PropertyCollection;

    /// Begin execution and return immediately with a result whose
    /// completion signal fires when the work finishes.
    fn exec(&mut self) -> OperationResult;

    /// The id segment before the first `.`.
    fn category(&self) -> &str {
        match self.id().split_once('.') {
            Some((category, _)) => category,
            None => self.id(),
        }
    }

    /// The id segment after the last `.`.
    fn alias(&self) -> &str {
        match self.id().rsplit_once('.') {
            Some((_, alias)) => alias,
            None => self.id(),
        }
    }
}

/// An ordered, mergeable set of operations, keyed by id.
///
/// Ids live in a map but iterate in insertion/merge order; the explicit
/// order list keeps enumeration deterministic regardless of map
/// internals.
#[derive(Default)]
pub struct Operations {
    entries: HashMap<String, Box<dyn Operation>>,
    order: Vec<String>,
}

impl Operations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an operation. An id that already exists is overwritten in
    /// place — last registration wins — with a warning naming the id;
    /// the id keeps its original position in the order.
    pub fn add(&mut self, operation: Box<dyn Operation>) {
        let id = operation.id().to_string();
        if self.entries.insert(id.clone(), operation).is_some() {
            tracing::warn!(%id, "operation overwritten by a later registration");
        } else {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&dyn Operation> {
        self.entries.get(id).map(|op| op.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut dyn Operation> {
        // Unsize at a typed position; mapping through a closure cannot
        // shorten the trait-object lifetime behind &mut.
        match self.entries.get_mut(id) {
            Some(op) => Some(op.as_mut()),
            None => None,
        }
    }

    /// Operation ids in insertion/merge order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Operation> {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// Merge another collection into this one: every id from `other` is
    /// inserted or overwritten. Previously-existing ids keep their
    /// original relative order; newly introduced ids append in `other`'s
    /// order. Overwrites follow the same last-wins-with-warning policy
    /// as [`Operations::add`].
    pub fn merge(&mut self, other: Operations) {
        let Operations {
            mut entries,
            order,
        } = other;
        for id in order {
            if let Some(operation) = entries.remove(&id) {
                self.add(operation);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for Operations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operations")
            .field("order", &self.order)
            .finish()
    }
}
