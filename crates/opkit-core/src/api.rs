//! The API aggregator: composes handlers into one merged operation
//! collection.

use std::collections::HashMap;
use std::fmt;

use crate::handler::Handler;
use crate::operation::Operations;

/// Owns a set of handlers and exposes the merge of their operations.
///
/// Handlers iterate in registration order, tracked by an explicit order
/// list next to the map so the merged surface (and therefore CLI output)
/// is reproducible.
#[derive(Default)]
pub struct Api {
    handlers: HashMap<String, Box<dyn Handler>>,
    order: Vec<String>,
}

impl Api {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler by its id. Re-registering an id overwrites the
    /// previous handler in place (last wins, warned), keeping its
    /// position in the registration order. Always succeeds.
    pub fn add_handler(&mut self, handler: Box<dyn Handler>) -> bool {
        let id = handler.id().to_string();
        if self.handlers.insert(id.clone(), handler).is_some() {
            tracing::warn!(%id, "handler overwritten by a later registration");
        } else {
            self.order.push(id);
        }
        true
    }

    pub fn handler(&self, id: &str) -> Option<&dyn Handler> {
        self.handlers.get(id).map(|h| h.as_ref())
    }

    /// True iff at least one handler is registered. Necessary but not
    /// sufficient: individual handlers and operations are not validated.
    pub fn validate(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// Merge every handler's operations in registration order.
    ///
    /// Recomputed on each call — handlers may build their collections
    /// lazily, so nothing is cached here.
    pub fn operations(&self) -> Operations {
        let mut merged = Operations::new();
        for id in &self.order {
            if let Some(handler) = self.handlers.get(id) {
                merged.merge(handler.operations());
            }
        }
        merged
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api").field("handlers", &self.order).finish()
    }
}
