//! Handlers: named providers of operation collections.

use crate::operation::Operations;

/// A named provider that contributes one collection of operations.
///
/// Handlers are purely a naming and composition unit; any state an
/// operation needs is captured when the handler constructs it.
/// `operations` builds a fresh collection on each call, so a handler may
/// compute its contribution lazily.
pub trait Handler: Send {
    fn id(&self) -> &str;

    fn operations(&self) -> Operations;
}
