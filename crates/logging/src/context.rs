//! crates/logging/src/context.rs
//! Immutable request-scoped contexts and the logger bound to them.
//!
//! A [`Context`] is a chain of values keyed by type. Deriving a child never
//! touches the parent, so a context can be handed to other threads and
//! extended independently by each of them. The logger binding uses a key type
//! private to this module, so no other code can read or shadow it.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::global;
use crate::logger::Logger;

/// Name of the logger returned when a context carries no binding.
pub const UNKNOWN_CONTEXT: &str = "Unknown-Context";

/// An immutable chain of type-keyed values.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

struct Node {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A child context carrying `value` under the key type `K`.
    #[must_use]
    pub fn with_value<K: 'static>(&self, value: impl Any + Send + Sync) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// The nearest value stored under `K`, if it has type `V`.
    #[must_use]
    pub fn value<K: 'static, V: Any>(&self) -> Option<&V> {
        let key = TypeId::of::<K>();
        self.nodes()
            .find(|node| node.key == key)
            .and_then(|node| node.value.downcast_ref::<V>())
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.nodes().count())
            .finish()
    }
}

struct LoggerKey;

impl Logger {
    /// A child of `context` carrying this logger.
    #[must_use]
    pub fn with_context(&self, context: &Context) -> Context {
        context.with_value::<LoggerKey>(self.clone())
    }
}

/// A child of `context` carrying the currently installed global logger.
#[must_use]
pub fn with_context(context: &Context) -> Context {
    global::logger().with_context(context)
}

/// The logger bound nearest to `context`.
///
/// A missing context or a context without a binding yields the global logger
/// named [`UNKNOWN_CONTEXT`].
#[must_use]
pub fn from_context(context: Option<&Context>) -> Logger {
    context
        .and_then(|context| context.value::<LoggerKey, Logger>())
        .cloned()
        .unwrap_or_else(|| global::with_name(UNKNOWN_CONTEXT))
}
