//! A command tree that can be registered into and dispatched from several
//! threads at once.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::handler::{CommandHandler, Handler};
use crate::labels::CommandPath;
use crate::tree::{CommandTree, NodeId};

/// Cloneable handle to a [`CommandTree`] behind a single lock.
///
/// Registration and routing both take the lock. Handlers run after it has
/// been released, so a handler may register further commands on the same
/// tree.
pub struct SharedCommandTree<S> {
    inner: Arc<Mutex<CommandTree<S>>>,
}

impl<S> Clone for SharedCommandTree<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> From<CommandTree<S>> for SharedCommandTree<S> {
    fn from(tree: CommandTree<S>) -> Self {
        Self::new(tree)
    }
}

impl<S> SharedCommandTree<S> {
    #[must_use]
    pub fn new(tree: CommandTree<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    /// Runs `f` with shared access to the tree while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&CommandTree<S>) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access to the tree while holding the lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut CommandTree<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// # Errors
    ///
    /// See [`CommandTree::add`].
    pub fn add(&self, handler: Handler<S>, path: &CommandPath) -> Result<NodeId> {
        self.inner.lock().add(handler, path)
    }

    /// # Errors
    ///
    /// See [`CommandTree::register`].
    pub fn register(&self, handler: Handler<S>, structure: &str) -> Result<NodeId> {
        self.inner.lock().register(handler, structure)
    }

    /// Routes under the lock, then invokes the handler reached without it.
    pub fn dispatch(&self, sender: &S, label: &str, args: &[String]) -> bool {
        let route = self.inner.lock().route(label, args);
        route.invoke(sender)
    }
}

impl<S> CommandHandler<S> for SharedCommandTree<S> {
    fn invoke(&self, sender: &S, label: &str, args: &[String]) -> bool {
        self.dispatch(sender, label, args)
    }
}
