//! Routing of a label and its argument tokens to the deepest matching node.
//!
//! Starting at a node, the first remaining argument is compared against the
//! node's children. On a match the token is consumed, becomes the new label,
//! and routing continues one level down. Routing stops at the first node
//! without a matching child (or when arguments run out); that node's handler
//! receives the label and arguments that reached it. A node without a handler
//! leaves the command unhandled, there is no fallback to its ancestors.

use log::trace;

use crate::handler::{CommandHandler, Handler};
use crate::tree::{CommandTree, NodeId};

/// Where a command line ended up after matching as many tokens as possible.
pub struct Route<'a, S> {
    pub node: NodeId,
    pub label: &'a str,
    pub args: &'a [String],
    pub handler: Option<Handler<S>>,
}

impl<S> Route<'_, S> {
    /// Invokes the handler of the reached node, `false` when there is none.
    pub fn invoke(&self, sender: &S) -> bool {
        match &self.handler {
            Some(handler) => handler.invoke(sender, self.label, self.args),
            None => false,
        }
    }

    #[must_use]
    pub fn is_handled(&self) -> bool {
        self.handler.is_some()
    }
}

impl<S> CommandTree<S> {
    fn walk<'a>(&self, start: NodeId, label: &'a str, args: &'a [String]) -> Route<'a, S> {
        let mut node = start;
        let mut label = label;
        let mut args = args;

        while let Some((head, rest)) = args.split_first() {
            let Some(child) = self.child(node, head) else {
                break;
            };

            trace!("Matched `{head}` to command node {child}");
            node = child;
            label = head.as_str();
            args = rest;
        }

        trace!(
            "Routed to command node {node} with label `{label}` and {} argument(s)",
            args.len()
        );

        Route {
            node,
            label,
            args,
            handler: self.handler(node).cloned(),
        }
    }

    /// Resolves `label` and `args` from the root without invoking anything.
    pub fn route<'a>(&self, label: &'a str, args: &'a [String]) -> Route<'a, S> {
        self.walk(self.root(), label, args)
    }

    /// Resolves `label` and `args` starting at `start`; `None` if `start` is
    /// not part of this tree.
    pub fn route_from<'a>(
        &self,
        start: NodeId,
        label: &'a str,
        args: &'a [String],
    ) -> Option<Route<'a, S>> {
        self.contains(start).then(|| self.walk(start, label, args))
    }

    /// Routes a command line from the root and invokes the handler reached.
    ///
    /// Returns whatever that handler returns, or `false` if the node reached
    /// has no handler.
    pub fn dispatch(&self, sender: &S, label: &str, args: &[String]) -> bool {
        self.route(label, args).invoke(sender)
    }

    /// Like [`CommandTree::dispatch`], starting at `start` instead of the root.
    pub fn dispatch_from(&self, start: NodeId, sender: &S, label: &str, args: &[String]) -> bool {
        self.route_from(start, label, args)
            .is_some_and(|route| route.invoke(sender))
    }
}

/// A tree can itself be mounted as the handler of another tree's node.
impl<S> CommandHandler<S> for CommandTree<S> {
    fn invoke(&self, sender: &S, label: &str, args: &[String]) -> bool {
        self.dispatch(sender, label, args)
    }
}
