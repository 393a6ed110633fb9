//! The command tree: node storage, parent/child linkage, registration and
//! lookup.
//!
//! Nodes live in an arena owned by [`CommandTree`] and are addressed through
//! [`NodeId`] handles. Each node owns the ids of its children; the parent link
//! is a plain id used for detaching and cycle checks.

use std::fmt::{Debug, Display, Formatter};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::handler::Handler;
use crate::labels::{CommandPath, Labels};

/// Handle to a node of a [`CommandTree`].
///
/// Ids are never reused, so the handle of a removed node stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl Display for NodeId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

struct Node<S> {
    labels: Labels,
    handler: Option<Handler<S>>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<S> Node<S> {
    fn new(labels: Labels, handler: Option<Handler<S>>) -> Self {
        Self {
            labels,
            handler,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A tree of commands and subcommands routing input lines to handlers.
///
/// `S` is the sender context handed through to handlers untouched.
///
/// ```
/// use command_tree_core::handler::handler_fn;
/// use command_tree_core::tree::CommandTree;
///
/// let mut tree = CommandTree::<()>::named("economy")?;
/// let give = tree.register(handler_fn(|_, label, args| label == "give" && args.len() == 2), "give|g")?;
///
/// assert_eq!(tree.get("G"), Some(give));
/// let args = ["give".to_string(), "Steve".to_string(), "100".to_string()];
/// assert!(tree.dispatch(&(), "economy", &args));
/// # Ok::<(), command_tree_core::error::Error>(())
/// ```
pub struct CommandTree<S> {
    nodes: Vec<Option<Node<S>>>,
    root: NodeId,
}

impl<S> CommandTree<S> {
    #[must_use]
    pub fn new(root_labels: Labels) -> Self {
        Self {
            nodes: vec![Some(Node::new(root_labels, None))],
            root: NodeId(0),
        }
    }

    #[must_use]
    pub fn with_handler(root_labels: Labels, handler: Handler<S>) -> Self {
        Self {
            nodes: vec![Some(Node::new(root_labels, Some(handler)))],
            root: NodeId(0),
        }
    }

    /// Creates a tree whose root is known by a single label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `label` is not a valid alias.
    pub fn named(label: &str) -> Result<Self> {
        Ok(Self::new(Labels::new([label])?))
    }

    fn get_node(&self, id: NodeId) -> Option<&Node<S>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node(&self, id: NodeId) -> Result<&Node<S>> {
        self.get_node(id).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<S>> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownNode(id))
    }

    fn alloc(&mut self, node: Node<S>) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Number of live nodes, detached ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    #[must_use]
    pub fn labels(&self, id: NodeId) -> Option<&Labels> {
        self.get_node(id).map(|node| &node.labels)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|node| node.parent)
    }

    /// Children of `id` in insertion order; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get_node(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    #[must_use]
    pub fn handler(&self, id: NodeId) -> Option<&Handler<S>> {
        self.get_node(id).and_then(|node| node.handler.as_ref())
    }

    /// Replaces the handler of `id`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not part of this tree.
    pub fn set_handler(&mut self, id: NodeId, handler: Handler<S>) -> Result<Option<Handler<S>>> {
        Ok(self.node_mut(id)?.handler.replace(handler))
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not part of this tree.
    pub fn take_handler(&mut self, id: NodeId) -> Result<Option<Handler<S>>> {
        Ok(self.node_mut(id)?.handler.take())
    }

    /// Iterates over the ancestors of `id`, closest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|current| current == ancestor)
    }

    #[must_use]
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.contains(id).then(|| self.ancestors(id).count())
    }

    /// Canonical labels leading from the topmost ancestor of `id` down to `id`.
    ///
    /// The topmost ancestor itself is left out, so for an attached node the
    /// result is the path [`CommandTree::child_by_path`] resolves from the
    /// root. The root maps to an empty path.
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> Option<Vec<&str>> {
        self.get_node(id)?;

        let mut path: Vec<&str> = std::iter::once(id)
            .chain(self.ancestors(id))
            .filter(|&current| self.parent(current).is_some())
            .filter_map(|current| self.labels(current).map(Labels::canonical))
            .collect();
        path.reverse();

        Some(path)
    }

    /// Creates a node that is not attached anywhere yet.
    pub fn create_node(&mut self, labels: Labels, handler: Option<Handler<S>>) -> NodeId {
        self.alloc(Node::new(labels, handler))
    }

    /// The first alias of `labels` already used by a child of `parent`,
    /// ignoring the child `except`.
    fn sibling_conflict(
        &self,
        parent: NodeId,
        labels: &Labels,
        except: Option<NodeId>,
    ) -> Option<String> {
        self.children(parent)
            .iter()
            .filter(|&&child| Some(child) != except)
            .filter_map(|&child| self.labels(child))
            .find_map(|sibling| labels.shared_alias(sibling))
            .map(ToString::to_string)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };

        if let Some(parent) = self.nodes.get_mut(parent.0).and_then(Option::as_mut) {
            parent.children.retain(|&child| child != id);
        }
        if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::as_mut) {
            node.parent = None;
        }
    }

    fn attach(&mut self, id: NodeId, parent: NodeId) -> Result<()> {
        self.node_mut(parent)?.children.push(id);
        self.node_mut(id)?.parent = Some(parent);
        Ok(())
    }

    /// Moves `id` under `new_parent`, or detaches it when `new_parent` is `None`.
    ///
    /// The node leaves its former parent before joining the new one, so it is
    /// never listed twice. Moving a node under its current parent is a no-op.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownNode`] if either id is not part of this tree
    /// - [`Error::InvalidOperation`] if `id` is the root, or if `new_parent`
    ///   is `id` itself or one of its descendants
    /// - [`Error::DuplicateAlias`] if an alias of `id` is taken by a child of
    ///   `new_parent`
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        let current_parent = self.node(id)?.parent;

        if id == self.root {
            return Err(Error::invalid_operation(
                "the root command cannot be re-parented",
            ));
        }

        let Some(new_parent) = new_parent else {
            debug!("Detaching command node {id}");
            self.detach(id);
            return Ok(());
        };

        self.node(new_parent)?;

        if new_parent == id || self.is_ancestor(id, new_parent) {
            return Err(Error::invalid_operation(format!(
                "moving {id} under {new_parent} would create a cycle"
            )));
        }

        if current_parent == Some(new_parent) {
            return Ok(());
        }

        if let Some(alias) = self.sibling_conflict(new_parent, &self.node(id)?.labels, Some(id)) {
            return Err(Error::duplicate_alias(alias));
        }

        debug!("Moving command node {id} under {new_parent}");
        self.detach(id);
        self.attach(id, new_parent)
    }

    /// Replaces the aliases of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAlias`] if one of the new aliases is used by a
    /// sibling, or [`Error::UnknownNode`] for an unknown id.
    pub fn relabel(&mut self, id: NodeId, labels: Labels) -> Result<()> {
        if let Some(parent) = self.node(id)?.parent {
            if let Some(alias) = self.sibling_conflict(parent, &labels, Some(id)) {
                return Err(Error::duplicate_alias(alias));
            }
        }

        self.node_mut(id)?.labels = labels;
        Ok(())
    }

    /// Removes `id` and its whole subtree, returning how many nodes were freed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] for the root and
    /// [`Error::UnknownNode`] for an unknown id.
    pub fn remove(&mut self, id: NodeId) -> Result<usize> {
        self.node(id)?;
        if id == self.root {
            return Err(Error::invalid_operation("the root command cannot be removed"));
        }

        self.detach(id);

        let mut removed = 0;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                pending.extend(node.children);
                removed += 1;
            }
        }

        debug!("Removed {removed} command node(s) starting at {id}");
        Ok(removed)
    }

    /// The single child of `id` sharing an alias with `segment`.
    fn matching_child(&self, id: NodeId, segment: &Labels) -> Result<Option<NodeId>> {
        let mut found = None;

        for &child in &self.node(id)?.children {
            let Some(labels) = self.labels(child) else {
                continue;
            };
            if let Some(alias) = segment.shared_alias(labels) {
                if found.is_some() {
                    // The segment straddles two siblings.
                    return Err(Error::duplicate_alias(alias));
                }
                found = Some(child);
            }
        }

        Ok(found)
    }

    /// Registers `handler` at `path` below the root.
    ///
    /// # Errors
    ///
    /// See [`CommandTree::add_at`].
    pub fn add(&mut self, handler: Handler<S>, path: &CommandPath) -> Result<NodeId> {
        self.add_at(self.root, handler, path)
    }

    /// Parses `structure` (see [`CommandPath::parse`]) and registers `handler`
    /// there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a malformed structure, otherwise
    /// see [`CommandTree::add_at`].
    pub fn register(&mut self, handler: Handler<S>, structure: &str) -> Result<NodeId> {
        let path = CommandPath::parse(structure)?;
        self.add(handler, &path)
    }

    /// Registers `handler` at `path` below `id`, creating any missing
    /// intermediate nodes without handlers.
    ///
    /// An existing node is reused when it shares at least one alias with the
    /// segment; the segment's other aliases are not merged into it. The tree
    /// is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateCommand`] if the node at `path` already has a handler
    /// - [`Error::DuplicateAlias`] if a segment matches more than one sibling
    /// - [`Error::UnknownNode`] if `id` is not part of this tree
    pub fn add_at(&mut self, id: NodeId, handler: Handler<S>, path: &CommandPath) -> Result<NodeId> {
        let segments = path.segments();
        let mut current = id;
        let mut matched = 0;

        while let Some(segment) = segments.get(matched) {
            let Some(child) = self.matching_child(current, segment)? else {
                break;
            };

            let labels = self.node(child)?.labels.clone();
            if segment.iter().any(|alias| !labels.matches(alias)) {
                warn!("Aliases of `{segment}` are not merged into existing command `{labels}`");
            }

            current = child;
            matched += 1;
        }

        if matched == segments.len() {
            let node = self.node_mut(current)?;
            if node.handler.is_some() {
                let label = segments
                    .last()
                    .and_then(|segment| segment.shared_alias(&node.labels))
                    .unwrap_or_else(|| node.labels.canonical())
                    .to_string();
                return Err(Error::duplicate_command(label));
            }

            node.handler = Some(handler);
            debug!("Registered handler at existing command `{path}`");
            return Ok(current);
        }

        let mut handler = Some(handler);
        for (offset, segment) in segments[matched..].iter().enumerate() {
            let is_last = matched + offset + 1 == segments.len();
            let handler = if is_last { handler.take() } else { None };
            let child = self.alloc(Node::new(segment.clone(), handler));
            self.attach(child, current)?;
            current = child;
        }

        debug!("Registered handler at new command `{path}`");
        Ok(current)
    }

    /// The child of `id` answering to `label`.
    #[must_use]
    pub fn child(&self, id: NodeId, label: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.labels(child).is_some_and(|labels| labels.matches(label)))
    }

    /// Follows `labels` one level at a time starting below `id`.
    ///
    /// Returns `None` for an empty label list or as soon as a level does not
    /// match.
    pub fn child_by_path<I, T>(&self, id: NodeId, labels: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut labels = labels.into_iter().peekable();
        labels.peek()?;

        let mut current = id;
        for label in labels {
            current = self.child(current, label.as_ref())?;
        }

        Some(current)
    }

    /// Looks for `label` among the children of `id` and, when `deep` is set
    /// and no child matches, through each child's subtree in pre-order.
    #[must_use]
    pub fn find(&self, id: NodeId, label: &str, deep: bool) -> Option<NodeId> {
        if let Some(child) = self.child(id, label) {
            return Some(child);
        }

        if !deep {
            return None;
        }

        self.children(id)
            .iter()
            .find_map(|&child| self.find(child, label, true))
    }

    /// Looks up a space-separated structure such as `"economy give"` from the
    /// root.
    #[must_use]
    pub fn get(&self, structure: &str) -> Option<NodeId> {
        self.child_by_path(self.root, structure.split_whitespace())
    }

    /// Like [`CommandTree::get`], for callers that treat a missing command as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchChild`] if nothing is registered at `structure`.
    pub fn resolve(&self, structure: &str) -> Result<NodeId> {
        self.get(structure)
            .ok_or_else(|| Error::NoSuchChild(structure.to_string()))
    }
}

impl<S> Debug for CommandTree<S> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CommandTree")
            .field("root", &self.root)
            .field("nodes", &self.node_count())
            .finish()
    }
}
