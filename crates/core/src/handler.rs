use std::sync::Arc;

/// The callback attached to a command node.
///
/// `sender` is whatever the host uses to identify who issued the command,
/// `label` is the token that matched the node and `args` are the tokens left
/// over after path matching. The return value tells the host whether the
/// command was handled.
pub trait CommandHandler<S>: Send + Sync {
    fn invoke(&self, sender: &S, label: &str, args: &[String]) -> bool;
}

impl<S, F> CommandHandler<S> for F
where
    F: Fn(&S, &str, &[String]) -> bool + Send + Sync,
{
    fn invoke(&self, sender: &S, label: &str, args: &[String]) -> bool {
        self(sender, label, args)
    }
}

/// Shared, type-erased handler as stored in the tree.
pub type Handler<S> = Arc<dyn CommandHandler<S>>;

/// Wraps a closure as a [`Handler`].
///
/// ```
/// use command_tree_core::handler::{handler_fn, CommandHandler};
///
/// let greet = handler_fn(|sender: &String, _label, args| {
///     println!("{sender} said {}", args.join(" "));
///     true
/// });
/// assert!(greet.invoke(&"steve".to_string(), "say", &["hi".to_string()]));
/// ```
pub fn handler_fn<S, F>(handler: F) -> Handler<S>
where
    F: Fn(&S, &str, &[String]) -> bool + Send + Sync + 'static,
{
    Arc::new(handler)
}
