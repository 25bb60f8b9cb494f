use std::collections::HashMap;

use crate::api::CommandOption;
use crate::model::Matches;

type Handler<'a> = Box<dyn Fn(&Matches) + 'a>;

/// A node in the command tree.
///
/// A command with children dispatches into one of them; a command without children (a *leaf*) binds its options and invokes its handler.
/// Commands are assembled bottom-up via [`Command::add_option`] and [`Command::add_sub_command`], and then handed to a [`Dispatcher`](crate::Dispatcher).
///
/// ### Example
/// ```
/// # use cmdtree_builder as cmdtree;
/// use cmdtree::{Command, Dispatcher, Outcome};
///
/// let root = Command::new("program", "An example program.")
///     .add_sub_command(
///         Command::new("sub", "An example sub-command.")
///             .add_option("path", "The path to use.", true, ["-p", "--path"])
///             .handler(|matches| {
///                 println!("path: {}", matches.get("path").unwrap());
///             }),
///     );
///
/// let outcome = Dispatcher::new(root)
///     .parse_tokens(&["program", "sub", "--path", "/x"])
///     .unwrap();
/// assert!(matches!(outcome, Outcome::Executed(_)));
/// ```
pub struct Command<'a> {
    name: String,
    description: String,
    options: HashMap<String, CommandOption>,
    children: HashMap<String, Command<'a>>,
    parent: Option<String>,
    handler: Option<Handler<'a>>,
}

impl<'a> std::fmt::Debug for Command<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("children", &self.children)
            .field("parent", &self.parent)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

impl<'a> Command<'a> {
    /// Create a command.
    /// The `name` is the token which selects this command on the Cli.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: HashMap::default(),
            children: HashMap::default(),
            parent: None,
            handler: None,
        }
    }

    /// Attach `child` as a sub-command of this command.
    ///
    /// The child records this command as its parent.
    /// A child with the same name as an existing child replaces it.
    pub fn add_sub_command(mut self, mut child: Command<'a>) -> Self {
        child.parent.replace(self.name.clone());
        self.children.insert(child.name.clone(), child);
        self
    }

    /// Declare an option on this command.
    ///
    /// The option is triggered by any of the `flags`, and its value is found under `name` after parsing.
    /// Declaring the same `name` again replaces the previous option.
    ///
    /// ### Example
    /// ```
    /// # use cmdtree_builder as cmdtree;
    /// use cmdtree::Command;
    ///
    /// let command = Command::new("sub", "")
    ///     .add_option("path", "The path to use.", true, ["-p", "--path"])
    ///     .add_option("verbose", "Be noisy.", false, ["-v"]);
    /// assert!(command.option("path").unwrap().is_required());
    /// ```
    pub fn add_option(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        flags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let option = CommandOption::new(name, description, required, flags);
        self.options.insert(option.name().to_string(), option);
        self
    }

    /// Declare an option on this command which binds every occurrence of its flags.
    ///
    /// See [`Command::add_option`] and [`CommandOption::repeated`].
    ///
    /// ### Example
    /// ```
    /// # use cmdtree_builder as cmdtree;
    /// use cmdtree::{Command, Dispatcher, Outcome, Value};
    ///
    /// let dispatcher = Dispatcher::new(
    ///     Command::new("remove", "").add_repeated_option("name", "", true, ["-n", "--name"]),
    /// );
    ///
    /// match dispatcher.parse_tokens(&["remove", "-n", "a", "-n", "b"]).unwrap() {
    ///     Outcome::Executed(matches) => assert_eq!(matches.get("name").unwrap().values(), vec!["a", "b"]),
    ///     Outcome::Help(_) => unreachable!(),
    /// }
    /// ```
    pub fn add_repeated_option(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        flags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let option = CommandOption::new(name, description, required, flags).repeated();
        self.options.insert(option.name().to_string(), option);
        self
    }

    /// Set the handler invoked when this command is the terminal match of a parse.
    /// If repeated, only the final handler will apply.
    ///
    /// Handlers only run on leaf commands (those without sub-commands).
    pub fn handler(mut self, handler: impl Fn(&Matches) + 'a) -> Self {
        self.handler.replace(Box::new(handler));
        self
    }

    /// The name of this command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The help description of this command.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The name of the command this was attached to, if any.
    ///
    /// This is the parent's name at the time of [`Command::add_sub_command`], not a live link to the parent.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Whether this command has no sub-commands.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Get the option declared under `name`.
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.get(name)
    }

    /// Iterate over the declared options, in no particular order.
    pub fn options(&self) -> impl Iterator<Item = &CommandOption> {
        self.options.values()
    }

    /// Get the sub-command `name`.
    pub fn child(&self, name: &str) -> Option<&Command<'a>> {
        self.children.get(name)
    }

    /// Iterate over the sub-commands, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = &Command<'a>> {
        self.children.values()
    }

    pub(crate) fn invoke(&self, matches: &Matches) -> bool {
        match &self.handler {
            Some(handler) => {
                handler(matches);
                true
            }
            None => false,
        }
    }
}
