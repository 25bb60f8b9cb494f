use std::env;

use crate::api::Command;
use crate::constant::{is_help, looks_like_flag};
use crate::model::{ChildLookup, Matches, Outcome};
use crate::parser::base::*;
use crate::parser::interface::{terminal_width, ConsoleInterface, TabWriter, UserInterface};
use crate::parser::printer::Printer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command tree parser.
///
/// Parses the input tokens against the command tree: locating the deepest matching command, binding option values, and invoking the terminal command's handler.
/// Errors and help messages are displayed by the dispatcher itself.
/// The process is never exited; that decision is left to the caller.
///
/// Each parse is independent, so the same `Dispatcher` may be used any number of times.
pub struct Dispatcher<'a> {
    root: Command<'a>,
    child_lookup: ChildLookup,
    terminal_width: Option<usize>,
    user_interface: Box<dyn UserInterface + 'a>,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over the command tree `root`, displaying to the console.
    pub fn new(root: Command<'a>) -> Self {
        Self::with_interface(root, Box::new(ConsoleInterface::default()), terminal_width())
    }

    pub(crate) fn with_interface(
        root: Command<'a>,
        user_interface: Box<dyn UserInterface + 'a>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            root,
            child_lookup: ChildLookup::default(),
            terminal_width,
            user_interface,
        }
    }

    /// Set how sub-commands are located amongst the input tokens.
    /// Defaults to [`ChildLookup::Anywhere`].
    pub fn child_lookup(mut self, child_lookup: ChildLookup) -> Self {
        self.child_lookup = child_lookup;
        self
    }

    /// The root of the command tree.
    pub fn root(&self) -> &Command<'a> {
        &self.root
    }

    /// Run the parser against the Cli [`env::args`].
    ///
    /// See [`Dispatcher::parse_tokens`] for details.
    pub fn parse(&self) -> Result<Outcome, ParseError> {
        let command_input: Vec<String> = env::args().collect();
        self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    /// Run the parser against the input tokens.
    /// The first token is the program name, as in [`env::args`].
    ///
    /// Starting from the root, each command in turn:
    /// 1. Displays its help message when the next token is `-h`/`--help`, or when there are no tokens beyond the program name.
    /// 2. Binds its options from the tokens following the matched command path.
    /// If a required option is missing, the error and help message are displayed and `Err` is returned.
    /// 3. Dispatches into the sub-command named amongst the tokens (see [`ChildLookup`]).
    /// If none is named, the error and help message are displayed and `Err` is returned.
    /// When the next token is a flag (or there is none), only the help message is displayed.
    /// A command without sub-commands instead invokes its handler.
    ///
    /// ### Example
    /// ```
    /// # use cmdtree_builder as cmdtree;
    /// use cmdtree::{Command, Dispatcher, Outcome, Value};
    ///
    /// let dispatcher = Dispatcher::new(
    ///     Command::new("program", "")
    ///         .add_sub_command(Command::new("sub", "").add_option("flag", "", false, ["-f"])),
    /// );
    ///
    /// match dispatcher.parse_tokens(&["program", "sub", "-f"]).unwrap() {
    ///     Outcome::Executed(matches) => assert_eq!(matches.get("flag"), Some(&Value::Switch)),
    ///     Outcome::Help(_) => unreachable!(),
    /// }
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Outcome, ParseError> {
        // Flushed on every exit path when dropped.
        let mut writer = TabWriter::new(&*self.user_interface, self.terminal_width);
        self.dispatch(&self.root, tokens, 0, Matches::default(), &mut writer)
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Run the parser against the input tokens, without displaying anything.
    ///
    /// ### Example
    /// ```
    /// # use cmdtree_builder as cmdtree;
    /// use cmdtree::{Command, Dispatcher, ParseError};
    ///
    /// let dispatcher = Dispatcher::new(Command::new("program", "").add_option("path", "", true, ["--path"]));
    /// let error = dispatcher.parse_tokens_silently(&["program", "x"]).unwrap_err();
    /// assert_eq!(error, ParseError::MissingRequiredOption { name: "path".to_string() });
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn parse_tokens_silently(&self, tokens: &[&str]) -> Result<Outcome, ParseError> {
        let silent = crate::parser::interface::SilentInterface::default();
        let mut writer = TabWriter::new(&silent, None);
        self.dispatch(&self.root, tokens, 0, Matches::default(), &mut writer)
    }

    fn dispatch(
        &self,
        command: &Command<'a>,
        tokens: &[&str],
        cursor: usize,
        mut matches: Matches,
        writer: &mut TabWriter,
    ) -> Result<Outcome, ParseError> {
        // Each level of the command path consumes one token.
        let cursor = cursor + 1;
        let mut path = matches.path().to_vec();
        path.push(command.name().to_string());

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching '{}' at cursor {cursor}.", command.name());
        }

        if tokens.len() <= 1 || tokens.get(cursor).is_some_and(|token| is_help(token)) {
            Printer::new(command).print_help(usage(tokens, &path), writer);
            return Ok(Outcome::Help(path));
        }

        let bindings = match bind_options(command, tokens, cursor) {
            Ok(bindings) => bindings,
            Err(error) => {
                self.user_interface.print_error(&error);
                Printer::new(command).print_help(usage(tokens, &path), writer);
                return Err(error);
            }
        };
        matches.descend(command.name(), bindings);

        if command.is_leaf() {
            let _invoked = command.invoke(&matches);

            #[cfg(feature = "tracing_debug")]
            {
                if _invoked {
                    debug!("Invoked the handler of '{}'.", command.name());
                } else {
                    debug!("Matched '{}', which has no handler.", command.name());
                }
            }

            return Ok(Outcome::Executed(matches));
        }

        match find_child(command, tokens, cursor, self.child_lookup) {
            Some(child) => self.dispatch(child, tokens, cursor, matches, writer),
            None => match tokens.get(cursor) {
                // A flag never names a sub-command, so it is not reported as an unknown one.
                Some(token) if !looks_like_flag(token) => {
                    let error = ParseError::UnknownCommand {
                        token: token.to_string(),
                    };
                    self.user_interface.print_error(&error);
                    self.user_interface
                        .print_error_context(ErrorContext::new(cursor, tokens));
                    Printer::new(command).print_help(usage(tokens, &path), writer);
                    Err(error)
                }
                _ => {
                    Printer::new(command).print_help(usage(tokens, &path), writer);
                    Ok(Outcome::Help(path))
                }
            },
        }
    }
}

// The program as invoked, followed by the names of the matched sub-commands.
fn usage(tokens: &[&str], path: &[String]) -> String {
    let program = tokens
        .first()
        .map(|token| token.to_string())
        .or_else(|| path.first().cloned())
        .unwrap_or_default();

    std::iter::once(program)
        .chain(path.iter().skip(1).cloned())
        .collect::<Vec<String>>()
        .join(" ")
}
