use std::collections::HashSet;

use thiserror::Error;

use crate::api::Command;
use crate::constant::looks_like_flag;
use crate::model::{Bindings, ChildLookup, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error encountered while parsing.
///
/// By the time this is returned, the error and the relevant help message have already been displayed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required option never received a value.
    #[error("required option missing: {name}")]
    MissingRequiredOption {
        /// The name of the option.
        name: String,
    },
    /// The token does not name any sub-command of the command being dispatched.
    #[error("unknown command: {token}")]
    UnknownCommand {
        /// The offending token.
        token: String,
    },
}

/// Points at the token (by index) which caused an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    index: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(index: usize, tokens: &[&str]) -> Self {
        Self {
            index,
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Each preceding token is followed by a single space.
        let column: usize = self
            .tokens
            .iter()
            .take(self.index)
            .map(|token| token.len() + 1)
            .sum();
        writeln!(f, "{}", self.tokens.join(" "))?;
        write!(f, "{:>width$}", "^", width = column + 1)
    }
}

/// Bind the options of `command` from the tokens at and after `cursor`.
///
/// Each option is bound by its first occurrence amongst the remaining tokens.
/// A repeated option is checked against every remaining token, accumulating its distinct values.
pub(crate) fn bind_options(
    command: &Command,
    tokens: &[&str],
    cursor: usize,
) -> Result<Bindings, ParseError> {
    let remaining = tokens.get(cursor..).unwrap_or(&[]);
    let mut bindings = Bindings::default();
    // Literal values already attached to any option of this command.
    let mut seen: HashSet<&str> = HashSet::default();

    for (i, token) in remaining.iter().enumerate() {
        let following = remaining
            .get(i + 1)
            .copied()
            .filter(|next| !looks_like_flag(next));

        for option in command.options() {
            if !option.matches_token(token)
                || (!option.is_repeated() && bindings.is_present(option.name()))
            {
                continue;
            }

            let value = match (bindings.take(option.name()), following) {
                (None | Some(Value::Switch), Some(next)) => {
                    seen.insert(next);
                    Value::Single(next.to_string())
                }
                (None | Some(Value::Switch), None) => Value::Switch,
                (Some(Value::Single(first)), Some(next)) if !seen.contains(next) => {
                    seen.insert(next);
                    Value::Multiple(vec![first, next.to_string()])
                }
                (Some(Value::Multiple(mut values)), Some(next)) if !seen.contains(next) => {
                    seen.insert(next);
                    values.push(next.to_string());
                    Value::Multiple(values)
                }
                (Some(existing), _) => existing,
            };

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Option '{}' matched token {} ({token}), bound: {value:?}.",
                    option.name(),
                    cursor + i
                );
            }

            bindings.bind(option.name(), value);
        }
    }

    let bindings = bindings.finish();
    let mut required: Vec<&str> = command
        .options()
        .filter(|option| option.is_required())
        .map(|option| option.name())
        .collect();
    required.sort();

    match required.into_iter().find(|name| !bindings.is_present(name)) {
        Some(name) => Err(ParseError::MissingRequiredOption {
            name: name.to_string(),
        }),
        None => Ok(bindings),
    }
}

/// Find the child of `command` to dispatch into.
pub(crate) fn find_child<'c, 'a>(
    command: &'c Command<'a>,
    tokens: &[&str],
    cursor: usize,
    child_lookup: ChildLookup,
) -> Option<&'c Command<'a>> {
    let child = match child_lookup {
        // Later tokens override earlier ones.
        ChildLookup::Anywhere => tokens.iter().filter_map(|token| command.child(token)).last(),
        ChildLookup::Positional => tokens.get(cursor).and_then(|token| command.child(token)),
    };

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Child lookup ({child_lookup:?}) under '{}' found: {:?}.",
            command.name(),
            child.map(|c| c.name())
        );
    }

    child
}
