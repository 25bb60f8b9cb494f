//! `cmdtree` is a command tree parser for Rust.
//!
//! A Cli is declared as a tree of named [`Command`]s.
//! Each command may declare flag options, and may nest further sub-commands.
//! Parsing walks the input tokens down the tree to the deepest matching command, binds the flag values along the way, and invokes the handler of the terminal command.
//!
//! `cmdtree` deliberately keeps a small surface:
//! * Option values are strings (see [`Value`]); converting them is left to the handler.
//! * Flags are matched by their exact spelling, with the value in the following token (`--path /x`).
//! There is no `--path=/x` syntax, and short flags may not be combined (`-abc`).
//! * Help is displayed for any command via `-h` or `--help`.
//! * The process is never exited by `cmdtree`; each parse returns an [`Outcome`] or a [`ParseError`].
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/demo_tree.rs")]
//! ```
//!
//! ```console
//! $ remotes remote add --name origin --url https://example.com
//! Adding remote 'origin' at https://example.com.
//!
//! $ remotes remote -h
//!
//! Usage: remotes remote COMMAND [args..]
//!
//! Work with remotes.
//!
//! Commands:
//!     add         Add a remote.
//!     remove      Remove one or more remotes.
//!
//! Options:
//!     -h, --help  Show this help message and exit.
//!
//! $ remotes remote add --name origin
//! required option missing: url
//!
//! Usage: remotes remote add [options...]
//! <truncated>
//!
//! $ remotes remote remove --name a --name b
//! Removing remote 'a'.
//! Removing remote 'b'.
//! ```
//!
//! # Building the tree
//! Start with a root [`Command`], and attach options via [`Command::add_option`] (or [`Command::add_repeated_option`]) and sub-commands via [`Command::add_sub_command`].
//! A command without sub-commands is a *leaf*; give it a [`Command::handler`].
//! Attaching an option or sub-command under a name already in use replaces the earlier one.
//!
//! Finally, hand the tree to a [`Dispatcher`] and call [`Dispatcher::parse`] (or [`Dispatcher::parse_tokens`]).
//!
//! # Cli Semantics
//! * The first token is the program name.
//! * Each command in the matched path consumes one token of depth.
//! A command's options are bound from every token after that depth, so flags may appear anywhere after the command path.
//! * An option bound by a flag takes the following token as its value ([`Value::Single`]).
//! If there is no following token, or it begins with `-`, the option is a [`Value::Switch`].
//! * An option is bound by its first occurrence; later occurrences are ignored.
//! * An option declared via [`Command::add_repeated_option`] instead collects the distinct values of every occurrence into a [`Value::Multiple`].
//! A value already taken by an option of the same command is not collected twice.
//! * A required option which was never bound is an error ([`ParseError::MissingRequiredOption`]).
//! * A command with sub-commands dispatches into the child named amongst the tokens.
//! By default, every token is considered and the last one naming a child wins ([`ChildLookup::Anywhere`]).
//! This may be tightened to only the next token via [`Dispatcher::child_lookup`] with [`ChildLookup::Positional`].
//! If no child is named, the next token is reported as an error ([`ParseError::UnknownCommand`]), unless it is a flag; then only the help message is displayed.
//! * `-h`/`--help` as the next token at any depth displays that command's help.
//!
//! On an error, the error and the failing command's help message are displayed, and the error is returned.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while parsing.
pub use cmdtree_builder::*;
