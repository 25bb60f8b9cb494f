/// A flag option declared on a [`Command`](crate::Command).
///
/// Options are matched by any of their `flags` (ex: `-p` or `--path`).
/// Once matched, the following token is bound as the option's value, unless it looks like a flag itself (begins with `-`).
/// In that case, the option is bound as a [`Value::Switch`](crate::Value::Switch).
///
/// Only the first occurrence of an option is bound, unless it is [`CommandOption::repeated`].
/// A repeated option collects the distinct values of every occurrence into a [`Value::Multiple`](crate::Value::Multiple).
///
/// Options are normally declared via [`Command::add_option`](crate::Command::add_option).
///
/// ### Example
/// ```
/// # use cmdtree_builder as cmdtree;
/// use cmdtree::CommandOption;
///
/// let option = CommandOption::new("path", "The path to use.", true, ["-p", "--path"]);
/// assert!(option.matches_token("--path"));
/// assert!(!option.matches_token("--pat"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    name: String,
    description: String,
    flags: Vec<String>,
    required: bool,
    repeated: bool,
}

impl CommandOption {
    /// Create an option.
    /// The `name` is the key under which the option's value is found in [`Bindings`](crate::Bindings).
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        flags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            flags: flags.into_iter().map(Into::into).collect(),
            required,
            repeated: false,
        }
    }

    /// Collect the values of every occurrence of this option, rather than only the first.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// The name of this option.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The help description of this option.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The flag spellings which trigger this option, in declaration order.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Whether the parse fails when this option is not bound.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether every occurrence of this option is bound.
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// Whether `token` is precisely one of this option's flags (case sensitive).
    pub fn matches_token(&self, token: &str) -> bool {
        self.flags.iter().any(|flag| flag == token)
    }
}
