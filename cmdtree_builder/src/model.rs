use std::collections::HashMap;

/// The value bound to an option during a parse.
///
/// An option that never matched is not a `Value` at all; it is simply absent from the [`Bindings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The option's flag was present, but no value token followed it (ex: `--verbose`).
    Switch,
    /// The option captured precisely one value token (ex: `--path /x`).
    Single(String),
    /// A repeated option captured multiple distinct value tokens (ex: `--tag a --tag b`).
    /// See [`CommandOption::repeated`](crate::CommandOption::repeated).
    Multiple(Vec<String>),
}

impl Value {
    /// The single value, if this is a [`Value::Single`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Single(value) => Some(value.as_str()),
            Value::Switch | Value::Multiple(_) => None,
        }
    }

    /// All captured values, in the order they were encountered.
    /// A [`Value::Switch`] captures no values.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Value::Switch => Vec::default(),
            Value::Single(value) => vec![value.as_str()],
            Value::Multiple(values) => values.iter().map(AsRef::as_ref).collect(),
        }
    }

    /// Whether this is a value-less [`Value::Switch`].
    pub fn is_switch(&self) -> bool {
        matches!(self, Value::Switch)
    }

    // A sequence is only kept when it genuinely holds more than one value.
    pub(crate) fn normalize(self) -> Self {
        match self {
            Value::Multiple(mut values) if values.len() == 1 => {
                Value::Single(values.pop().expect("internal error - length checked"))
            }
            other => other,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Switch => write!(f, "true"),
            Value::Single(value) => write!(f, "{value}"),
            Value::Multiple(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// The option values bound for a single command during a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    pub(crate) fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub(crate) fn take(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub(crate) fn finish(self) -> Self {
        Self {
            values: self
                .values
                .into_iter()
                .map(|(name, value)| (name, value.normalize()))
                .collect(),
        }
    }

    /// Get the value bound to the option `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether any flag of the option `name` was recognized.
    pub fn is_present(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of bound options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no options were bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the bound options, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// The result of a successful parse: the matched command path, and the option bindings at each level of it.
///
/// Level `0` is the root command; the final level is the command whose handler was invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    path: Vec<String>,
    levels: Vec<Bindings>,
}

impl Matches {
    pub(crate) fn descend(&mut self, command: impl Into<String>, bindings: Bindings) {
        self.path.push(command.into());
        self.levels.push(bindings);
    }

    /// The names of the matched commands, from the root to the terminal command.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The name of the terminal (deepest) matched command.
    pub fn command(&self) -> Option<&str> {
        self.path.last().map(AsRef::as_ref)
    }

    /// Get the value for the option `name`.
    /// The terminal command's options are searched first, followed by each ancestor up to the root.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.levels.iter().rev().find_map(|bindings| bindings.get(name))
    }

    /// Whether the option `name` was present at any level.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The bindings of the terminal command.
    pub fn bindings(&self) -> Option<&Bindings> {
        self.levels.last()
    }

    /// The bindings at level `depth` of the matched path.
    pub fn level(&self, depth: usize) -> Option<&Bindings> {
        self.levels.get(depth)
    }
}

/// The terminal action of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The terminal command was matched, and its handler (if any) invoked.
    Executed(Matches),
    /// Help was displayed for the command at this path; no handler was invoked.
    Help(Vec<String>),
}

/// How a command with children locates the child to dispatch into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildLookup {
    /// Search every input token (including those already consumed).
    /// When multiple tokens name a child, the last one wins.
    #[default]
    Anywhere,
    /// Only consider the next unconsumed token.
    Positional,
}
