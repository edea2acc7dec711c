//! Defines the compiled form of a JSON-path expression.
use std::fmt;

/// A single traversal operation within a compiled path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// An object key (e.g., `.name` or `['name']`).
    Field(String),
    /// An array index (e.g., `[0]`). Negative indices never match.
    Index(i64),
    /// Every child of an array or object (e.g., `.*` or `[*]`).
    Wildcard,
}

impl Step {
    /// Returns `true` if the key can be written in dotted form without quoting.
    fn is_plain_key(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(key) if Step::is_plain_key(key) => write!(f, ".{key}"),
            Step::Field(key) => {
                write!(f, "['{}']", key.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            Step::Index(i) => write!(f, "[{i}]"),
            Step::Wildcard => f.write_str(".*"),
        }
    }
}

/// An ordered sequence of steps, applied left to right from the document root.
///
/// The empty path is the root expression `$` and selects the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompiledPath {
    steps: Vec<Step>,
}

impl CompiledPath {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The root path `$`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// A path is singular when it selects at most one value, i.e. it has no wildcard.
    pub fn is_singular(&self) -> bool {
        !self.steps.contains(&Step::Wildcard)
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl From<Vec<Step>> for CompiledPath {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}
