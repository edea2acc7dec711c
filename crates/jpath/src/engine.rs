//! The evaluation engine for applying a compiled path to a JSON document.
use super::ast::{CompiledPath, Step};
use crate::error::{EvalError, ValueKind};
use serde_json::Value;

/// The values selected by a path, borrowed from the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    /// The single value selected by a path without wildcards.
    One(&'a Value),
    /// Every value selected by a path containing a wildcard, in document order.
    Many(Vec<&'a Value>),
}

impl Selection<'_> {
    /// Clones the selection out of the document. `Many` becomes a JSON array.
    pub fn into_value(self) -> Value {
        match self {
            Selection::One(value) => value.clone(),
            Selection::Many(values) => Value::Array(values.into_iter().cloned().collect()),
        }
    }
}

/// Selects values from `document` without cloning them.
///
/// Branches under a wildcard that fail are omitted from the result rather
/// than failing the whole selection.
pub fn select<'a>(path: &CompiledPath, document: &'a Value) -> Result<Selection<'a>, EvalError> {
    let mut nodes = Vec::new();
    walk(path.steps(), 0, document, &mut nodes)?;
    if path.is_singular() && nodes.len() == 1 {
        return Ok(Selection::One(nodes[0]));
    }
    Ok(Selection::Many(nodes))
}

/// Applies a compiled path to a document, returning an owned copy of the selection.
pub fn apply(path: &CompiledPath, document: &Value) -> Result<Value, EvalError> {
    select(path, document).map(Selection::into_value)
}

impl CompiledPath {
    /// See [`apply`].
    pub fn apply(&self, document: &Value) -> Result<Value, EvalError> {
        apply(self, document)
    }

    /// See [`select`].
    pub fn select<'a>(&self, document: &'a Value) -> Result<Selection<'a>, EvalError> {
        select(self, document)
    }
}

fn walk<'a>(
    steps: &[Step],
    at: usize,
    current: &'a Value,
    out: &mut Vec<&'a Value>,
) -> Result<(), EvalError> {
    let Some(step) = steps.get(at) else {
        out.push(current);
        return Ok(());
    };

    match step {
        Step::Field(key) => match current {
            Value::Object(map) => match map.get(key) {
                Some(next) => walk(steps, at + 1, next, out),
                None => Err(EvalError::NotFound {
                    key: key.clone(),
                    path: path_so_far(steps, at),
                }),
            },
            other => Err(mismatch(steps, at, "object", other)),
        },
        Step::Index(index) => match current {
            Value::Array(items) => {
                match usize::try_from(*index).ok().and_then(|i| items.get(i)) {
                    Some(next) => walk(steps, at + 1, next, out),
                    None => Err(EvalError::IndexOutOfRange {
                        index: *index,
                        len: items.len(),
                        path: path_so_far(steps, at),
                    }),
                }
            }
            other => Err(mismatch(steps, at, "array", other)),
        },
        Step::Wildcard => {
            let children: Vec<&'a Value> = match current {
                Value::Array(items) => items.iter().collect(),
                Value::Object(map) => map.values().collect(),
                other => return Err(mismatch(steps, at, "array or object", other)),
            };
            for child in children {
                let mark = out.len();
                if let Err(e) = walk(steps, at + 1, child, out) {
                    out.truncate(mark);
                    log::trace!("Omitting wildcard branch: {}", e);
                }
            }
            Ok(())
        }
    }
}

fn path_so_far(steps: &[Step], at: usize) -> String {
    CompiledPath::new(steps[..at].to_vec()).to_string()
}

fn mismatch(steps: &[Step], at: usize, expected: &'static str, found: &Value) -> EvalError {
    EvalError::TypeMismatch {
        step: steps[at].to_string(),
        path: path_so_far(steps, at),
        expected,
        found: ValueKind::of(found),
    }
}
