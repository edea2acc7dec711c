//! A small JSON-path compiler and applicator.
//!
//! Expressions are compiled once into a [`CompiledPath`] and can then be
//! applied to any number of documents. The supported grammar covers the root
//! marker `$`, dotted keys (`.name`), quoted bracket keys (`['a b']`), array
//! indices (`[0]`) and the wildcard (`.*` / `[*]`).

pub mod ast;
pub mod engine;
pub mod error;
mod parser;

// --- Public API ---
pub use ast::{CompiledPath, Step};
pub use engine::{Selection, apply, select};
pub use error::{CompileError, EvalError, ValueKind};
pub use parser::parse_path;
