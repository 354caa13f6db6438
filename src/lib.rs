//! # viewgen
//!
//! Compiles HTML view files into Go code that builds the same element trees
//! through the `gowebapi/webapi` DOM bindings, plus one stylesheet gathered
//! from the views' top-level `<style>` blocks.
//!
//! ## Markup conventions
//!
//! 1. **Units**: every file becomes a struct type named after the file (minus
//!    extension) and a constructor, `newX` for unexported names and `NewX`
//!    for exported ones.
//!
//! 2. **Refs**: `ref="name"` on an element or `<include>` adds a typed field
//!    `name` to the unit's struct. Names must be unique per unit and must not
//!    be Go keywords, `roots` or `Roots`.
//!
//! 3. **Roots**: elements without a parent in their file are the unit's
//!    roots, kept in closing order and returned by `Roots()`.
//!
//! 4. **Includes**: `<include path="card.html" ref="card" />` splices another
//!    unit's roots in place. `/`-prefixed paths resolve against the
//!    configured root, others against the including file. Cycles are errors.
//!
//! 5. **Styles**: a `<style>` with no open parent is moved verbatim to the
//!    stylesheet and produces no construction code.

pub mod compile;
mod emit;
mod error;
mod format;
mod generator;
mod golang;
mod history;
mod names;
mod options;
mod refs;
mod style;
pub mod tokenize;
mod webapi;


pub use error::{Error, UnitError};
pub use format::{FormatError, Gofmt, SourceFormatter, Verbatim};
pub use generator::{generate, Generator, Output};
pub use names::UnitSymbols;
pub use options::{ConfigError, Options};
