//! Message template parser.
//!
//! This module parses ICU MessageFormat style templates into an AST that can be
//! serialized, inspected by tooling, or rewritten by post-parsers.

pub mod ast;
pub mod error;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use template::{BUILTIN_EXTERNALS, ParseOptions, VerboseParsing, parse_message, parse_template};
