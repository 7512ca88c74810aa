// Copyright 2025 Selex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Selex - JMS-style message selectors
//!
//! Selex compiles a message-selector expression into an evaluable predicate
//! tree and evaluates it against an environment mapping identifiers to typed
//! values. Its primary use is routing and filtering on a message broker:
//! subscribers register selectors, and for each delivered message the broker
//! evaluates the compiled expression against the message's header and
//! property namespace.
//!
//! The selector language is boolean expressions over identifiers and
//! literals with SQL-style three-valued logic: `AND`/`OR`/`NOT`, the six
//! comparison operators, arithmetic, `LIKE` patterns with an optional
//! `ESCAPE` character, `BETWEEN`, `IN`/`NOT IN`, and `IS [NOT] NULL`. A
//! missing identifier is UNKNOWN, and an UNKNOWN result means the selector
//! does not match.
//!
//! ## Quick Start
//!
//! ```
//! use selex::{compile, eval, MapEnv, Value};
//!
//! let selector = compile("color = 'red' AND weight > 2.5").unwrap();
//!
//! let mut msg = MapEnv::new();
//! msg.set("color", Value::String("red"));
//! msg.set("weight", Value::Inexact(3.0));
//! assert!(eval(&selector, &msg));
//!
//! // properties the message does not carry are UNKNOWN, which never matches
//! let empty = MapEnv::new();
//! assert!(!eval(&selector, &empty));
//! ```
//!
//! Compile once, evaluate many: trees are immutable after construction and
//! may be shared across threads for concurrent read-only evaluation, each
//! evaluation with its own (or an externally synchronised) environment.
//!
//! ## Modules
//!
//! - [`core`] - [`Value`], [`BoolOrNone`], [`Env`]/[`MapEnv`], [`Error`],
//!   [`intern`]
//! - [`parser`] - lexer, push-back tokeniser, recursive-descent parser
//! - [`expr`] - the expression tree and its evaluator

pub mod core;
pub mod expr;
pub mod parser;

pub use crate::core::{
    intern, Arithmetic, BoolOrNone, Comparison, Env, Error, MapEnv, Result, Value,
};
pub use crate::expr::{like::LikeMatcher, Expression};
pub use crate::parser::compile;

/// Evaluate a compiled selector against an environment.
///
/// An UNKNOWN result is treated as `false`: an erroneous selector is simply
/// a non-matching selector.
pub fn eval(expr: &Expression, env: &dyn Env) -> bool {
    expr.eval_bool(env).is_true()
}
