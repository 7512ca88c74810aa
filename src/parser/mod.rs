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

//! Selector parser
//!
//! Turns a selector string into an [`Expression`](crate::expr::Expression)
//! tree in three stages:
//!
//! - [`token`] - token kinds and the reserved-word table
//! - [`lexer`] - the tokenizer and the push-back [`Tokeniser`]
//! - [`parser`] - recursive descent over the grammar, entered via [`compile`]
//!
//! # Example
//!
//! ```
//! use selex::parser::compile;
//!
//! let expr = compile("color = 'red' AND size BETWEEN 1 AND 10").unwrap();
//! assert_eq!(
//!     expr.to_string(),
//!     "((color='red') AND size BETWEEN 1 AND 10)"
//! );
//! ```

pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod token;

pub use lexer::Tokeniser;
pub use parser::compile;
pub use token::{Token, TokenKind};
