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

//! Error types for Selex
//!
//! Compilation is the only fallible operation in the library: evaluation is
//! total and surfaces every runtime failure as the UNKNOWN value instead.

use thiserror::Error;

/// Result type alias for Selex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while compiling a selector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The lexer could not advance past the current position.
    /// Carries the unconsumed remainder of the input.
    #[error("Illegal selector: illegal character at '{0}'")]
    Lex(String),

    /// The token stream violates the grammar, or a parse-time check
    /// (bad ESCAPE, literal overflow, unmatched parenthesis) failed.
    /// Carries the offending token's lexeme.
    #[error("Illegal selector: '{lexeme}': {message}")]
    Parse { lexeme: String, message: String },
}

impl Error {
    /// Create a parse error for the offending token
    pub fn parse(lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            lexeme: lexeme.into(),
            message: message.into(),
        }
    }

    /// Check if this is a lexical error
    pub fn is_lex(&self) -> bool {
        matches!(self, Error::Lex(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}
