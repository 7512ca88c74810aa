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

//! Token types for the selector lexer
//!
//! This module defines the closed set of token kinds, the reserved-word
//! table, and the `Token` pair of kind and lexeme.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// The closed set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of stream
    Eos,
    Null,
    True,
    False,
    Not,
    And,
    Or,
    In,
    Is,
    Between,
    Like,
    Escape,
    Identifier,
    /// Single-quoted string literal (lexeme holds the unquoted content)
    String,
    /// Integer literal in any base, underscores and l/L suffix included
    NumericExact,
    /// Floating literal, including hex floats with a p/P exponent
    NumericApprox,
    LParen,
    RParen,
    Comma,
    Plus,
    Minus,
    Mult,
    Div,
    Equal,
    /// `<>`
    Neq,
    Less,
    Grt,
    Lseq,
    Greq,
}

/// A lexical token: kind plus the original lexeme
///
/// Reserved-word lexemes keep their source case for diagnostics; recognition
/// is case-insensitive. EOS tokens always carry an empty lexeme, so any two
/// EOS tokens compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eos() -> Self {
        Token::new(TokenKind::Eos, "")
    }

    pub fn is_eos(&self) -> bool {
        self.kind == TokenKind::Eos
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eos => write!(f, "EOS"),
            TokenKind::String => write!(f, "STRING:'{}'", self.literal),
            _ => write!(f, "{:?}:{}", self.kind, self.literal),
        }
    }
}

/// Reserved words, matched case-insensitively after an identifier is lexed
static RESERVED: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    [
        ("and", TokenKind::And),
        ("between", TokenKind::Between),
        ("escape", TokenKind::Escape),
        ("false", TokenKind::False),
        ("in", TokenKind::In),
        ("is", TokenKind::Is),
        ("like", TokenKind::Like),
        ("not", TokenKind::Not),
        ("null", TokenKind::Null),
        ("or", TokenKind::Or),
        ("true", TokenKind::True),
    ]
    .into_iter()
    .collect()
});

/// Look up a lexed identifier as a reserved word (ASCII case-insensitive)
pub fn reserved_word(word: &str) -> Option<TokenKind> {
    // longest reserved word is 7 bytes; skip the lowercase allocation for
    // anything longer
    if word.len() > 7 {
        return None;
    }
    RESERVED.get(word.to_ascii_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_word_case_insensitive() {
        assert_eq!(reserved_word("and"), Some(TokenKind::And));
        assert_eq!(reserved_word("AnD"), Some(TokenKind::And));
        assert_eq!(reserved_word("BETWEEN"), Some(TokenKind::Between));
        assert_eq!(reserved_word("nOt"), Some(TokenKind::Not));
    }

    #[test]
    fn test_non_reserved_words() {
        assert_eq!(reserved_word("null_123"), None);
        assert_eq!(reserved_word("oR_andsomething"), None);
        assert_eq!(reserved_word("android"), None);
        assert_eq!(reserved_word("i"), None);
    }

    #[test]
    fn test_eos_tokens_compare_equal() {
        assert_eq!(Token::eos(), Token::eos());
        assert!(Token::eos().is_eos());
    }

    #[test]
    fn test_token_equality() {
        assert_eq!(
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Identifier, "a")
        );
        assert_ne!(
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Identifier, "b")
        );
        // reserved words keep their source case but compare by lexeme
        assert_ne!(
            Token::new(TokenKind::Is, "Is"),
            Token::new(TokenKind::Is, "is")
        );
    }
}
