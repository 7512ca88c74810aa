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

//! LIKE pattern translation
//!
//! A LIKE pattern matches `%` against any run of characters and `_` against
//! exactly one, with an optional caller-declared escape character. The
//! pattern is compiled once, at parse time, into an anchored regular
//! expression; evaluation is then a single regex match over the whole
//! subject string.

use regex::Regex;

/// A compiled LIKE pattern
///
/// Keeps the source pattern and escape character so the expression can be
/// printed back in selector syntax.
#[derive(Debug, Clone)]
pub struct LikeMatcher {
    pattern: String,
    escape: Option<char>,
    regex: Regex,
}

impl LikeMatcher {
    /// Compile a pattern. The escape string, when present, is already
    /// validated by the parser to be a single character other than `%`/`_`.
    pub fn new(pattern: &str, escape: Option<&str>) -> Result<Self, regex::Error> {
        let escape = escape.and_then(|e| e.chars().next());
        let regex = Regex::new(&like_to_regex(pattern, escape))?;
        Ok(Self {
            pattern: pattern.to_string(),
            escape,
            regex,
        })
    }

    /// Whether the whole subject matches the pattern
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn escape(&self) -> Option<char> {
        self.escape
    }
}

// Translate a LIKE pattern into an anchored regex, left to right. The
// escape character consumes itself and makes the next character literal;
// regex metacharacters are backslash-escaped so they match literally.
fn like_to_regex(pattern: &str, escape: Option<char>) -> String {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');
    let mut escaped = false;
    for c in pattern.chars() {
        if !escaped && escape == Some(c) {
            escaped = true;
            continue;
        }
        match c {
            '%' if !escaped => regex.push_str(".*"),
            '_' if !escaped => regex.push('.'),
            '\\' | '^' | '$' | '.' | '*' | '+' | '?' | '{' | '}' | '[' | ']' | '(' | ')'
            | '|' => {
                regex.push('\\');
                regex.push(c);
            }
            _ => regex.push(c),
        }
        escaped = false;
    }
    regex.push('$');
    regex
}
