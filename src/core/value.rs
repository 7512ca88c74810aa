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

//! Value algebra and three-valued logic
//!
//! This module defines the runtime [`Value`] union, the three-valued
//! [`BoolOrNone`] truth type, and the total contract of the comparison and
//! arithmetic operators: numeric promotion, SQL NULL propagation, and the
//! cross-type rules. This is the only place where three-valued logic leaks
//! into plain operators; higher levels inspect `Unknown` explicitly.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Three-valued truth: SQL-style {FALSE, TRUE, UNKNOWN} with Kleene tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOrNone {
    False,
    True,
    Unknown,
}

impl BoolOrNone {
    /// True only for the TRUE case; UNKNOWN is not true
    pub fn is_true(self) -> bool {
        self == BoolOrNone::True
    }

    /// True only for the FALSE case; UNKNOWN is not false
    pub fn is_false(self) -> bool {
        self == BoolOrNone::False
    }

    pub fn is_unknown(self) -> bool {
        self == BoolOrNone::Unknown
    }

    /// Logical NOT with unknown propagation
    pub fn negate(self) -> BoolOrNone {
        match self {
            BoolOrNone::False => BoolOrNone::True,
            BoolOrNone::True => BoolOrNone::False,
            BoolOrNone::Unknown => BoolOrNone::Unknown,
        }
    }
}

impl From<bool> for BoolOrNone {
    fn from(b: bool) -> Self {
        if b {
            BoolOrNone::True
        } else {
            BoolOrNone::False
        }
    }
}

/// A runtime selector value
///
/// String payloads are borrowed views: the owning storage must outlive every
/// `Value` referencing it. Callers that cannot guarantee the lifetime should
/// route strings through [`intern`](crate::core::interner::intern), which owns
/// them for the life of the program.
///
/// `PartialEq` is structural (`Exact(42) != Inexact(42.0)`); selector
/// equality, with numeric promotion and cross-type rules, is
/// [`Comparison::Eq`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// SQL NULL / "unknown" result
    Unknown,
    /// TRUE or FALSE
    Bool(bool),
    /// 64-bit signed integer
    Exact(i64),
    /// 64-bit IEEE-754 float
    Inexact(f64),
    /// Borrowed character sequence
    String(&'a str),
}

impl<'a> Value<'a> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    /// Exact or inexact numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Exact(_) | Value::Inexact(_))
    }

    /// Tags match (no promotion applied)
    pub fn same_type(&self, other: &Value<'_>) -> bool {
        self.ordinal() == other.ordinal()
    }

    // fixed ordinal ordering of the tags
    fn ordinal(&self) -> u8 {
        match self {
            Value::Unknown => 0,
            Value::Bool(_) => 1,
            Value::Exact(_) => 2,
            Value::Inexact(_) => 3,
            Value::String(_) => 4,
        }
    }

    /// Interpret in boolean position: only `Bool` has a truth value
    pub fn as_bool(self) -> BoolOrNone {
        match self {
            Value::Bool(b) => b.into(),
            _ => BoolOrNone::Unknown,
        }
    }
}

impl From<BoolOrNone> for Value<'static> {
    fn from(bn: BoolOrNone) -> Self {
        match bn {
            BoolOrNone::False => Value::Bool(false),
            BoolOrNone::True => Value::Bool(true),
            BoolOrNone::Unknown => Value::Unknown,
        }
    }
}

impl From<bool> for Value<'static> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value<'static> {
    fn from(i: i64) -> Self {
        Value::Exact(i)
    }
}

impl From<f64> for Value<'static> {
    fn from(x: f64) -> Self {
        Value::Inexact(x)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unknown => write!(f, "UNKNOWN"),
            Value::Bool(b) => write!(f, "BOOL:{}", b),
            Value::Exact(i) => write!(f, "EXACT:{}", i),
            Value::Inexact(x) => write!(f, "APPROX:{}", x),
            Value::String(s) => write!(f, "STRING:'{}'", s),
        }
    }
}

/// Promote a mixed exact/inexact pair to a common numeric type.
///
/// Returns `None` when either side is non-numeric. Exact-to-inexact
/// conversion is round-to-nearest (lossless for magnitudes up to 2^53).
fn promote<'a>(a: Value<'a>, b: Value<'a>) -> Option<(Value<'a>, Value<'a>)> {
    if !a.is_numeric() || !b.is_numeric() {
        return None;
    }
    match (a, b) {
        (Value::Exact(i), Value::Inexact(_)) => Some((Value::Inexact(i as f64), b)),
        (Value::Inexact(_), Value::Exact(i)) => Some((a, Value::Inexact(i as f64))),
        _ => Some((a, b)),
    }
}

/// Comparison operators over the value algebra
///
/// Operators are data: an enum tag paired with its evaluation function,
/// not allocated operator objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Neq,
    Less,
    Grt,
    Lseq,
    Greq,
}

impl Comparison {
    /// Apply to two known (non-unknown) operands.
    ///
    /// Equality compares payloads after numeric promotion; a cross-type pair
    /// is FALSE for both `=` and `<>`. The ordering operators are defined
    /// only on numeric pairs; anything else is FALSE. Callers are expected
    /// to have handled `Unknown` operands already.
    pub fn apply(self, a: Value<'_>, b: Value<'_>) -> bool {
        match self {
            Comparison::Eq => value_eq(a, b),
            Comparison::Neq => value_neq(a, b),
            Comparison::Less => match promote(a, b) {
                Some((Value::Exact(x), Value::Exact(y))) => x < y,
                Some((Value::Inexact(x), Value::Inexact(y))) => x < y,
                _ => false,
            },
            Comparison::Grt => match promote(a, b) {
                Some((Value::Exact(x), Value::Exact(y))) => x > y,
                Some((Value::Inexact(x), Value::Inexact(y))) => x > y,
                _ => false,
            },
            Comparison::Lseq => match promote(a, b) {
                Some((Value::Exact(x), Value::Exact(y))) => x <= y,
                Some((Value::Inexact(x), Value::Inexact(y))) => x <= y,
                _ => false,
            },
            Comparison::Greq => match promote(a, b) {
                Some((Value::Exact(x), Value::Exact(y))) => x >= y,
                Some((Value::Inexact(x), Value::Inexact(y))) => x >= y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Comparison::Eq => "=",
            Comparison::Neq => "<>",
            Comparison::Less => "<",
            Comparison::Grt => ">",
            Comparison::Lseq => "<=",
            Comparison::Greq => ">=",
        };
        write!(f, "{}", s)
    }
}

fn value_eq(a: Value<'_>, b: Value<'_>) -> bool {
    let (a, b) = match promote(a, b) {
        Some(pair) => pair,
        None => (a, b),
    };
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Exact(x), Value::Exact(y)) => x == y,
        (Value::Inexact(x), Value::Inexact(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}

fn value_neq(a: Value<'_>, b: Value<'_>) -> bool {
    let (a, b) = match promote(a, b) {
        Some(pair) => pair,
        None => (a, b),
    };
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x != y,
        (Value::Exact(x), Value::Exact(y)) => x != y,
        (Value::Inexact(x), Value::Inexact(y)) => x != y,
        (Value::String(x), Value::String(y)) => x != y,
        // cross-type inequality is FALSE, not TRUE
        _ => false,
    }
}

/// Binary arithmetic operators over the value algebra
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic {
    Add,
    Sub,
    Mult,
    Div,
}

impl Arithmetic {
    /// Apply after promotion; any non-promotable pair yields `Unknown`
    pub fn apply<'a>(self, a: Value<'a>, b: Value<'a>) -> Value<'a> {
        match self {
            Arithmetic::Add => a + b,
            Arithmetic::Sub => a - b,
            Arithmetic::Mult => a * b,
            Arithmetic::Div => a / b,
        }
    }
}

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Arithmetic::Add => "+",
            Arithmetic::Sub => "-",
            Arithmetic::Mult => "*",
            Arithmetic::Div => "/",
        };
        write!(f, "{}", s)
    }
}

impl<'a> Add for Value<'a> {
    type Output = Value<'a>;

    fn add(self, rhs: Value<'a>) -> Value<'a> {
        match promote(self, rhs) {
            Some((Value::Exact(x), Value::Exact(y))) => Value::Exact(x.wrapping_add(y)),
            Some((Value::Inexact(x), Value::Inexact(y))) => Value::Inexact(x + y),
            _ => Value::Unknown,
        }
    }
}

impl<'a> Sub for Value<'a> {
    type Output = Value<'a>;

    fn sub(self, rhs: Value<'a>) -> Value<'a> {
        match promote(self, rhs) {
            Some((Value::Exact(x), Value::Exact(y))) => Value::Exact(x.wrapping_sub(y)),
            Some((Value::Inexact(x), Value::Inexact(y))) => Value::Inexact(x - y),
            _ => Value::Unknown,
        }
    }
}

impl<'a> Mul for Value<'a> {
    type Output = Value<'a>;

    fn mul(self, rhs: Value<'a>) -> Value<'a> {
        match promote(self, rhs) {
            Some((Value::Exact(x), Value::Exact(y))) => Value::Exact(x.wrapping_mul(y)),
            Some((Value::Inexact(x), Value::Inexact(y))) => Value::Inexact(x * y),
            _ => Value::Unknown,
        }
    }
}

impl<'a> Div for Value<'a> {
    type Output = Value<'a>;

    /// Integer division truncates toward zero; integer division by zero is
    /// `Unknown`, keeping evaluation total. Float division follows IEEE.
    fn div(self, rhs: Value<'a>) -> Value<'a> {
        match promote(self, rhs) {
            Some((Value::Exact(_), Value::Exact(0))) => Value::Unknown,
            Some((Value::Exact(x), Value::Exact(y))) => Value::Exact(x.wrapping_div(y)),
            Some((Value::Inexact(x), Value::Inexact(y))) => Value::Inexact(x / y),
            _ => Value::Unknown,
        }
    }
}

impl<'a> Neg for Value<'a> {
    type Output = Value<'a>;

    fn neg(self) -> Value<'a> {
        match self {
            Value::Exact(i) => Value::Exact(i.wrapping_neg()),
            Value::Inexact(x) => Value::Inexact(-x),
            _ => Value::Unknown,
        }
    }
}
