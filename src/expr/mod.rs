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

//! Expression tree and evaluator
//!
//! A compiled selector is a tree of [`Expression`] nodes, one enum variant
//! per node kind, evaluated by pattern match. Every node evaluates to a
//! [`Value`]; boolean nodes additionally expose [`eval_bool`] so AND/OR/NOT
//! work on three-valued truth directly without boxing.
//!
//! Trees are immutable once built and may be shared across threads for
//! concurrent read-only evaluation. `Display` prints the parenthesised
//! canonical form, which is itself valid selector syntax.
//!
//! [`eval_bool`]: Expression::eval_bool

pub mod like;

use std::fmt;

use crate::core::env::Env;
use crate::core::value::{Arithmetic, BoolOrNone, Comparison, Value};
use crate::parser::token::reserved_word;

use like::LikeMatcher;

/// A node in a compiled selector
#[derive(Debug, Clone)]
pub enum Expression {
    /// Boolean or numeric literal
    Literal(Value<'static>),
    /// String literal; owns its content, evaluation borrows from the tree
    StringLiteral(String),
    /// Identifier looked up in the environment (case-sensitive)
    Identifier(String),
    /// Unary arithmetic negation
    Negate(Box<Expression>),
    Arithmetic {
        op: Arithmetic,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Comparison {
        op: Comparison,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Not(Box<Expression>),
    IsNull {
        expr: Box<Expression>,
        negated: bool,
    },
    Like {
        expr: Box<Expression>,
        matcher: LikeMatcher,
    },
    Between {
        expr: Box<Expression>,
        low: Box<Expression>,
        high: Box<Expression>,
    },
    In {
        expr: Box<Expression>,
        list: Vec<Expression>,
        negated: bool,
    },
}

impl Expression {
    /// Evaluate to a value
    ///
    /// Boolean nodes produce `Bool` or `Unknown`. Never fails: every runtime
    /// failure (type mismatch, missing identifier, integer division by zero)
    /// is `Unknown`.
    pub fn eval<'v>(&'v self, env: &'v dyn Env) -> Value<'v> {
        match self {
            Expression::Literal(v) => *v,
            Expression::StringLiteral(s) => Value::String(s),
            Expression::Identifier(name) => env.lookup(name),
            Expression::Negate(e) => -e.eval(env),
            Expression::Arithmetic { op, left, right } => {
                op.apply(left.eval(env), right.eval(env))
            }
            _ => Value::from(self.eval_bool(env)),
        }
    }

    /// Evaluate as three-valued truth
    ///
    /// Non-boolean values in boolean position are UNKNOWN.
    pub fn eval_bool<'v>(&'v self, env: &'v dyn Env) -> BoolOrNone {
        match self {
            Expression::Or { left, right } => {
                let l = left.eval_bool(env);
                if l.is_true() {
                    return BoolOrNone::True;
                }
                let r = right.eval_bool(env);
                if r.is_true() {
                    return BoolOrNone::True;
                }
                if l.is_false() && r.is_false() {
                    BoolOrNone::False
                } else {
                    BoolOrNone::Unknown
                }
            }
            Expression::And { left, right } => {
                let l = left.eval_bool(env);
                if l.is_false() {
                    return BoolOrNone::False;
                }
                let r = right.eval_bool(env);
                if r.is_false() {
                    return BoolOrNone::False;
                }
                if l.is_true() && r.is_true() {
                    BoolOrNone::True
                } else {
                    BoolOrNone::Unknown
                }
            }
            Expression::Not(e) => e.eval_bool(env).negate(),
            Expression::Comparison { op, left, right } => {
                let l = left.eval(env);
                if l.is_unknown() {
                    return BoolOrNone::Unknown;
                }
                let r = right.eval(env);
                if r.is_unknown() {
                    return BoolOrNone::Unknown;
                }
                op.apply(l, r).into()
            }
            Expression::IsNull { expr, negated } => {
                (expr.eval(env).is_unknown() != *negated).into()
            }
            Expression::Like { expr, matcher } => match expr.eval(env) {
                Value::String(s) => matcher.matches(s).into(),
                _ => BoolOrNone::Unknown,
            },
            Expression::Between { expr, low, high } => {
                let v = expr.eval(env);
                let l = low.eval(env);
                let h = high.eval(env);
                if v.is_unknown() || l.is_unknown() || h.is_unknown() {
                    return BoolOrNone::Unknown;
                }
                (Comparison::Greq.apply(v, l) && Comparison::Lseq.apply(v, h)).into()
            }
            Expression::In {
                expr,
                list,
                negated,
            } => {
                if *negated {
                    eval_not_in(expr, list, env)
                } else {
                    eval_in(expr, list, env)
                }
            }
            _ => self.eval(env).as_bool(),
        }
    }
}

fn eval_in(expr: &Expression, list: &[Expression], env: &dyn Env) -> BoolOrNone {
    let v = expr.eval(env);
    if v.is_unknown() {
        return BoolOrNone::Unknown;
    }
    let mut result = BoolOrNone::False;
    for item in list {
        let candidate = item.eval(env);
        if candidate.is_unknown() {
            result = BoolOrNone::Unknown;
            continue;
        }
        if Comparison::Eq.apply(v, candidate) {
            return BoolOrNone::True;
        }
    }
    result
}

fn eval_not_in(expr: &Expression, list: &[Expression], env: &dyn Env) -> BoolOrNone {
    let v = expr.eval(env);
    if v.is_unknown() {
        return BoolOrNone::Unknown;
    }
    let mut result = BoolOrNone::True;
    for item in list {
        let candidate = item.eval(env);
        if candidate.is_unknown() {
            result = BoolOrNone::Unknown;
            continue;
        }
        // a type-incompatible element forces FALSE unless an unknown has
        // already been seen; nothing later can restore TRUE
        if result != BoolOrNone::Unknown
            && !v.same_type(&candidate)
            && !(v.is_numeric() && candidate.is_numeric())
        {
            result = BoolOrNone::False;
            continue;
        }
        if Comparison::Eq.apply(v, candidate) {
            return BoolOrNone::False;
        }
    }
    result
}

// The canonical form must lex as a plain identifier to print unquoted.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let leads = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_' || c == '$',
        None => false,
    };
    leads
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
        && reserved_word(name).is_none()
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(Value::Bool(true)) => write!(f, "TRUE"),
            Expression::Literal(Value::Bool(false)) => write!(f, "FALSE"),
            Expression::Literal(Value::Exact(i)) => write!(f, "{}", i),
            Expression::Literal(Value::Inexact(x)) => write!(f, "{:?}", x),
            Expression::Literal(v) => write!(f, "{}", v),
            Expression::StringLiteral(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Expression::Identifier(name) => {
                if is_plain_identifier(name) {
                    write!(f, "{}", name)
                } else {
                    write!(f, "\"{}\"", name.replace('"', "\"\""))
                }
            }
            Expression::Negate(e) => write!(f, "-({})", e),
            Expression::Arithmetic { op, left, right } => {
                write!(f, "({}{}{})", left, op, right)
            }
            Expression::Comparison { op, left, right } => {
                write!(f, "({}{}{})", left, op, right)
            }
            Expression::Or { left, right } => write!(f, "({} OR {})", left, right),
            Expression::And { left, right } => write!(f, "({} AND {})", left, right),
            Expression::Not(e) => write!(f, "NOT({})", e),
            Expression::IsNull {
                expr,
                negated: false,
            } => write!(f, "{} IS NULL", expr),
            Expression::IsNull {
                expr,
                negated: true,
            } => write!(f, "{} IS NOT NULL", expr),
            Expression::Like { expr, matcher } => {
                write!(
                    f,
                    "{} LIKE '{}'",
                    expr,
                    matcher.pattern().replace('\'', "''")
                )?;
                if let Some(e) = matcher.escape() {
                    write!(f, " ESCAPE '{}'", e)?;
                }
                Ok(())
            }
            Expression::Between { expr, low, high } => {
                write!(f, "{} BETWEEN {} AND {}", expr, low, high)
            }
            Expression::In {
                expr,
                list,
                negated,
            } => {
                write!(f, "{} {}IN (", expr, if *negated { "NOT " } else { "" })?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MapEnv;

    #[test]
    fn test_literal_eval() {
        let env = MapEnv::new();
        assert_eq!(
            Expression::Literal(Value::Exact(42)).eval(&env),
            Value::Exact(42)
        );
        assert_eq!(
            Expression::StringLiteral("hi".into()).eval(&env),
            Value::String("hi")
        );
    }

    #[test]
    fn test_identifier_eval_borrows_env() {
        let mut env = MapEnv::new();
        env.set("A", Value::String("hello kitty"));
        let e = Expression::Identifier("A".into());
        assert_eq!(e.eval(&env), Value::String("hello kitty"));
        assert!(Expression::Identifier("Z".into()).eval(&env).is_unknown());
    }

    #[test]
    fn test_kleene_or() {
        let env = MapEnv::new();
        let t = || Box::new(Expression::Literal(Value::Bool(true)));
        let u = || Box::new(Expression::Identifier("unset".into()));
        // TRUE OR UNKNOWN is TRUE
        let or = Expression::Or {
            left: u(),
            right: t(),
        };
        assert!(or.eval_bool(&env).is_true());
        // UNKNOWN OR UNKNOWN is UNKNOWN
        let or = Expression::Or {
            left: u(),
            right: u(),
        };
        assert!(or.eval_bool(&env).is_unknown());
    }

    #[test]
    fn test_kleene_and() {
        let env = MapEnv::new();
        let f = || Box::new(Expression::Literal(Value::Bool(false)));
        let u = || Box::new(Expression::Identifier("unset".into()));
        // UNKNOWN AND FALSE is FALSE
        let and = Expression::And {
            left: u(),
            right: f(),
        };
        assert!(and.eval_bool(&env).is_false());
        // UNKNOWN AND TRUE is UNKNOWN
        let and = Expression::And {
            left: u(),
            right: Box::new(Expression::Literal(Value::Bool(true))),
        };
        assert!(and.eval_bool(&env).is_unknown());
    }

    #[test]
    fn test_value_in_boolean_position_is_unknown() {
        let env = MapEnv::new();
        let e = Expression::StringLiteral("hello out there".into());
        assert!(e.eval_bool(&env).is_unknown());
        let e = Expression::Literal(Value::Exact(1));
        assert!(e.eval_bool(&env).is_unknown());
    }

    #[test]
    fn test_tree_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expression>();
    }

    #[test]
    fn test_boolean_node_as_value() {
        let env = MapEnv::new();
        let e = Expression::Not(Box::new(Expression::Literal(Value::Bool(false))));
        assert_eq!(e.eval(&env), Value::Bool(true));
        let e = Expression::Not(Box::new(Expression::Identifier("unset".into())));
        assert!(e.eval(&env).is_unknown());
    }
}
