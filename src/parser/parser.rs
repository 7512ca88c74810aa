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

//! Recursive-descent selector parser
//!
//! One function per grammar level, lowest precedence outermost:
//!
//! ```text
//! SelectExpression   ::= OrExpression?
//! OrExpression       ::= AndExpression ( "OR" AndExpression )*
//! AndExpression      ::= ComparisonExpression ( "AND" ComparisonExpression )*
//! ComparisonExpression ::=
//!       AddExpression "IS" "NOT"? "NULL"
//!     | AddExpression "NOT"? "LIKE" String ( "ESCAPE" String )?
//!     | AddExpression "NOT"? "BETWEEN" AddExpression "AND" AddExpression
//!     | AddExpression "NOT"? "IN" "(" AddExpression ( "," AddExpression )* ")"
//!     | AddExpression CmpOp AddExpression
//!     | "NOT" ComparisonExpression
//!     | AddExpression
//! AddExpression      ::= MultiplyExpression ( ("+"|"-") MultiplyExpression )*
//! MultiplyExpression ::= UnaryArithExpression ( ("*"|"/") UnaryArithExpression )*
//! UnaryArithExpression ::=
//!       "-" ExactNumericLiteral
//!     | ("+"|"-") UnaryArithExpression
//!     | "(" OrExpression ")"
//!     | PrimaryExpression
//! PrimaryExpression  ::= Identifier | Literal
//! ```
//!
//! Keyword matching is case-insensitive; everything else is case-sensitive.

use crate::core::error::{Error, Result};
use crate::core::value::{Arithmetic, Comparison, Value};
use crate::expr::like::LikeMatcher;
use crate::expr::Expression;

use super::lexer::Tokeniser;
use super::token::{Token, TokenKind};

/// Compile a selector string into an expression tree.
///
/// An empty or whitespace-only selector compiles to the literal TRUE. Any
/// token left over after the top-level expression is an error.
pub fn compile(input: &str) -> Result<Expression> {
    let mut tokens = Tokeniser::new(input);
    let expr = selector_expression(&mut tokens)?;
    let tok = tokens.next_token()?;
    if tok.kind != TokenKind::Eos {
        return Err(Error::parse(tok.literal, "extra input"));
    }
    Ok(expr)
}

fn selector_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    if t.next_token()?.kind == TokenKind::Eos {
        return Ok(Expression::Literal(Value::Bool(true)));
    }
    t.return_tokens(1);
    or_expression(t)
}

pub(crate) fn or_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    let mut e = and_expression(t)?;
    while t.next_token()?.kind == TokenKind::Or {
        let rhs = and_expression(t)?;
        e = Expression::Or {
            left: Box::new(e),
            right: Box::new(rhs),
        };
    }
    t.return_tokens(1);
    Ok(e)
}

fn and_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    let mut e = comparison_expression(t)?;
    while t.next_token()?.kind == TokenKind::And {
        let rhs = comparison_expression(t)?;
        e = Expression::And {
            left: Box::new(e),
            right: Box::new(rhs),
        };
    }
    t.return_tokens(1);
    Ok(e)
}

fn comparison_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    // NOT is right-associative and binds the whole comparison
    if t.next_token()?.kind == TokenKind::Not {
        let e = comparison_expression(t)?;
        return Ok(Expression::Not(Box::new(e)));
    }
    t.return_tokens(1);

    let e1 = add_expression(t)?;

    let tok = t.next_token()?;
    match tok.kind {
        TokenKind::Is => {
            let tok = t.next_token()?;
            match tok.kind {
                TokenKind::Null => Ok(Expression::IsNull {
                    expr: Box::new(e1),
                    negated: false,
                }),
                TokenKind::Not => {
                    let tok = t.next_token()?;
                    if tok.kind == TokenKind::Null {
                        Ok(Expression::IsNull {
                            expr: Box::new(e1),
                            negated: true,
                        })
                    } else {
                        Err(Error::parse(tok.literal, "expected NULL or NOT NULL after IS"))
                    }
                }
                _ => Err(Error::parse(tok.literal, "expected NULL or NOT NULL after IS")),
            }
        }
        TokenKind::Not => special_comparison(t, e1, true),
        TokenKind::Between | TokenKind::Like | TokenKind::In => {
            t.return_tokens(1);
            special_comparison(t, e1, false)
        }
        _ => {
            t.return_tokens(1);
            let op = match t.next_token()?.kind {
                TokenKind::Equal => Comparison::Eq,
                TokenKind::Neq => Comparison::Neq,
                TokenKind::Less => Comparison::Less,
                TokenKind::Grt => Comparison::Grt,
                TokenKind::Lseq => Comparison::Lseq,
                TokenKind::Greq => Comparison::Greq,
                _ => {
                    t.return_tokens(1);
                    return Ok(e1);
                }
            };
            let e2 = add_expression(t)?;
            Ok(Expression::Comparison {
                op,
                left: Box::new(e1),
                right: Box::new(e2),
            })
        }
    }
}

// LIKE / BETWEEN / IN, optionally negated. NOT LIKE and NOT BETWEEN wrap
// the positive form in NOT; NOT IN has its own evaluation rule.
fn special_comparison(t: &mut Tokeniser<'_>, e1: Expression, negated: bool) -> Result<Expression> {
    let tok = t.next_token()?;
    match tok.kind {
        TokenKind::Like => {
            let pattern = t.next_token()?;
            if pattern.kind != TokenKind::String {
                return Err(Error::parse(pattern.literal, "expected string after LIKE"));
            }
            let escape = if t.next_token()?.kind == TokenKind::Escape {
                let esc = t.next_token()?;
                if esc.kind != TokenKind::String {
                    return Err(Error::parse(esc.literal, "expected string after ESCAPE"));
                }
                if esc.literal.chars().count() != 1 {
                    return Err(Error::parse(
                        esc.literal,
                        "single character string required after ESCAPE",
                    ));
                }
                if esc.literal == "%" || esc.literal == "_" {
                    return Err(Error::parse(
                        esc.literal,
                        "'%' and '_' are not allowed as ESCAPE characters",
                    ));
                }
                Some(esc.literal)
            } else {
                t.return_tokens(1);
                None
            };
            let matcher = LikeMatcher::new(&pattern.literal, escape.as_deref())
                .map_err(|_| Error::parse(pattern.literal.clone(), "invalid LIKE pattern"))?;
            let like = Expression::Like {
                expr: Box::new(e1),
                matcher,
            };
            Ok(if negated {
                Expression::Not(Box::new(like))
            } else {
                like
            })
        }
        TokenKind::Between => {
            let low = add_expression(t)?;
            let tok = t.next_token()?;
            if tok.kind != TokenKind::And {
                return Err(Error::parse(tok.literal, "expected AND after BETWEEN"));
            }
            let high = add_expression(t)?;
            let between = Expression::Between {
                expr: Box::new(e1),
                low: Box::new(low),
                high: Box::new(high),
            };
            Ok(if negated {
                Expression::Not(Box::new(between))
            } else {
                between
            })
        }
        TokenKind::In => {
            let tok = t.next_token()?;
            if tok.kind != TokenKind::LParen {
                return Err(Error::parse(tok.literal, "missing '(' after IN"));
            }
            let mut list = Vec::new();
            loop {
                list.push(add_expression(t)?);
                if t.next_token()?.kind != TokenKind::Comma {
                    break;
                }
            }
            t.return_tokens(1);
            let tok = t.next_token()?;
            if tok.kind != TokenKind::RParen {
                return Err(Error::parse(tok.literal, "missing ',' or ')' after IN"));
            }
            Ok(Expression::In {
                expr: Box::new(e1),
                list,
                negated,
            })
        }
        _ => Err(Error::parse(tok.literal, "expected LIKE, IN or BETWEEN")),
    }
}

pub(crate) fn add_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    let mut e = multiply_expression(t)?;
    loop {
        let op = match t.next_token()?.kind {
            TokenKind::Plus => Arithmetic::Add,
            TokenKind::Minus => Arithmetic::Sub,
            _ => {
                t.return_tokens(1);
                return Ok(e);
            }
        };
        let rhs = multiply_expression(t)?;
        e = Expression::Arithmetic {
            op,
            left: Box::new(e),
            right: Box::new(rhs),
        };
    }
}

fn multiply_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    let mut e = unary_arith_expression(t)?;
    loop {
        let op = match t.next_token()?.kind {
            TokenKind::Mult => Arithmetic::Mult,
            TokenKind::Div => Arithmetic::Div,
            _ => {
                t.return_tokens(1);
                return Ok(e);
            }
        };
        let rhs = unary_arith_expression(t)?;
        e = Expression::Arithmetic {
            op,
            left: Box::new(e),
            right: Box::new(rhs),
        };
    }
}

fn unary_arith_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    let tok = t.next_token()?;
    match tok.kind {
        TokenKind::LParen => {
            let e = or_expression(t)?;
            let tok = t.next_token()?;
            if tok.kind != TokenKind::RParen {
                return Err(Error::parse(tok.literal, "missing ')' after '('"));
            }
            Ok(e)
        }
        // unary plus is a no-op
        TokenKind::Plus => unary_arith_expression(t),
        TokenKind::Minus => {
            let tok = t.next_token()?;
            // a negated exact literal parses as a single negative literal so
            // that -9223372036854775808 is representable
            if tok.kind == TokenKind::NumericExact {
                parse_exact_numeric(&tok, true)
            } else {
                t.return_tokens(1);
                let e = unary_arith_expression(t)?;
                Ok(Expression::Negate(Box::new(e)))
            }
        }
        _ => {
            t.return_tokens(1);
            primary_expression(t)
        }
    }
}

fn primary_expression(t: &mut Tokeniser<'_>) -> Result<Expression> {
    let tok = t.next_token()?;
    match tok.kind {
        TokenKind::Identifier => Ok(Expression::Identifier(tok.literal)),
        TokenKind::String => Ok(Expression::StringLiteral(tok.literal)),
        TokenKind::True => Ok(Expression::Literal(Value::Bool(true))),
        TokenKind::False => Ok(Expression::Literal(Value::Bool(false))),
        TokenKind::NumericExact => parse_exact_numeric(&tok, false),
        TokenKind::NumericApprox => parse_approx_numeric(&tok),
        _ => Err(Error::parse(tok.literal, "expected literal or identifier")),
    }
}

// Decode an exact numeric lexeme: strip underscores and the l/L suffix,
// detect the base from the prefix. Decimal literals must fit in i64 (the
// magnitude 2^63 is allowed when negated); based literals admit the full
// unsigned range and wrap into two's complement, so 0x8000_0000_0000_0000
// is i64::MIN.
fn parse_exact_numeric(tok: &Token, negate: bool) -> Result<Expression> {
    let cleaned: String = tok.literal.chars().filter(|&c| c != '_').collect();
    let cleaned = cleaned
        .strip_suffix(['l', 'L'])
        .unwrap_or(cleaned.as_str());

    let (base, digits) = if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(bin) = cleaned
        .strip_prefix("0b")
        .or_else(|| cleaned.strip_prefix("0B"))
    {
        (2, bin)
    } else if cleaned.len() > 1 && cleaned.starts_with('0') {
        (8, cleaned)
    } else {
        (10, cleaned)
    };

    let value = u64::from_str_radix(digits, base)
        .map_err(|_| Error::parse(tok.literal.clone(), "integer literal too big"))?;

    let literal = if base == 10 {
        if value <= i64::MAX as u64 {
            let v = value as i64;
            if negate {
                -v
            } else {
                v
            }
        } else if negate && value == (i64::MAX as u64) + 1 {
            i64::MIN
        } else {
            return Err(Error::parse(tok.literal.clone(), "integer literal too big"));
        }
    } else {
        let v = value as i64;
        if negate {
            v.wrapping_neg()
        } else {
            v
        }
    };
    Ok(Expression::Literal(Value::Exact(literal)))
}

// Decode an approximate numeric lexeme. Hex floats carry an integer hex
// mantissa and a p/P power-of-two exponent, which f64::from_str does not
// accept, so they are assembled by hand.
fn parse_approx_numeric(tok: &Token) -> Result<Expression> {
    let overflow = || Error::parse(tok.literal.clone(), "floating literal overflow/underflow");

    let cleaned: String = tok.literal.chars().filter(|&c| c != '_').collect();
    let cleaned = cleaned
        .strip_suffix(['f', 'F', 'd', 'D'])
        .unwrap_or(cleaned.as_str());

    let value = if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        let (mantissa, exponent) = match hex.split_once(['p', 'P']) {
            Some((m, e)) => (m, e),
            None => (hex, "0"),
        };
        let mantissa = u64::from_str_radix(mantissa, 16).map_err(|_| overflow())?;
        let exponent: i32 = exponent.parse().map_err(|_| overflow())?;
        (mantissa as f64) * 2f64.powi(exponent)
    } else {
        cleaned.parse::<f64>().map_err(|_| overflow())?
    };

    if !value.is_finite() {
        return Err(overflow());
    }
    Ok(Expression::Literal(Value::Inexact(value)))
}
