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

//! Parser Tests
//!
//! Accept/reject lists for the grammar, parse-time semantic checks, and the
//! canonical-form round trip.

use selex::{compile, Error, Expression};

fn selector(s: &str) -> Expression {
    compile(s).unwrap_or_else(|e| panic!("selector {:?} failed to compile: {}", s, e))
}

#[test]
fn test_parse_accepts() {
    let accepted = [
        "'Daft' is not null",
        "42 is null",
        "A is not null",
        "A is null",
        "A = C",
        "A <> C",
        "A='hello kitty'",
        "A<>'hello kitty'",
        "A=B",
        "A<>B",
        "A='hello kitty' OR B='Bye, bye cruel world'",
        "B='hello kitty' AnD A='Bye, bye cruel world'",
        "A is null or A='Bye, bye cruel world'",
        "Z is null OR A is not null and A<>'Bye, bye cruel world'",
        "(Z is null OR A is not null) and A<>'Bye, bye cruel world'",
        "NOT C is not null OR C is null",
        "Not A='' or B=z",
        "Not A=17 or B=5.6",
        "A<>17 and B=5.6e17",
        "A LIKE 'excep%ional'",
        "B NOT LIKE 'excep%ional'",
        "A LIKE 'excep%ional' EScape '\\'",
        "A BETWEEN 13 AND 'true'",
        "A NOT BETWEEN 100 AND 3.9",
        "true",
        "-354",
        "-(X or Y)",
        "-687 or 567",
        "(354.6)",
        "A is null and 'hello out there'",
        "17/4>4",
        "17/4>+4",
        "17/4>-4",
        "A IN ('hello', 'there', 1 , true, (1-17))",
    ];
    for s in accepted {
        selector(s);
    }
}

#[test]
fn test_parse_rejects() {
    let rejected = [
        "hello world",
        "A is null not",
        "A is null or not",
        "A is null or and",
        "A is null and (B='hello out there'",
        "in='hello kitty'",
        "A like 234",
        "A not 234 escape",
        "A not like 'eclecti_' escape 'happy'",
        "A not like 'eclecti_' escape happy",
        "A not like 'eclecti_' escape '%'",
        "A BETWEEN AND 'true'",
        "A NOT BETWEEN 34 OR 3.9",
        "A IN ()",
        "A NOT IN ()",
        "A IN 'hello', 'there', 1, true, (1-17))",
        "A IN ('hello', 'there' 1, true, (1-17))",
    ];
    for s in rejected {
        let err = compile(s).expect_err(&format!("selector {:?} must not compile", s));
        assert!(err.is_parse(), "expected parse error for {:?}, got {}", s, err);
    }
}

#[test]
fn test_lexical_rejects() {
    let err = compile("hello ^ world").unwrap_err();
    assert!(err.is_lex(), "expected lex error, got {}", err);
    assert!(compile("A = 'unterminated").unwrap_err().is_lex());
    assert!(compile("A = 0X_34").unwrap_err().is_lex());
    assert!(compile("A = 0b34").unwrap_err().is_lex());
    assert!(compile("A = .e5").unwrap_err().is_lex());
    assert!(compile("A = 34e").unwrap_err().is_lex());
}

#[test]
fn test_integer_literal_too_big() {
    let err = compile("9223372036854775808 > 0").unwrap_err();
    assert_eq!(
        err,
        Error::parse("9223372036854775808", "integer literal too big")
    );
    assert!(compile("-9223372036854775809 < 0").unwrap_err().is_parse());
    // the exact magnitude 2^63 is representable only when negated
    selector("-9223372036854775808 <> 0");
}

#[test]
fn test_error_messages() {
    assert_eq!(
        compile("A like 234").unwrap_err(),
        Error::parse("234", "expected string after LIKE")
    );
    assert_eq!(
        compile("A in 3").unwrap_err(),
        Error::parse("3", "missing '(' after IN")
    );
    assert_eq!(
        compile("A is null not").unwrap_err(),
        Error::parse("not", "extra input")
    );
    assert_eq!(
        compile("(A = 3").unwrap_err(),
        Error::parse("", "missing ')' after '('")
    );
    assert_eq!(
        compile("A is 3").unwrap_err(),
        Error::parse("3", "expected NULL or NOT NULL after IS")
    );
}

#[test]
fn test_canonical_forms() {
    let cases = [
        ("", "TRUE"),
        ("  ", "TRUE"),
        ("A = 'hello'", "(A='hello')"),
        ("a AND b OR c", "((a AND b) OR c)"),
        ("a OR b AND c", "(a OR (b AND c))"),
        ("not a = b", "NOT((a=b))"),
        ("x BETWEEN 1 AND 2", "x BETWEEN 1 AND 2"),
        ("x NOT BETWEEN 1 AND 2", "NOT(x BETWEEN 1 AND 2)"),
        ("x IN (1, 2)", "x IN (1, 2)"),
        ("x NOT IN (1,2)", "x NOT IN (1, 2)"),
        ("a LIKE 'b%' ESCAPE 'z'", "a LIKE 'b%' ESCAPE 'z'"),
        ("a NOT LIKE 'b%'", "NOT(a LIKE 'b%')"),
        ("-9223372036854775808", "-9223372036854775808"),
        ("0x8000_0000_0000_0000", "-9223372036854775808"),
        ("\"odd name\" = 3", "(\"odd name\"=3)"),
        ("\"and\" is null", "\"and\" IS NULL"),
        ("17/4", "(17/4)"),
        ("-A", "-(A)"),
        ("+A", "A"),
        ("5.6", "5.6"),
        ("017", "15"),
        ("A is not null", "A IS NOT NULL"),
        ("\"it's\" = 'it''s'", "(\"it's\"='it''s')"),
    ];
    for (input, want) in cases {
        assert_eq!(selector(input).to_string(), want, "input: {:?}", input);
    }
}

#[test]
fn test_canonical_form_round_trips() {
    let selectors = [
        "",
        "A LIKE '%cru_l%'",
        "'_%%_hello.th_re%' LIKE 'z_%.%z_%z%' escape 'z'",
        "(Z is null OR A is not null) and A<>'Bye, bye cruel world'",
        "-687 or 567",
        "A IN ('hello', 'there', 1 , true, (1-17))",
        "A NOT IN ('hello', 'there', 1 , true, (1-17))",
        "N*M+19 < N*(M+19)",
        "0x8000_0000_0000_0000 = -9223372036854775808",
        "3.e50 > 1e6",
        "14 BETWEEN -11 and 54367",
        "NOT C is not null OR C is null",
        "-(X or Y)",
        "A BETWEEN 13 AND 'true'",
        "\"This is an \"\"odd!\"\" identifier\" = 1",
        "17/4>+4 and 17/4>-4",
        "0.4f > 0.3d",
        "077L=0b111_111",
    ];
    for s in selectors {
        let canonical = selector(s).to_string();
        let reparsed = selector(&canonical).to_string();
        assert_eq!(canonical, reparsed, "selector: {:?}", s);
    }
}
