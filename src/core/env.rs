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

//! Evaluation environments
//!
//! The environment maps identifiers to values at evaluation time. Identifier
//! keys are case-sensitive (message property names are case-sensitive, the
//! selector language is not). The environment may change between evaluations
//! but not during one.

use rustc_hash::FxHashMap;

use super::interner::intern;
use super::value::Value;

/// Identifier lookup consulted by the evaluator
///
/// A missing identifier is `Unknown`. Lookup must be side-effect free: the
/// evaluator may short-circuit and may consult the same identifier more than
/// once per evaluation.
pub trait Env {
    fn lookup(&self, name: &str) -> Value<'_>;
}

/// Map-backed environment
///
/// String payloads are interned on insert, so stored values never borrow from
/// the caller.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    values: FxHashMap<String, Value<'static>>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding
    pub fn set(&mut self, name: impl Into<String>, value: Value<'_>) {
        self.values.insert(name.into(), value.to_interned());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the bindings in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value<'static>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Env for MapEnv {
    fn lookup(&self, name: &str) -> Value<'_> {
        self.values.get(name).copied().unwrap_or(Value::Unknown)
    }
}

impl Value<'_> {
    /// Copy of this value that borrows nothing, interning string payloads
    pub fn to_interned(self) -> Value<'static> {
        match self {
            Value::Unknown => Value::Unknown,
            Value::Bool(b) => Value::Bool(b),
            Value::Exact(i) => Value::Exact(i),
            Value::Inexact(x) => Value::Inexact(x),
            Value::String(s) => Value::String(intern(s)),
        }
    }
}
