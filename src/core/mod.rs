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

//! Core types for Selex
//!
//! This module contains the fundamental types used throughout the library:
//!
//! - [`Value`] - Runtime values (unknown, boolean, exact, inexact, string)
//! - [`BoolOrNone`] - Three-valued truth with Kleene semantics
//! - [`Env`] / [`MapEnv`] - Identifier lookup at evaluation time
//! - [`Error`] - Compilation errors
//! - [`intern`] - Program-lifetime string storage

pub mod env;
pub mod error;
pub mod interner;
pub mod value;

pub use env::{Env, MapEnv};
pub use error::{Error, Result};
pub use interner::intern;
pub use value::{Arithmetic, BoolOrNone, Comparison, Value};
