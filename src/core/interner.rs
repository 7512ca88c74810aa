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

//! String interning
//!
//! `Value` borrows its string payloads. Callers that cannot guarantee the
//! lifetime of a string (environments built from transient message data, the
//! CLI's variable bindings) route it through [`intern`], which deduplicates
//! and owns the copy for the life of the program.

use std::sync::OnceLock;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

static POOL: OnceLock<Mutex<FxHashSet<&'static str>>> = OnceLock::new();

/// Intern a string, returning a stable borrow with program lifetime.
///
/// Repeated calls with equal strings return the same storage.
pub fn intern(s: &str) -> &'static str {
    let mut pool = POOL.get_or_init(|| Mutex::new(FxHashSet::default())).lock();
    if let Some(existing) = pool.get(s) {
        return existing;
    }
    let stable: &'static str = Box::leak(s.to_owned().into_boxed_str());
    pool.insert(stable);
    stable
}
