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

//! Compile and evaluate benchmarks
//!
//! Run with: cargo bench --bench selector
//!
//! The evaluate benchmarks model the broker hot path: one compiled selector
//! applied to a stream of messages.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use selex::{compile, eval, MapEnv, Value};

const SELECTOR: &str =
    "JMSPriority > 4 AND color = 'red' AND weight BETWEEN 1.5 AND 20 AND label LIKE 'urgent%'";

fn message_env() -> MapEnv {
    let mut env = MapEnv::new();
    env.set("JMSPriority", Value::Exact(7));
    env.set("color", Value::String("red"));
    env.set("weight", Value::Inexact(2.5));
    env.set("label", Value::String("urgent: reactor offline"));
    env
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_selector", |b| {
        b.iter(|| compile(black_box(SELECTOR)).unwrap())
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let expr = compile(SELECTOR).unwrap();
    let env = message_env();
    c.bench_function("evaluate_matching", |b| {
        b.iter(|| eval(black_box(&expr), &env))
    });

    let mut cold = message_env();
    cold.set("color", Value::String("blue"));
    c.bench_function("evaluate_non_matching", |b| {
        b.iter(|| eval(black_box(&expr), &cold))
    });
}

fn bench_like(c: &mut Criterion) {
    let expr = compile("payload LIKE '%needle%'").unwrap();
    let mut env = MapEnv::new();
    env.set(
        "payload",
        Value::String("a reasonably long haystack with a needle near the end"),
    );
    c.bench_function("evaluate_like", |b| b.iter(|| eval(black_box(&expr), &env)));
}

criterion_group!(benches, bench_compile, bench_evaluate, bench_like);
criterion_main!(benches);
