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

//! Selex CLI - interactive message-selector shell
//!
//! Reads one selector per line, compiles it, prints the canonical form and
//! the evaluated value against a process-wide environment.
//!
//! Meta-commands:
//!
//! - `\v name=expr` - bind `name` to the evaluated result of `expr`
//! - `\e` - print the environment
//! - `\q` - quit

use std::process::ExitCode;

use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use selex::{compile, MapEnv, Value};

/// JMS-style message selector shell
#[derive(Parser, Debug)]
#[command(name = "selex")]
#[command(version)]
#[command(about = "Compile and evaluate JMS-style message selectors")]
#[command(
    long_about = "Compile and evaluate JMS-style message selectors against an\n\
in-process environment of named values.\n\n\
EXAMPLES:\n\
  selex                                  Interactive shell\n\
  selex -s color=red -s size=10          Pre-seed string properties\n\
  selex -s color=red -e \"color='red'\"    One-shot evaluation"
)]
struct Args {
    /// Pre-seed the environment with a string property (repeatable)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    bindings: Vec<String>,

    /// Compile and evaluate a single selector, then exit
    #[arg(short = 'e', long = "execute", value_name = "SELECTOR")]
    execute: Option<String>,

    /// Suppress the startup banner
    #[arg(short = 'q', long = "quiet", default_value = "false")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut env = MapEnv::new();
    for binding in &args.bindings {
        match binding.split_once('=') {
            Some((name, value)) => env.set(name, Value::String(value)),
            None => {
                eprintln!("ignoring malformed binding (expected NAME=VALUE): {}", binding);
            }
        }
    }

    if let Some(selector) = &args.execute {
        return run_line(selector, &env);
    }

    if !args.quiet {
        println!("selex {}", env!("CARGO_PKG_VERSION"));
        println!("Type a selector, \\v name=expr, \\e, or \\q to quit.");
    }

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("failed to initialise line editor: {}", e);
            return ExitCode::FAILURE;
        }
    };

    loop {
        match editor.readline(">> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if let Some(code) = process(line, &mut env) {
                    return code;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

// Returns Some(code) when the shell should exit.
fn process(line: &str, env: &mut MapEnv) -> Option<ExitCode> {
    if let Some(meta) = line.strip_prefix('\\') {
        return run_meta(meta, env);
    }
    run_line(line, env);
    None
}

fn run_line(selector: &str, env: &MapEnv) -> ExitCode {
    match compile(selector) {
        Ok(expr) => {
            println!("{}", expr);
            println!("{}", expr.eval(env));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_meta(meta: &str, env: &mut MapEnv) -> Option<ExitCode> {
    match meta.chars().next() {
        Some('v') => {
            let rest = meta[1..].trim();
            match rest.split_once('=') {
                Some((name, selector)) => match compile(selector) {
                    Ok(expr) => {
                        let value = expr.eval(&*env).to_interned();
                        env.set(name.trim(), value);
                        println!("{} = {}", name.trim(), value);
                    }
                    Err(e) => eprintln!("{}", e),
                },
                None => eprintln!("usage: \\v name=expression"),
            }
            None
        }
        Some('e') => {
            dump_env(env);
            None
        }
        Some('q') => Some(ExitCode::SUCCESS),
        _ => {
            eprintln!("unrecognized command: \\{}", meta);
            None
        }
    }
}

fn dump_env(env: &MapEnv) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["name", "value"]);
    let mut bindings: Vec<_> = env.iter().collect();
    bindings.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (name, value) in bindings {
        table.add_row(vec![Cell::new(name), Cell::new(value.to_string())]);
    }
    println!("{}", table);
}
