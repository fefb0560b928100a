// -------------------------------------------------------------------------
// SPDX-FileCopyrightText: Copyright © 2025 The Typhon Project
// SPDX-FileName: crates/typhon-cli/src/main.rs
// SPDX-FileType: SOURCE
// SPDX-License-Identifier: Apache-2.0
// -------------------------------------------------------------------------
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// -------------------------------------------------------------------------
//! Typhon CLI
//!
//! Command-line interface for building and inspecting control-flow graphs
//! for the Typhon programming language.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use typhon_analyzer::analysis::{build_module_cfg, DeadCodeDetector};
use typhon_ast::ast::AST;
use typhon_parser::parser::Parser as TyphonParser;
use typhon_source::types::SourceManager;

/// The Typhon control-flow graph toolkit.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Builds and prints the control-flow graph for a source file.
    Cfg {
        /// Input `.ty` file.
        input: String,

        /// Also print dead-code warnings.
        #[clap(long)]
        warnings: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Cfg { input, warnings } => dump_cfg(&input, warnings),
    }
}

fn dump_cfg(path: &str, show_warnings: bool) -> Result<()> {
    let source = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;

    let mut source_manager = SourceManager::new();
    let file_id = source_manager.add_file(path.to_string(), source.clone());
    let mut parser = TyphonParser::new(&source, file_id, Arc::new(source_manager));
    let module_id = parser.parse_module().context("failed to parse source")?;

    let mut cfg = build_module_cfg(parser.ast_mut(), module_id)
        .context("failed to build control-flow graph")?;

    println!("module {}: {} blocks", cfg.name, cfg.block_count());
    print_cfg(&cfg, 0);

    if show_warnings {
        report_dead_code(&mut cfg, parser.ast());
    }

    Ok(())
}

fn print_cfg(cfg: &typhon_analyzer::ControlFlowGraph, depth: usize) {
    let indent = "  ".repeat(depth);
    for block in cfg.blocks() {
        println!("{indent}block {} ({} stmts, {} calls)", block.id, block.statements.len(), block.calls.len());
        for &succ in &block.successors {
            let guard = cfg.edges.get(&(block.id, succ)).map_or_else(|| "<always>".to_string(), ToString::to_string);
            println!("{indent}  -> {succ} [{guard}]");
        }
    }

    for (name, (params, func_cfg)) in &cfg.func_cfgs {
        println!("{indent}fn {name}({} params): {} blocks", params.len(), func_cfg.block_count());
        print_cfg(func_cfg, depth + 1);
    }

    for (name, class_cfg) in &cfg.class_cfgs {
        println!("{indent}class {name}: {} blocks", class_cfg.block_count());
        print_cfg(class_cfg, depth + 1);
    }
}

fn report_dead_code(cfg: &mut typhon_analyzer::ControlFlowGraph, ast: &AST) {
    let mut detector = DeadCodeDetector::new(cfg);
    if let Err(err) = detector.analyze(ast) {
        eprintln!("dead-code analysis failed: {err}");
        return;
    }
    for warning in detector.warnings() {
        println!("warning: {} ({:?})", warning.message, warning.span);
    }
}
