//=====================================================
// File: main.rs
//=====================================================
// Author: SolvraOS Contributors
// License: Duality Public License (DPL v1.0)
// Goal: Code-Lang CLI entry point
// Objective: Run .cl source files or start the interactive REPL
//=====================================================

use anyhow::Result;
use clap::Parser;
use codelang::repl;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "codelang", about = "The Code-Lang programming language", disable_version_flag = true)]
struct Cli {
    /// Script to execute (.cl); starts the REPL when omitted.
    script: Option<PathBuf>,

    /// Print the interpreter version and exit.
    #[arg(short = 'v', long = "version")]
    version: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.version {
        println!("code-lang {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match cli.script {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

fn run_file(path: &Path) -> Result<()> {
    if path.extension().map(|ext| ext == "cl") != Some(true) {
        eprintln!("Error: File {} must have a .cl extension", path.display());
        std::process::exit(1);
    }

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("Error: could not open file {}", path.display());
            std::process::exit(1);
        }
    };

    if !repl::execute(&source) {
        std::process::exit(1);
    }
    Ok(())
}

fn run_repl() -> Result<()> {
    let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
    println!("Hello {}! This is the Code-Lang Programming Language", user);
    println!("Feel free to start typing in commands");
    repl::start()
}
