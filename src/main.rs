/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use anyhow::{Context, Result};
use clap::Parser as clap_parser;
use mipsas::diagnostics::{DiagnosticSink, Diagnostics, NullSink, WriteSink};
use mipsas::{AssembleOptions, assemble, output};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(clap_parser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Assembly source file
    input: PathBuf,
    /// Output stem; artifacts are <stem>.data, <stem>.text and, with -g,
    /// <stem>.sym
    #[clap(short, long, default_value = "a")]
    output: PathBuf,
    /// Trace every source line and dump symbols and segments
    #[clap(short, long)]
    verbose: bool,
    /// Write a <stem>.sym debug symbol file
    #[clap(short = 'g', long)]
    debug_symbols: bool,
    /// Silently truncate over-wide operand values instead of warning
    #[clap(long)]
    compat_truncate: bool,
    /// Process C-style escape sequences in string literals
    #[clap(long)]
    escapes: bool,
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    let source = fs::read_to_string(&opts.input)
        .with_context(|| format!("Failed to read input file: {}", opts.input.display()))?;

    let options = AssembleOptions {
        compat_truncate: opts.compat_truncate,
        process_escapes: opts.escapes,
    };

    // The trace stream goes to stdout in verbose mode and nowhere otherwise;
    // warnings always go to stderr.
    let mut trace: Box<dyn DiagnosticSink> = if opts.verbose {
        Box::new(WriteSink::new(io::stdout()))
    } else {
        Box::new(NullSink)
    };
    let mut warnings = WriteSink::new(io::stderr());

    let mut diag = Diagnostics::new(trace.as_mut(), &mut warnings);
    let program = assemble(&source, &options, &mut diag)?;
    drop(diag);

    if opts.verbose {
        let mut stdout = io::stdout();
        output::print_symbols(&program, &mut stdout)?;
        output::dump_segments(&program, &mut stdout)?;
    }

    output::write_artifacts(&opts.output, &program, opts.debug_symbols)
        .with_context(|| format!("Failed to write output files: {}", opts.output.display()))?;

    println!(
        "Successfully assembled {} to {}.data / {}.text",
        opts.input.display(),
        opts.output.display(),
        opts.output.display()
    );

    Ok(())
}
