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

pub mod assembler;
pub mod ast;
pub mod diagnostics;
pub mod errors;
pub mod output;
pub mod parser;

use anyhow::{Context, Result};
use assembler::segment::{Segment, SegmentId};
use assembler::symbol_table::SymbolTable;
use diagnostics::Diagnostics;

extern crate pest;
extern crate pest_derive;

/// Knobs for deliberate deviations from the default assembly behavior.
#[derive(Debug, Default, Clone)]
pub struct AssembleOptions {
    /// Silently mask over-wide operand values to their field width instead
    /// of warning first.
    pub compat_truncate: bool,
    /// Decode C-style escape sequences in string literals. A `"` still
    /// always terminates the literal.
    pub process_escapes: bool,
}

/// Everything one assembly run produces: the two segment images and the
/// symbol table. The caller owns it.
pub struct Program {
    pub segments: [Segment; 2],
    pub symbols: SymbolTable,
}

impl Program {
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id as usize]
    }

    pub fn data(&self) -> &Segment {
        self.segment(SegmentId::Data)
    }

    pub fn text(&self) -> &Segment {
        self.segment(SegmentId::Text)
    }
}

/// Assembles `source` in two passes over a single parse: pass 1 sizes the
/// segments and binds every label, pass 2 emits bytes into exactly-sized
/// zeroed buffers. Trace and warning lines go to `diag`; recoverable
/// problems never fail the run.
pub fn assemble(
    source: &str,
    options: &AssembleOptions,
    diag: &mut Diagnostics,
) -> Result<Program> {
    let lines = parser::parse_source(source, diag).context("Failed during parsing stage")?;

    diag.banner("=== FIRST PASS ===");
    let layout = assembler::build_layout(&lines, options, diag);
    diag.banner("");

    diag.banner("=== SECOND PASS ===");
    let segments = assembler::emit_segments(&lines, &layout, options, diag);
    diag.banner("");

    Ok(Program {
        segments,
        symbols: layout.symbols,
    })
}
