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

use crate::Program;
use crate::assembler::segment::SegmentId;
use crate::assembler::symbol_table::SymbolTable;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The debug symbol artifact: one `label:0x<address>` line per symbol, data
/// segment first, each group in definition order.
pub fn write_symbols<W: Write>(symbols: &SymbolTable, out: &mut W) -> io::Result<()> {
    for id in SegmentId::ALL {
        for symbol in symbols.in_segment(id) {
            writeln!(out, "{}:0x{:08x}", symbol.name, symbol.address)?;
        }
    }
    Ok(())
}

/// The human-readable symbol listing shown in verbose mode.
pub fn print_symbols<W: Write>(program: &Program, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== SYMBOL TABLE ===")?;
    writeln!(out, "segment")?;
    writeln!(out, "  label           address")?;
    writeln!(out, "----------------------------")?;
    for id in SegmentId::ALL {
        writeln!(out, "{} [{}]", id.name(), program.segment(id).size())?;
        for symbol in program.symbols.in_segment(id) {
            let pad = 16usize.saturating_sub(symbol.name.len() + 1);
            writeln!(
                out,
                "  {}:{:pad$}0x{:08x}",
                symbol.name,
                "",
                symbol.address,
                pad = pad
            )?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// A 16-byte-wide hex dump of both segments with an ASCII gutter, shown in
/// verbose mode.
pub fn dump_segments<W: Write>(program: &Program, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== SEGMENT DUMP ===")?;
    for id in SegmentId::ALL {
        let segment = program.segment(id);
        writeln!(out, "{} [{}]", id.name(), segment.size())?;
        writeln!(
            out,
            "            0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f"
        )?;
        for (row_index, row) in segment.data.chunks(16).enumerate() {
            let addr = id.origin() + (row_index * 16) as u32;
            write!(out, "{addr:08x} ")?;
            for i in 0..16 {
                match row.get(i) {
                    Some(b) => write!(out, " {b:02x}")?,
                    None => write!(out, "   ")?,
                }
            }
            write!(out, "  |")?;
            for &b in row {
                let c = if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                };
                write!(out, "{c}")?;
            }
            writeln!(out, "|")?;
        }
    }
    Ok(())
}

/// Artifact names are the output stem plus an extension, so a stem of
/// `build/prog` yields `build/prog.data`, `build/prog.text`, `build/prog.sym`.
pub fn artifact_path(stem: &Path, extension: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(format!(".{extension}"));
    PathBuf::from(name)
}

pub fn write_artifacts(stem: &Path, program: &Program, debug_symbols: bool) -> io::Result<()> {
    fs::write(artifact_path(stem, "data"), &program.data().data)?;
    fs::write(artifact_path(stem, "text"), &program.text().data)?;
    if debug_symbols {
        let mut file = fs::File::create(artifact_path(stem, "sym"))?;
        write_symbols(&program.symbols, &mut file)?;
    }
    Ok(())
}
