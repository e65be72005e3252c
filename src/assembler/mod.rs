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

pub mod encoder;
pub mod segment;
pub mod symbol_table;

use crate::AssembleOptions;
use crate::ast::{Directive, SourceLine};
use crate::diagnostics::Diagnostics;
use encoder::INSTRUCTION_SIZE;
use segment::{AddressCursor, DATA_ORG, Segment, SegmentId, TEXT_ORG};
use symbol_table::SymbolTable;

/// What pass 1 learns: every label's address, and the final size of each
/// segment (indexed by SegmentId).
pub struct Layout {
    pub symbols: SymbolTable,
    pub sizes: [u32; 2],
}

/// Pass 1: walk the source lines, assign every label its address, and tally
/// segment sizes. No bytes are written. Placement problems (statements in
/// the wrong segment, malformed data directives) are warned about here and
/// only here.
pub fn build_layout(
    lines: &[SourceLine],
    options: &AssembleOptions,
    diag: &mut Diagnostics,
) -> Layout {
    let mut symbols = SymbolTable::new();
    let mut cursor = AddressCursor::new();
    let mut current = SegmentId::Text;

    for line in lines {
        let n = line.line_number;
        if line.is_blank() {
            diag.trace(n, "Empty line");
            continue;
        }

        for label in &line.labels {
            let addr = cursor.get(current);
            if symbols.define(label, addr, current) {
                diag.trace(n, format_args!(" -> label {label}: 0x{addr:08x}"));
            } else {
                diag.warn(n, format_args!("duplicate label {label}"));
            }
        }

        if let Some(directive) = &line.directive {
            diag.trace(n, format_args!("directive: {directive}"));
            match directive {
                Directive::Data => current = SegmentId::Data,
                Directive::Text => current = SegmentId::Text,
                other => {
                    if current == SegmentId::Data {
                        warn_data_directive(other, n, diag);
                        let at = cursor.get(SegmentId::Data);
                        cursor.set(SegmentId::Data, data_advance(other, at, options));
                    } else {
                        diag.warn(n, "data directive in text segment");
                    }
                }
            }
        }

        if let Some(instruction) = &line.instruction {
            diag.trace(n, format_args!("instruction: {instruction}"));
            if current == SegmentId::Text {
                cursor.advance(SegmentId::Text, INSTRUCTION_SIZE);
            } else {
                diag.warn(n, "instruction outside text segment");
            }
        }
    }

    Layout {
        symbols,
        sizes: [
            cursor.offset(SegmentId::Data),
            cursor.offset(SegmentId::Text),
        ],
    }
}

/// Pass 2: walk the same lines again and emit bytes into zero-filled
/// buffers sized by pass 1. The cursor moves through `data_advance` and
/// INSTRUCTION_SIZE exactly as in pass 1, so every write lands where its
/// label says it will.
pub fn emit_segments(
    lines: &[SourceLine],
    layout: &Layout,
    options: &AssembleOptions,
    diag: &mut Diagnostics,
) -> [Segment; 2] {
    let mut segments = [
        Segment::new(SegmentId::Data, layout.sizes[0] as usize),
        Segment::new(SegmentId::Text, layout.sizes[1] as usize),
    ];
    let mut cursor = AddressCursor::new();
    let mut current = SegmentId::Text;

    for line in lines {
        let n = line.line_number;
        if line.is_blank() {
            diag.trace(n, "Empty line");
            continue;
        }

        if let Some(directive) = &line.directive {
            diag.trace(n, format_args!("directive: {directive}"));
            match directive {
                Directive::Data => current = SegmentId::Data,
                Directive::Text => current = SegmentId::Text,
                other if current == SegmentId::Data => {
                    let at = cursor.get(SegmentId::Data);
                    write_data(&mut segments[0], other, at, n, options, diag);
                    cursor.set(SegmentId::Data, data_advance(other, at, options));
                }
                _ => {} // wrong-segment statements were warned about in pass 1
            }
        }

        if let Some(instruction) = &line.instruction {
            diag.trace(n, format_args!("instruction: {instruction}"));
            if current == SegmentId::Text {
                let addr = cursor.get(SegmentId::Text);
                if let Some(word) = encoder::encode_instruction(
                    instruction,
                    &layout.symbols,
                    addr,
                    n,
                    options,
                    diag,
                ) {
                    let offset = (addr - TEXT_ORG) as usize;
                    segments[1].data[offset..offset + 4].copy_from_slice(&word.to_le_bytes());
                }
                cursor.advance(SegmentId::Text, INSTRUCTION_SIZE);
            }
        }
    }

    segments
}

// Shape warnings for data directives, reported once (pass 1).
fn warn_data_directive(directive: &Directive, line: usize, diag: &mut Diagnostics) {
    match directive {
        Directive::Ascii(None) | Directive::Asciiz(None) => {
            diag.warn(line, "expected string literal");
        }
        Directive::Align(Some(n)) if !(0..=16).contains(n) => diag.warn(line, "unknown alignment"),
        Directive::Align(None) => diag.warn(line, "unknown alignment"),
        Directive::Space(Some(n)) if *n < 0 => diag.warn(line, "invalid space size"),
        Directive::Unknown(keyword) => {
            diag.warn(line, format_args!("unknown data directive {keyword}"));
        }
        _ => {}
    }
}

// The data cursor movement for one directive. Used identically by both
// passes; emission must never disagree with this.
fn data_advance(directive: &Directive, at: u32, options: &AssembleOptions) -> u32 {
    match directive {
        Directive::Byte(values) => at + values.len() as u32,
        Directive::Half(values) => at + 2 * values.len() as u32,
        Directive::Word(values) => at + 4 * values.len() as u32,
        Directive::Ascii(Some(body)) => at + string_bytes(body, options).len() as u32,
        Directive::Asciiz(Some(body)) => at + string_bytes(body, options).len() as u32 + 1,
        Directive::Align(Some(n)) if (0..=16).contains(n) => align_up(at, 1u32 << *n as u32),
        Directive::Space(Some(n)) if *n >= 0 => at + *n as u32,
        _ => at,
    }
}

fn align_up(addr: u32, alignment: u32) -> u32 {
    let rem = addr % alignment;
    if rem == 0 { addr } else { addr + alignment - rem }
}

fn write_data(
    segment: &mut Segment,
    directive: &Directive,
    at: u32,
    line: usize,
    options: &AssembleOptions,
    diag: &mut Diagnostics,
) {
    let offset = (at - DATA_ORG) as usize;
    match directive {
        Directive::Byte(values) => {
            for (i, &v) in values.iter().enumerate() {
                if !(-0x80..=0xFF).contains(&v) && !options.compat_truncate {
                    diag.warn(line, format_args!("byte value out of range: {v}"));
                }
                segment.data[offset + i] = v as u8;
            }
        }
        Directive::Half(values) => {
            for (i, &v) in values.iter().enumerate() {
                if !(-0x8000..=0xFFFF).contains(&v) && !options.compat_truncate {
                    diag.warn(line, format_args!("halfword value out of range: {v}"));
                }
                let span = offset + 2 * i..offset + 2 * i + 2;
                segment.data[span].copy_from_slice(&(v as u16).to_le_bytes());
            }
        }
        Directive::Word(values) => {
            for (i, &v) in values.iter().enumerate() {
                if !(-0x8000_0000..=0xFFFF_FFFF).contains(&v) && !options.compat_truncate {
                    diag.warn(line, format_args!("word value out of range: {v}"));
                }
                let span = offset + 4 * i..offset + 4 * i + 4;
                segment.data[span].copy_from_slice(&(v as u32).to_le_bytes());
            }
        }
        Directive::Ascii(Some(body)) => {
            let bytes = string_bytes(body, options);
            segment.data[offset..offset + bytes.len()].copy_from_slice(&bytes);
        }
        Directive::Asciiz(Some(body)) => {
            let bytes = string_bytes(body, options);
            segment.data[offset..offset + bytes.len()].copy_from_slice(&bytes);
            // the NUL terminator is the zero fill
        }
        // .align and .space only move the cursor; the gap is the zero fill
        _ => {}
    }
}

// The bytes a string literal contributes. With escape processing off the
// body is taken verbatim; with it on, C-style sequences are decoded. The
// closing quote is handled by the grammar either way, so a quote can never
// be embedded.
fn string_bytes(body: &str, options: &AssembleOptions) -> Vec<u8> {
    if !options.process_escapes {
        return body.as_bytes().to_vec();
    }
    let src = body.as_bytes();
    let mut bytes = Vec::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        if src[i] != b'\\' || i + 1 == src.len() {
            bytes.push(src[i]);
            i += 1;
            continue;
        }
        i += 1;
        match src[i] {
            b'n' => {
                bytes.push(b'\n');
                i += 1;
            }
            b't' => {
                bytes.push(b'\t');
                i += 1;
            }
            b'r' => {
                bytes.push(b'\r');
                i += 1;
            }
            b'0' => {
                bytes.push(0);
                i += 1;
            }
            b'\\' => {
                bytes.push(b'\\');
                i += 1;
            }
            b'x' => {
                i += 1;
                let mut value = 0u8;
                let mut digits = 0;
                while digits < 2 && i < src.len() {
                    let Some(d) = (src[i] as char).to_digit(16) else {
                        break;
                    };
                    value = (value << 4) | d as u8;
                    i += 1;
                    digits += 1;
                }
                if digits == 0 {
                    bytes.push(b'x');
                } else {
                    bytes.push(value);
                }
            }
            // an unrecognized escape keeps the escaped character
            other => {
                bytes.push(other);
                i += 1;
            }
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_advance() {
        let options = AssembleOptions::default();
        let align1 = Directive::Align(Some(1));
        let align2 = Directive::Align(Some(2));
        assert_eq!(data_advance(&align1, DATA_ORG + 3, &options), DATA_ORG + 4);
        assert_eq!(data_advance(&align1, DATA_ORG + 4, &options), DATA_ORG + 4);
        assert_eq!(data_advance(&align2, DATA_ORG + 5, &options), DATA_ORG + 8);
        // generalized power-of-two alignment
        let align3 = Directive::Align(Some(3));
        assert_eq!(data_advance(&align3, DATA_ORG + 1, &options), DATA_ORG + 8);
        // out-of-range argument moves nothing
        let bad = Directive::Align(Some(40));
        assert_eq!(data_advance(&bad, DATA_ORG + 1, &options), DATA_ORG + 1);
    }

    #[test]
    fn test_asciiz_counts_terminator() {
        let options = AssembleOptions::default();
        let ascii = Directive::Ascii(Some("hi".to_string()));
        let asciiz = Directive::Asciiz(Some("hi".to_string()));
        assert_eq!(data_advance(&ascii, DATA_ORG, &options), DATA_ORG + 2);
        assert_eq!(data_advance(&asciiz, DATA_ORG, &options), DATA_ORG + 3);
    }

    #[test]
    fn test_string_bytes_verbatim_by_default() {
        let options = AssembleOptions::default();
        assert_eq!(string_bytes(r"a\nb", &options), b"a\\nb");
    }

    #[test]
    fn test_string_bytes_escapes() {
        let options = AssembleOptions {
            process_escapes: true,
            ..Default::default()
        };
        assert_eq!(string_bytes(r"a\nb", &options), b"a\nb");
        assert_eq!(string_bytes(r"\t\r\0\\", &options), b"\t\r\0\\");
        assert_eq!(string_bytes(r"\x41\x7", &options), b"A\x07");
        assert_eq!(string_bytes(r"\q", &options), b"q");
        // a trailing lone backslash stays a backslash
        assert_eq!(string_bytes("a\\", &options), b"a\\");
    }
}
