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

pub mod fields;

use crate::AssembleOptions;
use crate::assembler::symbol_table::SymbolTable;
use crate::ast::Instruction;
use crate::diagnostics::Diagnostics;
use fields::*;

/// Every instruction in this subset occupies one 32-bit word.
pub const INSTRUCTION_SIZE: u32 = 4;

const FUNCT_AND: u8 = 0b100100;
const FUNCT_OR: u8 = 0b100101;
const FUNCT_ADD: u8 = 0b100000;
const FUNCT_SUB: u8 = 0b100010;
const FUNCT_SLT: u8 = 0b101010;

const OP_ORI: u8 = 0b001101;
const OP_LW: u8 = 0b100011;
const OP_SW: u8 = 0b101011;
const OP_LUI: u8 = 0b001111;
const OP_BEQ: u8 = 0b000100;
const OP_J: u8 = 0b000010;

fn resolve_label(symbols: &SymbolTable, label: &str, line: usize, diag: &mut Diagnostics) -> u32 {
    match symbols.lookup(label) {
        Some(addr) => addr,
        None => {
            diag.warn(line, format_args!("unresolved label {label}"));
            0
        }
    }
}

fn immediate_field(
    value: i64,
    line: usize,
    options: &AssembleOptions,
    diag: &mut Diagnostics,
) -> u16 {
    if !fits_imm16(value) && !options.compat_truncate {
        diag.warn(line, format_args!("immediate out of range: {value}"));
    }
    value as u16
}

/// Branch offsets count instructions from the slot after the branch.
fn relative_branch(from: u32, to: u32) -> i64 {
    ((to as i64) - (from as i64) - 4) >> 2
}

/// Translates one instruction into its word during pass 2. `addr` is the
/// absolute text address of the instruction itself. Returns None for an
/// unrecognized mnemonic; its slot keeps whatever the buffer holds (zero).
pub fn encode_instruction(
    instruction: &Instruction,
    symbols: &SymbolTable,
    addr: u32,
    line: usize,
    options: &AssembleOptions,
    diag: &mut Diagnostics,
) -> Option<u32> {
    match instruction {
        // ALU register instructions, R format: source order rd, rs, rt
        Instruction::And(rd, rs, rt) => Some(encode_r(
            0,
            rs.number(),
            rt.number(),
            rd.number(),
            0,
            FUNCT_AND,
        )),
        Instruction::Or(rd, rs, rt) => Some(encode_r(
            0,
            rs.number(),
            rt.number(),
            rd.number(),
            0,
            FUNCT_OR,
        )),
        Instruction::Add(rd, rs, rt) => Some(encode_r(
            0,
            rs.number(),
            rt.number(),
            rd.number(),
            0,
            FUNCT_ADD,
        )),
        Instruction::Sub(rd, rs, rt) => Some(encode_r(
            0,
            rs.number(),
            rt.number(),
            rd.number(),
            0,
            FUNCT_SUB,
        )),
        Instruction::Slt(rd, rs, rt) => Some(encode_r(
            0,
            rs.number(),
            rt.number(),
            rd.number(),
            0,
            FUNCT_SLT,
        )),
        Instruction::Ori(rt, rs, imm) => Some(encode_i(
            OP_ORI,
            rs.number(),
            rt.number(),
            immediate_field(*imm, line, options, diag),
        )),
        Instruction::Lw(rt, imm, base) => Some(encode_i(
            OP_LW,
            base.number(),
            rt.number(),
            immediate_field(*imm, line, options, diag),
        )),
        Instruction::Sw(rt, imm, base) => Some(encode_i(
            OP_SW,
            base.number(),
            rt.number(),
            immediate_field(*imm, line, options, diag),
        )),
        Instruction::Lui(rt, imm) => Some(encode_i(
            OP_LUI,
            0,
            rt.number(),
            immediate_field(*imm, line, options, diag),
        )),
        Instruction::Beq(rs, rt, label) => {
            let target = symbols.lookup(label);
            if target.is_none() {
                diag.warn(line, format_args!("unresolved label {label}"));
            }
            let offset = relative_branch(addr, target.unwrap_or(0));
            if target.is_some() && !fits_simm16(offset) && !options.compat_truncate {
                diag.warn(line, format_args!("branch target out of range: {label}"));
            }
            Some(encode_i(OP_BEQ, rs.number(), rt.number(), offset as u16))
        }
        Instruction::J(label) => Some(encode_j(OP_J, resolve_label(symbols, label, line, diag))),
        Instruction::Unknown(_) => {
            diag.warn(line, "unknown instruction");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::segment::SegmentId;
    use crate::ast::Register;
    use crate::diagnostics::MockSink;

    fn encode(
        instruction: &Instruction,
        symbols: &SymbolTable,
        addr: u32,
    ) -> (Option<u32>, Vec<String>) {
        let mut trace = MockSink::default();
        let mut warnings = MockSink::default();
        let mut diag = Diagnostics::new(&mut trace, &mut warnings);
        let word = encode_instruction(
            instruction,
            symbols,
            addr,
            1,
            &AssembleOptions::default(),
            &mut diag,
        );
        drop(diag);
        (word, warnings.lines)
    }

    #[test]
    fn test_forward_branch_offset() {
        let mut symbols = SymbolTable::new();
        symbols.define("end", 0x0040_0008, SegmentId::Text);
        let beq = Instruction::Beq(Register(8), Register(9), "end".to_string());
        let (word, warnings) = encode(&beq, &symbols, 0x0040_0000);
        assert_eq!(word, Some(0x11090001));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_backward_branch_wraps_negative() {
        let mut symbols = SymbolTable::new();
        symbols.define("loop", 0x0040_0000, SegmentId::Text);
        let beq = Instruction::Beq(Register(0), Register(0), "loop".to_string());
        // branch at 0x00400008: offset = (0 - 8 - 4) / 4 = -3
        let (word, _) = encode(&beq, &symbols, 0x0040_0008);
        assert_eq!(word, Some(encode_i(OP_BEQ, 0, 0, (-3i16) as u16)));
    }

    #[test]
    fn test_lui_uses_its_own_opcode() {
        let symbols = SymbolTable::new();
        let lui = Instruction::Lui(Register(8), 0x1001);
        let (word, _) = encode(&lui, &symbols, 0x0040_0000);
        assert_eq!(word, Some(0x3C081001));
    }

    #[test]
    fn test_unresolved_label_warns_and_encodes_zero() {
        let symbols = SymbolTable::new();
        let jump = Instruction::J("nowhere".to_string());
        let (word, warnings) = encode(&jump, &symbols, 0x0040_0000);
        assert_eq!(word, Some(0x08000000));
        assert_eq!(warnings, vec!["1: warning: unresolved label nowhere"]);
    }

    #[test]
    fn test_unknown_mnemonic_warns_and_leaves_slot() {
        let symbols = SymbolTable::new();
        let bad = Instruction::Unknown("mul".to_string());
        let (word, warnings) = encode(&bad, &symbols, 0x0040_0000);
        assert_eq!(word, None);
        assert_eq!(warnings, vec!["1: warning: unknown instruction"]);
    }

    #[test]
    fn test_out_of_range_immediate_warns_by_default() {
        let symbols = SymbolTable::new();
        let ori = Instruction::Ori(Register(8), Register(0), 0x12345);
        let (word, warnings) = encode(&ori, &symbols, 0x0040_0000);
        assert_eq!(word, Some(encode_i(OP_ORI, 0, 8, 0x2345)));
        assert_eq!(warnings, vec!["1: warning: immediate out of range: 74565"]);
    }

    #[test]
    fn test_compat_truncate_masks_silently() {
        let symbols = SymbolTable::new();
        let ori = Instruction::Ori(Register(8), Register(0), 0x12345);
        let mut trace = MockSink::default();
        let mut warnings = MockSink::default();
        let mut diag = Diagnostics::new(&mut trace, &mut warnings);
        let options = AssembleOptions {
            compat_truncate: true,
            ..Default::default()
        };
        let word = encode_instruction(&ori, &symbols, 0x0040_0000, 1, &options, &mut diag);
        drop(diag);
        assert_eq!(word, Some(encode_i(OP_ORI, 0, 8, 0x2345)));
        assert!(warnings.lines.is_empty());
    }
}
