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

use std::fmt;

/// A MIPS general-purpose register, held by its 5-bit number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Register(pub u8);

impl Register {
    pub const ZERO: Register = Register(0);

    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

// Represents a single instruction. Operands appear in source order; the
// encoder is responsible for shuffling them into field order.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    And(Register, Register, Register), // and rd, rs, rt
    Or(Register, Register, Register),  // or rd, rs, rt
    Add(Register, Register, Register), // add rd, rs, rt
    Sub(Register, Register, Register), // sub rd, rs, rt
    Slt(Register, Register, Register), // slt rd, rs, rt
    Ori(Register, Register, i64),      // ori rt, rs, imm
    Lw(Register, i64, Register),       // lw rt, imm(rs)
    Sw(Register, i64, Register),       // sw rt, imm(rs)
    Lui(Register, i64),                // lui rt, imm
    Beq(Register, Register, String),   // beq rs, rt, label
    J(String),                         // j label
    // Anything that matched no known form; the raw line text is kept for the
    // trace stream. Occupies one instruction slot like any other mnemonic.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Data,
    Text,
    Byte(Vec<i64>),
    Half(Vec<i64>),
    Word(Vec<i64>),
    // None means the operand was not a string literal; the sizing pass warns.
    Ascii(Option<String>),
    Asciiz(Option<String>),
    Align(Option<i64>),
    Space(Option<i64>),
    Unknown(String),
}

// Represents a single line of source: zero or more labels, then at most one
// directive or instruction.
#[derive(Debug, Clone, Default)]
pub struct SourceLine {
    pub line_number: usize,
    pub labels: Vec<String>,
    pub instruction: Option<Instruction>,
    pub directive: Option<Directive>,
    pub comment: bool,
}

impl SourceLine {
    /// True when the line carries nothing at all, not even a comment.
    pub fn is_blank(&self) -> bool {
        self.labels.is_empty()
            && self.instruction.is_none()
            && self.directive.is_none()
            && !self.comment
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::And(rd, rs, rt) => write!(f, "and {rd}, {rs}, {rt}"),
            Instruction::Or(rd, rs, rt) => write!(f, "or {rd}, {rs}, {rt}"),
            Instruction::Add(rd, rs, rt) => write!(f, "add {rd}, {rs}, {rt}"),
            Instruction::Sub(rd, rs, rt) => write!(f, "sub {rd}, {rs}, {rt}"),
            Instruction::Slt(rd, rs, rt) => write!(f, "slt {rd}, {rs}, {rt}"),
            Instruction::Ori(rt, rs, imm) => write!(f, "ori {rt}, {rs}, {imm}"),
            Instruction::Lw(rt, imm, base) => write!(f, "lw {rt}, {imm}({base})"),
            Instruction::Sw(rt, imm, base) => write!(f, "sw {rt}, {imm}({base})"),
            Instruction::Lui(rt, imm) => write!(f, "lui {rt}, {imm}"),
            Instruction::Beq(rs, rt, label) => write!(f, "beq {rs}, {rt}, {label}"),
            Instruction::J(label) => write!(f, "j {label}"),
            Instruction::Unknown(text) => f.write_str(text.trim_end()),
        }
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, name: &str, values: &[i64]) -> fmt::Result {
    write!(f, ".{name}")?;
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            write!(f, " {v}")?;
        } else {
            write!(f, ", {v}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Data => f.write_str(".data"),
            Directive::Text => f.write_str(".text"),
            Directive::Byte(values) => write_values(f, "byte", values),
            Directive::Half(values) => write_values(f, "half", values),
            Directive::Word(values) => write_values(f, "word", values),
            Directive::Ascii(Some(body)) => write!(f, ".ascii \"{body}\""),
            Directive::Ascii(None) => f.write_str(".ascii"),
            Directive::Asciiz(Some(body)) => write!(f, ".asciiz \"{body}\""),
            Directive::Asciiz(None) => f.write_str(".asciiz"),
            Directive::Align(Some(n)) => write!(f, ".align {n}"),
            Directive::Align(None) => f.write_str(".align"),
            Directive::Space(Some(n)) => write!(f, ".space {n}"),
            Directive::Space(None) => f.write_str(".space"),
            Directive::Unknown(keyword) => write!(f, ".{keyword}"),
        }
    }
}
