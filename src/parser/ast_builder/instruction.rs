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

use crate::ast::{Instruction, Register};
use crate::parser::Rule;
use crate::parser::ast_builder::AstBuilder;
use crate::parser::ast_builder::operand_builders::*;

impl AstBuilder<'_, '_, '_> {
    fn next_register(&mut self) -> Register {
        build_register(self.pairs.next().unwrap(), self.line_number, self.diag)
    }

    fn next_separator(&mut self) {
        let pair = self.pairs.next().unwrap();
        check_separator(&pair, self.line_number, self.diag);
    }

    fn next_number(&mut self) -> i64 {
        build_number(self.pairs.next().unwrap(), self.line_number, self.diag)
    }

    fn next_identifier(&mut self) -> String {
        self.pairs
            .find(|p| p.as_rule() == Rule::identifier)
            .unwrap()
            .as_str()
            .to_string()
    }

    fn three_registers(&mut self) -> (Register, Register, Register) {
        let first = self.next_register();
        self.next_separator();
        let second = self.next_register();
        self.next_separator();
        let third = self.next_register();
        (first, second, third)
    }

    pub fn build_and(mut self) -> Instruction {
        let (rd, rs, rt) = self.three_registers();
        Instruction::And(rd, rs, rt)
    }

    pub fn build_or(mut self) -> Instruction {
        let (rd, rs, rt) = self.three_registers();
        Instruction::Or(rd, rs, rt)
    }

    pub fn build_add(mut self) -> Instruction {
        let (rd, rs, rt) = self.three_registers();
        Instruction::Add(rd, rs, rt)
    }

    pub fn build_sub(mut self) -> Instruction {
        let (rd, rs, rt) = self.three_registers();
        Instruction::Sub(rd, rs, rt)
    }

    pub fn build_slt(mut self) -> Instruction {
        let (rd, rs, rt) = self.three_registers();
        Instruction::Slt(rd, rs, rt)
    }

    pub fn build_ori(mut self) -> Instruction {
        let rt = self.next_register();
        self.next_separator();
        let rs = self.next_register();
        self.next_separator();
        let imm = self.next_number();
        Instruction::Ori(rt, rs, imm)
    }

    pub fn build_lw(mut self) -> Instruction {
        let rt = self.next_register();
        self.next_separator();
        let (imm, base) = build_mem_operand(
            self.pairs.next().unwrap(),
            self.line_number,
            self.diag,
        );
        Instruction::Lw(rt, imm, base)
    }

    pub fn build_sw(mut self) -> Instruction {
        let rt = self.next_register();
        self.next_separator();
        let (imm, base) = build_mem_operand(
            self.pairs.next().unwrap(),
            self.line_number,
            self.diag,
        );
        Instruction::Sw(rt, imm, base)
    }

    pub fn build_lui(mut self) -> Instruction {
        let rt = self.next_register();
        self.next_separator();
        let imm = self.next_number();
        Instruction::Lui(rt, imm)
    }

    pub fn build_beq(mut self) -> Instruction {
        let rs = self.next_register();
        self.next_separator();
        let rt = self.next_register();
        self.next_separator();
        let target = self.next_identifier();
        Instruction::Beq(rs, rt, target)
    }

    pub fn build_j(mut self) -> Instruction {
        Instruction::J(self.next_identifier())
    }

    pub fn build_unknown_op(mut self) -> Instruction {
        let mnemonic = self
            .pairs
            .find(|p| p.as_rule() == Rule::keyword)
            .unwrap()
            .as_str()
            .to_string();
        Instruction::Unknown(mnemonic)
    }
}
