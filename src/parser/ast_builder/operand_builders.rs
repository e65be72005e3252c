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

use crate::ast::Register;
use crate::diagnostics::Diagnostics;
use crate::parser::Rule;
use crate::parser::ast_builder::utility_functions::{parse_number, resolve_register};
use pest::iterators::Pair;

// build a register from a pair; unrecognized names warn and read as $zero
pub fn build_register(pair: Pair<Rule>, line: usize, diag: &mut Diagnostics) -> Register {
    let name = pair.into_inner().next().unwrap().as_str();
    match resolve_register(name) {
        Some(number) => Register(number),
        None => {
            diag.warn(line, "unknown register");
            Register::ZERO
        }
    }
}

// The separator token always matches; its text says whether the comma was
// actually there.
pub fn check_separator(pair: &Pair<Rule>, line: usize, diag: &mut Diagnostics) {
    if pair.as_str() != "," {
        diag.warn(line, "expected ,");
    }
}

pub fn build_number(pair: Pair<Rule>, line: usize, diag: &mut Diagnostics) -> i64 {
    let text = pair.as_str();
    match parse_number(text) {
        Some(value) => value,
        None => {
            diag.warn(line, format_args!("invalid numeric literal {text}"));
            0
        }
    }
}

// build a base-displacement operand; a missing displacement reads as 0
pub fn build_mem_operand(
    pair: Pair<Rule>,
    line: usize,
    diag: &mut Diagnostics,
) -> (i64, Register) {
    let mut displacement = 0;
    let mut base = Register::ZERO;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => displacement = build_number(inner, line, diag),
            Rule::register => base = build_register(inner, line, diag),
            _ => {}
        }
    }
    (displacement, base)
}

pub fn string_body(pair: Pair<Rule>) -> String {
    pair.into_inner().next().unwrap().as_str().to_string()
}
