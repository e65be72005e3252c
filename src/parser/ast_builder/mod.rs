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

mod directive;
mod instruction;
mod operand_builders;
mod utility_functions;

use crate::ast::{Directive, Instruction};
use crate::diagnostics::Diagnostics;
use crate::parser::Rule;
use pest::iterators::{Pair, Pairs};

// Builds one statement from its pest pair. Construction records the rule and
// line number; the build methods walk the inner pairs in grammar order.
// Building never fails: anything recoverable warns through `diag` instead.
pub struct AstBuilder<'a, 'd, 'k> {
    line_number: usize,
    rule: Rule,
    pairs: Pairs<'a, Rule>,
    diag: &'d mut Diagnostics<'k>,
}

impl<'a, 'd, 'k> AstBuilder<'a, 'd, 'k> {
    pub fn new(pair: Pair<'a, Rule>, diag: &'d mut Diagnostics<'k>) -> Self {
        Self {
            line_number: pair.as_span().start_pos().line_col().0,
            rule: pair.as_rule(),
            pairs: pair.into_inner(),
            diag,
        }
    }

    pub fn build_instruction(self) -> Instruction {
        match self.rule {
            Rule::and_op => self.build_and(),
            Rule::or_op => self.build_or(),
            Rule::add_op => self.build_add(),
            Rule::sub_op => self.build_sub(),
            Rule::slt_op => self.build_slt(),
            Rule::ori_op => self.build_ori(),
            Rule::lw_op => self.build_lw(),
            Rule::sw_op => self.build_sw(),
            Rule::lui_op => self.build_lui(),
            Rule::beq_op => self.build_beq(),
            Rule::j_op => self.build_j(),
            Rule::unknown_op => self.build_unknown_op(),
            _ => unreachable!("Unknown instruction rule: {:?}", self.rule),
        }
    }

    pub fn build_directive(self) -> Directive {
        match self.rule {
            Rule::seg_data => Directive::Data,
            Rule::seg_text => Directive::Text,
            Rule::byte_directive => self.build_byte_directive(),
            Rule::half_directive => self.build_half_directive(),
            Rule::word_directive => self.build_word_directive(),
            Rule::ascii_directive => self.build_ascii_directive(),
            Rule::asciiz_directive => self.build_asciiz_directive(),
            Rule::align_directive => self.build_align_directive(),
            Rule::space_directive => self.build_space_directive(),
            Rule::unknown_directive => self.build_unknown_directive(),
            _ => unreachable!("Unknown directive rule: {:?}", self.rule),
        }
    }
}
