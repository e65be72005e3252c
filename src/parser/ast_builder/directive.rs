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

use crate::ast::Directive;
use crate::parser::Rule;
use crate::parser::ast_builder::AstBuilder;
use crate::parser::ast_builder::operand_builders::{build_number, string_body};

impl AstBuilder<'_, '_, '_> {
    // Collects the operand values of a .byte/.half/.word list. A missing
    // comma ends the list; whatever follows is ignored.
    fn value_list(&mut self) -> Vec<i64> {
        let mut values = Vec::new();
        let Some(list) = self.pairs.find(|p| p.as_rule() == Rule::value_list) else {
            return values;
        };
        for pair in list.into_inner() {
            match pair.as_rule() {
                Rule::number => values.push(build_number(pair, self.line_number, self.diag)),
                Rule::sep => {
                    if pair.as_str().is_empty() {
                        break;
                    }
                }
                _ => {}
            }
        }
        values
    }

    fn string_operand(&mut self) -> Option<String> {
        self.pairs
            .find(|p| p.as_rule() == Rule::string)
            .map(string_body)
    }

    fn number_operand(&mut self) -> Option<i64> {
        let pair = self.pairs.find(|p| p.as_rule() == Rule::number)?;
        Some(build_number(pair, self.line_number, self.diag))
    }

    pub fn build_byte_directive(mut self) -> Directive {
        Directive::Byte(self.value_list())
    }

    pub fn build_half_directive(mut self) -> Directive {
        Directive::Half(self.value_list())
    }

    pub fn build_word_directive(mut self) -> Directive {
        Directive::Word(self.value_list())
    }

    // A missing string literal is kept as None; the sizing pass warns about
    // it in segment context.
    pub fn build_ascii_directive(mut self) -> Directive {
        Directive::Ascii(self.string_operand())
    }

    pub fn build_asciiz_directive(mut self) -> Directive {
        Directive::Asciiz(self.string_operand())
    }

    pub fn build_align_directive(mut self) -> Directive {
        Directive::Align(self.number_operand())
    }

    pub fn build_space_directive(mut self) -> Directive {
        Directive::Space(self.number_operand())
    }

    pub fn build_unknown_directive(mut self) -> Directive {
        let keyword = self
            .pairs
            .find(|p| p.as_rule() == Rule::keyword)
            .unwrap()
            .as_str()
            .to_string();
        Directive::Unknown(keyword)
    }
}
