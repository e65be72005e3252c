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

mod ast_builder;

use crate::ast::*;
use crate::diagnostics::Diagnostics;
use crate::errors::AssemblyError;
use ast_builder::AstBuilder;
use pest::Parser;
use pest_derive::Parser;

// Derive the parser from our grammar file.
#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct MipsParser;

// Main parsing function that takes the entire source code string. Parsing
// happens exactly once; both assembler passes walk the returned lines.
// Recoverable lexical problems (missing commas, unknown register names)
// are reported through `diag` here, not during the passes.
pub fn parse_source(
    source: &str,
    diag: &mut Diagnostics,
) -> Result<Vec<SourceLine>, AssemblyError> {
    let program = MipsParser::parse(Rule::program, source)?.next().unwrap();
    let mut lines = Vec::new();

    for line_pair in program.into_inner().filter(|p| p.as_rule() == Rule::line) {
        let mut line = SourceLine {
            line_number: line_pair.as_span().start_pos().line_col().0,
            ..Default::default()
        };
        let mut junk: Option<String> = None;

        for part in line_pair.into_inner() {
            match part.as_rule() {
                Rule::label => {
                    line.labels
                        .push(part.into_inner().next().unwrap().as_str().to_string());
                }
                Rule::directive => {
                    let inner = part.into_inner().next().unwrap();
                    line.directive = Some(AstBuilder::new(inner, diag).build_directive());
                }
                Rule::instruction => {
                    let inner = part.into_inner().next().unwrap();
                    line.instruction = Some(AstBuilder::new(inner, diag).build_instruction());
                }
                Rule::junk => junk = Some(part.as_str().trim().to_string()),
                Rule::comment => line.comment = true,
                _ => {}
            }
        }

        // A line with nothing but unclassifiable text still occupies an
        // instruction slot, like any unrecognized mnemonic. Trailing text
        // after a complete statement is ignored.
        if line.instruction.is_none() && line.directive.is_none() {
            if let Some(text) = junk {
                line.instruction = Some(Instruction::Unknown(text));
            }
        }

        lines.push(line);
    }

    // The grammar always yields one line pair after the final newline;
    // the source has no such line.
    if lines.last().is_some_and(SourceLine::is_blank) {
        lines.pop();
    }

    Ok(lines)
}

// ------------- unit tests -------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MockSink;

    fn parse_ok(source: &str) -> (Vec<SourceLine>, Vec<String>) {
        let mut trace = MockSink::default();
        let mut warnings = MockSink::default();
        let mut diag = Diagnostics::new(&mut trace, &mut warnings);
        let lines = parse_source(source, &mut diag).unwrap();
        drop(diag);
        (lines, warnings.lines)
    }

    #[test]
    fn test_parse_empty_source() {
        let (lines, warnings) = parse_ok("");
        assert!(lines.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_add() {
        let (lines, warnings) = parse_ok("add $t0, $t1, $t2\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Add(Register(8), Register(9), Register(10)))
        );
        assert!(lines[0].labels.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_label_with_instruction() {
        let (lines, _) = parse_ok("main: or $v0, $a0, $s7\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].labels, vec!["main".to_string()]);
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Or(Register(2), Register(4), Register(23)))
        );
    }

    #[test]
    fn test_parse_multiple_labels_on_one_line() {
        let (lines, _) = parse_ok("first: second: sub $s0, $s1, $s2\n");
        assert_eq!(lines[0].labels, vec!["first", "second"]);
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Sub(Register(16), Register(17), Register(18)))
        );
    }

    #[test]
    fn test_parse_temporaries_upper_range() {
        let (lines, warnings) = parse_ok("slt $t8, $t9, $zero\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Slt(Register(24), Register(25), Register(0)))
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_lw_base_displacement() {
        let (lines, warnings) = parse_ok("lw $t0, -4($sp)\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Lw(Register(8), -4, Register(29)))
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_sw_missing_displacement_defaults_to_zero() {
        let (lines, _) = parse_ok("sw $ra, ($gp)\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Sw(Register(31), 0, Register(28)))
        );
    }

    #[test]
    fn test_parse_ori_and_lui() {
        let (lines, _) = parse_ok("ori $t0, $zero, 0xff\nlui $at, 0x1001\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Ori(Register(8), Register(0), 0xff))
        );
        assert_eq!(
            lines[1].instruction,
            Some(Instruction::Lui(Register(1), 0x1001))
        );
    }

    #[test]
    fn test_parse_beq_and_j() {
        let (lines, _) = parse_ok("beq $t0, $t1, end\nj loop\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Beq(Register(8), Register(9), "end".to_string()))
        );
        assert_eq!(lines[1].instruction, Some(Instruction::J("loop".to_string())));
    }

    #[test]
    fn test_parse_number_bases() {
        let (lines, warnings) = parse_ok(".word 0x10, 0b101, 017, 42\n");
        assert_eq!(
            lines[0].directive,
            Some(Directive::Word(vec![16, 5, 15, 42]))
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_comma_warns_and_recovers() {
        let (lines, warnings) = parse_ok("add $t0 $t1, $t2\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Add(Register(8), Register(9), Register(10)))
        );
        assert_eq!(warnings, vec!["1: warning: expected ,".to_string()]);
    }

    #[test]
    fn test_unknown_register_warns_and_substitutes_zero() {
        let (lines, warnings) = parse_ok("add $q9, $t1, $t2\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Add(Register(0), Register(9), Register(10)))
        );
        assert_eq!(warnings, vec!["1: warning: unknown register".to_string()]);
    }

    #[test]
    fn test_unknown_mnemonic_becomes_unknown() {
        let (lines, warnings) = parse_ok("frobnicate $t0, $t1\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::Unknown("frobnicate".to_string()))
        );
        // Not a parse-time warning; the encoding pass reports it.
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_comment_and_empty_lines() {
        let (lines, _) = parse_ok("\n# a comment\n; another\nadd $t0, $t1, $t2\n");
        assert_eq!(lines.len(), 4);
        assert!(lines[0].is_blank());
        assert!(lines[1].comment);
        assert!(lines[2].comment);
        assert_eq!(lines[3].line_number, 4);
    }

    #[test]
    fn test_trailing_comment_after_instruction() {
        let (lines, warnings) = parse_ok("and $t0, $t1, $t2 # mask\n");
        assert_eq!(
            lines[0].instruction,
            Some(Instruction::And(Register(8), Register(9), Register(10)))
        );
        assert!(lines[0].comment);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_asciiz() {
        let (lines, _) = parse_ok(".asciiz \"hi\"\n");
        assert_eq!(
            lines[0].directive,
            Some(Directive::Asciiz(Some("hi".to_string())))
        );
    }

    #[test]
    fn test_ascii_without_literal() {
        let (lines, _) = parse_ok(".ascii 5\n");
        assert_eq!(lines[0].directive, Some(Directive::Ascii(None)));
    }

    #[test]
    fn test_value_list_ends_at_missing_comma() {
        let (lines, _) = parse_ok(".byte 1 2\n");
        assert_eq!(lines[0].directive, Some(Directive::Byte(vec![1])));
    }

    #[test]
    fn test_parse_align_and_space() {
        let (lines, _) = parse_ok(".align 2\n.space 8\n");
        assert_eq!(lines[0].directive, Some(Directive::Align(Some(2))));
        assert_eq!(lines[1].directive, Some(Directive::Space(Some(8))));
    }

    #[test]
    fn test_unknown_directive() {
        let (lines, _) = parse_ok(".globl main\n");
        assert_eq!(
            lines[0].directive,
            Some(Directive::Unknown("globl".to_string()))
        );
    }

    #[test]
    fn test_segment_directives() {
        let (lines, _) = parse_ok(".data\n.text\n");
        assert_eq!(lines[0].directive, Some(Directive::Data));
        assert_eq!(lines[1].directive, Some(Directive::Text));
    }

    #[test]
    fn test_label_spelled_like_mnemonic_prefix() {
        // "j" followed by a digit is still the jump mnemonic; the target is
        // a (numeric) label name.
        let (lines, _) = parse_ok("j 2\n");
        assert_eq!(lines[0].instruction, Some(Instruction::J("2".to_string())));
    }

    #[test]
    fn test_source_without_trailing_newline() {
        let (lines, _) = parse_ok("add $t0, $t1, $t2");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].instruction.is_some());
    }
}
