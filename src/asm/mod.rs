#![allow(clippy::cast_possible_truncation)]

mod error;
mod lexer;
mod parser;

pub use error::{AsmError, AsmErrorKind};
pub use lexer::TokenKind;

use parser::LineParser;

/// Assembles source text into a flat binary image: one encoded instruction
/// per line, in input order, with no header and no relocation.
///
/// Empty lines and lines starting with `;` or `#` produce no output. The
/// first malformed line aborts the run; there is no multi-error mode and no
/// partial output.
pub fn assemble(source: &str) -> Result<Vec<u8>, AsmError> {
    let mut image = Vec::new();
    let mut line_start = 0;

    for (idx, raw) in source.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches('\n').trim_end_matches('\r');
        if !(line.is_empty() || line.starts_with(';') || line.starts_with('#')) {
            let line_no = idx as u32 + 1;
            let isn = LineParser::new(line, line_no, line_start).parse()?;
            image.extend_from_slice(&isn.encode());
        }
        line_start += raw.len();
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::{Instruction, Opcode, Reg};

    fn error_of(source: &str) -> AsmError {
        assemble(source).expect_err("source should not assemble")
    }

    #[test]
    fn comments_and_blank_lines_emit_nothing() {
        let image = assemble("; a comment\n\n# another\n\n").unwrap();
        assert!(image.is_empty());
    }

    #[test]
    fn two_line_program_is_sixteen_bytes() {
        let image = assemble("mov gp0, 0x5\nhlt\n").unwrap();
        assert_eq!(image.len(), 16);
        assert_eq!(
            image[..8],
            Instruction::with_imm(Opcode::Mov, Reg::Gp0, 5).encode()
        );
        assert_eq!(image[8..], Instruction::nullary(Opcode::Hlt).encode());
    }

    #[test]
    fn last_line_without_newline() {
        let image = assemble("nop").unwrap();
        assert_eq!(image, Instruction::nullary(Opcode::Nop).encode());
    }

    #[test]
    fn crlf_line_endings() {
        let image = assemble("nop\r\nhlt\r\n").unwrap();
        assert_eq!(image.len(), 16);
    }

    #[test]
    fn mnemonics_are_case_insensitive() {
        assert_eq!(
            assemble("MOV gp0, 0x5").unwrap(),
            assemble("mov gp0, 0x5").unwrap()
        );
    }

    #[test]
    fn comma_space_optional() {
        assert_eq!(
            assemble("add gp0,gp1").unwrap(),
            assemble("add gp0, gp1").unwrap()
        );
    }

    #[test]
    fn two_spaces_after_comma_is_an_error() {
        assert_eq!(error_of("add gp0,  gp1").kind, AsmErrorKind::MissingOperand);
    }

    #[test]
    fn space_before_comma_is_an_error() {
        assert_eq!(
            error_of("add gp0 , gp1").kind,
            AsmErrorKind::MissingSeparator
        );
    }

    #[test]
    fn missing_comma() {
        assert_eq!(error_of("add gp0 gp1").kind, AsmErrorKind::MissingSeparator);
    }

    #[test]
    fn missing_second_operand() {
        assert_eq!(error_of("add gp0,").kind, AsmErrorKind::MissingOperand);
    }

    #[test]
    fn unknown_register_is_line_numbered() {
        let err = error_of("nop\nadd gp0, gp9");
        assert_eq!(err.kind, AsmErrorKind::UnknownRegister);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn uppercase_register_is_unknown() {
        assert_eq!(error_of("not GP0").kind, AsmErrorKind::UnknownRegister);
    }

    #[test]
    fn unknown_mnemonic() {
        let err = error_of("frob gp0");
        assert_eq!(err.kind, AsmErrorKind::UnknownMnemonic);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn mnemonic_match_is_exact_not_prefix() {
        assert_eq!(error_of("hltfoo").kind, AsmErrorKind::UnknownMnemonic);
    }

    #[test]
    fn nullary_ignores_the_rest_of_the_line() {
        let image = assemble("hlt anything at all").unwrap();
        assert_eq!(image, Instruction::nullary(Opcode::Hlt).encode());
    }

    #[test]
    fn hex_and_decimal_immediates_agree() {
        assert_eq!(
            assemble("mov gp3, 0x10").unwrap(),
            assemble("mov gp3, 16").unwrap()
        );
    }

    #[test]
    fn negative_decimal_wraps_into_the_field() {
        let image = assemble("mov gp0, -1").unwrap();
        let isn = Instruction::with_imm(Opcode::Mov, Reg::Gp0, u32::MAX);
        assert_eq!(image, isn.encode());
    }

    #[test]
    fn bad_immediate() {
        assert_eq!(error_of("mov gp0, zzz").kind, AsmErrorKind::BadImmediate);
    }

    #[test]
    fn trailing_input_after_operands() {
        assert_eq!(error_of("jmp gp0 gp1").kind, AsmErrorKind::TrailingInput);
    }

    #[test]
    fn sto_takes_register_and_immediate() {
        let image = assemble("sto gp2, 0x100").unwrap();
        let isn = Instruction::with_imm(Opcode::Sto, Reg::Gp2, 0x100);
        assert_eq!(image, isn.encode());
    }
}
