#![allow(clippy::cast_possible_truncation)]

use crate::asm::error::{AsmError, AsmErrorKind};
use crate::asm::lexer::TokenKind;
use crate::isa::{Instruction, Opcode, Reg};
use logos::Logos;
use std::ops::Range;
use text_size::{TextRange, TextSize};

/// Operand grammar of a mnemonic.
enum Form {
    // hlt
    Nullary,
    // not REG
    Unary,
    // add REG1, REG2
    Binary,
    // mov REG, IMM
    UnaryImm,
}

/// Exact-mnemonic dispatch: each keyword token maps to its opcode and operand
/// form. Unknown mnemonics never reach this table because the lexer only
/// produces keyword tokens for exact (case-insensitive) matches.
fn mnemonic(kind: TokenKind) -> Option<(Opcode, Form)> {
    use TokenKind::*;

    Some(match kind {
        Hlt => (Opcode::Hlt, Form::Nullary),
        Nop => (Opcode::Nop, Form::Nullary),
        Cmp => (Opcode::Cmp, Form::Binary),
        Add => (Opcode::Add, Form::Binary),
        Sub => (Opcode::Sub, Form::Binary),
        Mul => (Opcode::Mul, Form::Binary),
        Div => (Opcode::Div, Form::Binary),
        And => (Opcode::And, Form::Binary),
        Or => (Opcode::Or, Form::Binary),
        Xor => (Opcode::Xor, Form::Binary),
        Not => (Opcode::Not, Form::Unary),
        Jmp => (Opcode::Jmp, Form::Unary),
        Jeq => (Opcode::Jeq, Form::Unary),
        Jlt => (Opcode::Jlt, Form::Unary),
        Jle => (Opcode::Jle, Form::Unary),
        Jgt => (Opcode::Jgt, Form::Unary),
        Jge => (Opcode::Jge, Form::Unary),
        Mov => (Opcode::Mov, Form::UnaryImm),
        Sto => (Opcode::Sto, Form::UnaryImm),
        Ior => (Opcode::Ior, Form::Unary),
        Iow => (Opcode::Iow, Form::Unary),
        _ => return None,
    })
}

/// A strict micro-parser over one line of source. Operand spacing is part of
/// the grammar: one mandatory space after the mnemonic, and at most one space
/// after a comma.
pub(crate) struct LineParser<'a> {
    line: &'a str,
    line_no: u32,
    /// Byte offset of the line within the full source, for diagnostics.
    line_start: usize,
    tokens: Vec<(TokenKind, Range<usize>)>,
    pos: usize,
}

impl<'a> LineParser<'a> {
    pub(crate) fn new(line: &'a str, line_no: u32, line_start: usize) -> Self {
        Self {
            line,
            line_no,
            line_start,
            tokens: TokenKind::lexer(line).spanned().collect(),
            pos: 0,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Instruction, AsmError> {
        let (op, form) = match self.next() {
            Some((kind, range)) => match mnemonic(kind) {
                Some(found) => found,
                None => return Err(self.error(AsmErrorKind::UnknownMnemonic, range)),
            },
            None => return Err(self.error(AsmErrorKind::UnknownMnemonic, self.eol())),
        };

        match form {
            // The rest of the line is ignored for operand-less mnemonics.
            Form::Nullary => Ok(Instruction::nullary(op)),
            Form::Unary => {
                self.expect_space()?;
                let reg1 = self.expect_register()?;
                self.expect_end()?;
                Ok(Instruction::unary(op, reg1))
            }
            Form::Binary => {
                self.expect_space()?;
                let reg1 = self.expect_register()?;
                self.expect_separator()?;
                let reg2 = self.expect_register()?;
                self.expect_end()?;
                Ok(Instruction::binary(op, reg1, reg2))
            }
            Form::UnaryImm => {
                self.expect_space()?;
                let reg1 = self.expect_register()?;
                self.expect_separator()?;
                let imm = self.expect_immediate()?;
                self.expect_end()?;
                Ok(Instruction::with_imm(op, reg1, imm))
            }
        }
    }

    fn next(&mut self) -> Option<(TokenKind, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek(&self) -> Option<(TokenKind, Range<usize>)> {
        self.tokens.get(self.pos).cloned()
    }

    fn slice(&self, range: &Range<usize>) -> &'a str {
        &self.line[range.clone()]
    }

    fn eol(&self) -> Range<usize> {
        self.line.len()..self.line.len()
    }

    fn error(&self, kind: AsmErrorKind, range: Range<usize>) -> AsmError {
        AsmError {
            line: self.line_no,
            range: TextRange::new(
                TextSize::from((self.line_start + range.start) as u32),
                TextSize::from((self.line_start + range.end) as u32),
            ),
            kind,
        }
    }

    /// The single mandatory space between a mnemonic and its operands.
    fn expect_space(&mut self) -> Result<(), AsmError> {
        match self.next() {
            Some((TokenKind::Whitespace, range)) if self.slice(&range) == " " => Ok(()),
            Some((_, range)) => Err(self.error(AsmErrorKind::MissingOperand, range)),
            None => Err(self.error(AsmErrorKind::MissingOperand, self.eol())),
        }
    }

    fn expect_register(&mut self) -> Result<Reg, AsmError> {
        match self.next() {
            Some((TokenKind::Register, range)) => Reg::from_name(self.slice(&range))
                .ok_or_else(|| self.error(AsmErrorKind::UnknownRegister, range)),
            Some((_, range)) => Err(self.error(AsmErrorKind::UnknownRegister, range)),
            None => Err(self.error(AsmErrorKind::MissingOperand, self.eol())),
        }
    }

    /// A comma followed by at most one space.
    fn expect_separator(&mut self) -> Result<(), AsmError> {
        match self.next() {
            Some((TokenKind::Comma, _)) => {}
            Some((_, range)) => return Err(self.error(AsmErrorKind::MissingSeparator, range)),
            None => return Err(self.error(AsmErrorKind::MissingSeparator, self.eol())),
        }
        if let Some((TokenKind::Whitespace, range)) = self.peek() {
            if self.slice(&range) != " " {
                return Err(self.error(AsmErrorKind::MissingOperand, range));
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// `0x`-prefixed hexadecimal, or signed decimal. Nothing else.
    fn expect_immediate(&mut self) -> Result<u32, AsmError> {
        match self.next() {
            Some((TokenKind::HexLiteral, range)) => {
                let digits = &self.slice(&range)[2..];
                u32::from_str_radix(digits, 16)
                    .map_err(|_| self.error(AsmErrorKind::BadImmediate, range))
            }
            Some((TokenKind::IntLiteral, range)) => self
                .slice(&range)
                .parse::<i32>()
                .map(|value| value as u32)
                .map_err(|_| self.error(AsmErrorKind::BadImmediate, range)),
            Some((_, range)) => Err(self.error(AsmErrorKind::BadImmediate, range)),
            None => Err(self.error(AsmErrorKind::MissingOperand, self.eol())),
        }
    }

    fn expect_end(&mut self) -> Result<(), AsmError> {
        match self.next() {
            None => Ok(()),
            Some((_, range)) => {
                let range = range.start..self.line.len();
                Err(self.error(AsmErrorKind::TrailingInput, range))
            }
        }
    }
}
