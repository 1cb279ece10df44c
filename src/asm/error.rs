use crate::common::config::{Diagnostic, Process, VmDiagnostic};
use codespan_reporting::diagnostic::{Label, Severity};
use std::fmt;
use text_size::TextRange;

/// An assembly-time error. Always fatal: the assembler reports the first one
/// and aborts the whole run without emitting any output.
#[derive(Debug, Clone)]
pub struct AsmError {
    /// 1-based source line.
    pub line: u32,
    pub range: TextRange,
    pub kind: AsmErrorKind,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AsmErrorKind {
    UnknownMnemonic,
    UnknownRegister,
    MissingOperand,
    MissingSeparator,
    BadImmediate,
    TrailingInput,
}

impl AsmError {
    fn message(&self) -> &'static str {
        use AsmErrorKind::*;

        match self.kind {
            UnknownMnemonic => "unknown instruction",
            UnknownRegister => "unknown register",
            MissingOperand | MissingSeparator | TrailingInput => "malformed line",
            BadImmediate => "malformed immediate value",
        }
    }

    fn label(&self) -> &'static str {
        use AsmErrorKind::*;

        match self.kind {
            UnknownMnemonic => "not a known mnemonic",
            UnknownRegister => "expected one of gp0..gp7",
            MissingOperand => "missing an operand?",
            MissingSeparator => "missing a `,` separator?",
            BadImmediate => "not dec/hex?",
            TrailingInput => "unexpected trailing input",
        }
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.message(), self.label())
    }
}

impl std::error::Error for AsmError {}

impl VmDiagnostic for AsmError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn to_diagnostic(&self, _process: &Process) -> Diagnostic {
        Diagnostic::error()
            .with_message(format!("line {}: {}", self.line, self.message()))
            .with_labels(vec![Label::primary((), self.range).with_message(self.label())])
    }
}
