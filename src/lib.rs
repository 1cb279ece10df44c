#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::match_same_arms,
    clippy::enum_glob_use
)]

mod asm;
mod common;
mod isa;
mod vm;

pub use asm::{assemble, AsmError, AsmErrorKind, TokenKind};
pub use common::{
    config::{Diagnostic, Process, RunConfig, VmDiagnostic},
    Word,
};
pub use isa::{Instruction, Opcode, Reg, INSTRUCTION_SIZE};
pub use vm::{
    disassemble, disassemble_instruction, ArithFlags, Context, ExceptFlags, LoadError, Vm,
    MEMORY_SIZE,
};
