use crate::common::Word;
use crate::isa::{Instruction, Reg, INSTRUCTION_SIZE};
use std::fmt::{self, Write};

enum Arg {
    Reg(u8),
    Imm(u32),
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg(mask) => match Reg::from_mask(*mask) {
                Some(reg) => write!(f, "{}", reg.name()),
                None => write!(f, "reg({mask:#04x})"),
            },
            Self::Imm(imm) => write!(f, "{imm:#x}"),
        }
    }
}

/// Renders the instruction at `addr` into `buf`, one line, no trailing
/// newline. Raw opcode values that decode to nothing are printed field by
/// field instead of being rejected.
pub fn disassemble_instruction(addr: Word, isn: Instruction, buf: &mut String) {
    use crate::isa::Opcode::*;

    let _ = write!(buf, "{addr:#010x} | ");
    let op = match isn.opcode() {
        Some(op) => op,
        None => {
            let _ = write!(
                buf,
                "???  op={:#06x} reg1={:#04x} reg2={:#04x} imm={:#x}",
                isn.op, isn.reg1, isn.reg2, isn.imm
            );
            return;
        }
    };

    let _ = write!(buf, "{:<4}", op.as_str());
    match op {
        Hlt | Nop => {}
        Cmp | Add | Sub | Mul | Div | And | Or | Xor => {
            let _ = write!(buf, " {:?}, {:?}", Arg::Reg(isn.reg1), Arg::Reg(isn.reg2));
        }
        Not | Jmp | Jeq | Jlt | Jle | Jgt | Jge | Ior | Iow => {
            let _ = write!(buf, " {:?}", Arg::Reg(isn.reg1));
        }
        Mov | Sto => {
            let _ = write!(buf, " {:?}, {:?}", Arg::Reg(isn.reg1), Arg::Imm(isn.imm));
        }
        Jne | Loa | Sip => {
            let _ = write!(buf, " (reserved)");
        }
    }
}

/// Disassembles a whole image, one instruction per line. Trailing bytes that
/// do not fill an instruction are ignored.
#[must_use]
pub fn disassemble(image: &[u8]) -> String {
    let mut buf = String::new();

    for (i, chunk) in image.chunks_exact(INSTRUCTION_SIZE).enumerate() {
        let mut bytes = [0; INSTRUCTION_SIZE];
        bytes.copy_from_slice(chunk);
        let addr = (i * INSTRUCTION_SIZE) as Word;
        disassemble_instruction(addr, Instruction::decode(bytes), &mut buf);
        buf.push('\n');
    }

    buf.pop();
    buf
}
