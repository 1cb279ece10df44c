use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Operation kinds, in wire order. The discriminant is the 16-bit opcode
/// field of an encoded instruction, so the order below is part of the binary
/// contract and must not change.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum Opcode {
    // hlt
    Hlt = 0,
    // nop
    Nop,
    // cmp REG1, REG2
    Cmp,
    // add REG1, REG2
    Add,
    // sub REG1, REG2
    Sub,
    // mul REG1, REG2
    Mul,
    // div REG1, REG2
    Div,
    // and REG1, REG2
    And,
    // or REG1, REG2
    Or,
    // xor REG1, REG2
    Xor,
    // not REG
    Not,
    // jmp REG
    Jmp,
    // jeq REG
    Jeq,
    // Reserved: no mnemonic, no handler.
    Jne,
    // jlt REG
    Jlt,
    // jle REG
    Jle,
    // jgt REG
    Jgt,
    // jge REG
    Jge,
    // mov REG, IMM
    Mov,
    // sto REG, IMM
    Sto,
    // Reserved: no mnemonic, no handler.
    Loa,
    // Reserved: no mnemonic, no handler.
    Sip,
    // ior REG
    Ior,
    // iow REG
    Iow,
}

impl Opcode {
    pub fn as_str(self) -> &'static str {
        use Opcode::*;

        match self {
            Hlt => "hlt",
            Nop => "nop",
            Cmp => "cmp",
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Div => "div",
            And => "and",
            Or => "or",
            Xor => "xor",
            Not => "not",
            Jmp => "jmp",
            Jeq => "jeq",
            Jne => "jne",
            Jlt => "jlt",
            Jle => "jle",
            Jgt => "jgt",
            Jge => "jge",
            Mov => "mov",
            Sto => "sto",
            Loa => "loa",
            Sip => "sip",
            Ior => "ior",
            Iow => "iow",
        }
    }
}
