use crate::isa::{Opcode, Reg};

/// Every instruction occupies exactly this many bytes, both in the binary
/// image and in machine memory.
pub const INSTRUCTION_SIZE: usize = 8;

/// The unpacked fields of one instruction.
///
/// The opcode is kept as its raw 16-bit value so that `decode` is pure and
/// total over every 8-byte input; whether the value names a real operation
/// is discovered by the execution dispatch, not here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Instruction {
    pub op: u16,
    /// One-hot register mask; the destination by convention.
    pub reg1: u8,
    /// One-hot register mask.
    pub reg2: u8,
    pub imm: u32,
}

impl Instruction {
    #[must_use]
    pub fn nullary(op: Opcode) -> Self {
        Self {
            op: op.into(),
            reg1: 0,
            reg2: 0,
            imm: 0,
        }
    }

    #[must_use]
    pub fn unary(op: Opcode, reg1: Reg) -> Self {
        Self {
            reg1: reg1.mask(),
            ..Self::nullary(op)
        }
    }

    #[must_use]
    pub fn binary(op: Opcode, reg1: Reg, reg2: Reg) -> Self {
        Self {
            reg1: reg1.mask(),
            reg2: reg2.mask(),
            ..Self::nullary(op)
        }
    }

    #[must_use]
    pub fn with_imm(op: Opcode, reg1: Reg, imm: u32) -> Self {
        Self {
            reg1: reg1.mask(),
            imm,
            ..Self::nullary(op)
        }
    }

    /// The decoded operation, if the raw opcode value names one.
    #[must_use]
    pub fn opcode(self) -> Option<Opcode> {
        Opcode::try_from(self.op).ok()
    }

    /// Packs the fields into the wire layout:
    ///
    /// ```text
    /// immediate value     | opcode    | registers
    /// -------------------------------------------
    /// IM   IM   IM   IM   | OP   OP   | RG1  RG2
    /// 63                 32          16    8    0
    /// ```
    ///
    /// The resulting word is emitted little-endian.
    #[must_use]
    pub fn encode(self) -> [u8; INSTRUCTION_SIZE] {
        let word = u64::from(self.imm) << 32
            | u64::from(self.op) << 16
            | u64::from(self.reg1) << 8
            | u64::from(self.reg2);
        word.to_le_bytes()
    }

    /// The inverse of `encode`. Total: no 8-byte input is rejected.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn decode(bytes: [u8; INSTRUCTION_SIZE]) -> Self {
        let word = u64::from_le_bytes(bytes);
        Self {
            op: (word >> 16) as u16,
            reg1: (word >> 8) as u8,
            reg2: word as u8,
            imm: (word >> 32) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPCODES: [Opcode; 24] = [
        Opcode::Hlt,
        Opcode::Nop,
        Opcode::Cmp,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Not,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Jlt,
        Opcode::Jle,
        Opcode::Jgt,
        Opcode::Jge,
        Opcode::Mov,
        Opcode::Sto,
        Opcode::Loa,
        Opcode::Sip,
        Opcode::Ior,
        Opcode::Iow,
    ];

    #[test]
    fn round_trip_every_opcode_and_mask() {
        let imms = [0, 1, 5, 0x7fff_ffff, 0x8000_0000, u32::MAX];
        for op in OPCODES {
            for reg1 in Reg::ALL {
                for reg2 in Reg::ALL {
                    for imm in imms {
                        let isn = Instruction {
                            op: op.into(),
                            reg1: reg1.mask(),
                            reg2: reg2.mask(),
                            imm,
                        };
                        assert_eq!(Instruction::decode(isn.encode()), isn);
                    }
                }
            }
        }
    }

    #[test]
    fn layout_is_byte_exact() {
        // mov gp0, 0x5: opcode 18, reg1 mask 0x01.
        let isn = Instruction::with_imm(Opcode::Mov, Reg::Gp0, 0x5);
        assert_eq!(isn.encode(), [0x00, 0x01, 0x12, 0x00, 0x05, 0x00, 0x00, 0x00]);

        // cmp gp7, gp1: opcode 2, masks 0x80 and 0x02.
        let isn = Instruction::binary(Opcode::Cmp, Reg::Gp7, Reg::Gp1);
        assert_eq!(isn.encode(), [0x02, 0x80, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn decode_is_total_over_garbage() {
        let isn = Instruction::decode([0xff; INSTRUCTION_SIZE]);
        assert_eq!(isn.op, 0xffff);
        assert_eq!(isn.opcode(), None);
        assert_eq!(isn.encode(), [0xff; INSTRUCTION_SIZE]);
    }

    #[test]
    fn all_zero_bytes_decode_to_hlt() {
        let isn = Instruction::decode([0; INSTRUCTION_SIZE]);
        assert_eq!(isn.opcode(), Some(Opcode::Hlt));
    }
}
