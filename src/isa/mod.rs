mod instruction;
mod opcode;
mod reg;

pub use instruction::{Instruction, INSTRUCTION_SIZE};
pub use opcode::Opcode;
pub use reg::Reg;
