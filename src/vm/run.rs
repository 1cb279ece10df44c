#![allow(clippy::cast_possible_truncation)]

use crate::{
    common::{config::RunConfig, Word},
    isa::{Instruction, Opcode, Reg, INSTRUCTION_SIZE},
    vm::{disassemble_instruction, ArithFlags, Context, ExceptFlags, LoadError},
};
use std::io::{Read, Write};

/// The size of the flat address space.
pub const MEMORY_SIZE: usize = 16 * 1024 * 1024;

/// Whether `addr` can hold a whole instruction within the address space.
fn valid_addr(addr: Word) -> bool {
    addr.checked_add(INSTRUCTION_SIZE as Word - 1)
        .map_or(false, |end| end < MEMORY_SIZE as Word)
}

/// One virtual machine: register context, flat memory, a halt latch, and the
/// two byte streams used by `ior`/`iow`. Instances own all of their state,
/// so independent machines can run side by side.
pub struct Vm<In, Out> {
    ctx: Context,
    mem: Vec<u8>,
    halted: bool,
    input: In,
    output: Out,
    config: RunConfig,
}

impl<In: Read, Out: Write> Vm<In, Out> {
    #[must_use]
    pub fn new(input: In, output: Out, config: RunConfig) -> Self {
        Self {
            ctx: Context::new(),
            mem: vec![0; MEMORY_SIZE],
            halted: false,
            input,
            output,
            config,
        }
    }

    /// Copies a binary image to address 0. An image larger than the address
    /// space is rejected rather than truncated.
    pub fn load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() > MEMORY_SIZE {
            return Err(LoadError::ImageTooLarge { len: image.len() });
        }
        self.mem[..image.len()].copy_from_slice(image);
        Ok(())
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    #[must_use]
    pub fn memory(&self) -> &[u8] {
        &self.mem
    }

    /// Runs ticks until the halt opcode latches or any exception flag is
    /// set. Faults are always fatal; there is no handler or recovery path.
    pub fn run(&mut self) {
        while !self.halted {
            self.tick();
            if !self.ctx.ef.is_empty() {
                self.halted = true;
            }
        }
        drop(self.output.flush());
    }

    /// One fetch-decode-execute step.
    fn tick(&mut self) {
        let ip = self.ctx.ip;
        if !valid_addr(ip) {
            self.ctx.ef |= ExceptFlags::ADDR_FAULT;
            return;
        }
        if ip % INSTRUCTION_SIZE as Word != 0 {
            self.ctx.ef |= ExceptFlags::ADDR_ALIGN;
            return;
        }

        let at = ip as usize;
        let mut bytes = [0; INSTRUCTION_SIZE];
        bytes.copy_from_slice(&self.mem[at..at + INSTRUCTION_SIZE]);
        let isn = Instruction::decode(bytes);

        // The pointer advances before execution, so jump targets are
        // absolute addresses rather than offsets from the jump itself.
        self.ctx.ip += INSTRUCTION_SIZE as Word;

        if self.config.trace_execution {
            let mut buf = String::new();
            disassemble_instruction(ip, isn, &mut buf);
            eprintln!("{buf}");
        }

        match isn.opcode() {
            Some(Opcode::Hlt) => self.halted = true,
            Some(Opcode::Nop) => {}
            Some(Opcode::Cmp) => self.op_cmp(isn),
            Some(Opcode::Add) => self.op_arith(isn, Word::wrapping_add),
            Some(Opcode::Sub) => self.op_arith(isn, Word::wrapping_sub),
            Some(Opcode::Mul) => self.op_arith(isn, Word::wrapping_mul),
            Some(Opcode::Div) => self.op_div(isn),
            Some(Opcode::And) => self.op_arith(isn, |a, b| a & b),
            Some(Opcode::Or) => self.op_arith(isn, |a, b| a | b),
            Some(Opcode::Xor) => self.op_arith(isn, |a, b| a ^ b),
            Some(Opcode::Not) => self.op_not(isn),
            Some(Opcode::Jmp) => self.op_jump(isn, None),
            Some(Opcode::Jeq) => self.op_jump(isn, Some(ArithFlags::EQUAL)),
            Some(Opcode::Jlt) => self.op_jump(isn, Some(ArithFlags::LESSER)),
            Some(Opcode::Jle) => {
                self.op_jump(isn, Some(ArithFlags::LESSER | ArithFlags::EQUAL));
            }
            Some(Opcode::Jgt) => self.op_jump(isn, Some(ArithFlags::GREATER)),
            // TODO(control flow): jge tests the same flag set as jle.
            // Confirm whether the condition should be GREATER | EQUAL before
            // changing it; existing programs may rely on this.
            Some(Opcode::Jge) => {
                self.op_jump(isn, Some(ArithFlags::LESSER | ArithFlags::EQUAL));
            }
            Some(Opcode::Mov) => self.op_mov(isn),
            Some(Opcode::Sto) => self.op_sto(isn),
            Some(Opcode::Ior) => self.op_ior(isn),
            Some(Opcode::Iow) => self.op_iow(isn),
            // Reserved opcodes decode but have no handler.
            Some(Opcode::Jne | Opcode::Loa | Opcode::Sip) | None => {
                self.ctx.ef |= ExceptFlags::UNKNOWN_INSTRUCTION;
            }
        }
    }

    /// Resolves a one-hot wire mask, recording a register fault on any other
    /// byte value. The faulting operation then does nothing for the tick.
    fn resolve(&mut self, mask: u8) -> Option<Reg> {
        let reg = Reg::from_mask(mask);
        if reg.is_none() {
            self.ctx.ef |= ExceptFlags::REG_FAULT;
        }
        reg
    }

    fn op_cmp(&mut self, isn: Instruction) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };
        let reg2 = match self.resolve(isn.reg2) {
            Some(reg) => reg,
            None => return,
        };

        let (a, b) = (self.ctx.reg(reg1), self.ctx.reg(reg2));
        self.ctx.af |= if a > b {
            ArithFlags::GREATER
        } else if a < b {
            ArithFlags::LESSER
        } else {
            ArithFlags::EQUAL
        };
    }

    fn op_arith(&mut self, isn: Instruction, f: impl FnOnce(Word, Word) -> Word) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };
        let reg2 = match self.resolve(isn.reg2) {
            Some(reg) => reg,
            None => return,
        };

        *self.ctx.reg_mut(reg1) = f(self.ctx.reg(reg1), self.ctx.reg(reg2));
    }

    fn op_div(&mut self, isn: Instruction) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };
        let reg2 = match self.resolve(isn.reg2) {
            Some(reg) => reg,
            None => return,
        };

        // Division by zero saturates the destination.
        let divisor = self.ctx.reg(reg2);
        *self.ctx.reg_mut(reg1) = self.ctx.reg(reg1).checked_div(divisor).unwrap_or(Word::MAX);
    }

    fn op_not(&mut self, isn: Instruction) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };

        *self.ctx.reg_mut(reg1) = !self.ctx.reg(reg1);
    }

    fn op_jump(&mut self, isn: Instruction, condition: Option<ArithFlags>) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };

        if condition.map_or(true, |flags| self.ctx.af.intersects(flags)) {
            self.ctx.ip = self.ctx.reg(reg1);
        }
    }

    fn op_mov(&mut self, isn: Instruction) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };

        *self.ctx.reg_mut(reg1) = Word::from(isn.imm);
    }

    fn op_sto(&mut self, isn: Instruction) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };

        // Store targets are validated like the fetch path: aligned first,
        // then in bounds.
        let addr = Word::from(isn.imm);
        if addr % INSTRUCTION_SIZE as Word != 0 {
            self.ctx.ef |= ExceptFlags::ADDR_ALIGN;
            return;
        }
        if !valid_addr(addr) {
            self.ctx.ef |= ExceptFlags::ADDR_FAULT;
            return;
        }

        let at = addr as usize;
        let bytes = self.ctx.reg(reg1).to_le_bytes();
        self.mem[at..at + bytes.len()].copy_from_slice(&bytes);
    }

    fn op_ior(&mut self, isn: Instruction) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };

        // End of stream (and read errors) read as an all-ones word, keeping
        // the operation total.
        let mut byte = [0; 1];
        *self.ctx.reg_mut(reg1) = match self.input.read_exact(&mut byte) {
            Ok(()) => Word::from(byte[0]),
            Err(_) => Word::MAX,
        };
    }

    fn op_iow(&mut self, isn: Instruction) {
        let reg1 = match self.resolve(isn.reg1) {
            Some(reg) => reg,
            None => return,
        };

        let byte = self.ctx.reg(reg1) as u8;
        drop(self.output.write_all(&[byte]));
    }
}
