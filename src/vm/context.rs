use crate::common::Word;
use crate::isa::Reg;
use std::fmt;

bitflags::bitflags! {
    /// Arithmetic flags set by `cmp`. Accumulated with OR and never cleared,
    /// so bits from earlier compares persist for the rest of the run.
    pub struct ArithFlags: Word {
        const EQUAL = 1 << 0;
        const GREATER = 1 << 1;
        const LESSER = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Fault classes. Accumulated with OR, never cleared; any non-empty value
    /// stops the machine after the current tick.
    pub struct ExceptFlags: Word {
        const ADDR_FAULT = 1 << 63;
        const UNKNOWN_INSTRUCTION = 1 << 62;
        const REG_FAULT = 1 << 61;
        const ADDR_ALIGN = 1 << 60;
    }
}

/// The register context of one machine: eight general-purpose registers,
/// both flag registers, and the instruction pointer. Zeroed at startup and
/// mutated only by the execute phase of each tick.
#[derive(Debug, Clone)]
pub struct Context {
    regs: [Word; Reg::COUNT],
    pub af: ArithFlags,
    pub ef: ExceptFlags,
    pub ip: Word,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: [0; Reg::COUNT],
            af: ArithFlags::empty(),
            ef: ExceptFlags::empty(),
            ip: 0,
        }
    }

    #[must_use]
    pub fn reg(&self, reg: Reg) -> Word {
        self.regs[reg.index()]
    }

    pub fn reg_mut(&mut self, reg: Reg) -> &mut Word {
        &mut self.regs[reg.index()]
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// The dump printed at halt or fault, in fixed field order.
impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "gp0={:#018x} gp1={:#018x} gp2={:#018x} gp3={:#018x}",
            self.reg(Reg::Gp0),
            self.reg(Reg::Gp1),
            self.reg(Reg::Gp2),
            self.reg(Reg::Gp3),
        )?;
        writeln!(
            f,
            "gp4={:#018x} gp5={:#018x} gp6={:#018x} gp7={:#018x}",
            self.reg(Reg::Gp4),
            self.reg(Reg::Gp5),
            self.reg(Reg::Gp6),
            self.reg(Reg::Gp7),
        )?;
        writeln!(
            f,
            "af={:#018x} ef={:#018x} ip={:#018x}",
            self.af.bits(),
            self.ef.bits(),
            self.ip,
        )
    }
}
