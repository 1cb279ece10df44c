mod context;
mod debug;
mod error;
mod run;

pub use context::{ArithFlags, Context, ExceptFlags};
pub use debug::{disassemble, disassemble_instruction};
pub use error::LoadError;
pub use run::{Vm, MEMORY_SIZE};
