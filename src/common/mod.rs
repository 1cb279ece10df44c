pub mod config;

/// The machine word. Registers, flag registers, and the instruction pointer
/// are all this wide.
pub type Word = u64;
