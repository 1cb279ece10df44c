use crate::vm::MEMORY_SIZE;
use std::fmt;

/// Errors raised while loading a binary image, before execution begins.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LoadError {
    /// The image does not fit in the address space. Oversized images are
    /// rejected outright rather than silently truncated.
    ImageTooLarge { len: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageTooLarge { len } => write!(
                f,
                "image is {len} bytes but the address space holds {MEMORY_SIZE}"
            ),
        }
    }
}

impl std::error::Error for LoadError {}
