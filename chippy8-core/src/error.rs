use std::io;

/// Everything that can go wrong while loading or running a program.
#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    #[error("program is too large ({size} bytes), max size is {max_size} bytes")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("stack overflow: call at {address:#05X} exceeds 16 nested subroutines")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return at {address:#05X} with no pending call")]
    StackUnderflow { address: u16 },

    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl MachineError {
    /// Whether execution has no well-defined way to continue.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, MachineError::UnknownOpcode { .. })
    }
}
