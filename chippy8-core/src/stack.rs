use crate::MachineError;

pub const STACK_DEPTH: usize = 16;

/// Return addresses for subroutine calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStack {
    stack: [u16; STACK_DEPTH],
    stack_pointer: usize,
}

impl CallStack {
    /// Pushes the address of a CALL instruction.
    pub fn push(&mut self, address: u16) -> Result<(), MachineError> {
        if self.stack_pointer == STACK_DEPTH {
            return Err(MachineError::StackOverflow { address });
        }
        self.stack[self.stack_pointer] = address;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.stack_pointer == 0 {
            return None;
        }
        self.stack_pointer -= 1;
        Some(self.stack[self.stack_pointer])
    }

    pub fn depth(&self) -> usize {
        self.stack_pointer
    }

    pub fn is_full(&self) -> bool {
        self.stack_pointer == STACK_DEPTH
    }
}
