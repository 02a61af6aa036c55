use crate::{
    CallStack, Framebuffer, KeypadState, MachineError, MemoryBank, RegisterFile, TimerBank,
};

/// All machine state. Created once in reset state and mutated in place by
/// `Interpreter::cycle`.
#[derive(Clone, Default)]
pub struct Machine {
    pub memory: MemoryBank,
    pub registers: RegisterFile,
    pub stack: CallStack,
    pub timers: TimerBank,
    pub display: Framebuffer,
    pub keypad: KeypadState,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: &[u8]) -> Result<Self, MachineError> {
        let mut machine = Self::new();
        machine.load_program(program)?;
        Ok(machine)
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<(), MachineError> {
        self.memory.load_program(program)?;
        log::debug!("loaded {} byte program", program.len());
        Ok(())
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set_key(key, pressed);
    }

    pub fn program_counter(&self) -> u16 {
        self.registers.program_counter
    }

    pub fn register(&self, register_index: u8) -> u8 {
        self.registers.register(register_index)
    }
}
