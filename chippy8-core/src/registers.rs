pub const FLAG_REGISTER: u8 = 0xF;

/// V0..VF, the index register and the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    pub data_registers: [u8; 16],
    pub index_register: u16,
    pub program_counter: u16,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            data_registers: [0; 16],
            index_register: 0,
            program_counter: crate::memory::PROGRAM_START,
        }
    }
}

impl RegisterFile {
    pub fn register(&self, register_index: u8) -> u8 {
        self.data_registers[(register_index & 0xF) as usize]
    }

    pub fn register_mut(&mut self, register_index: u8) -> &mut u8 {
        &mut self.data_registers[(register_index & 0xF) as usize]
    }

    pub fn set_flag(&mut self, flag: bool) {
        *self.register_mut(FLAG_REGISTER) = flag as u8;
    }

    pub fn flag(&self) -> u8 {
        self.register(FLAG_REGISTER)
    }

    pub fn advance(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2);
    }

    pub fn skip_if(&mut self, condition: bool) {
        self.advance();
        if condition {
            self.advance();
        }
    }
}
